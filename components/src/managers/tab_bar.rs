// Tab Bar Manager
// YAML configuration for a tabs widget and the factory that builds one from it

use std::collections::HashSet;
use std::str::FromStr;

use serde::Deserialize;

use crate::core::{TabBarPosition, TabsError};
use crate::elements::{InkTabBar, ScrollableInkTabBar, TabBarCallbacks, TabContentPane, TabPane, Tabs};
use crate::utilities::{parse_color, TabPalette, DEFAULT_PREFIX};

// ┌────────────────────────────────────────────────────────────────────────────────────────────────┐
// │                                    YAML Configuration Structures                               │
// └────────────────────────────────────────────────────────────────────────────────────────────────┘

/// Tabs widget configuration from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct TabsConfigYaml {
    /// Class and node name prefix
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// "top", "bottom", "left" or "right"
    #[serde(default = "default_position")]
    pub position: String,
    /// "ink" or "scrollable"
    #[serde(default = "default_variant")]
    pub variant: String,
    /// Spacing after each tab but the last, in cells
    pub gutter: Option<u16>,
    /// Initial key for uncontrolled tabs
    pub default_active_key: Option<String>,
    /// Fixed key; makes the tabs controlled
    pub active_key: Option<String>,
    /// Prev/next arrow icons (scrollable variant only)
    pub prev_icon: Option<String>,
    pub next_icon: Option<String>,
    /// Text shown at the end of the bar
    pub extra_content: Option<String>,
    /// Active tab and ink color (defaults to "cyan")
    #[serde(default = "default_accent")]
    pub accent: String,
    #[serde(default)]
    pub panes: Vec<PaneConfigYaml>,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_position() -> String {
    "top".to_string()
}

fn default_variant() -> String {
    "scrollable".to_string()
}

fn default_accent() -> String {
    "cyan".to_string()
}

/// Pane configuration from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct PaneConfigYaml {
    pub key: String,
    /// Tab label
    pub tab: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub disabled: bool,
}

/// Which bar implementation to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabBarVariant {
    Ink,
    #[default]
    Scrollable,
}

impl FromStr for TabBarVariant {
    type Err = TabsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ink" => Ok(TabBarVariant::Ink),
            "scrollable" => Ok(TabBarVariant::Scrollable),
            _ => Err(TabsError::InvalidVariant(s.to_string())),
        }
    }
}

/// Validated tabs configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TabsConfigData {
    pub prefix: String,
    pub position: TabBarPosition,
    pub variant: TabBarVariant,
    pub gutter: Option<u16>,
    pub default_active_key: Option<String>,
    pub active_key: Option<String>,
    pub prev_icon: Option<String>,
    pub next_icon: Option<String>,
    pub extra_content: Option<String>,
    pub palette: TabPalette,
    pub panes: Vec<TabPane>,
}

// ┌────────────────────────────────────────────────────────────────────────────────────────────────┐
// │                                    Configuration Conversion Functions                          │
// └────────────────────────────────────────────────────────────────────────────────────────────────┘

/// Convert YAML tabs configuration to validated configuration data.
/// Keys must be non-empty and unique; settings that do not apply are dropped with a warning.
pub fn convert_tabs_config(config: &TabsConfigYaml) -> Result<TabsConfigData, TabsError> {
    let position = TabBarPosition::from_str(&config.position)?;
    let variant = TabBarVariant::from_str(&config.variant)?;

    let mut seen = HashSet::new();
    for (idx, pane) in config.panes.iter().enumerate() {
        if pane.key.is_empty() {
            return Err(TabsError::EmptyKey(idx));
        }
        if !seen.insert(pane.key.as_str()) {
            return Err(TabsError::DuplicateKey(pane.key.clone()));
        }
    }

    let default_active_key = if config.active_key.is_some() && config.default_active_key.is_some() {
        tracing::warn!(prefix = %config.prefix, "'default_active_key' is ignored when 'active_key' is set");
        None
    } else {
        config.default_active_key.clone()
    };

    let (prev_icon, next_icon) = if variant == TabBarVariant::Ink {
        if config.prev_icon.is_some() || config.next_icon.is_some() {
            tracing::warn!(prefix = %config.prefix, "Arrow icons only apply to the scrollable variant. Ignoring them");
        }
        (None, None)
    } else {
        (config.prev_icon.clone(), config.next_icon.clone())
    };

    let panes = config
        .panes
        .iter()
        .map(|pane| TabPane::new(pane.key.clone(), pane.tab.clone(), pane.content.clone()).with_disabled(pane.disabled))
        .collect();

    Ok(TabsConfigData {
        prefix: config.prefix.clone(),
        position,
        variant,
        gutter: config.gutter,
        default_active_key,
        active_key: config.active_key.clone(),
        prev_icon,
        next_icon,
        extra_content: config.extra_content.clone(),
        palette: TabPalette::new(parse_color(&config.accent)),
        panes,
    })
}

/// Build a tabs widget from YAML configuration.
/// Callbacks the chosen variant does not support are dropped.
pub fn create_tabs_from_config(config: &TabsConfigYaml, callbacks: TabBarCallbacks) -> Result<Tabs, TabsError> {
    let data = convert_tabs_config(config)?;

    let content = TabContentPane::new().with_palette(data.palette);
    let tabs = match data.variant {
        TabBarVariant::Ink => {
            let mut bar = InkTabBar::new().with_palette(data.palette).with_callbacks(callbacks);
            if let Some(gutter) = data.gutter {
                bar = bar.with_gutter(gutter);
            }
            if let Some(extra) = &data.extra_content {
                bar = bar.with_extra_content(extra.clone());
            }
            Tabs::new(data.panes, bar, content)
        }
        TabBarVariant::Scrollable => {
            let mut bar = ScrollableInkTabBar::new().with_palette(data.palette).with_callbacks(callbacks);
            if let Some(gutter) = data.gutter {
                bar = bar.with_gutter(gutter);
            }
            if let Some(extra) = &data.extra_content {
                bar = bar.with_extra_content(extra.clone());
            }
            if let Some(icon) = &data.prev_icon {
                bar = bar.with_prev_icon(icon.clone());
            }
            if let Some(icon) = &data.next_icon {
                bar = bar.with_next_icon(icon.clone());
            }
            Tabs::new(data.panes, bar, content)
        }
    };

    let mut tabs = tabs.with_prefix(data.prefix).with_position(data.position);
    if let Some(key) = data.default_active_key {
        tabs = tabs.with_default_active_key(key);
    }
    if let Some(key) = data.active_key {
        tabs = tabs.with_active_key(key);
    }
    tracing::debug!(
        variant = ?data.variant,
        position = %data.position,
        panes = tabs.panes().len(),
        active = ?tabs.active_key(),
        "Created tabs from config"
    );
    Ok(tabs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> TabsConfigYaml {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse("panes:\n  - { key: a, tab: Alpha }\n  - { key: b, tab: Beta, disabled: true }\n");
        let data = convert_tabs_config(&config).unwrap();
        assert_eq!(data.position, TabBarPosition::Top);
        assert_eq!(data.variant, TabBarVariant::Scrollable);
        assert_eq!(data.prefix, DEFAULT_PREFIX);
        assert_eq!(data.gutter, None);
        assert!(data.panes[1].descriptor.disabled);
    }

    #[test]
    fn test_rejects_bad_keys_and_names() {
        let dup = parse("panes:\n  - { key: a, tab: A }\n  - { key: a, tab: B }\n");
        assert_eq!(convert_tabs_config(&dup), Err(TabsError::DuplicateKey("a".to_string())));

        let empty = parse("panes:\n  - { key: '', tab: A }\n");
        assert_eq!(convert_tabs_config(&empty), Err(TabsError::EmptyKey(0)));

        let position = parse("position: middle\n");
        assert_eq!(convert_tabs_config(&position), Err(TabsError::InvalidPosition("middle".to_string())));

        let variant = parse("variant: card\n");
        assert_eq!(convert_tabs_config(&variant), Err(TabsError::InvalidVariant("card".to_string())));
    }

    #[test]
    fn test_controlled_key_wins_over_default() {
        let config = parse(
            "active_key: b\ndefault_active_key: a\nvariant: ink\nprev_icon: '<'\npanes:\n  - { key: a, tab: A }\n  - { key: b, tab: B }\n",
        );
        let data = convert_tabs_config(&config).unwrap();
        assert_eq!(data.default_active_key, None);
        assert_eq!(data.prev_icon, None);

        let tabs = create_tabs_from_config(&config, TabBarCallbacks::default()).unwrap();
        assert!(tabs.is_controlled());
        assert_eq!(tabs.active_key(), Some("b"));
    }

    #[test]
    fn test_create_uncontrolled_with_default() {
        let config = parse("position: left\ndefault_active_key: b\npanes:\n  - { key: a, tab: A }\n  - { key: b, tab: B }\n");
        let tabs = create_tabs_from_config(&config, TabBarCallbacks::default()).unwrap();
        assert!(!tabs.is_controlled());
        assert_eq!(tabs.active_key(), Some("b"));
        assert_eq!(tabs.position(), TabBarPosition::Left);
    }
}
