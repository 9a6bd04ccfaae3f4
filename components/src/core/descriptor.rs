// Tab descriptors and bar orientation

use std::fmt;
use std::str::FromStr;

use super::error::TabsError;

/// One entry of the tab strip. Order is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabDescriptor {
    pub key: String,
    pub label: String,
    pub disabled: bool,
}

impl TabDescriptor {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            disabled: false,
        }
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Find a descriptor by key. Duplicate keys resolve to the first match.
pub fn find_descriptor<'a>(descriptors: &'a [TabDescriptor], key: &str) -> Option<(usize, &'a TabDescriptor)> {
    descriptors.iter().enumerate().find(|(_, d)| d.key == key)
}

pub fn contains_key(descriptors: &[TabDescriptor], key: &str) -> bool {
    find_descriptor(descriptors, key).is_some()
}

/// Layout axis of the tab strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Where the tab bar sits relative to the pane content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabBarPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl TabBarPosition {
    pub const ALL: [TabBarPosition; 4] = [
        TabBarPosition::Top,
        TabBarPosition::Right,
        TabBarPosition::Bottom,
        TabBarPosition::Left,
    ];

    pub fn is_vertical(self) -> bool {
        matches!(self, TabBarPosition::Left | TabBarPosition::Right)
    }

    /// Axis the tabs are laid out along
    pub fn axis(self) -> Axis {
        if self.is_vertical() {
            Axis::Vertical
        } else {
            Axis::Horizontal
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TabBarPosition::Top => "top",
            TabBarPosition::Bottom => "bottom",
            TabBarPosition::Left => "left",
            TabBarPosition::Right => "right",
        }
    }

    /// Next position in clockwise order (top, right, bottom, left)
    pub fn cycle(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for TabBarPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TabBarPosition {
    type Err = TabsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(TabBarPosition::Top),
            "bottom" => Ok(TabBarPosition::Bottom),
            "left" => Ok(TabBarPosition::Left),
            "right" => Ok(TabBarPosition::Right),
            _ => Err(TabsError::InvalidPosition(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_parsing() {
        assert_eq!("Left".parse::<TabBarPosition>(), Ok(TabBarPosition::Left));
        assert_eq!(" bottom ".parse::<TabBarPosition>(), Ok(TabBarPosition::Bottom));
        assert_eq!(
            "middle".parse::<TabBarPosition>(),
            Err(TabsError::InvalidPosition("middle".to_string()))
        );
    }

    #[test]
    fn test_axis_and_cycle() {
        assert_eq!(TabBarPosition::Top.axis(), Axis::Horizontal);
        assert_eq!(TabBarPosition::Right.axis(), Axis::Vertical);
        assert_eq!(TabBarPosition::Left.cycle(), TabBarPosition::Top);
        assert_eq!(TabBarPosition::Top.cycle(), TabBarPosition::Right);
    }

    #[test]
    fn test_duplicate_keys_first_match_wins() {
        let descriptors = vec![
            TabDescriptor::new("a", "first"),
            TabDescriptor::new("a", "second"),
        ];
        let (idx, found) = find_descriptor(&descriptors, "a").unwrap();
        assert_eq!(idx, 0);
        assert_eq!(found.label, "first");
    }
}
