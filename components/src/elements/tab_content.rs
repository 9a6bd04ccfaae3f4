// Tab Content Component
// Renders the pane matching the active key

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::core::{RectRegistry, TabDescriptor};
use crate::utilities::{ClassNames, TabPalette};

/// A tab label plus the body shown while it is active
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabPane {
    pub descriptor: TabDescriptor,
    pub content: String,
}

impl TabPane {
    pub fn new(key: impl Into<String>, tab: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            descriptor: TabDescriptor::new(key, tab),
            content: content.into(),
        }
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.descriptor.disabled = disabled;
        self
    }

    pub fn key(&self) -> &str {
        &self.descriptor.key
    }
}

pub trait TabContent {
    /// Paint the active pane into `area`. Nothing is painted when `active_key`
    /// matches no pane.
    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        active_key: Option<&str>,
        panes: &[TabPane],
        names: &ClassNames,
        registry: &mut RectRegistry,
    );
}

/// Bordered paragraph view of the active pane
pub struct TabContentPane {
    bordered: bool,
    palette: TabPalette,
}

impl TabContentPane {
    pub fn new() -> Self {
        Self {
            bordered: true,
            palette: TabPalette::default(),
        }
    }

    pub fn with_border(mut self, bordered: bool) -> Self {
        self.bordered = bordered;
        self
    }

    pub fn with_palette(mut self, palette: TabPalette) -> Self {
        self.palette = palette;
        self
    }
}

impl Default for TabContentPane {
    fn default() -> Self {
        Self::new()
    }
}

impl TabContent for TabContentPane {
    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        active_key: Option<&str>,
        panes: &[TabPane],
        names: &ClassNames,
        registry: &mut RectRegistry,
    ) {
        // first match wins for duplicate keys
        let active = active_key.and_then(|key| panes.iter().find(|p| p.key() == key));

        let Some(pane) = active else {
            registry.unregister_by_name(&names.content());
            return;
        };
        registry.register(Some(names.content().as_str()), area);

        let mut paragraph = Paragraph::new(pane.content.as_str())
            .style(Style::default().fg(self.palette.text))
            .wrap(Wrap { trim: false });
        if self.bordered {
            paragraph = paragraph.block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.palette.muted)),
            );
        }
        frame.render_widget(paragraph, area);
    }
}
