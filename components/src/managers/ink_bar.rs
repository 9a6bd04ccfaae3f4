// Ink Bar Positioner
// Places the active-tab indicator from the active tab's registered geometry

use crate::core::{RectMetrics, RectRegistry, TabBarPosition};
use crate::utilities::ClassNames;

/// Indicator span along the strip axis, in the same cells as the tab geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkBarGeometry {
    pub offset: u16,
    pub extent: u16,
}

/// Display toggle of the indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InkBarStyle {
    Block(InkBarGeometry),
    None,
}

impl InkBarStyle {
    pub fn is_visible(&self) -> bool {
        matches!(self, InkBarStyle::Block(_))
    }

    pub fn geometry(&self) -> Option<InkBarGeometry> {
        match self {
            InkBarStyle::Block(geometry) => Some(*geometry),
            InkBarStyle::None => None,
        }
    }

    /// CSS-style display value
    pub fn display(&self) -> &'static str {
        match self {
            InkBarStyle::Block(_) => "block",
            InkBarStyle::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InkBarPositioner {
    style: InkBarStyle,
}

impl InkBarPositioner {
    pub fn new() -> Self {
        Self { style: InkBarStyle::None }
    }

    pub fn style(&self) -> InkBarStyle {
        self.style
    }

    /// x/width for top and bottom bars, y/height for left and right bars
    pub fn compute_position(tab: RectMetrics, position: TabBarPosition) -> InkBarGeometry {
        let axis = position.axis();
        InkBarGeometry {
            offset: tab.start(axis),
            extent: tab.extent(axis),
        }
    }

    /// Hidden when there is no active key or it matches no registered tab
    pub fn is_visible(active_key: Option<&str>, registry: &RectRegistry, names: &ClassNames) -> bool {
        Self::active_tab(active_key, registry, names).is_some()
    }

    fn active_tab(active_key: Option<&str>, registry: &RectRegistry, names: &ClassNames) -> Option<RectMetrics> {
        active_key
            .and_then(|key| registry.get_metrics_by_name(&names.tab_node(key)))
            .filter(|m| !m.is_empty())
    }

    /// Recompute from the registry. Returns true if the style changed.
    pub fn update(
        &mut self,
        active_key: Option<&str>,
        position: TabBarPosition,
        registry: &RectRegistry,
        names: &ClassNames,
    ) -> bool {
        let next = match Self::active_tab(active_key, registry, names) {
            Some(tab) => InkBarStyle::Block(Self::compute_position(tab, position)),
            None => InkBarStyle::None,
        };
        if next == self.style {
            return false;
        }
        tracing::trace!(?next, ?active_key, "Ink bar moved");
        self.style = next;
        true
    }
}

impl Default for InkBarPositioner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    #[test]
    fn test_compute_position_follows_orientation() {
        let tab = RectMetrics { x: 12, y: 3, width: 7, height: 1 };
        assert_eq!(
            InkBarPositioner::compute_position(tab, TabBarPosition::Bottom),
            InkBarGeometry { offset: 12, extent: 7 }
        );
        assert_eq!(
            InkBarPositioner::compute_position(tab, TabBarPosition::Left),
            InkBarGeometry { offset: 3, extent: 1 }
        );
    }

    #[test]
    fn test_update_shows_and_hides() {
        let names = ClassNames::default();
        let mut registry = RectRegistry::new();
        registry.register(Some(names.tab_node("1").as_str()), Rect::new(2, 0, 7, 1));

        let mut ink = InkBarPositioner::new();
        assert!(ink.update(Some("1"), TabBarPosition::Top, &registry, &names));
        assert_eq!(ink.style(), InkBarStyle::Block(InkBarGeometry { offset: 2, extent: 7 }));
        assert_eq!(ink.style().display(), "block");
        // same inputs, same result
        assert!(!ink.update(Some("1"), TabBarPosition::Top, &registry, &names));

        assert!(ink.update(Some("-1"), TabBarPosition::Top, &registry, &names));
        assert_eq!(ink.style(), InkBarStyle::None);
        assert!(!InkBarPositioner::is_visible(None, &registry, &names));
    }
}
