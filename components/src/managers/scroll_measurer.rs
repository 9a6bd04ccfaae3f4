// Scroll Measurer
// Reads tab strip geometry from the registry. Pure read, no caching.

use crate::core::{Axis, RectRegistry};
use crate::utilities::ClassNames;

/// Geometry of the tab strip at one point in time.
/// Extents are in cells along the strip's axis; the active tab offset is
/// relative to the start of the scrollable content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeometrySnapshot {
    /// Full length of the tab strip content
    pub container_scroll_extent: u16,
    /// Visible length of the strip viewport
    pub viewport_extent: u16,
    pub active_tab_offset: u16,
    pub active_tab_extent: u16,
    /// Whether the active key matched a registered tab node
    pub active_tab_present: bool,
}

impl GeometrySnapshot {
    /// Largest valid scroll offset
    pub fn max_offset(&self) -> u16 {
        if ScrollMeasurer::can_scroll(self) {
            self.container_scroll_extent - self.viewport_extent
        } else {
            0
        }
    }
}

pub struct ScrollMeasurer;

impl ScrollMeasurer {
    /// Measure the nav (content) and nav-wrap (viewport) nodes plus the active tab.
    /// Missing or zero-size nodes measure as zero.
    pub fn measure(registry: &RectRegistry, names: &ClassNames, active_key: Option<&str>, axis: Axis) -> GeometrySnapshot {
        let nav = registry.get_metrics_by_name(&names.nav()).filter(|m| !m.is_empty());
        let container_scroll_extent = nav
            .and_then(|_| registry.get_scroll_size_by_name(&names.nav()))
            .map(|size| size.extent(axis))
            .unwrap_or(0);

        let viewport_extent = registry
            .get_metrics_by_name(&names.nav_wrap())
            .filter(|m| !m.is_empty())
            .map(|m| m.extent(axis))
            .unwrap_or(0);

        let active_tab = active_key
            .and_then(|key| registry.get_metrics_by_name(&names.tab_node(key)))
            .filter(|m| !m.is_empty());

        let (active_tab_offset, active_tab_extent, active_tab_present) = match (active_tab, nav) {
            (Some(tab), Some(nav)) => (
                tab.start(axis).saturating_sub(nav.start(axis)),
                tab.extent(axis),
                true,
            ),
            (Some(tab), None) => (0, tab.extent(axis), true),
            _ => (0, 0, false),
        };

        GeometrySnapshot {
            container_scroll_extent,
            viewport_extent,
            active_tab_offset,
            active_tab_extent,
            active_tab_present,
        }
    }

    /// True iff content is strictly longer than a non-empty viewport
    pub fn can_scroll(snapshot: &GeometrySnapshot) -> bool {
        snapshot.viewport_extent > 0 && snapshot.container_scroll_extent > snapshot.viewport_extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScrollSize;
    use ratatui::layout::Rect;

    fn registry_with(content: u16, viewport: u16) -> (RectRegistry, ClassNames) {
        let names = ClassNames::default();
        let mut registry = RectRegistry::new();
        let nav = registry.register(Some(names.nav().as_str()), Rect::new(1, 0, viewport, 1));
        registry.set_scroll_size(nav, ScrollSize { width: content, height: 1 });
        registry.register(Some(names.nav_wrap().as_str()), Rect::new(1, 0, viewport, 1));
        (registry, names)
    }

    #[test]
    fn test_overflow_boundary_is_exclusive() {
        for (content, expected) in [(39, false), (40, false), (41, true)] {
            let (registry, names) = registry_with(content, 40);
            let snapshot = ScrollMeasurer::measure(&registry, &names, None, Axis::Horizontal);
            assert_eq!(ScrollMeasurer::can_scroll(&snapshot), expected, "content {}", content);
        }
    }

    #[test]
    fn test_unmounted_nodes_do_not_scroll() {
        let registry = RectRegistry::new();
        let snapshot = ScrollMeasurer::measure(&registry, &ClassNames::default(), Some("1"), Axis::Horizontal);
        assert_eq!(snapshot, GeometrySnapshot::default());
        assert!(!ScrollMeasurer::can_scroll(&snapshot));

        let zero_viewport = GeometrySnapshot { container_scroll_extent: 10, ..Default::default() };
        assert!(!ScrollMeasurer::can_scroll(&zero_viewport));
    }

    #[test]
    fn test_active_tab_offset_is_content_relative() {
        let (mut registry, names) = registry_with(100, 40);
        registry.register(Some(names.tab_node("7").as_str()), Rect::new(61, 0, 9, 1));

        let snapshot = ScrollMeasurer::measure(&registry, &names, Some("7"), Axis::Horizontal);
        assert!(snapshot.active_tab_present);
        assert_eq!(snapshot.active_tab_offset, 60);
        assert_eq!(snapshot.active_tab_extent, 9);
        assert_eq!(snapshot.max_offset(), 60);

        // idempotent
        assert_eq!(snapshot, ScrollMeasurer::measure(&registry, &names, Some("7"), Axis::Horizontal));
    }
}
