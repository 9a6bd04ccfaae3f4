// Scroll Nav
// Prev/next visibility and paging for an overflowing tab strip

use super::scroll_measurer::{GeometrySnapshot, ScrollMeasurer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollNavState {
    /// Everything fits; both controls hidden, offset pinned to 0
    NoOverflow,
    /// Offset 0, more content after the viewport
    OverflowAtStart,
    /// Content hidden on both sides
    OverflowMiddle,
    /// Offset at max, more content before the viewport
    OverflowAtEnd,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollNav {
    offset: u16,
    max_offset: u16,
    viewport_extent: u16,
}

impl ScrollNav {
    pub fn new() -> Self {
        Self {
            offset: 0,
            max_offset: 0,
            viewport_extent: 0,
        }
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn max_offset(&self) -> u16 {
        self.max_offset
    }

    pub fn state(&self) -> ScrollNavState {
        if self.max_offset == 0 {
            ScrollNavState::NoOverflow
        } else if self.offset == 0 {
            ScrollNavState::OverflowAtStart
        } else if self.offset >= self.max_offset {
            ScrollNavState::OverflowAtEnd
        } else {
            ScrollNavState::OverflowMiddle
        }
    }

    pub fn is_overflowing(&self) -> bool {
        self.state() != ScrollNavState::NoOverflow
    }

    pub fn prev_visible(&self) -> bool {
        matches!(self.state(), ScrollNavState::OverflowMiddle | ScrollNavState::OverflowAtEnd)
    }

    pub fn next_visible(&self) -> bool {
        matches!(self.state(), ScrollNavState::OverflowAtStart | ScrollNavState::OverflowMiddle)
    }

    /// Re-derive bounds from a fresh measurement. Returns the resulting state.
    pub fn sync(&mut self, snapshot: &GeometrySnapshot) -> ScrollNavState {
        let before = self.state();
        self.viewport_extent = snapshot.viewport_extent;
        if ScrollMeasurer::can_scroll(snapshot) {
            self.max_offset = snapshot.max_offset();
            self.offset = self.offset.min(self.max_offset);
        } else {
            self.max_offset = 0;
            self.offset = 0;
        }

        let after = self.state();
        if before != after {
            tracing::debug!(
                ?before,
                ?after,
                content = snapshot.container_scroll_extent,
                viewport = snapshot.viewport_extent,
                "Scroll nav state changed"
            );
        }
        after
    }

    /// One page is the visible viewport length
    pub fn page_step(&self) -> u16 {
        self.viewport_extent.max(1)
    }

    /// Scroll one page towards the end. Returns true if the offset moved.
    pub fn next(&mut self) -> bool {
        self.set_offset(self.offset.saturating_add(self.page_step()))
    }

    /// Scroll one page towards the start. Returns true if the offset moved.
    pub fn prev(&mut self) -> bool {
        self.set_offset(self.offset.saturating_sub(self.page_step()))
    }

    /// Smallest offset change that shows the whole tab span.
    /// A tab longer than the viewport is aligned to its start.
    pub fn scroll_into_view(&mut self, tab_offset: u16, tab_extent: u16) -> bool {
        if self.max_offset == 0 {
            return false;
        }
        let view_end = self.offset as u32 + self.viewport_extent as u32;
        let tab_end = tab_offset as u32 + tab_extent as u32;

        if tab_offset < self.offset || tab_extent > self.viewport_extent {
            self.set_offset(tab_offset)
        } else if tab_end > view_end {
            let target = tab_end - self.viewport_extent as u32;
            self.set_offset(target.min(u16::MAX as u32) as u16)
        } else {
            false
        }
    }

    fn set_offset(&mut self, offset: u16) -> bool {
        let clamped = offset.min(self.max_offset);
        if clamped == self.offset {
            return false;
        }
        self.offset = clamped;
        true
    }
}

impl Default for ScrollNav {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(content: u16, viewport: u16) -> GeometrySnapshot {
        GeometrySnapshot {
            container_scroll_extent: content,
            viewport_extent: viewport,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_overflow_hides_both() {
        let mut nav = ScrollNav::new();
        assert_eq!(nav.sync(&snapshot(40, 40)), ScrollNavState::NoOverflow);
        assert!(!nav.prev_visible());
        assert!(!nav.next_visible());
        assert!(!nav.next());
        assert_eq!(nav.offset(), 0);
    }

    #[test]
    fn test_paging_walks_through_states() {
        let mut nav = ScrollNav::new();
        assert_eq!(nav.sync(&snapshot(100, 40)), ScrollNavState::OverflowAtStart);
        assert!(nav.next_visible() && !nav.prev_visible());

        assert!(nav.next());
        assert_eq!(nav.offset(), 40);
        assert_eq!(nav.state(), ScrollNavState::OverflowMiddle);
        assert!(nav.next_visible() && nav.prev_visible());

        assert!(nav.next());
        assert_eq!(nav.offset(), 60); // clamped to max
        assert_eq!(nav.state(), ScrollNavState::OverflowAtEnd);
        assert!(!nav.next_visible() && nav.prev_visible());
        assert!(!nav.next());

        assert!(nav.prev());
        assert_eq!(nav.offset(), 20);
        assert!(nav.prev());
        assert_eq!(nav.offset(), 0);
        assert!(!nav.prev());
    }

    #[test]
    fn test_shrinking_content_clamps_and_resets() {
        let mut nav = ScrollNav::new();
        nav.sync(&snapshot(100, 40));
        nav.next();
        nav.next();
        assert_eq!(nav.offset(), 60);

        assert_eq!(nav.sync(&snapshot(70, 40)), ScrollNavState::OverflowAtEnd);
        assert_eq!(nav.offset(), 30);

        assert_eq!(nav.sync(&snapshot(35, 40)), ScrollNavState::NoOverflow);
        assert_eq!(nav.offset(), 0);
    }

    #[test]
    fn test_scroll_into_view() {
        let mut nav = ScrollNav::new();
        nav.sync(&snapshot(100, 40));

        // already visible
        assert!(!nav.scroll_into_view(10, 8));
        // past the right edge: align the tab end with the viewport end
        assert!(nav.scroll_into_view(50, 8));
        assert_eq!(nav.offset(), 18);
        // before the left edge: align the tab start
        assert!(nav.scroll_into_view(4, 8));
        assert_eq!(nav.offset(), 4);
    }
}
