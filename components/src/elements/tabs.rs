// Tabs Container
// Owns the active key and the pane list, wires a tab bar to a content view

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use super::tab_bar::{RenderedBar, TabBar, TabBarProps};
use super::tab_content::{TabContent, TabPane};
use crate::core::{find_descriptor, ActiveKeyStore, MeasureReason, RectRegistry, TabBarPosition, TabDescriptor};
use crate::utilities::ClassNames;

pub type ChangeCallback = Box<dyn FnMut(&str)>;

/// Next enabled key after `active` in strip order, wrapping around.
/// Walks backwards when `forward` is false. Without a usable `active` key
/// the first enabled tab in walking order is returned.
pub fn next_enabled_key(descriptors: &[TabDescriptor], active: Option<&str>, forward: bool) -> Option<String> {
    let mut enabled: Vec<&TabDescriptor> = descriptors.iter().filter(|d| !d.disabled).collect();
    if !forward {
        enabled.reverse();
    }
    let first = enabled.first()?.key.clone();
    let next = active
        .and_then(|key| enabled.iter().position(|d| d.key == key))
        .map(|idx| enabled[(idx + 1) % enabled.len()].key.clone());
    Some(next.unwrap_or(first))
}

/// Split `area` into (bar, content) for the bar position
fn split_bar(area: Rect, position: TabBarPosition, extent: u16) -> (Rect, Rect) {
    let direction = if position.is_vertical() { Direction::Horizontal } else { Direction::Vertical };
    let bar_first = matches!(position, TabBarPosition::Top | TabBarPosition::Left);
    let constraints = if bar_first {
        [Constraint::Length(extent), Constraint::Min(0)]
    } else {
        [Constraint::Min(0), Constraint::Length(extent)]
    };
    let chunks = Layout::default().direction(direction).constraints(constraints).split(area);
    if bar_first {
        (chunks[0], chunks[1])
    } else {
        (chunks[1], chunks[0])
    }
}

pub struct Tabs {
    panes: Vec<TabPane>,
    descriptors: Vec<TabDescriptor>,
    store: ActiveKeyStore,
    position: TabBarPosition,
    names: ClassNames,
    tab_bar: Box<dyn TabBar>,
    tab_content: Box<dyn TabContent>,
    on_change: Option<ChangeCallback>,
    mounted: bool,
}

impl Tabs {
    /// Uncontrolled tabs starting on the first pane
    pub fn new(panes: Vec<TabPane>, tab_bar: impl TabBar + 'static, tab_content: impl TabContent + 'static) -> Self {
        Self::new_boxed(panes, Box::new(tab_bar), Box::new(tab_content))
    }

    pub fn new_boxed(panes: Vec<TabPane>, tab_bar: Box<dyn TabBar>, tab_content: Box<dyn TabContent>) -> Self {
        let descriptors: Vec<TabDescriptor> = panes.iter().map(|p| p.descriptor.clone()).collect();
        let store = ActiveKeyStore::uncontrolled(None, &descriptors);
        Self {
            panes,
            descriptors,
            store,
            position: TabBarPosition::default(),
            names: ClassNames::default(),
            tab_bar,
            tab_content,
            on_change: None,
            mounted: true,
        }
    }

    /// Initial key for uncontrolled tabs. Ignored once a controlled key is set.
    pub fn with_default_active_key(mut self, key: impl Into<String>) -> Self {
        if !self.store.is_controlled() {
            let key = key.into();
            self.store = ActiveKeyStore::uncontrolled(Some(key.as_str()), &self.descriptors);
        }
        self
    }

    /// Switch to controlled mode: clicks report through `on_change` only
    pub fn with_active_key(mut self, key: impl Into<String>) -> Self {
        self.store = ActiveKeyStore::controlled(Some(key.into()));
        self
    }

    pub fn with_position(mut self, position: TabBarPosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.names = ClassNames::new(prefix);
        self
    }

    pub fn with_on_change(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn active_key(&self) -> Option<&str> {
        self.store.active_key()
    }

    pub fn is_controlled(&self) -> bool {
        self.store.is_controlled()
    }

    pub fn panes(&self) -> &[TabPane] {
        &self.panes
    }

    pub fn descriptors(&self) -> &[TabDescriptor] {
        &self.descriptors
    }

    pub fn position(&self) -> TabBarPosition {
        self.position
    }

    pub fn class_names(&self) -> &ClassNames {
        &self.names
    }

    pub fn tab_bar(&self) -> &dyn TabBar {
        self.tab_bar.as_ref()
    }

    /// Structure of the last rendered bar
    pub fn rendered_bar(&self) -> &RenderedBar {
        self.tab_bar.rendered()
    }

    pub fn root_classes(&self) -> Vec<String> {
        vec![self.names.root(), self.names.position(self.position)]
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Replace the pane list (add, remove, reorder)
    pub fn set_panes(&mut self, panes: Vec<TabPane>) {
        let descriptors: Vec<TabDescriptor> = panes.iter().map(|p| p.descriptor.clone()).collect();
        let old = std::mem::replace(&mut self.descriptors, descriptors);
        self.panes = panes;
        self.store.on_descriptors_changed(&old, &self.descriptors);
        self.tab_bar.schedule_measure(MeasureReason::DescriptorsChanged);
    }

    /// New controlled value from the owner
    pub fn set_active_key(&mut self, key: Option<String>) {
        self.store.set_controlled_key(key);
    }

    pub fn set_position(&mut self, position: TabBarPosition) {
        if self.position == position {
            return;
        }
        tracing::debug!(from = %self.position, to = %position, "Tab bar position changed");
        self.position = position;
        self.tab_bar.schedule_measure(MeasureReason::PositionChanged);
    }

    /// Activate an enabled tab by key. Returns true if `on_change` fired.
    pub fn select(&mut self, key: &str) -> bool {
        match find_descriptor(&self.descriptors, key) {
            Some((_, descriptor)) if !descriptor.disabled => {}
            _ => return false,
        }
        match self.store.request_activate(key) {
            Some(changed) => {
                if let Some(callback) = self.on_change.as_mut() {
                    callback(&changed);
                }
                true
            }
            None => false,
        }
    }

    /// Keyboard navigation: move to the neighbouring enabled tab
    pub fn select_adjacent(&mut self, forward: bool) -> bool {
        match next_enabled_key(&self.descriptors, self.store.active_key(), forward) {
            Some(key) => self.select(&key),
            None => false,
        }
    }

    /// Route a terminal event. Returns true if the event was consumed.
    pub fn handle_event(&mut self, event: &Event, registry: &RectRegistry) -> bool {
        if !self.mounted {
            return false;
        }
        match event {
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                self.click(mouse.column, mouse.row, event, registry)
            }
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Right | KeyCode::Down => self.select_adjacent(true),
                KeyCode::Left | KeyCode::Up => self.select_adjacent(false),
                _ => false,
            },
            Event::Resize(..) => {
                self.tab_bar.schedule_measure(MeasureReason::Resized);
                true
            }
            _ => false,
        }
    }

    /// Click at a screen cell. Returns true if it landed on a bar control or tab.
    pub fn click(&mut self, column: u16, row: u16, event: &Event, registry: &RectRegistry) -> bool {
        let Some(hit) = self.tab_bar.hit_test(column, row, registry) else {
            return false;
        };
        if let Some(key) = self.tab_bar.handle_hit(hit, event) {
            self.select(&key);
        }
        true
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, registry: &mut RectRegistry) {
        if !self.mounted {
            tracing::trace!("Skipping render of unmounted tabs");
            return;
        }
        let props = TabBarProps {
            descriptors: &self.descriptors,
            active_key: self.store.active_key(),
            position: self.position,
            names: &self.names,
        };
        let extent = self.tab_bar.cross_extent(&props);
        let (bar_area, content_area) = split_bar(area, self.position, extent);

        registry.register(Some(self.names.root().as_str()), area);
        self.tab_bar.render(frame, bar_area, &props, registry);
        self.tab_content
            .render(frame, content_area, props.active_key, &self.panes, &self.names, registry);
    }

    /// Re-run the bar's layout effect against the current registry
    pub fn sync_layout(&mut self, registry: &RectRegistry) -> bool {
        let props = TabBarProps {
            descriptors: &self.descriptors,
            active_key: self.store.active_key(),
            position: self.position,
            names: &self.names,
        };
        self.tab_bar.sync_layout(&props, registry)
    }

    /// Run any pending deferred measurement. Returns true if a redraw is due.
    pub fn tick(&mut self, registry: &RectRegistry) -> bool {
        if !self.mounted {
            return false;
        }
        let props = TabBarProps {
            descriptors: &self.descriptors,
            active_key: self.store.active_key(),
            position: self.position,
            names: &self.names,
        };
        self.tab_bar.tick(&props, registry)
    }

    /// Cancel pending work and drop this widget's nodes from the registry
    pub fn unmount(&mut self, registry: &mut RectRegistry) {
        if !self.mounted {
            return;
        }
        self.tab_bar.teardown();
        let mut removed = registry.unregister_prefixed(&self.names.tab_node_prefix());
        for name in self.names.fixed_nodes() {
            if registry.unregister_by_name(&name) {
                removed += 1;
            }
        }
        tracing::debug!(prefix = self.names.prefix(), removed, "Tabs unmounted");
        self.mounted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptors() -> Vec<TabDescriptor> {
        vec![
            TabDescriptor::new("1", "one"),
            TabDescriptor::new("2", "two").with_disabled(true),
            TabDescriptor::new("3", "three"),
        ]
    }

    #[test]
    fn test_next_enabled_key_skips_disabled_and_wraps() {
        let d = descriptors();
        assert_eq!(next_enabled_key(&d, Some("1"), true).as_deref(), Some("3"));
        assert_eq!(next_enabled_key(&d, Some("3"), true).as_deref(), Some("1"));
        assert_eq!(next_enabled_key(&d, Some("1"), false).as_deref(), Some("3"));
        assert_eq!(next_enabled_key(&d, Some("missing"), true).as_deref(), Some("1"));
        assert_eq!(next_enabled_key(&d, None, false).as_deref(), Some("3"));
        assert_eq!(next_enabled_key(&[], Some("1"), true), None);
    }

    #[test]
    fn test_split_bar_per_position() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(split_bar(area, TabBarPosition::Top, 2), (Rect::new(0, 0, 40, 2), Rect::new(0, 2, 40, 8)));
        assert_eq!(split_bar(area, TabBarPosition::Bottom, 2), (Rect::new(0, 8, 40, 2), Rect::new(0, 0, 40, 8)));
        assert_eq!(split_bar(area, TabBarPosition::Left, 9), (Rect::new(0, 0, 9, 10), Rect::new(9, 0, 31, 10)));
        assert_eq!(split_bar(area, TabBarPosition::Right, 9), (Rect::new(31, 0, 9, 10), Rect::new(0, 0, 31, 10)));
    }
}
