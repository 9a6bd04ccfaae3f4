// Tab Bar Component
// Ink tab bars: tab layout with gutters, node registration, ink indicator and scroll arrows

use std::collections::HashSet;

use crossterm::event::Event;
use ratatui::{buffer::Buffer, layout::Rect, style::Style, Frame};

use crate::core::{Axis, DeferredTask, MeasureReason, RectRegistry, ScrollSize, TabBarPosition, TabDescriptor};
use crate::managers::{InkBarPositioner, InkBarStyle, ScrollMeasurer, ScrollNav};
use crate::utilities::{ClassNames, TabPalette};

/// Spacing after every tab but the last when no gutter is configured
pub const DEFAULT_TAB_GUTTER: u16 = 1;

/// Blank cells on each side of a horizontal tab label
const TAB_PADDING: u16 = 1;
const INK_HORIZONTAL: &str = "━";
const INK_VERTICAL: &str = "┃";

pub type TabClickCallback = Box<dyn FnMut(&str, &Event)>;
pub type NavClickCallback = Box<dyn FnMut(&Event)>;

/// Callbacks a tab bar reports user interaction through
#[derive(Default)]
pub struct TabBarCallbacks {
    pub on_tab_click: Option<TabClickCallback>,
    pub on_prev_click: Option<NavClickCallback>,
    pub on_next_click: Option<NavClickCallback>,
}

/// What the container hands to its bar every frame
#[derive(Debug, Clone, Copy)]
pub struct TabBarProps<'a> {
    pub descriptors: &'a [TabDescriptor],
    pub active_key: Option<&'a str>,
    pub position: TabBarPosition,
    pub names: &'a ClassNames,
}

// ┌─────────────────────────────────────────────────────────────┐
// │ Rendered description                                        │
// └─────────────────────────────────────────────────────────────┘

/// Trailing spacing of a tab node. Only one side is ever set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabNodeStyle {
    pub margin_right: Option<u16>,
    pub margin_bottom: Option<u16>,
}

impl TabNodeStyle {
    fn gutter(position: TabBarPosition, gutter: u16) -> Self {
        if position.is_vertical() {
            Self { margin_bottom: Some(gutter), ..Default::default() }
        } else {
            Self { margin_right: Some(gutter), ..Default::default() }
        }
    }

    pub fn trailing(&self) -> Option<u16> {
        self.margin_right.or(self.margin_bottom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabNode {
    pub key: String,
    pub label: String,
    pub classes: Vec<String>,
    pub style: TabNodeStyle,
    pub active: bool,
    pub disabled: bool,
    /// Start along the strip axis, relative to the content start
    pub offset: u16,
    pub extent: u16,
}

impl TabNode {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// A prev or next control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrowNode {
    pub classes: Vec<String>,
    pub content: String,
    pub visible: bool,
}

impl ArrowNode {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Structural description of the last rendered bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBar {
    pub root_classes: Vec<String>,
    pub tabs: Vec<TabNode>,
    pub ink_bar: InkBarStyle,
    pub prev: Option<ArrowNode>,
    pub next: Option<ArrowNode>,
    pub extra_content: Option<String>,
    pub scroll_offset: u16,
}

impl RenderedBar {
    /// First tab node with `key`
    pub fn tab(&self, key: &str) -> Option<&TabNode> {
        self.tabs.iter().find(|tab| tab.key == key)
    }

    pub fn active_tab(&self) -> Option<&TabNode> {
        self.tabs.iter().find(|tab| tab.active)
    }
}

impl Default for RenderedBar {
    fn default() -> Self {
        Self {
            root_classes: Vec::new(),
            tabs: Vec::new(),
            ink_bar: InkBarStyle::None,
            prev: None,
            next: None,
            extra_content: None,
            scroll_offset: 0,
        }
    }
}

/// Result of hit-testing a screen cell against the bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarHit {
    Tab(String),
    Prev,
    Next,
}

// ┌─────────────────────────────────────────────────────────────┐
// │ TabBar trait                                                │
// └─────────────────────────────────────────────────────────────┘

pub trait TabBar {
    /// Rows (top/bottom) or columns (left/right) the bar occupies
    fn cross_extent(&self, props: &TabBarProps<'_>) -> u16;

    /// Register nodes, run the layout effect, then paint
    fn render(&mut self, frame: &mut Frame, area: Rect, props: &TabBarProps<'_>, registry: &mut RectRegistry);

    /// Layout effect: re-measure registered geometry and update derived state.
    /// Returns true if anything visible changed.
    fn sync_layout(&mut self, props: &TabBarProps<'_>, registry: &RectRegistry) -> bool;

    fn hit_test(&self, column: u16, row: u16, registry: &RectRegistry) -> Option<BarHit>;

    /// Fire callbacks for a hit. Returns the key to activate, if any.
    fn handle_hit(&mut self, hit: BarHit, event: &Event) -> Option<String>;

    /// Request a re-measure on the first tick after the next render
    fn schedule_measure(&mut self, reason: MeasureReason);

    /// Run a pending deferred measure. Returns true if one ran.
    fn tick(&mut self, props: &TabBarProps<'_>, registry: &RectRegistry) -> bool;

    /// Cancel pending work; the bar is going away
    fn teardown(&mut self);

    fn rendered(&self) -> &RenderedBar;
}

// ┌─────────────────────────────────────────────────────────────┐
// │ Composer                                                    │
// └─────────────────────────────────────────────────────────────┘

/// Label lane and ink lane of a bar region, both spanning its main axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Lanes {
    label: Rect,
    ink: Option<Rect>,
}

fn lanes(rect: Rect, position: TabBarPosition) -> Lanes {
    match position {
        TabBarPosition::Top | TabBarPosition::Bottom => {
            if rect.height < 2 {
                return Lanes { label: Rect { height: rect.height.min(1), ..rect }, ink: None };
            }
            let (label_y, ink_y) = if position == TabBarPosition::Top {
                (rect.y, rect.y + 1)
            } else {
                (rect.y + 1, rect.y)
            };
            Lanes {
                label: Rect { y: label_y, height: 1, ..rect },
                ink: Some(Rect { y: ink_y, height: 1, ..rect }),
            }
        }
        TabBarPosition::Left | TabBarPosition::Right => {
            if rect.width < 2 {
                return Lanes { label: Rect { width: rect.width.min(1), ..rect }, ink: None };
            }
            let (label_x, ink_x) = if position == TabBarPosition::Left {
                (rect.x, rect.x + rect.width - 1)
            } else {
                (rect.x + 1, rect.x)
            };
            Lanes {
                label: Rect { x: label_x, width: rect.width - 1, ..rect },
                ink: Some(Rect { x: ink_x, width: 1, ..rect }),
            }
        }
    }
}

/// Cut `len` cells off the start of `rect` along `axis`
fn split_start(rect: Rect, axis: Axis, len: u16) -> (Rect, Rect) {
    match axis {
        Axis::Horizontal => {
            let len = len.min(rect.width);
            (
                Rect { width: len, ..rect },
                Rect { x: rect.x + len, width: rect.width - len, ..rect },
            )
        }
        Axis::Vertical => {
            let len = len.min(rect.height);
            (
                Rect { height: len, ..rect },
                Rect { y: rect.y + len, height: rect.height - len, ..rect },
            )
        }
    }
}

/// Cut `len` cells off the end of `rect` along `axis`
fn split_end(rect: Rect, axis: Axis, len: u16) -> (Rect, Rect) {
    let extent = match axis {
        Axis::Horizontal => rect.width,
        Axis::Vertical => rect.height,
    };
    split_start(rect, axis, extent - len.min(extent))
}

/// Visible part of `[start, start + len)` inside `[lo, hi)`:
/// (cells skipped, visible start, visible length)
fn clip_span(start: i32, len: u16, lo: i32, hi: i32) -> Option<(usize, u16, usize)> {
    let end = start + len as i32;
    let vis_start = start.max(lo);
    let vis_end = end.min(hi);
    if vis_end <= vis_start {
        return None;
    }
    Some(((vis_start - start) as usize, vis_start as u16, (vis_end - vis_start) as usize))
}

fn put(buf: &mut Buffer, x: u16, y: u16, text: &str, max_width: usize, style: Style) {
    let area = buf.area;
    if x < area.x || y < area.y || x >= area.right() || y >= area.bottom() {
        return;
    }
    buf.set_stringn(x, y, text, max_width, style);
}

fn label_width(text: &str) -> u16 {
    text.chars().count().min(u16::MAX as usize) as u16
}

fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

/// Shared layout, registration and painting behind both bar variants
pub struct TabBarComposer {
    gutter: Option<u16>,
    extra_content: Option<String>,
    palette: TabPalette,
    ink: InkBarPositioner,
    deferred: DeferredTask,
    /// Number of mounts so far
    mounts: u64,
    names: ClassNames,
    position: TabBarPosition,
    /// Screen rect of the visible strip from the last mount
    viewport: Rect,
    extra_area: Option<Rect>,
    rendered: RenderedBar,
}

impl TabBarComposer {
    pub fn new() -> Self {
        Self {
            gutter: None,
            extra_content: None,
            palette: TabPalette::default(),
            ink: InkBarPositioner::new(),
            deferred: DeferredTask::new(),
            mounts: 0,
            names: ClassNames::default(),
            position: TabBarPosition::default(),
            viewport: Rect::default(),
            extra_area: None,
            rendered: RenderedBar::default(),
        }
    }

    pub fn with_gutter(mut self, gutter: u16) -> Self {
        self.gutter = Some(gutter);
        self
    }

    pub fn with_extra_content(mut self, extra: impl Into<String>) -> Self {
        self.extra_content = Some(extra.into());
        self
    }

    pub fn with_palette(mut self, palette: TabPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn gutter(&self) -> Option<u16> {
        self.gutter
    }

    pub fn names(&self) -> &ClassNames {
        &self.names
    }

    pub fn palette(&self) -> &TabPalette {
        &self.palette
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn rendered(&self) -> &RenderedBar {
        &self.rendered
    }

    pub fn mounts(&self) -> u64 {
        self.mounts
    }

    /// Tab nodes in descriptor order plus the total content length.
    /// Offsets are relative to the content start; nothing is clipped here.
    pub fn layout(&self, props: &TabBarProps<'_>) -> (Vec<TabNode>, u16) {
        let count = props.descriptors.len();
        let axis = props.position.axis();
        let names = props.names;
        let mut nodes = Vec::with_capacity(count);
        let mut offset: u16 = 0;
        let mut content_extent: u16 = 0;
        let mut active_marked = false;

        for (idx, descriptor) in props.descriptors.iter().enumerate() {
            let is_last = idx + 1 == count;
            let style = match self.gutter {
                Some(gutter) if !is_last => TabNodeStyle::gutter(props.position, gutter),
                _ => TabNodeStyle::default(),
            };
            let trailing = if is_last { 0 } else { style.trailing().unwrap_or(DEFAULT_TAB_GUTTER) };
            let extent = match axis {
                Axis::Horizontal => label_width(&descriptor.label).saturating_add(2 * TAB_PADDING),
                Axis::Vertical => 1,
            };

            // duplicate keys: the first one wins
            let active = !active_marked && props.active_key == Some(descriptor.key.as_str());
            active_marked |= active;

            let mut classes = vec![names.tab()];
            if active {
                classes.push(names.tab_active());
            }
            if descriptor.disabled {
                classes.push(names.tab_disabled());
            }

            nodes.push(TabNode {
                key: descriptor.key.clone(),
                label: descriptor.label.clone(),
                classes,
                style,
                active,
                disabled: descriptor.disabled,
                offset,
                extent,
            });
            content_extent = offset.saturating_add(extent);
            offset = content_extent.saturating_add(trailing);
        }

        (nodes, content_extent)
    }

    pub fn cross_extent(&self, props: &TabBarProps<'_>) -> u16 {
        match props.position.axis() {
            // label row + ink row
            Axis::Horizontal => 2,
            Axis::Vertical => {
                let widest = props
                    .descriptors
                    .iter()
                    .map(|d| label_width(&d.label))
                    .chain(self.extra_content.as_deref().map(label_width))
                    .max()
                    .unwrap_or(0);
                widest.saturating_add(2 * TAB_PADDING + 1)
            }
        }
    }

    /// Split the extra content slot off the end of the bar
    pub fn split_extra(&self, area: Rect, position: TabBarPosition) -> (Rect, Option<Rect>) {
        let Some(extra) = &self.extra_content else {
            return (area, None);
        };
        let axis = position.axis();
        let len = match axis {
            Axis::Horizontal => label_width(extra).saturating_add(1),
            Axis::Vertical => 1,
        };
        let (rest, slot) = split_end(area, axis, len);
        (rest, Some(slot))
    }

    /// Lay out tabs for `viewport` and register bar, nav-wrap, nav, tab and
    /// extra content nodes. Tab nodes are registered at their unscrolled position.
    pub fn mount(
        &mut self,
        area: Rect,
        viewport: Rect,
        extra_area: Option<Rect>,
        props: &TabBarProps<'_>,
        registry: &mut RectRegistry,
    ) {
        let names = props.names;
        let axis = props.position.axis();
        let (tabs, content_extent) = self.layout(props);

        registry.register(Some(names.bar().as_str()), area);
        registry.register(Some(names.nav_wrap().as_str()), viewport);
        let nav = registry.register(Some(names.nav().as_str()), viewport);
        let scroll_size = match axis {
            Axis::Horizontal => ScrollSize { width: content_extent.max(viewport.width), height: viewport.height },
            Axis::Vertical => ScrollSize { width: viewport.width, height: content_extent.max(viewport.height) },
        };
        registry.set_scroll_size(nav, scroll_size);

        registry.unregister_prefixed(&names.tab_node_prefix());
        let label_lane = lanes(viewport, props.position).label;
        let mut seen = HashSet::new();
        for tab in &tabs {
            if !seen.insert(tab.key.as_str()) {
                continue;
            }
            let rect = match axis {
                Axis::Horizontal => Rect {
                    x: viewport.x.saturating_add(tab.offset),
                    y: label_lane.y,
                    width: tab.extent,
                    height: label_lane.height,
                },
                Axis::Vertical => Rect {
                    x: label_lane.x,
                    y: viewport.y.saturating_add(tab.offset),
                    width: label_lane.width,
                    height: tab.extent,
                },
            };
            registry.register(Some(names.tab_node(&tab.key).as_str()), rect);
        }

        match extra_area {
            Some(rect) => {
                registry.register(Some(names.extra().as_str()), rect);
            }
            None => {
                registry.unregister_by_name(&names.extra());
            }
        }

        if self.names != *names || self.position != props.position {
            tracing::trace!(prefix = names.prefix(), position = %props.position, "Tab bar mounted");
        }
        self.names = names.clone();
        self.position = props.position;
        self.viewport = viewport;
        self.extra_area = extra_area;
        self.rendered.root_classes = vec![names.bar(), format!("{}-bar", names.position(props.position))];
        self.rendered.tabs = tabs;
        self.rendered.extra_content = self.extra_content.clone();
        self.mounts += 1;
        self.deferred.mounted();
    }

    /// Returns true if the ink style changed
    pub fn update_ink(&mut self, props: &TabBarProps<'_>, registry: &RectRegistry) -> bool {
        let changed = self.ink.update(props.active_key, props.position, registry, props.names);
        self.rendered.ink_bar = self.ink.style();
        changed
    }

    /// Register the ink node where the indicator sits, or drop it when hidden
    pub fn register_ink(&self, registry: &mut RectRegistry) {
        let name = self.names.ink_bar();
        let Some(geometry) = self.ink.style().geometry() else {
            registry.unregister_by_name(&name);
            return;
        };
        let lanes = lanes(self.viewport, self.position);
        let lane = lanes.ink.unwrap_or(lanes.label);
        let rect = match self.position.axis() {
            Axis::Horizontal => Rect { x: geometry.offset, y: lane.y, width: geometry.extent, height: 1 },
            Axis::Vertical => Rect { x: lane.x, y: geometry.offset, width: 1, height: geometry.extent },
        };
        registry.register(Some(name.as_str()), rect);
    }

    pub fn set_scroll_offset(&mut self, offset: u16) {
        self.rendered.scroll_offset = offset;
    }

    pub fn set_arrows(&mut self, prev: Option<ArrowNode>, next: Option<ArrowNode>) {
        self.rendered.prev = prev;
        self.rendered.next = next;
    }

    pub fn set_scrolling(&mut self, scrolling: bool) {
        let class = self.names.nav_container_scrolling();
        self.rendered.root_classes.retain(|c| *c != class);
        if scrolling {
            self.rendered.root_classes.push(class);
        }
    }

    pub fn schedule(&mut self, reason: MeasureReason) {
        if self.deferred.schedule(reason) {
            tracing::trace!(?reason, "Deferred measure scheduled");
        }
    }

    pub fn fire_deferred(&mut self) -> Option<MeasureReason> {
        self.deferred.fire()
    }

    pub fn teardown(&mut self) {
        self.deferred.cancel();
    }

    /// Tab under a screen cell, mapped through the current scroll offset.
    /// Disabled tabs never hit.
    pub fn hit_tab(&self, column: u16, row: u16, registry: &RectRegistry) -> Option<BarHit> {
        if !rect_contains(self.viewport, column, row) {
            return None;
        }
        let scroll = self.rendered.scroll_offset;
        let (x, y) = match self.position.axis() {
            Axis::Horizontal => (column.saturating_add(scroll), row),
            Axis::Vertical => (column, row.saturating_add(scroll)),
        };
        self.rendered
            .tabs
            .iter()
            .find(|tab| {
                registry
                    .get_metrics_by_name(&self.names.tab_node(&tab.key))
                    .map(|m| m.contains(x, y))
                    .unwrap_or(false)
            })
            .filter(|tab| !tab.disabled)
            .map(|tab| BarHit::Tab(tab.key.clone()))
    }

    /// Paint tabs, ink and extra content at the current scroll offset
    pub fn paint(&self, buf: &mut Buffer) {
        let axis = self.position.axis();
        let viewport = self.viewport;
        let lanes = lanes(viewport, self.position);
        let scroll = self.rendered.scroll_offset as i32;
        let (view_lo, view_len) = match axis {
            Axis::Horizontal => (viewport.x as i32, viewport.width as i32),
            Axis::Vertical => (viewport.y as i32, viewport.height as i32),
        };
        let view_hi = view_lo + view_len;

        for tab in &self.rendered.tabs {
            let style = self.palette.tab_style(tab.active, tab.disabled);
            let text = format!("{:pad$}{}{:pad$}", "", tab.label, "", pad = TAB_PADDING as usize);
            let start = view_lo + tab.offset as i32 - scroll;
            let Some((skip, at, len)) = clip_span(start, tab.extent, view_lo, view_hi) else {
                continue;
            };
            match axis {
                Axis::Horizontal => {
                    let visible: String = text.chars().skip(skip).take(len).collect();
                    put(buf, at, lanes.label.y, &visible, len, style);
                }
                Axis::Vertical => {
                    put(buf, lanes.label.x, at, &text, lanes.label.width as usize, style);
                }
            }
        }

        if let (Some(geometry), Some(ink_lane)) = (self.ink.style().geometry(), lanes.ink) {
            let style = self.palette.ink_style();
            let start = geometry.offset as i32 - scroll;
            if let Some((_, at, len)) = clip_span(start, geometry.extent, view_lo, view_hi) {
                match axis {
                    Axis::Horizontal => put(buf, at, ink_lane.y, &INK_HORIZONTAL.repeat(len), len, style),
                    Axis::Vertical => {
                        for row in at..at.saturating_add(len as u16) {
                            put(buf, ink_lane.x, row, INK_VERTICAL, 1, style);
                        }
                    }
                }
            }
        }

        if let (Some(extra), Some(slot)) = (&self.extra_content, self.extra_area) {
            let lane = lanes_for_slot(slot, self.position);
            match axis {
                Axis::Horizontal => put(buf, slot.x + 1, lane.y, extra, slot.width.saturating_sub(1) as usize, self.palette.extra_style()),
                Axis::Vertical => put(buf, lane.x + TAB_PADDING, slot.y, extra, lane.width.saturating_sub(TAB_PADDING) as usize, self.palette.extra_style()),
            }
        }
    }
}

impl Default for TabBarComposer {
    fn default() -> Self {
        Self::new()
    }
}

fn lanes_for_slot(slot: Rect, position: TabBarPosition) -> Rect {
    lanes(slot, position).label
}

// ┌─────────────────────────────────────────────────────────────┐
// │ InkTabBar                                                   │
// └─────────────────────────────────────────────────────────────┘

/// Tab strip with an ink indicator; never scrolls
pub struct InkTabBar {
    composer: TabBarComposer,
    on_tab_click: Option<TabClickCallback>,
}

impl InkTabBar {
    pub fn new() -> Self {
        Self {
            composer: TabBarComposer::new(),
            on_tab_click: None,
        }
    }

    pub fn with_gutter(mut self, gutter: u16) -> Self {
        self.composer = self.composer.with_gutter(gutter);
        self
    }

    pub fn with_extra_content(mut self, extra: impl Into<String>) -> Self {
        self.composer = self.composer.with_extra_content(extra);
        self
    }

    pub fn with_palette(mut self, palette: TabPalette) -> Self {
        self.composer = self.composer.with_palette(palette);
        self
    }

    pub fn with_on_tab_click(mut self, callback: impl FnMut(&str, &Event) + 'static) -> Self {
        self.on_tab_click = Some(Box::new(callback));
        self
    }

    /// Only the tab click callback applies to this variant
    pub fn with_callbacks(mut self, callbacks: TabBarCallbacks) -> Self {
        if callbacks.on_tab_click.is_some() {
            self.on_tab_click = callbacks.on_tab_click;
        }
        self
    }

    pub fn composer(&self) -> &TabBarComposer {
        &self.composer
    }
}

impl Default for InkTabBar {
    fn default() -> Self {
        Self::new()
    }
}

impl TabBar for InkTabBar {
    fn cross_extent(&self, props: &TabBarProps<'_>) -> u16 {
        self.composer.cross_extent(props)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: &TabBarProps<'_>, registry: &mut RectRegistry) {
        let area = area.intersection(frame.area());
        let (viewport, extra) = self.composer.split_extra(area, props.position);
        self.composer.mount(area, viewport, extra, props, registry);
        self.sync_layout(props, registry);
        self.composer.register_ink(registry);
        self.composer.paint(frame.buffer_mut());
    }

    fn sync_layout(&mut self, props: &TabBarProps<'_>, registry: &RectRegistry) -> bool {
        self.composer.update_ink(props, registry)
    }

    fn hit_test(&self, column: u16, row: u16, registry: &RectRegistry) -> Option<BarHit> {
        self.composer.hit_tab(column, row, registry)
    }

    fn handle_hit(&mut self, hit: BarHit, event: &Event) -> Option<String> {
        match hit {
            BarHit::Tab(key) => {
                if let Some(callback) = self.on_tab_click.as_mut() {
                    callback(&key, event);
                }
                Some(key)
            }
            BarHit::Prev | BarHit::Next => None,
        }
    }

    fn schedule_measure(&mut self, reason: MeasureReason) {
        self.composer.schedule(reason);
    }

    fn tick(&mut self, props: &TabBarProps<'_>, registry: &RectRegistry) -> bool {
        match self.composer.fire_deferred() {
            Some(reason) => {
                tracing::debug!(?reason, "Running deferred measure");
                self.sync_layout(props, registry);
                true
            }
            None => false,
        }
    }

    fn teardown(&mut self) {
        self.composer.teardown();
    }

    fn rendered(&self) -> &RenderedBar {
        self.composer.rendered()
    }
}

// ┌─────────────────────────────────────────────────────────────┐
// │ ScrollableInkTabBar                                         │
// └─────────────────────────────────────────────────────────────┘

/// Ink tab strip with prev/next paging once the tabs overflow.
/// Arrow slots are always reserved so the viewport does not jump.
pub struct ScrollableInkTabBar {
    composer: TabBarComposer,
    nav: ScrollNav,
    callbacks: TabBarCallbacks,
    prev_icon: Option<String>,
    next_icon: Option<String>,
    last_active: Option<String>,
    /// Mount count when a descriptor change asked to reveal the active tab
    reveal_after: Option<u64>,
}

impl ScrollableInkTabBar {
    pub fn new() -> Self {
        Self {
            composer: TabBarComposer::new(),
            nav: ScrollNav::new(),
            callbacks: TabBarCallbacks::default(),
            prev_icon: None,
            next_icon: None,
            last_active: None,
            reveal_after: None,
        }
    }

    pub fn with_gutter(mut self, gutter: u16) -> Self {
        self.composer = self.composer.with_gutter(gutter);
        self
    }

    pub fn with_extra_content(mut self, extra: impl Into<String>) -> Self {
        self.composer = self.composer.with_extra_content(extra);
        self
    }

    pub fn with_palette(mut self, palette: TabPalette) -> Self {
        self.composer = self.composer.with_palette(palette);
        self
    }

    pub fn with_prev_icon(mut self, icon: impl Into<String>) -> Self {
        self.prev_icon = Some(icon.into());
        self
    }

    pub fn with_next_icon(mut self, icon: impl Into<String>) -> Self {
        self.next_icon = Some(icon.into());
        self
    }

    pub fn with_on_tab_click(mut self, callback: impl FnMut(&str, &Event) + 'static) -> Self {
        self.callbacks.on_tab_click = Some(Box::new(callback));
        self
    }

    pub fn with_on_prev_click(mut self, callback: impl FnMut(&Event) + 'static) -> Self {
        self.callbacks.on_prev_click = Some(Box::new(callback));
        self
    }

    pub fn with_on_next_click(mut self, callback: impl FnMut(&Event) + 'static) -> Self {
        self.callbacks.on_next_click = Some(Box::new(callback));
        self
    }

    pub fn with_callbacks(mut self, callbacks: TabBarCallbacks) -> Self {
        let TabBarCallbacks { on_tab_click, on_prev_click, on_next_click } = callbacks;
        self.callbacks.on_tab_click = on_tab_click.or(self.callbacks.on_tab_click.take());
        self.callbacks.on_prev_click = on_prev_click.or(self.callbacks.on_prev_click.take());
        self.callbacks.on_next_click = on_next_click.or(self.callbacks.on_next_click.take());
        self
    }

    pub fn nav(&self) -> &ScrollNav {
        &self.nav
    }

    pub fn composer(&self) -> &TabBarComposer {
        &self.composer
    }

    fn icon(&self, position: TabBarPosition, next: bool) -> String {
        let custom = if next { &self.next_icon } else { &self.prev_icon };
        if let Some(icon) = custom {
            return icon.clone();
        }
        let marker = match (position.axis(), next) {
            (Axis::Horizontal, false) => "‹",
            (Axis::Horizontal, true) => "›",
            (Axis::Vertical, false) => "˄",
            (Axis::Vertical, true) => "˅",
        };
        marker.to_string()
    }

    fn slot_len(&self, position: TabBarPosition, next: bool) -> u16 {
        match position.axis() {
            Axis::Horizontal => label_width(&self.icon(position, next)).max(1),
            Axis::Vertical => 1,
        }
    }

    /// Rebuild the arrow nodes and scroll classes from the nav state
    fn refresh_arrows(&mut self) {
        let names = self.composer.names().clone();
        let position = self.composer.position;
        let overflowing = self.nav.is_overflowing();
        let arrow = |class: String, content: String, visible: bool| {
            let mut classes = vec![class];
            if !visible {
                classes.push(names.btn_disabled());
            }
            if overflowing {
                classes.push(names.arrow_show());
            }
            ArrowNode { classes, content, visible }
        };
        let prev = arrow(names.tab_prev(), self.icon(position, false), self.nav.prev_visible());
        let next = arrow(names.tab_next(), self.icon(position, true), self.nav.next_visible());
        self.composer.set_arrows(Some(prev), Some(next));
        self.composer.set_scrolling(overflowing);
        self.composer.set_scroll_offset(self.nav.offset());
    }

    fn paint_arrows(&self, buf: &mut Buffer, prev_slot: Rect, next_slot: Rect) {
        let rendered = self.composer.rendered();
        let palette = self.composer.palette();
        for (slot, node) in [(prev_slot, &rendered.prev), (next_slot, &rendered.next)] {
            let Some(node) = node else { continue };
            if !node.visible || slot.width == 0 || slot.height == 0 {
                continue;
            }
            let lane = lanes(slot, self.composer.position).label;
            let width = match self.composer.position.axis() {
                Axis::Horizontal => slot.width,
                Axis::Vertical => lane.width,
            };
            put(buf, lane.x, lane.y, &node.content, width as usize, palette.arrow_style());
        }
    }
}

impl Default for ScrollableInkTabBar {
    fn default() -> Self {
        Self::new()
    }
}

impl TabBar for ScrollableInkTabBar {
    fn cross_extent(&self, props: &TabBarProps<'_>) -> u16 {
        self.composer.cross_extent(props)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: &TabBarProps<'_>, registry: &mut RectRegistry) {
        let area = area.intersection(frame.area());
        let axis = props.position.axis();
        let names = props.names;
        let (strip, extra) = self.composer.split_extra(area, props.position);
        let (prev_slot, rest) = split_start(strip, axis, self.slot_len(props.position, false));
        let (viewport, next_slot) = split_end(rest, axis, self.slot_len(props.position, true));

        registry.register(Some(names.nav_container().as_str()), strip);
        registry.register(Some(names.tab_prev().as_str()), prev_slot);
        registry.register(Some(names.tab_next().as_str()), next_slot);
        self.composer.mount(area, viewport, extra, props, registry);
        self.sync_layout(props, registry);
        self.composer.register_ink(registry);

        let buf = frame.buffer_mut();
        self.composer.paint(buf);
        self.paint_arrows(buf, prev_slot, next_slot);
    }

    fn sync_layout(&mut self, props: &TabBarProps<'_>, registry: &RectRegistry) -> bool {
        let snapshot = ScrollMeasurer::measure(registry, props.names, props.active_key, props.position.axis());
        let before = (self.nav.clone(), self.composer.rendered().ink_bar);

        self.nav.sync(&snapshot);
        let active_changed = self.last_active.as_deref() != props.active_key;
        // a reveal only counts against geometry mounted after the change
        let reveal = matches!(self.reveal_after, Some(mounts) if self.composer.mounts() > mounts);
        if (active_changed || reveal) && snapshot.active_tab_present {
            self.nav.scroll_into_view(snapshot.active_tab_offset, snapshot.active_tab_extent);
        }
        if reveal {
            self.reveal_after = None;
        }
        self.last_active = props.active_key.map(str::to_string);

        self.composer.update_ink(props, registry);
        self.refresh_arrows();
        before != (self.nav.clone(), self.composer.rendered().ink_bar)
    }

    fn hit_test(&self, column: u16, row: u16, registry: &RectRegistry) -> Option<BarHit> {
        let names = self.composer.names();
        let inside = |name: String| {
            registry
                .get_metrics_by_name(&name)
                .map(|m| m.contains(column, row))
                .unwrap_or(false)
        };
        if inside(names.tab_prev()) {
            return Some(BarHit::Prev);
        }
        if inside(names.tab_next()) {
            return Some(BarHit::Next);
        }
        self.composer.hit_tab(column, row, registry)
    }

    fn handle_hit(&mut self, hit: BarHit, event: &Event) -> Option<String> {
        match hit {
            BarHit::Tab(key) => {
                if let Some(callback) = self.callbacks.on_tab_click.as_mut() {
                    callback(&key, event);
                }
                Some(key)
            }
            // hidden controls do nothing
            BarHit::Prev => {
                if self.nav.prev_visible() {
                    if let Some(callback) = self.callbacks.on_prev_click.as_mut() {
                        callback(event);
                    }
                    self.nav.prev();
                    self.refresh_arrows();
                }
                None
            }
            BarHit::Next => {
                if self.nav.next_visible() {
                    if let Some(callback) = self.callbacks.on_next_click.as_mut() {
                        callback(event);
                    }
                    self.nav.next();
                    self.refresh_arrows();
                }
                None
            }
        }
    }

    fn schedule_measure(&mut self, reason: MeasureReason) {
        if reason == MeasureReason::DescriptorsChanged {
            self.reveal_after = Some(self.composer.mounts());
        }
        self.composer.schedule(reason);
    }

    fn tick(&mut self, props: &TabBarProps<'_>, registry: &RectRegistry) -> bool {
        match self.composer.fire_deferred() {
            Some(reason) => {
                tracing::debug!(?reason, offset = self.nav.offset(), "Running deferred measure");
                self.sync_layout(props, registry);
                true
            }
            None => false,
        }
    }

    fn teardown(&mut self) {
        self.composer.teardown();
    }

    fn rendered(&self) -> &RenderedBar {
        self.composer.rendered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn descriptors(count: usize) -> Vec<TabDescriptor> {
        (1..=count).map(|i| TabDescriptor::new(i.to_string(), format!("tab {}", i))).collect()
    }

    fn props<'a>(descriptors: &'a [TabDescriptor], active: Option<&'a str>, position: TabBarPosition, names: &'a ClassNames) -> TabBarProps<'a> {
        TabBarProps { descriptors, active_key: active, position, names }
    }

    fn row_text(terminal: &Terminal<TestBackend>, row: u16) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer.content[row as usize * width..(row as usize + 1) * width]
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_layout_gutter_and_default_spacing() {
        let names = ClassNames::default();
        let descs = descriptors(3);

        let plain = TabBarComposer::new();
        let (tabs, extent) = plain.layout(&props(&descs, Some("2"), TabBarPosition::Top, &names));
        // " tab 1 " is 7 cells wide
        assert_eq!(tabs.iter().map(|t| t.offset).collect::<Vec<_>>(), vec![0, 8, 16]);
        assert_eq!(extent, 23);
        assert!(tabs.iter().all(|t| t.style == TabNodeStyle::default()));
        assert!(tabs[1].has_class("ink-tabs-tab-active"));

        let spaced = TabBarComposer::new().with_gutter(4);
        let (tabs, _) = spaced.layout(&props(&descs, None, TabBarPosition::Left, &names));
        assert_eq!(tabs[0].style.margin_bottom, Some(4));
        assert_eq!(tabs[0].style.margin_right, None);
        assert_eq!(tabs[2].style, TabNodeStyle::default());
        assert_eq!(tabs.iter().map(|t| t.offset).collect::<Vec<_>>(), vec![0, 5, 10]);
    }

    #[test]
    fn test_duplicate_keys_first_wins() {
        let names = ClassNames::default();
        let descs = vec![TabDescriptor::new("a", "one"), TabDescriptor::new("a", "two")];
        let (tabs, _) = TabBarComposer::new().layout(&props(&descs, Some("a"), TabBarPosition::Top, &names));
        assert!(tabs[0].active);
        assert!(!tabs[1].active);
    }

    #[test]
    fn test_ink_bar_paints_under_active_tab() {
        let names = ClassNames::default();
        let descs = descriptors(2);
        let mut registry = RectRegistry::new();
        let mut bar = InkTabBar::new();
        let mut terminal = Terminal::new(TestBackend::new(30, 2)).unwrap();

        terminal
            .draw(|f| {
                let area = f.area();
                bar.render(f, area, &props(&descs, Some("2"), TabBarPosition::Top, &names), &mut registry);
            })
            .unwrap();

        assert_eq!(row_text(&terminal, 0).trim_end(), " tab 1   tab 2");
        assert_eq!(row_text(&terminal, 1).trim_end(), "        ━━━━━━━");
        assert_eq!(
            registry.get_metrics_by_name(&names.ink_bar()).map(|m| (m.x, m.width)),
            Some((8, 7))
        );
        assert_eq!(bar.rendered().ink_bar.display(), "block");
    }

    #[test]
    fn test_disabled_tab_is_not_hit() {
        let names = ClassNames::default();
        let descs = vec![TabDescriptor::new("1", "one"), TabDescriptor::new("2", "two").with_disabled(true)];
        let mut registry = RectRegistry::new();
        let mut bar = InkTabBar::new();
        let mut terminal = Terminal::new(TestBackend::new(30, 2)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                bar.render(f, area, &props(&descs, Some("1"), TabBarPosition::Top, &names), &mut registry);
            })
            .unwrap();

        assert_eq!(bar.hit_test(1, 0, &registry), Some(BarHit::Tab("1".to_string())));
        assert_eq!(bar.hit_test(7, 0, &registry), None);
        assert_eq!(bar.hit_test(1, 1, &registry), None);
    }

    #[test]
    fn test_scrollable_reserves_arrow_slots() {
        let names = ClassNames::default();
        let descs = descriptors(6);
        let mut registry = RectRegistry::new();
        let mut bar = ScrollableInkTabBar::new();
        let mut terminal = Terminal::new(TestBackend::new(20, 2)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                bar.render(f, area, &props(&descs, Some("1"), TabBarPosition::Top, &names), &mut registry);
            })
            .unwrap();

        let wrap = registry.get_metrics_by_name(&names.nav_wrap()).unwrap();
        assert_eq!((wrap.x, wrap.width), (1, 18));
        assert!(bar.nav().is_overflowing());
        assert!(bar.rendered().root_classes.contains(&names.nav_container_scrolling()));

        let next = bar.rendered().next.as_ref().unwrap();
        assert!(next.visible);
        assert!(next.has_class(&names.arrow_show()));
        let prev = bar.rendered().prev.as_ref().unwrap();
        assert!(prev.has_class(&names.btn_disabled()));

        // hidden prev does nothing
        let event = Event::FocusGained;
        assert_eq!(bar.handle_hit(BarHit::Prev, &event), None);
        assert_eq!(bar.nav().offset(), 0);

        bar.handle_hit(BarHit::Next, &event);
        assert_eq!(bar.nav().offset(), 18);
        // first visible column now maps to content cell 18
        assert_eq!(bar.hit_test(1, 0, &registry), Some(BarHit::Tab("3".to_string())));
    }

    #[test]
    fn test_deferred_measure_runs_once_after_mount() {
        let names = ClassNames::default();
        let descs = descriptors(1);
        let mut registry = RectRegistry::new();
        let mut bar = ScrollableInkTabBar::new();
        let p = props(&descs, Some("1"), TabBarPosition::Top, &names);
        let mut terminal = Terminal::new(TestBackend::new(20, 2)).unwrap();

        bar.schedule_measure(MeasureReason::Resized);
        // nothing mounted since the schedule
        assert!(!bar.tick(&p, &registry));

        terminal
            .draw(|f| {
                let area = f.area();
                bar.render(f, area, &p, &mut registry);
            })
            .unwrap();
        assert!(bar.tick(&p, &registry));
        assert!(!bar.tick(&p, &registry));

        bar.schedule_measure(MeasureReason::Resized);
        terminal
            .draw(|f| {
                let area = f.area();
                bar.render(f, area, &p, &mut registry);
            })
            .unwrap();
        bar.teardown();
        assert!(!bar.tick(&p, &registry));
    }

    #[test]
    fn test_reveal_waits_for_fresh_geometry() {
        let names = ClassNames::default();
        let mut registry = RectRegistry::new();
        let mut bar = ScrollableInkTabBar::new();
        let mut terminal = Terminal::new(TestBackend::new(22, 2)).unwrap();

        let before = descriptors(6);
        let p = props(&before, Some("3"), TabBarPosition::Top, &names);
        terminal
            .draw(|f| {
                let area = f.area();
                bar.render(f, area, &p, &mut registry);
            })
            .unwrap();

        // five tabs prepended ahead of the active one
        let mut after: Vec<TabDescriptor> =
            (10..15).map(|i| TabDescriptor::new(i.to_string(), format!("tab {}", i))).collect();
        after.extend(before.iter().cloned());
        let p = props(&after, Some("3"), TabBarPosition::Top, &names);
        bar.schedule_measure(MeasureReason::DescriptorsChanged);
        bar.sync_layout(&p, &registry);
        assert!(!bar.tick(&p, &registry));

        terminal
            .draw(|f| {
                let area = f.area();
                bar.render(f, area, &p, &mut registry);
            })
            .unwrap();
        let tab = registry.get_metrics_by_name(&names.tab_node("3")).unwrap();
        let viewport = bar.composer().viewport();
        let start = tab.x - viewport.x;
        let offset = bar.nav().offset();
        assert!(start >= offset);
        assert!(start + tab.width <= offset + viewport.width);
    }
}
