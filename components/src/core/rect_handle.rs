// Rectangle Handle System (HWND-like)
// Geometry registry shared by render passes and layout measurement
//
// Usage:
//   let mut registry = RectRegistry::new();
//   let handle = registry.register(Some("ink-tabs-nav"), rect);
//   registry.set_scroll_size(handle, ScrollSize { width: 120, height: 1 });
//   // Later, from a layout effect...
//   if let Some(metrics) = registry.get_metrics_by_name("ink-tabs-nav") {
//       println!("nav at: {},{} size: {}x{}", metrics.x, metrics.y, metrics.width, metrics.height);
//   }
//
// Rendering is the only writer. Measurement code takes `&RectRegistry` and never mutates it.

use ratatui::layout::Rect;
use std::collections::HashMap;

use super::descriptor::Axis;

/// Handle to a registered rectangle (similar to Windows HWND)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RectHandle(u64);

impl RectHandle {
    /// Get the internal ID of this handle
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Metrics for a registered rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectMetrics {
    /// Top-left X coordinate
    pub x: u16,
    /// Top-left Y coordinate
    pub y: u16,
    /// Width of the rectangle
    pub width: u16,
    /// Height of the rectangle
    pub height: u16,
}

impl RectMetrics {
    /// Start coordinate along `axis`
    pub fn start(&self, axis: Axis) -> u16 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Size along `axis`
    pub fn extent(&self, axis: Axis) -> u16 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a coordinate (x, y) is within these metrics
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && (x as u32) < self.x as u32 + self.width as u32
            && y >= self.y
            && (y as u32) < self.y as u32 + self.height as u32
    }
}

impl From<Rect> for RectMetrics {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

impl From<RectMetrics> for Rect {
    fn from(metrics: RectMetrics) -> Self {
        Self {
            x: metrics.x,
            y: metrics.y,
            width: metrics.width,
            height: metrics.height,
        }
    }
}

/// Full content size of a node, which may exceed its visible metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollSize {
    pub width: u16,
    pub height: u16,
}

impl ScrollSize {
    pub fn extent(&self, axis: Axis) -> u16 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Registry entry for a rectangle
#[derive(Debug, Clone)]
struct RegistryEntry {
    /// Optional name/identifier for the rectangle
    name: Option<String>,
    /// Current metrics (position and size)
    metrics: RectMetrics,
    /// Content size when it differs from the metrics
    scroll_size: Option<ScrollSize>,
}

/// Registry for tracking rendered rectangles with handles
#[derive(Debug, Clone)]
pub struct RectRegistry {
    /// Map of handle ID to registry entry
    handles: HashMap<u64, RegistryEntry>,
    /// Map of name to handle ID (for lookup by name)
    name_to_handle: HashMap<String, u64>,
    /// Next handle ID to assign
    next_id: u64,
}

impl RectRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
            name_to_handle: HashMap::new(),
            next_id: 1, // 0 is never handed out
        }
    }

    /// Register a rectangle and return a handle
    /// Registering an existing name updates that entry in place and keeps its handle
    pub fn register(&mut self, name: Option<&str>, rect: Rect) -> RectHandle {
        let metrics = RectMetrics::from(rect);

        if let Some(name_str) = name {
            if let Some(&existing_id) = self.name_to_handle.get(name_str) {
                if let Some(entry) = self.handles.get_mut(&existing_id) {
                    entry.metrics = metrics;
                    return RectHandle(existing_id);
                }
            }
        }

        let handle_id = self.next_id;
        self.next_id += 1;

        self.handles.insert(
            handle_id,
            RegistryEntry {
                name: name.map(|s| s.to_string()),
                metrics,
                scroll_size: None,
            },
        );
        if let Some(name_str) = name {
            self.name_to_handle.insert(name_str.to_string(), handle_id);
        }

        RectHandle(handle_id)
    }

    /// Update an existing rectangle's metrics by handle
    pub fn update(&mut self, handle: RectHandle, rect: Rect) -> bool {
        if let Some(entry) = self.handles.get_mut(&handle.0) {
            entry.metrics = RectMetrics::from(rect);
            true
        } else {
            false
        }
    }

    /// Record the content size of a node (e.g. the full width of a tab strip)
    pub fn set_scroll_size(&mut self, handle: RectHandle, size: ScrollSize) -> bool {
        if let Some(entry) = self.handles.get_mut(&handle.0) {
            entry.scroll_size = Some(size);
            true
        } else {
            false
        }
    }

    /// Record the content size of a node by name
    pub fn set_scroll_size_by_name(&mut self, name: &str, size: ScrollSize) -> bool {
        match self.get_handle(name) {
            Some(handle) => self.set_scroll_size(handle, size),
            None => false,
        }
    }

    /// Content size of a node; falls back to its visible size when none was recorded
    pub fn get_scroll_size(&self, handle: RectHandle) -> Option<ScrollSize> {
        self.handles.get(&handle.0).map(|entry| {
            entry.scroll_size.unwrap_or(ScrollSize {
                width: entry.metrics.width,
                height: entry.metrics.height,
            })
        })
    }

    /// Content size of a node by name
    pub fn get_scroll_size_by_name(&self, name: &str) -> Option<ScrollSize> {
        self.get_handle(name).and_then(|h| self.get_scroll_size(h))
    }

    /// Get current metrics for a handle
    pub fn get_metrics(&self, handle: RectHandle) -> Option<RectMetrics> {
        self.handles.get(&handle.0).map(|entry| entry.metrics)
    }

    /// Get current metrics by name
    pub fn get_metrics_by_name(&self, name: &str) -> Option<RectMetrics> {
        self.name_to_handle
            .get(name)
            .and_then(|&handle_id| self.handles.get(&handle_id))
            .map(|entry| entry.metrics)
    }

    /// Get handle by name
    pub fn get_handle(&self, name: &str) -> Option<RectHandle> {
        self.name_to_handle.get(name).map(|&id| RectHandle(id))
    }

    /// Get name for a handle (if it was registered with a name)
    pub fn get_name(&self, handle: RectHandle) -> Option<&String> {
        self.handles.get(&handle.0).and_then(|entry| entry.name.as_ref())
    }

    /// Remove a rectangle from the registry by handle
    pub fn unregister(&mut self, handle: RectHandle) -> bool {
        if let Some(entry) = self.handles.remove(&handle.0) {
            if let Some(name) = entry.name {
                self.name_to_handle.remove(&name);
            }
            true
        } else {
            false
        }
    }

    /// Remove a rectangle from the registry by name
    pub fn unregister_by_name(&mut self, name: &str) -> bool {
        if let Some(handle_id) = self.name_to_handle.remove(name) {
            self.handles.remove(&handle_id);
            true
        } else {
            false
        }
    }

    /// Remove every named node whose name starts with `prefix`
    /// Used to drop nodes for tabs that no longer exist
    pub fn unregister_prefixed(&mut self, prefix: &str) -> usize {
        let stale: Vec<String> = self
            .name_to_handle
            .keys()
            .filter(|name| name.starts_with(prefix))
            .cloned()
            .collect();
        for name in &stale {
            self.unregister_by_name(name);
        }
        stale.len()
    }

    /// Get all registered names
    pub fn all_names(&self) -> Vec<&String> {
        self.name_to_handle.keys().collect()
    }

    /// Clear all registered rectangles
    pub fn clear(&mut self) {
        self.handles.clear();
        self.name_to_handle.clear();
        self.next_id = 1;
    }

    /// Check if a handle exists
    pub fn exists(&self, handle: RectHandle) -> bool {
        self.handles.contains_key(&handle.0)
    }

    /// Check if a name exists
    pub fn name_exists(&self, name: &str) -> bool {
        self.name_to_handle.contains_key(name)
    }
}

impl Default for RectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_query() {
        let mut registry = RectRegistry::new();
        let rect = Rect { x: 10, y: 20, width: 100, height: 50 };

        let handle = registry.register(Some("test-window"), rect);

        let metrics = registry.get_metrics(handle).unwrap();
        assert_eq!(metrics.x, 10);
        assert_eq!(metrics.y, 20);
        assert_eq!(metrics.width, 100);
        assert_eq!(metrics.height, 50);
    }

    #[test]
    fn test_reregister_by_name_keeps_handle() {
        let mut registry = RectRegistry::new();
        let first = registry.register(Some("nav"), Rect { x: 0, y: 0, width: 10, height: 1 });
        let second = registry.register(Some("nav"), Rect { x: 2, y: 0, width: 30, height: 1 });

        assert_eq!(first, second);
        assert_eq!(registry.get_metrics(first).unwrap().width, 30);
    }

    #[test]
    fn test_scroll_size_falls_back_to_metrics() {
        let mut registry = RectRegistry::new();
        let handle = registry.register(Some("nav"), Rect { x: 0, y: 0, width: 40, height: 1 });
        assert_eq!(registry.get_scroll_size(handle), Some(ScrollSize { width: 40, height: 1 }));

        registry.set_scroll_size_by_name("nav", ScrollSize { width: 1000, height: 1 });
        assert_eq!(registry.get_scroll_size_by_name("nav").unwrap().width, 1000);
        // metrics are left alone
        assert_eq!(registry.get_metrics(handle).unwrap().width, 40);
    }

    #[test]
    fn test_unregister_prefixed() {
        let mut registry = RectRegistry::new();
        registry.register(Some("tabs-tab:1"), Rect::new(0, 0, 5, 1));
        registry.register(Some("tabs-tab:2"), Rect::new(5, 0, 5, 1));
        registry.register(Some("tabs-nav"), Rect::new(0, 0, 10, 1));

        assert_eq!(registry.unregister_prefixed("tabs-tab:"), 2);
        assert!(!registry.name_exists("tabs-tab:1"));
        assert!(registry.name_exists("tabs-nav"));
    }

    #[test]
    fn test_contains_handles_edges() {
        let metrics = RectMetrics { x: 65530, y: 0, width: 5, height: 1 };
        assert!(metrics.contains(65534, 0));
        assert!(!metrics.contains(65535, 0));
        assert!(!metrics.contains(65532, 1));
    }
}
