// Core infrastructure module
// Geometry registry, tab data model, selection state and deferred work

pub mod active_key;
pub mod deferred;
pub mod descriptor;
pub mod error;
pub mod rect_handle;

pub use active_key::{initial_active_key, ActiveKeyStore, KeyMode};
pub use deferred::{DeferredTask, MeasureReason};
pub use descriptor::{contains_key, find_descriptor, Axis, TabBarPosition, TabDescriptor};
pub use error::TabsError;
pub use rect_handle::{RectHandle, RectMetrics, RectRegistry, ScrollSize};
