// Tab widget components library
// Ink tab bars, scrollable tab strips and the tabs container for ratatui apps

// Core infrastructure
pub mod core;
// GUI elements (visual components)
pub mod elements;
// Measurement, scrolling and config managers
pub mod managers;
// Utilities and helpers
pub mod utilities;

// Re-export commonly used items
// Note: tab_bar exists in both elements (bar widgets) and managers (YAML config),
// the glob re-exports only overlap on the module names
#[allow(ambiguous_glob_reexports)]
pub use core::*;
#[allow(ambiguous_glob_reexports)]
pub use elements::*;
#[allow(ambiguous_glob_reexports)]
pub use managers::*;
pub use utilities::*;
