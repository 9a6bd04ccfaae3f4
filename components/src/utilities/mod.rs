// Utilities module
// Naming and styling helpers shared by the tab widgets

pub mod class_names;
pub mod helpers;

pub use class_names::{ClassNames, DEFAULT_PREFIX};
pub use helpers::{hex_color, parse_color, TabPalette};
