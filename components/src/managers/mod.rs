// Managers module
// Measurement, scroll navigation, ink bar placement and YAML setup for tab bars

pub mod ink_bar;
pub mod scroll_measurer;
pub mod scroll_nav;
pub mod tab_bar;

pub use ink_bar::{InkBarGeometry, InkBarPositioner, InkBarStyle};
pub use scroll_measurer::{GeometrySnapshot, ScrollMeasurer};
pub use scroll_nav::{ScrollNav, ScrollNavState};

// Re-export YAML configuration types from tab_bar module
pub use tab_bar::{
    convert_tabs_config,
    create_tabs_from_config,
    PaneConfigYaml,
    TabBarVariant,
    TabsConfigData,
    TabsConfigYaml,
};
