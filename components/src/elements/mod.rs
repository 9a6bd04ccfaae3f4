// GUI Elements module
// Visual components: the tabs container, its bars and the pane view

pub mod tab_bar;
pub mod tab_content;
pub mod tabs;

pub use tab_bar::*;
pub use tab_content::*;
pub use tabs::*;
