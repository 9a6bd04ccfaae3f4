// Class and node naming
// Stable class names double as registry node names so external automation
// can find a rendered node the same way a test does

use crate::core::TabBarPosition;

pub const DEFAULT_PREFIX: &str = "ink-tabs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNames {
    prefix: String,
}

impl ClassNames {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn class(&self, suffix: &str) -> String {
        format!("{}-{}", self.prefix, suffix)
    }

    pub fn root(&self) -> String {
        self.prefix.clone()
    }

    pub fn position(&self, position: TabBarPosition) -> String {
        self.class(position.as_str())
    }

    pub fn bar(&self) -> String {
        self.class("bar")
    }

    pub fn nav_container(&self) -> String {
        self.class("nav-container")
    }

    pub fn nav_container_scrolling(&self) -> String {
        self.class("nav-container-scrolling")
    }

    pub fn nav_wrap(&self) -> String {
        self.class("nav-wrap")
    }

    pub fn nav(&self) -> String {
        self.class("nav")
    }

    pub fn tab(&self) -> String {
        self.class("tab")
    }

    pub fn tab_active(&self) -> String {
        self.class("tab-active")
    }

    pub fn tab_disabled(&self) -> String {
        self.class("tab-disabled")
    }

    pub fn ink_bar(&self) -> String {
        self.class("ink-bar")
    }

    pub fn tab_prev(&self) -> String {
        self.class("tab-prev")
    }

    pub fn tab_next(&self) -> String {
        self.class("tab-next")
    }

    pub fn btn_disabled(&self) -> String {
        self.class("tab-btn-disabled")
    }

    pub fn arrow_show(&self) -> String {
        self.class("tab-arrow-show")
    }

    pub fn extra(&self) -> String {
        self.class("extra-content")
    }

    pub fn content(&self) -> String {
        self.class("content")
    }

    /// Registry name of a tab node
    pub fn tab_node(&self, key: &str) -> String {
        format!("{}:{}", self.tab(), key)
    }

    /// Common prefix of every tab node name
    pub fn tab_node_prefix(&self) -> String {
        format!("{}:", self.tab())
    }

    /// Every fixed node name a mounted widget may register. Tab nodes are
    /// covered by `tab_node_prefix`.
    pub fn fixed_nodes(&self) -> [String; 10] {
        [
            self.root(),
            self.bar(),
            self.nav_container(),
            self.nav_wrap(),
            self.nav(),
            self.ink_bar(),
            self.tab_prev(),
            self.tab_next(),
            self.extra(),
            self.content(),
        ]
    }
}

impl Default for ClassNames {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        let names = ClassNames::new("rc-tabs");
        assert_eq!(names.tab(), "rc-tabs-tab");
        assert_eq!(names.tab_active(), "rc-tabs-tab-active");
        assert_eq!(names.position(TabBarPosition::Left), "rc-tabs-left");
        assert_eq!(names.tab_node("3"), "rc-tabs-tab:3");
        assert!(names.tab_node("3").starts_with(&names.tab_node_prefix()));
    }

    #[test]
    fn test_fixed_nodes_stay_within_prefix() {
        let names = ClassNames::new("rc-tabs");
        let nodes = names.fixed_nodes();
        assert!(nodes.contains(&"rc-tabs".to_string()));
        assert!(nodes.contains(&"rc-tabs-content".to_string()));
        assert!(!nodes.iter().any(|n| n.starts_with("rc-tabs-alt")));
    }
}
