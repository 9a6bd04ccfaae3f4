// Active Key Store
// Single source of truth for the selected tab, in controlled or uncontrolled mode

use super::descriptor::{contains_key, TabDescriptor};

/// Who owns the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    /// The caller supplies the active key; the store only mirrors it
    Controlled,
    /// The store owns the active key after an initial default
    Uncontrolled,
}

/// Initial key: `default_key` when it names a present tab, else the first tab, else none
pub fn initial_active_key(default_key: Option<&str>, descriptors: &[TabDescriptor]) -> Option<String> {
    if let Some(key) = default_key {
        if contains_key(descriptors, key) {
            return Some(key.to_string());
        }
    }
    descriptors.first().map(|d| d.key.clone())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveKeyStore {
    mode: KeyMode,
    active_key: Option<String>,
}

impl ActiveKeyStore {
    pub fn uncontrolled(default_key: Option<&str>, descriptors: &[TabDescriptor]) -> Self {
        Self {
            mode: KeyMode::Uncontrolled,
            active_key: initial_active_key(default_key, descriptors),
        }
    }

    /// The key is taken as-is, even when it matches no tab
    pub fn controlled(active_key: Option<String>) -> Self {
        Self {
            mode: KeyMode::Controlled,
            active_key,
        }
    }

    pub fn mode(&self) -> KeyMode {
        self.mode
    }

    pub fn is_controlled(&self) -> bool {
        self.mode == KeyMode::Controlled
    }

    pub fn active_key(&self) -> Option<&str> {
        self.active_key.as_deref()
    }

    /// Owner pushes a new controlled value. Returns true if the mirrored key changed.
    pub fn set_controlled_key(&mut self, key: Option<String>) -> bool {
        if !self.is_controlled() {
            tracing::debug!(?key, "Ignoring controlled key on uncontrolled store");
            return false;
        }
        if self.active_key == key {
            return false;
        }
        self.active_key = key;
        true
    }

    /// Reconcile the selection after the tab set changed (add, remove, reorder)
    pub fn on_descriptors_changed(&mut self, old: &[TabDescriptor], new: &[TabDescriptor]) -> Option<&str> {
        if self.is_controlled() {
            return self.active_key();
        }

        let still_present = self
            .active_key
            .as_deref()
            .map(|key| contains_key(new, key))
            .unwrap_or(false);

        if !still_present {
            let next = new.first().map(|d| d.key.clone());
            tracing::debug!(
                previous = ?self.active_key,
                next = ?next,
                old_count = old.len(),
                new_count = new.len(),
                "Active tab removed, selecting first tab"
            );
            self.active_key = next;
        }

        self.active_key()
    }

    /// Request activation of `key`.
    /// Returns `Some(key)` when the owner should fire `on_change`; uncontrolled
    /// stores have already stored the key by then.
    pub fn request_activate(&mut self, key: &str) -> Option<String> {
        if self.active_key.as_deref() == Some(key) {
            return None;
        }
        if self.mode == KeyMode::Uncontrolled {
            self.active_key = Some(key.to_string());
        }
        tracing::info!(key, mode = ?self.mode, "Tab activation requested");
        Some(key.to_string())
    }
}
