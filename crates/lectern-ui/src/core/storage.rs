//! Key/value persistence seam shared by the session and playback layers.
//!
//! # Design
//! - Values are plain strings, matching what the browser's local storage holds.
//! - The browser-backed implementation lives in `services::storage`; this module
//!   stays DOM-free so reducers and controllers run under native tests.
//! - Writes are last-write-wins; there is no history or versioning.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Storage key holding the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Prefix for per-file resume positions; the file path is appended verbatim.
pub const RESUME_KEY_PREFIX: &str = "lesson_progress_";
/// Optional override for the API base URL.
pub const API_BASE_OVERRIDE_KEY: &str = "lectern.api_base_url";

/// Minimal synchronous string store.
pub trait KeyValueStore {
    /// Read a value, `None` when absent or unreadable.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str);
    /// Remove a value; removing a missing key is a no-op.
    fn remove(&self, key: &str);
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value);
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

/// In-memory store; backs tests and pages where `localStorage` is unavailable.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

/// Storage key for the resume position of `file_path`.
#[must_use]
pub fn resume_key(file_path: &str) -> String {
    format!("{RESUME_KEY_PREFIX}{file_path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_overwrites_and_removes() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        store.set("k", "1");
        store.set("k", "2");
        assert_eq!(store.get("k").as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
        store.remove("k");
        store.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn shared_handle_sees_same_values() {
        let store = Rc::new(MemoryStore::new());
        let other = Rc::clone(&store);
        other.set(ACCESS_TOKEN_KEY, "abc");
        assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("abc"));
    }

    #[test]
    fn resume_key_appends_path_verbatim() {
        assert_eq!(
            resume_key("/courses/a b/intro.mp4"),
            "lesson_progress_/courses/a b/intro.mp4"
        );
    }
}
