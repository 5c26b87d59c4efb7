//! `localStorage` binding for the key/value seam.
//!
//! Values are stored raw, not JSON-encoded, so tokens and resume positions stay
//! readable by other tools inspecting the origin's storage. Pages without
//! `localStorage` (privacy modes, sandboxed frames) fall back to memory, which
//! lasts until reload.

use crate::core::storage::{KeyValueStore, MemoryStore};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;
use std::rc::Rc;

/// Handle to the origin's `localStorage`, or to a shared in-memory substitute.
#[derive(Clone, Debug)]
pub(crate) enum BrowserStore {
    Local,
    Memory(Rc<MemoryStore>),
}

impl BrowserStore {
    /// Probe `localStorage` once; every consumer should share the returned handle.
    pub(crate) fn open() -> Self {
        match window().local_storage() {
            Ok(Some(_)) => Self::Local,
            Ok(None) | Err(_) => {
                console::warn!("localStorage unavailable; sign-in and progress last until reload");
                Self::Memory(Rc::new(MemoryStore::new()))
            }
        }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            Self::Local => LocalStorage::raw().get_item(key).ok().flatten(),
            Self::Memory(store) => store.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) {
        match self {
            Self::Local => {
                if let Err(err) = LocalStorage::raw().set_item(key, value) {
                    log_storage_error("set", key, &err);
                }
            }
            Self::Memory(store) => store.set(key, value),
        }
    }

    fn remove(&self, key: &str) {
        match self {
            Self::Local => {
                if let Err(err) = LocalStorage::raw().remove_item(key) {
                    log_storage_error("remove", key, &err);
                }
            }
            Self::Memory(store) => store.remove(key),
        }
    }
}

fn log_storage_error(op: &str, key: &str, err: &wasm_bindgen::JsValue) {
    console::error!(format!("storage {op} failed for {key}: {err:?}"));
}
