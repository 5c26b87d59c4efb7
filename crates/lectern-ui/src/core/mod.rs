//! Core, DOM-free primitives and helpers for the Web UI.
pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod guard;
pub mod playback;
pub mod session;
pub mod storage;
pub mod store;
pub mod tree;
