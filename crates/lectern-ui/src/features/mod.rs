//! Feature slices: page state plus wasm-only views.
pub mod admin;
pub mod browse;
pub mod login;
