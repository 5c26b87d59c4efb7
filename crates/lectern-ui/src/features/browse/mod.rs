//! Course browser feature wiring.
//!
//! # Design
//! - The tree shown is always the latest full snapshot from `GET /courses/tree`.
//! - Category filtering narrows the snapshot to ids returned by the backend;
//!   previous/next keeps walking the whole library.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
