//! Admin dashboard feature wiring.
//!
//! # Design
//! - Both mutations (rescan, category reassignment) are followed by a full tree
//!   refetch; nothing is patched locally.
//! - Admin checks here only decide what the UI offers; the backend enforces them.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
