//! Reusable view components.
pub(crate) mod course_tree;
pub(crate) mod header;
pub(crate) mod player;
pub(crate) mod sidebar;
