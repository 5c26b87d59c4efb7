//! Browser-bound services: HTTP, local storage and media elements.
pub(crate) mod api;
pub(crate) mod media;
pub(crate) mod storage;
