//! REST contract of the catalog and auth endpoints, free of transport details.
//!
//! # Design
//! - Paths and bodies are built here so they are covered by native tests; the
//!   wasm `ApiClient` only sends them.
//! - Every call hits the network: no caching, no retries, no debouncing.
//! - Rescan is long-running and must not be issued twice concurrently; that
//!   discipline belongs to the caller (see the admin feature state).

use crate::core::error::ApiError;
use lectern_api_models::{Category, CourseCategoryUpdate, LoginRequest, TokenResponse, User};
use std::future::Future;

/// `POST` login endpoint.
pub const LOGIN_PATH: &str = "/auth/login";
/// Current profile endpoint.
pub const ME_PATH: &str = "/auth/me";
/// Category listing endpoint.
pub const CATEGORIES_PATH: &str = "/categories";
/// Full course tree endpoint.
pub const COURSE_TREE_PATH: &str = "/courses/tree";
/// Rescan trigger endpoint.
pub const SCAN_PATH: &str = "/scanner/scan";

/// Deadline for ordinary catalog calls, in seconds.
pub const REQUEST_TIMEOUT_SECS: u32 = 30;
/// Deadline for a rescan, which walks the whole course folder on the server.
pub const SCAN_TIMEOUT_SECS: u32 = 600;

/// Course listing path, optionally narrowed to one category.
#[must_use]
pub fn courses_path(category_id: Option<i64>) -> String {
    category_id.map_or_else(
        || "/courses".to_string(),
        |id| format!("/courses/category/{id}"),
    )
}

/// Single course path.
#[must_use]
pub fn course_path(course_id: i64) -> String {
    format!("/courses/{course_id}")
}

/// Category reassignment path.
#[must_use]
pub fn course_category_path(course_id: i64) -> String {
    format!("/courses/{course_id}/category")
}

/// Playback source URL for a lesson file.
///
/// The whole path is percent-encoded into a single segment, slashes included; the
/// backend decodes it before resolving against its courses root.
#[must_use]
pub fn file_url(api_base: &str, file_path: &str) -> String {
    format!(
        "{}/files/{}",
        api_base.trim_end_matches('/'),
        urlencoding::encode(file_path)
    )
}

/// Category selection coming from an edit control.
///
/// The edit controls list a synthetic "None" entry with id `0`; it must reach the
/// backend as `null`, never as `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategoryChoice {
    /// Clear the course's category.
    Unassigned,
    /// Assign the given category.
    Assigned(i64),
}

impl CategoryChoice {
    /// Interpret a numeric id from an edit control; non-positive ids mean "None".
    #[must_use]
    pub const fn from_id(id: i64) -> Self {
        if id > Category::NONE_ID {
            Self::Assigned(id)
        } else {
            Self::Unassigned
        }
    }

    /// Interpret a `<select>` value; anything unparsable means "None".
    #[must_use]
    pub fn from_select_value(value: &str) -> Self {
        value
            .trim()
            .parse::<i64>()
            .map_or(Self::Unassigned, Self::from_id)
    }

    /// Request body for `PATCH /courses/{id}/category`.
    #[must_use]
    pub const fn to_update(self) -> CourseCategoryUpdate {
        match self {
            Self::Unassigned => CourseCategoryUpdate { category_id: None },
            Self::Assigned(id) => CourseCategoryUpdate {
                category_id: Some(id),
            },
        }
    }

    /// `<select>` value for the current assignment of a course.
    #[must_use]
    pub fn select_value(category_id: Option<i64>) -> String {
        category_id
            .filter(|id| *id > Category::NONE_ID)
            .unwrap_or(Category::NONE_ID)
            .to_string()
    }
}

/// Category list for edit controls: "None" first, then the backend categories.
#[must_use]
pub fn with_none_option(categories: &[Category]) -> Vec<Category> {
    std::iter::once(Category::none())
        .chain(
            categories
                .iter()
                .filter(|category| category.id != Category::NONE_ID)
                .cloned(),
        )
        .collect()
}

/// The two auth calls the session store depends on.
pub trait AuthApi {
    /// `POST /auth/login`.
    fn login(
        &self,
        credentials: &LoginRequest,
    ) -> impl Future<Output = Result<TokenResponse, ApiError>>;

    /// `GET /auth/me` with the given bearer token.
    fn current_user(&self, token: &str) -> impl Future<Output = Result<User, ApiError>>;
}

/// `Authorization` header value for a bearer token.
#[must_use]
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {}", token.trim())
}
