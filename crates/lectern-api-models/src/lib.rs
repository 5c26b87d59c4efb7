#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(
    unused,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the Lectern course library API.
//!
//! The backend owns the schema; these types mirror its JSON shapes exactly so the
//! UI can decode responses and encode request bodies without hand-written maps.
//! Timestamps stay as the raw strings the backend emits (naive ISO-8601 without a
//! zone in practice) and are parsed leniently only when rendered.
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Authenticated account profile returned by `GET /auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Backend identifier.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Contact address.
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional display name.
    pub full_name: Option<String>,
    /// Whether the account may sign in.
    pub is_active: bool,
    /// Grants rescan and category editing.
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Account creation timestamp as sent by the backend.
    pub created_at: Option<String>,
}

impl User {
    /// Name shown in the header: the full name when present, otherwise the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}

/// Credentials posted to `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plain-text password; only ever sent over the wire.
    pub password: String,
}

/// Bearer token issued by `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    /// Opaque bearer token.
    pub access_token: String,
    /// Token scheme, `bearer` in practice.
    pub token_type: String,
}

/// User-facing grouping label for courses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Backend identifier; `0` is reserved for the client-side "None" entry.
    pub id: i64,
    /// Display name.
    pub name: String,
    #[serde(default)]
    /// Optional icon glyph.
    pub icon: Option<String>,
    #[serde(default)]
    /// Optional description.
    pub description: Option<String>,
}

impl Category {
    /// Identifier of the synthetic "None" category used by edit controls.
    pub const NONE_ID: i64 = 0;

    /// Synthetic "None" entry representing an uncategorized course.
    #[must_use]
    pub fn none() -> Self {
        Self {
            id: Self::NONE_ID,
            name: "None".to_string(),
            icon: None,
            description: None,
        }
    }
}

/// Course summary returned by the course listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Course {
    /// Backend identifier.
    pub id: i64,
    /// Course title (derived from the folder name by the scanner).
    pub title: String,
    #[serde(default)]
    /// Optional description.
    pub description: Option<String>,
    #[serde(default)]
    /// Assigned category, if any.
    pub category_id: Option<i64>,
    /// Number of lessons across all modules.
    pub total_lessons: u32,
    /// Aggregate duration in seconds.
    pub total_duration: u64,
    /// Creation timestamp as sent by the backend.
    pub created_at: String,
}

impl Course {
    /// Calendar date of [`Course::created_at`] when it parses.
    #[must_use]
    pub fn created_on(&self) -> Option<NaiveDate> {
        parse_timestamp_date(&self.created_at)
    }
}

/// Parse a backend timestamp into its calendar date.
///
/// Accepts RFC 3339 values as well as the naive `YYYY-MM-DDTHH:MM:SS[.ffffff]`
/// form the backend emits for zone-less columns.
#[must_use]
pub fn parse_timestamp_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|parsed| parsed.date())
        .ok()
}

/// A course plus its recursive module forest, as served by `GET /courses/tree`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseTree {
    #[serde(flatten)]
    /// Course summary fields.
    pub course: Course,
    /// Root folder of the course on the server.
    pub file_path: String,
    #[serde(default)]
    /// Top-level modules in display order.
    pub modules: Vec<ModuleNode>,
}

/// A module (folder) inside a course; modules nest arbitrarily deep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleNode {
    /// Backend identifier.
    pub id: i64,
    /// Module title.
    pub title: String,
    /// Ordering key among siblings.
    pub order: i32,
    #[serde(default)]
    /// Source folder on the server.
    pub file_path: Option<String>,
    #[serde(default)]
    /// Lessons directly inside this module, in display order.
    pub lessons: Vec<LessonNode>,
    #[serde(default)]
    /// Nested modules, in display order.
    pub children: Vec<ModuleNode>,
}

/// A single playable (or viewable) file inside a module.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LessonNode {
    /// Backend identifier; not stable across rescans.
    pub id: i64,
    /// Lesson title.
    pub title: String,
    /// Media type label assigned by the scanner (`video`, `audio`, `pdf`, or an extension).
    pub file_type: String,
    /// Source file path on the server; stable across rescans.
    pub file_path: String,
    /// Ordering key among siblings.
    pub order: i32,
    #[serde(default)]
    /// Optional duration in seconds.
    pub duration: Option<u64>,
}

impl LessonNode {
    /// Classified media kind for this lesson.
    #[must_use]
    pub fn media_kind(&self) -> MediaKind {
        MediaKind::from_file_type(&self.file_type)
    }
}

/// Coarse media classification used to pick a viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Rendered with a video element.
    Video,
    /// Rendered with an audio element.
    Audio,
    /// Rendered with an embedded document viewer.
    Document,
    /// Anything else; offered as a download.
    Other,
}

impl MediaKind {
    /// Classify a scanner `file_type` label.
    ///
    /// The scanner already normalises known extensions to `video`/`audio`/`pdf`;
    /// raw extensions are accepted too so older snapshots still classify.
    #[must_use]
    pub fn from_file_type(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "video" | "mp4" | "mov" | "mkv" | "webm" => Self::Video,
            "audio" | "mp3" | "wav" | "m4a" | "ogg" => Self::Audio,
            "pdf" => Self::Document,
            _ => Self::Other,
        }
    }

    /// Whether the playback controller can drive this kind.
    #[must_use]
    pub const fn is_playable(self) -> bool {
        matches!(self, Self::Video | Self::Audio)
    }
}

/// Body of `PATCH /courses/{id}/category`.
///
/// `None` serialises as an explicit `null`, which clears the assignment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseCategoryUpdate {
    /// New category, or `None` to clear.
    pub category_id: Option<i64>,
}

/// Empty JSON object posted to `POST /scanner/scan`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ScanRequest {}

/// Counts reported by a backend rescan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanResult {
    /// Whether the scan completed.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Courses created.
    pub courses_created: u32,
    /// Courses updated.
    pub courses_updated: u32,
    /// Modules created.
    pub modules_created: u32,
    /// Lessons created.
    pub lessons_created: u32,
    /// Categories created.
    pub categories_created: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn course_tree_decodes_nested_modules() {
        let value = json!([{
            "id": 3,
            "title": "Rust",
            "description": null,
            "category_id": 2,
            "total_lessons": 3,
            "total_duration": 5400,
            "created_at": "2024-03-01T10:15:00.123456",
            "file_path": "/courses/rust",
            "modules": [{
                "id": 10,
                "title": "01 Basics",
                "order": 0,
                "file_path": "/courses/rust/01 Basics",
                "lessons": [{
                    "id": 100,
                    "title": "intro.mp4",
                    "file_type": "video",
                    "file_path": "/courses/rust/01 Basics/intro.mp4",
                    "order": 0,
                    "duration": null
                }],
                "children": [{
                    "id": 11,
                    "title": "Extras",
                    "order": 0,
                    "lessons": [],
                    "children": []
                }]
            }]
        }]);
        let trees: Vec<CourseTree> = serde_json::from_value(value).expect("tree decodes");
        assert_eq!(trees.len(), 1);
        let tree = &trees[0];
        assert_eq!(tree.course.id, 3);
        assert_eq!(tree.course.category_id, Some(2));
        assert_eq!(tree.modules[0].lessons[0].media_kind(), MediaKind::Video);
        assert_eq!(tree.modules[0].children[0].file_path, None);
        assert_eq!(
            tree.course.created_on(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn clearing_category_serialises_null() {
        let body = serde_json::to_value(CourseCategoryUpdate { category_id: None })
            .expect("serialise");
        assert_eq!(body, json!({ "category_id": null }));
        let body = serde_json::to_value(CourseCategoryUpdate {
            category_id: Some(4),
        })
        .expect("serialise");
        assert_eq!(body, json!({ "category_id": 4 }));
    }

    #[test]
    fn scan_request_is_empty_object() {
        let body = serde_json::to_value(ScanRequest::default()).expect("serialise");
        assert_eq!(body, json!({}));
    }

    #[test]
    fn media_kind_follows_scanner_labels() {
        assert_eq!(MediaKind::from_file_type("video"), MediaKind::Video);
        assert_eq!(MediaKind::from_file_type("AUDIO"), MediaKind::Audio);
        assert_eq!(MediaKind::from_file_type("mkv"), MediaKind::Video);
        assert_eq!(MediaKind::from_file_type("pdf"), MediaKind::Document);
        assert_eq!(MediaKind::from_file_type("zip"), MediaKind::Other);
        assert!(MediaKind::Audio.is_playable());
        assert!(!MediaKind::Document.is_playable());
    }

    #[test]
    fn display_name_prefers_full_name() {
        let mut user = User {
            id: 1,
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            full_name: Some("Ada Lovelace".to_string()),
            is_active: true,
            is_admin: false,
            created_at: None,
        };
        assert_eq!(user.display_name(), "Ada Lovelace");
        user.full_name = Some("  ".to_string());
        assert_eq!(user.display_name(), "ada");
    }

    #[test]
    fn timestamps_parse_with_or_without_zone() {
        let expected = NaiveDate::from_ymd_opt(2023, 12, 31);
        assert_eq!(parse_timestamp_date("2023-12-31T23:00:00Z"), expected);
        assert_eq!(parse_timestamp_date("2023-12-31T23:00:00"), expected);
        assert_eq!(parse_timestamp_date("yesterday"), None);
    }
}
