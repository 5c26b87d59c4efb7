//! Error taxonomy for API calls and the session lifecycle.
//!
//! # Design
//! - `ApiError` classifies transport outcomes; it never carries DOM types so it can
//!   be built and matched in native tests.
//! - `AuthError` is what login surfaces to the view; its `Display` text is the
//!   inline message shown under the form.

use serde_json::Value;
use thiserror::Error;

/// Failure of a single REST call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, DNS, aborted).
    #[error("request failed: {0}")]
    Network(String),
    /// The request exceeded its deadline and was aborted.
    #[error("request timed out after {seconds}s")]
    Timeout {
        /// Deadline that elapsed.
        seconds: u32,
    },
    /// HTTP 401: missing, expired or invalid bearer token.
    #[error("not authenticated: {detail}")]
    Unauthorized {
        /// Backend detail text.
        detail: String,
    },
    /// HTTP 403: authenticated but not allowed.
    #[error("not permitted: {detail}")]
    Forbidden {
        /// Backend detail text.
        detail: String,
    },
    /// HTTP 404.
    #[error("not found: {detail}")]
    NotFound {
        /// Backend detail text.
        detail: String,
    },
    /// Any other non-success status.
    #[error("server returned {status}: {detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Backend detail text.
        detail: String,
    },
    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-success response from its status and raw body.
    ///
    /// The backend reports errors as `{"detail": ...}` where `detail` is either a
    /// string or a list of validation entries; anything else falls back to the raw
    /// body text.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        match status {
            401 => Self::Unauthorized { detail },
            403 => Self::Forbidden { detail },
            404 => Self::NotFound { detail },
            _ => Self::Status { status, detail },
        }
    }

    /// Whether this error means the stored session is no longer valid.
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

fn extract_detail(body: &str) -> String {
    let trimmed = body.trim();
    let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
        return trimmed.to_string();
    };
    match value.get("detail") {
        Some(Value::String(detail)) => detail.clone(),
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        Some(other) => other.to_string(),
        None => trimmed.to_string(),
    }
}

/// Failure of a login or session restore.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Username or password left blank.
    #[error("Enter both a username and a password")]
    MissingCredentials,
    /// The backend rejected the credentials.
    #[error("Invalid username or password")]
    InvalidCredentials,
    /// A token was issued or restored but the profile fetch refused it.
    #[error("Your session has expired; please sign in again")]
    SessionRejected,
    /// The backend could not be reached or answered unexpectedly.
    #[error("Sign-in failed: {0}")]
    Transport(ApiError),
}

impl AuthError {
    /// Map a failed `POST /auth/login` into the login taxonomy.
    #[must_use]
    pub fn from_login_failure(err: ApiError) -> Self {
        match err {
            // FastAPI reports bad credentials as 401; some deployments use 400.
            ApiError::Unauthorized { .. } | ApiError::Status { status: 400, .. } => {
                Self::InvalidCredentials
            }
            other => Self::Transport(other),
        }
    }

    /// Map a failed `GET /auth/me` into the login taxonomy.
    #[must_use]
    pub fn from_profile_failure(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized { .. } | ApiError::Forbidden { .. } => Self::SessionRejected,
            other => Self::Transport(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_to_variants_with_detail() {
        assert_eq!(
            ApiError::from_response(401, r#"{"detail":"Could not validate credentials"}"#),
            ApiError::Unauthorized {
                detail: "Could not validate credentials".to_string()
            }
        );
        assert_eq!(
            ApiError::from_response(403, r#"{"detail":"Not enough permissions"}"#),
            ApiError::Forbidden {
                detail: "Not enough permissions".to_string()
            }
        );
        assert_eq!(
            ApiError::from_response(500, "boom"),
            ApiError::Status {
                status: 500,
                detail: "boom".to_string()
            }
        );
    }

    #[test]
    fn validation_detail_lists_are_joined() {
        let body = r#"{"detail":[{"loc":["body","username"],"msg":"field required"},{"msg":"too short"}]}"#;
        let err = ApiError::from_response(422, body);
        assert_eq!(
            err,
            ApiError::Status {
                status: 422,
                detail: "field required; too short".to_string()
            }
        );
    }

    #[test]
    fn only_unauthorized_counts_as_auth_failure() {
        assert!(ApiError::from_response(401, "").is_auth());
        assert!(!ApiError::from_response(403, "").is_auth());
        assert!(!ApiError::Network("offline".to_string()).is_auth());
    }

    #[test]
    fn login_failures_map_to_inline_messages() {
        let err = AuthError::from_login_failure(ApiError::from_response(401, ""));
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "Invalid username or password");
        let err = AuthError::from_login_failure(ApiError::Timeout { seconds: 30 });
        assert!(matches!(err, AuthError::Transport(ApiError::Timeout { .. })));
        let err = AuthError::from_profile_failure(ApiError::from_response(401, ""));
        assert_eq!(err, AuthError::SessionRejected);
    }
}
