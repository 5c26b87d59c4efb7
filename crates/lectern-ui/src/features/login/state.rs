//! Sign-in form state.
//!
//! # Design
//! - Inputs are kept verbatim; trimming happens in the session store.
//! - The form is locked while a request is in flight.

use crate::core::error::AuthError;
use lectern_api_models::LoginRequest;

/// Sign-in form contents and progress.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// Username input.
    pub username: String,
    /// Password input.
    pub password: String,
    /// Request in flight.
    pub busy: bool,
    /// Inline message under the form.
    pub error: Option<String>,
}

impl LoginForm {
    /// Start a submission; `None` when one is already running.
    pub fn begin_submit(&mut self) -> Option<LoginRequest> {
        if self.busy {
            return None;
        }
        self.busy = true;
        self.error = None;
        Some(LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }

    /// Record a failed submission; the password is cleared, the username kept.
    pub fn fail(&mut self, err: &AuthError) {
        self.busy = false;
        self.password.clear();
        self.error = Some(err.to_string());
    }

    /// Record a successful submission.
    pub fn succeed(&mut self) {
        *self = Self::default();
    }
}
