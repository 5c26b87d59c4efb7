//! Route guard decisions.
//!
//! # Design
//! - Decisions depend only on token presence and the published user, so the
//!   router switch stays a thin mapping.
//! - The admin gate is a UI convenience; the backend enforces authorization.

use lectern_api_models::User;

/// Pages that the guard reasons about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    /// Sign-in form.
    Login,
    /// Course browser.
    Courses,
    /// Admin dashboard.
    Admin,
}

impl ViewKind {
    /// Whether the page requires a stored token.
    #[must_use]
    pub const fn requires_auth(self) -> bool {
        matches!(self, Self::Courses | Self::Admin)
    }
}

/// Outcome of a guard check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the requested page.
    Render(ViewKind),
    /// Navigate to another page instead.
    Redirect(ViewKind),
}

/// Decide what to do with a navigation to `view`.
#[must_use]
pub const fn resolve(view: ViewKind, authenticated: bool) -> GuardDecision {
    match (view, authenticated) {
        (ViewKind::Login, true) => GuardDecision::Redirect(ViewKind::Courses),
        (ViewKind::Courses | ViewKind::Admin, false) => GuardDecision::Redirect(ViewKind::Login),
        (view, _) => GuardDecision::Render(view),
    }
}

/// Whether admin actions should be offered; an unknown user is not an admin.
#[must_use]
pub fn can_manage(user: Option<&User>) -> bool {
    user.is_some_and(|user| user.is_admin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_admin: bool) -> User {
        User {
            id: 7,
            username: "u".to_string(),
            email: "u@example.com".to_string(),
            full_name: None,
            is_active: true,
            is_admin,
            created_at: None,
        }
    }

    #[test]
    fn anonymous_users_are_sent_to_login() {
        assert_eq!(
            resolve(ViewKind::Courses, false),
            GuardDecision::Redirect(ViewKind::Login)
        );
        assert_eq!(
            resolve(ViewKind::Admin, false),
            GuardDecision::Redirect(ViewKind::Login)
        );
        assert_eq!(
            resolve(ViewKind::Login, false),
            GuardDecision::Render(ViewKind::Login)
        );
    }

    #[test]
    fn signed_in_users_skip_login() {
        assert_eq!(
            resolve(ViewKind::Login, true),
            GuardDecision::Redirect(ViewKind::Courses)
        );
        assert_eq!(
            resolve(ViewKind::Admin, true),
            GuardDecision::Render(ViewKind::Admin)
        );
        assert!(ViewKind::Courses.requires_auth());
        assert!(!ViewKind::Login.requires_auth());
    }

    #[test]
    fn only_admin_users_can_manage() {
        assert!(can_manage(Some(&user(true))));
        assert!(!can_manage(Some(&user(false))));
        assert!(!can_manage(None));
    }
}
