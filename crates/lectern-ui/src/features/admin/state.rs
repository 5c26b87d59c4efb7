//! Admin dashboard state.
//!
//! # Design
//! - At most one rescan is in flight; a second trigger is refused here rather
//!   than sent to the backend.
//! - Category options always start with the synthetic "None" entry.

use crate::core::catalog::{CategoryChoice, with_none_option};
use crate::core::guard::can_manage;
use lectern_api_models::{Category, CourseCategoryUpdate, CourseTree, ScanResult, User};

/// Outcome of asking to start an admin action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminGate {
    /// Go ahead and send the request.
    Allowed,
    /// The current user is not an admin; nothing is sent.
    NotAdmin,
    /// The same action is already running; nothing is sent.
    InFlight,
}

/// State backing the admin dashboard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdminState {
    /// Latest tree snapshot.
    pub courses: Vec<CourseTree>,
    /// Edit options, "None" first.
    pub categories: Vec<Category>,
    /// Result of the last completed rescan.
    pub scan_result: Option<ScanResult>,
    /// Rescan in flight.
    pub scanning: bool,
    /// Course whose category change is in flight.
    pub saving_course: Option<i64>,
    /// Tree request in flight.
    pub loading: bool,
    /// Last failure shown on the dashboard.
    pub error: Option<String>,
}

impl AdminState {
    /// Replace the tree with a fresh snapshot.
    pub fn set_tree(&mut self, courses: Vec<CourseTree>) {
        self.courses = courses;
        self.loading = false;
    }

    /// Replace the category options, prepending "None".
    pub fn set_categories(&mut self, categories: &[Category]) {
        self.categories = with_none_option(categories);
    }

    /// Record a failure and clear the tree loading flag.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Ask to start a rescan on behalf of `user`.
    ///
    /// On [`AdminGate::Allowed`] the state is marked as scanning and the previous
    /// result is cleared.
    pub fn begin_rescan(&mut self, user: Option<&User>) -> AdminGate {
        if !can_manage(user) {
            return AdminGate::NotAdmin;
        }
        if self.scanning {
            return AdminGate::InFlight;
        }
        self.scanning = true;
        self.scan_result = None;
        self.error = None;
        AdminGate::Allowed
    }

    /// Record the end of a rescan. Returns `true` when the tree should be refetched.
    pub fn finish_rescan(&mut self, outcome: Result<ScanResult, String>) -> bool {
        self.scanning = false;
        match outcome {
            Ok(result) => {
                self.scan_result = Some(result);
                true
            }
            Err(message) => {
                self.error = Some(message);
                false
            }
        }
    }

    /// Ask to change the category of `course_id` to the `<select>` value `value`.
    ///
    /// # Errors
    /// Returns the refusing gate when the user is not an admin or another change is
    /// still being saved.
    pub fn begin_category_change(
        &mut self,
        user: Option<&User>,
        course_id: i64,
        value: &str,
    ) -> Result<CourseCategoryUpdate, AdminGate> {
        if !can_manage(user) {
            return Err(AdminGate::NotAdmin);
        }
        if self.saving_course.is_some() {
            return Err(AdminGate::InFlight);
        }
        self.saving_course = Some(course_id);
        self.error = None;
        Ok(CategoryChoice::from_select_value(value).to_update())
    }

    /// Record the end of a category change. Returns `true` when the tree should be
    /// refetched.
    pub fn finish_category_change(&mut self, outcome: Result<(), String>) -> bool {
        self.saving_course = None;
        match outcome {
            Ok(()) => true,
            Err(message) => {
                self.error = Some(message);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_admin: bool) -> User {
        User {
            id: 1,
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            full_name: None,
            is_active: true,
            is_admin,
            created_at: None,
        }
    }

    fn scan() -> ScanResult {
        ScanResult {
            success: true,
            message: "Scan complete".to_string(),
            courses_created: 1,
            courses_updated: 0,
            modules_created: 2,
            lessons_created: 5,
            categories_created: 0,
        }
    }

    #[test]
    fn rescan_is_refused_for_non_admins() {
        let mut state = AdminState::default();
        assert_eq!(state.begin_rescan(Some(&user(false))), AdminGate::NotAdmin);
        assert_eq!(state.begin_rescan(None), AdminGate::NotAdmin);
        assert!(!state.scanning);
    }

    #[test]
    fn second_rescan_is_refused_while_running() {
        let mut state = AdminState::default();
        let admin = user(true);
        assert_eq!(state.begin_rescan(Some(&admin)), AdminGate::Allowed);
        assert_eq!(state.begin_rescan(Some(&admin)), AdminGate::InFlight);
        assert!(state.finish_rescan(Ok(scan())));
        assert!(!state.scanning);
        assert_eq!(state.scan_result, Some(scan()));
        assert_eq!(state.begin_rescan(Some(&admin)), AdminGate::Allowed);
        assert_eq!(state.scan_result, None);
    }

    #[test]
    fn failed_rescan_keeps_tree_and_reports() {
        let mut state = AdminState::default();
        state.begin_rescan(Some(&user(true)));
        assert!(!state.finish_rescan(Err("timed out".to_string())));
        assert!(!state.scanning);
        assert_eq!(state.error.as_deref(), Some("timed out"));
    }

    #[test]
    fn none_option_clears_category() {
        let mut state = AdminState::default();
        let admin = user(true);
        let update = state.begin_category_change(Some(&admin), 3, "0");
        assert_eq!(update, Ok(CourseCategoryUpdate { category_id: None }));
        assert_eq!(
            state.begin_category_change(Some(&admin), 4, "2"),
            Err(AdminGate::InFlight)
        );
        assert!(state.finish_category_change(Ok(())));
        assert_eq!(
            state.begin_category_change(Some(&admin), 4, "2"),
            Ok(CourseCategoryUpdate { category_id: Some(2) })
        );
    }

    #[test]
    fn category_change_needs_admin() {
        let mut state = AdminState::default();
        assert_eq!(
            state.begin_category_change(Some(&user(false)), 3, "2"),
            Err(AdminGate::NotAdmin)
        );
        assert_eq!(state.saving_course, None);
    }

    #[test]
    fn categories_start_with_none() {
        let mut state = AdminState::default();
        state.set_categories(&[Category {
            id: 4,
            name: "Music".to_string(),
            icon: None,
            description: None,
        }]);
        assert_eq!(state.categories[0], Category::none());
        assert_eq!(state.categories.len(), 2);
    }
}
