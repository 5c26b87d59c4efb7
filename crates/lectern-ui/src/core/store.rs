//! App-wide yewdux store slices.
//!
//! # Design
//! - Shared UI state lives in one store so views re-render through selectors.
//! - The signed-in user is published here by `SessionStore`; the token stays in
//!   storage and never enters the store.

use crate::features::admin::state::AdminState;
use crate::features::browse::state::BrowseState;
use lectern_api_models::User;
use yewdux::store::Store;

/// Global application store.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct AppStore {
    /// Signed-in user as last published by the session.
    pub session: SessionSlice,
    /// Course browser page.
    pub browse: BrowseState,
    /// Admin dashboard page.
    pub admin: AdminState,
}

/// Session state visible to views.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSlice {
    /// Profile fetched for the current token; `None` when signed out or not yet restored.
    pub user: Option<User>,
}

impl AppStore {
    /// Forget the user and everything loaded on their behalf.
    pub fn sign_out(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_out_clears_user_and_page_state() {
        let mut store = AppStore::default();
        store.session.user = Some(User {
            id: 3,
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            full_name: None,
            is_active: true,
            is_admin: true,
            created_at: None,
        });
        store.browse.loading = true;
        store.admin.scanning = true;
        store.sign_out();
        assert_eq!(store, AppStore::default());
    }
}
