//! Session store: bearer token persistence plus the published current user.
//!
//! # Design
//! - The session is an explicitly constructed context object; views receive it
//!   through a Yew context provider rather than reaching for globals.
//! - `is_authenticated` reflects token presence only; expiry is discovered when the
//!   backend refuses the token, which triggers an implicit logout.
//! - The user is published synchronously into the `AppStore` session slice, so
//!   views observe it with `use_selector` like any other shared state.

use crate::core::catalog::AuthApi;
use crate::core::error::{ApiError, AuthError};
use crate::core::storage::{ACCESS_TOKEN_KEY, KeyValueStore};
use crate::core::store::AppStore;
use lectern_api_models::{LoginRequest, User};
use std::fmt;
use yewdux::prelude::Dispatch;

/// Authenticated session context.
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Build a session over `storage`. No network activity happens until
    /// [`SessionStore::restore`] or [`SessionStore::login`] is awaited.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persisted bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.storage
            .get(ACCESS_TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
    }

    /// Whether a token is stored. No expiry check is performed.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Latest published user.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        Dispatch::<AppStore>::new().get().session.user.clone()
    }

    /// Whether the current user holds the admin flag.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        Dispatch::<AppStore>::new()
            .get()
            .session
            .user
            .as_ref()
            .is_some_and(|user| user.is_admin)
    }

    /// Sign in, persist the issued token and publish the fetched profile.
    ///
    /// # Errors
    /// - [`AuthError::MissingCredentials`] when either field is blank (no request is sent).
    /// - [`AuthError::InvalidCredentials`] when the backend rejects the credentials.
    /// - [`AuthError::SessionRejected`] when the profile fetch refuses the new token;
    ///   the session is logged out before returning.
    /// - [`AuthError::Transport`] for any other transport or server failure.
    pub async fn login<A: AuthApi>(
        &self,
        api: &A,
        credentials: &LoginRequest,
    ) -> Result<User, AuthError> {
        if credentials.username.trim().is_empty() || credentials.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        let token = api
            .login(credentials)
            .await
            .map_err(AuthError::from_login_failure)?;
        self.storage.set(ACCESS_TOKEN_KEY, &token.access_token);
        self.load_profile(api, &token.access_token).await
    }

    /// Revalidate a persisted token at startup.
    ///
    /// Returns `Ok(None)` when there is no token to restore.
    ///
    /// # Errors
    /// Same as the profile step of [`SessionStore::login`]; any failure clears the token.
    pub async fn restore<A: AuthApi>(&self, api: &A) -> Result<Option<User>, AuthError> {
        let Some(token) = self.token() else {
            publish(None);
            return Ok(None);
        };
        self.load_profile(api, &token).await.map(Some)
    }

    /// Clear the token, then drop the user and every page loaded on their behalf.
    pub fn logout(&self) {
        self.storage.remove(ACCESS_TOKEN_KEY);
        Dispatch::<AppStore>::new().reduce_mut(AppStore::sign_out);
    }

    /// React to a failed catalog call; an auth failure ends the session.
    ///
    /// Returns `true` when the session was ended.
    pub fn handle_api_error(&self, err: &ApiError) -> bool {
        if err.is_auth() && self.is_authenticated() {
            self.logout();
            return true;
        }
        false
    }

    async fn load_profile<A: AuthApi>(&self, api: &A, token: &str) -> Result<User, AuthError> {
        match api.current_user(token).await {
            Ok(user) => {
                publish(Some(user.clone()));
                Ok(user)
            }
            Err(err) => {
                self.logout();
                Err(AuthError::from_profile_failure(err))
            }
        }
    }
}

fn publish(user: Option<User>) {
    Dispatch::<AppStore>::new().reduce_mut(|store| store.session.user = user);
}

impl<S> fmt::Debug for SessionStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;
    use lectern_api_models::TokenResponse;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn fresh_store() -> Dispatch<AppStore> {
        let dispatch = Dispatch::<AppStore>::new();
        dispatch.reduce_mut(AppStore::sign_out);
        dispatch
    }

    struct ScriptedAuth {
        login: Result<TokenResponse, ApiError>,
        me: Result<User, ApiError>,
        login_calls: Cell<u32>,
        seen_token: RefCell<Option<String>>,
    }

    impl ScriptedAuth {
        fn accepting(user: User) -> Self {
            Self {
                login: Ok(TokenResponse {
                    access_token: "tok-1".to_string(),
                    token_type: "bearer".to_string(),
                }),
                me: Ok(user),
                login_calls: Cell::new(0),
                seen_token: RefCell::new(None),
            }
        }
    }

    impl AuthApi for ScriptedAuth {
        async fn login(&self, _credentials: &LoginRequest) -> Result<TokenResponse, ApiError> {
            self.login_calls.set(self.login_calls.get() + 1);
            self.login.clone()
        }

        async fn current_user(&self, token: &str) -> Result<User, ApiError> {
            *self.seen_token.borrow_mut() = Some(token.to_string());
            self.me.clone()
        }
    }

    fn user(is_admin: bool) -> User {
        User {
            id: 1,
            username: "learner".to_string(),
            email: "learner@example.com".to_string(),
            full_name: None,
            is_active: true,
            is_admin,
            created_at: None,
        }
    }

    fn credentials() -> LoginRequest {
        LoginRequest {
            username: "learner".to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn login_persists_token_and_publishes_user() {
        fresh_store();
        let storage = Rc::new(MemoryStore::new());
        let session = SessionStore::new(Rc::clone(&storage));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let subscription = Dispatch::<AppStore>::subscribe(move |store: Rc<AppStore>| {
            let admin = store.session.user.as_ref().map(|user| user.is_admin);
            sink.borrow_mut().push(admin);
        });
        let api = ScriptedAuth::accepting(user(false));

        let result = session.login(&api, &credentials()).await;

        assert_eq!(result, Ok(user(false)));
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).as_deref(), Some("tok-1"));
        assert_eq!(api.seen_token.borrow().as_deref(), Some("tok-1"));
        assert!(session.is_authenticated());
        assert!(!session.is_admin());
        assert_eq!(seen.borrow().last(), Some(&Some(false)));

        drop(subscription);
        let delivered = seen.borrow().len();
        session.logout();
        assert_eq!(seen.borrow().len(), delivered);
        assert_eq!(session.current_user(), None);
    }

    #[tokio::test]
    async fn blank_credentials_never_reach_backend() {
        fresh_store();
        let session = SessionStore::new(MemoryStore::new());
        let api = ScriptedAuth::accepting(user(false));
        let creds = LoginRequest {
            username: "  ".to_string(),
            password: "secret".to_string(),
        };
        assert_eq!(
            session.login(&api, &creds).await,
            Err(AuthError::MissingCredentials)
        );
        assert_eq!(api.login_calls.get(), 0);
    }

    #[tokio::test]
    async fn rejected_credentials_leave_session_empty() {
        fresh_store();
        let session = SessionStore::new(MemoryStore::new());
        let mut api = ScriptedAuth::accepting(user(false));
        api.login = Err(ApiError::from_response(401, r#"{"detail":"Incorrect"}"#));
        assert_eq!(
            session.login(&api, &credentials()).await,
            Err(AuthError::InvalidCredentials)
        );
        assert!(!session.is_authenticated());
        assert_eq!(session.current_user(), None);
    }

    #[tokio::test]
    async fn refused_profile_logs_out() {
        fresh_store();
        let storage = Rc::new(MemoryStore::new());
        let session = SessionStore::new(Rc::clone(&storage));
        let mut api = ScriptedAuth::accepting(user(true));
        api.me = Err(ApiError::from_response(401, ""));
        assert_eq!(
            session.login(&api, &credentials()).await,
            Err(AuthError::SessionRejected)
        );
        assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn restore_revalidates_stored_token() {
        fresh_store();
        let storage = Rc::new(MemoryStore::new());
        storage.set(ACCESS_TOKEN_KEY, "persisted");
        let session = SessionStore::new(Rc::clone(&storage));
        assert!(session.is_authenticated());
        assert_eq!(session.current_user(), None);

        let api = ScriptedAuth::accepting(user(true));
        assert_eq!(session.restore(&api).await, Ok(Some(user(true))));
        assert_eq!(api.seen_token.borrow().as_deref(), Some("persisted"));
        assert!(session.is_admin());
    }

    #[tokio::test]
    async fn restore_with_expired_token_logs_out() {
        fresh_store();
        let storage = Rc::new(MemoryStore::new());
        storage.set(ACCESS_TOKEN_KEY, "stale");
        let session = SessionStore::new(Rc::clone(&storage));
        let mut api = ScriptedAuth::accepting(user(false));
        api.me = Err(ApiError::from_response(401, ""));
        assert_eq!(session.restore(&api).await, Err(AuthError::SessionRejected));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn restore_without_token_is_a_no_op() {
        fresh_store();
        let session = SessionStore::new(MemoryStore::new());
        let api = ScriptedAuth::accepting(user(false));
        assert_eq!(session.restore(&api).await, Ok(None));
        assert!(api.seen_token.borrow().is_none());
    }

    #[test]
    fn logout_clears_user_and_pages_synchronously() {
        let dispatch = fresh_store();
        let storage = Rc::new(MemoryStore::new());
        storage.set(ACCESS_TOKEN_KEY, "tok");
        let session = SessionStore::new(Rc::clone(&storage));
        dispatch.reduce_mut(|store| {
            store.session.user = Some(user(false));
            store.browse.loading = true;
        });
        session.logout();
        assert_eq!(*dispatch.get(), AppStore::default());
        assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
    }

    #[test]
    fn unauthorized_catalog_error_ends_session() {
        fresh_store();
        let storage = Rc::new(MemoryStore::new());
        storage.set(ACCESS_TOKEN_KEY, "tok");
        let session = SessionStore::new(Rc::clone(&storage));
        assert!(!session.handle_api_error(&ApiError::Network("offline".to_string())));
        assert!(session.is_authenticated());
        assert!(session.handle_api_error(&ApiError::from_response(401, "")));
        assert!(!session.is_authenticated());
    }
}
