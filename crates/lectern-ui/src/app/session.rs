//! Session context shared with views.
//!
//! The user itself lives in the `AppStore` session slice; this context carries
//! the store that owns the token plus the storage handle other components
//! persist through.

use crate::core::error::ApiError;
use crate::core::session::SessionStore;
use crate::services::storage::BrowserStore;
use gloo::console;
use std::rc::Rc;

/// Shared session context.
#[derive(Clone, Debug)]
pub(crate) struct SessionCtx {
    /// Singleton session store.
    pub session: Rc<SessionStore<BrowserStore>>,
    /// Storage handle the session was opened over.
    pub storage: BrowserStore,
}

impl SessionCtx {
    pub(crate) fn new(storage: BrowserStore) -> Self {
        Self {
            session: Rc::new(SessionStore::new(storage.clone())),
            storage,
        }
    }

    /// Log a failed catalog call and end the session if the token was refused.
    pub(crate) fn report(&self, action: &str, err: &ApiError) {
        console::error!(format!("{action} failed: {err}"));
        if self.session.handle_api_error(err) {
            console::warn!("session token rejected; signed out");
        }
    }
}

impl PartialEq for SessionCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.session, &other.session)
    }
}
