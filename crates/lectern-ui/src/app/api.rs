//! Catalog client context.
//!
//! Views dereference the context straight to [`ApiClient`]; the client is built
//! once per boot over the same storage handle the session writes the token to.

use super::preferences::api_base_url;
use crate::services::api::ApiClient;
use crate::services::storage::BrowserStore;
use std::ops::Deref;
use std::rc::Rc;

/// Catalog client shared through a context provider.
#[derive(Clone, Debug)]
pub(crate) struct ApiCtx(Rc<ApiClient>);

impl ApiCtx {
    /// Resolve the base URL (honouring a stored override) and build the client.
    pub(crate) fn open(storage: BrowserStore) -> Self {
        let base_url = api_base_url(&storage);
        Self(Rc::new(ApiClient::new(base_url, storage)))
    }
}

impl Deref for ApiCtx {
    type Target = ApiClient;

    fn deref(&self) -> &ApiClient {
        &self.0
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
