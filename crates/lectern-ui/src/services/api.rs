//! HTTP client helpers (REST).
//!
//! # Design
//! - One client per app boot, shared through `ApiCtx`.
//! - The bearer token is read from storage on every call, so login and logout
//!   never rebuild the client.
//! - Every request is raced against a timer that aborts it through an
//!   `AbortController`; the caller always gets an answer.

use crate::core::catalog::{
    AuthApi, CATEGORIES_PATH, COURSE_TREE_PATH, LOGIN_PATH, ME_PATH, REQUEST_TIMEOUT_SECS,
    SCAN_PATH, SCAN_TIMEOUT_SECS, bearer_header, course_category_path, course_path, courses_path,
    file_url,
};
use crate::core::error::ApiError;
use crate::core::storage::{ACCESS_TOKEN_KEY, KeyValueStore};
use crate::services::storage::BrowserStore;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use lectern_api_models::{
    Category, Course, CourseCategoryUpdate, CourseTree, LoginRequest, ScanRequest, ScanResult,
    TokenResponse, User,
};
use serde::de::DeserializeOwned;
use std::cell::Cell;
use std::rc::Rc;
use web_sys::AbortController;

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    base_url: String,
    storage: BrowserStore,
}

impl ApiClient {
    pub(crate) fn new(base_url: impl Into<String>, storage: BrowserStore) -> Self {
        Self {
            base_url: base_url.into(),
            storage,
        }
    }

    /// Playback source for a lesson file.
    pub(crate) fn file_url(&self, file_path: &str) -> String {
        file_url(&self.base_url, file_path)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, req: Request) -> Request {
        match self
            .storage
            .get(ACCESS_TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
        {
            Some(token) => req.header("Authorization", &bearer_header(&token)),
            None => req,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let req = self.authorized(Request::get(&self.url(path)));
        execute(req, REQUEST_TIMEOUT_SECS).await
    }

    async fn send_json<B, T>(&self, req: Request, body: &B, timeout_secs: u32) -> Result<T, ApiError>
    where
        B: serde::Serialize,
        T: DeserializeOwned,
    {
        let req = self
            .authorized(req)
            .json(body)
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        execute(req, timeout_secs).await
    }

    pub(crate) async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_json(CATEGORIES_PATH).await
    }

    pub(crate) async fn courses(&self, category_id: Option<i64>) -> Result<Vec<Course>, ApiError> {
        self.get_json(&courses_path(category_id)).await
    }

    pub(crate) async fn course(&self, course_id: i64) -> Result<Course, ApiError> {
        self.get_json(&course_path(course_id)).await
    }

    pub(crate) async fn course_tree(&self) -> Result<Vec<CourseTree>, ApiError> {
        self.get_json(COURSE_TREE_PATH).await
    }

    pub(crate) async fn set_course_category(
        &self,
        course_id: i64,
        update: &CourseCategoryUpdate,
    ) -> Result<Course, ApiError> {
        let req = Request::patch(&self.url(&course_category_path(course_id)));
        self.send_json(req, update, REQUEST_TIMEOUT_SECS).await
    }

    pub(crate) async fn rescan(&self) -> Result<ScanResult, ApiError> {
        let req = Request::post(&self.url(SCAN_PATH));
        self.send_json(req, &ScanRequest {}, SCAN_TIMEOUT_SECS).await
    }
}

impl AuthApi for ApiClient {
    async fn login(&self, credentials: &LoginRequest) -> Result<TokenResponse, ApiError> {
        let req = Request::post(&self.url(LOGIN_PATH));
        self.send_json(req, credentials, REQUEST_TIMEOUT_SECS).await
    }

    async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        let req = Request::get(&self.url(ME_PATH)).header("Authorization", &bearer_header(token));
        execute(req, REQUEST_TIMEOUT_SECS).await
    }
}

async fn execute<T: DeserializeOwned>(req: Request, timeout_secs: u32) -> Result<T, ApiError> {
    let controller =
        AbortController::new().map_err(|err| ApiError::Network(format!("{err:?}")))?;
    let timed_out = Rc::new(Cell::new(false));
    let timer = {
        let controller = controller.clone();
        let timed_out = Rc::clone(&timed_out);
        Timeout::new(timeout_secs.saturating_mul(1_000), move || {
            timed_out.set(true);
            controller.abort();
        })
    };
    let signal = controller.signal();
    let outcome = async {
        let response = req.abort_signal(Some(&signal)).send().await?;
        let body = response.text().await?;
        Ok::<_, gloo_net::Error>((response.status(), response.ok(), body))
    }
    .await;
    drop(timer);

    let (status, ok, body) = outcome.map_err(|err| {
        if timed_out.get() {
            ApiError::Timeout {
                seconds: timeout_secs,
            }
        } else {
            ApiError::Network(err.to_string())
        }
    })?;
    if !ok {
        return Err(ApiError::from_response(status, &body));
    }
    serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
}
