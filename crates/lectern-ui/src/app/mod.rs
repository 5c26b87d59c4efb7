//! Application shell: contexts, session restore and guarded routing.
//!
//! # Design
//! - Storage is probed once per boot; the API client and the session store share
//!   that handle and are provided as contexts.
//! - Guard decisions come from `core::guard`; this module only maps them onto
//!   routes and pages.
//! - Routing re-renders when the session slice of `AppStore` changes.

use crate::components::header::Header;
use crate::core::guard::{GuardDecision, ViewKind, resolve};
use crate::core::store::AppStore;
use crate::features::admin::view::AdminPage;
use crate::features::browse::view::BrowsePage;
use crate::features::login::view::LoginPage;
use crate::services::storage::BrowserStore;
use gloo::console;
pub(crate) use routes::Route;
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_selector;

pub(crate) mod api;
mod preferences;
mod routes;
pub(crate) mod session;

pub(crate) use api::ApiCtx;
pub(crate) use session::SessionCtx;

#[function_component(LecternApp)]
pub(crate) fn lectern_app() -> Html {
    let storage = use_memo(|_| BrowserStore::open(), ());
    let api_ctx = {
        let storage = (*storage).clone();
        use_memo(move |_| ApiCtx::open(storage), ())
    };
    let session_ctx = {
        let storage = (*storage).clone();
        use_memo(move |_| SessionCtx::new(storage), ())
    };

    {
        let api_ctx = (*api_ctx).clone();
        let session_ctx = (*session_ctx).clone();
        use_effect_with_deps(
            move |_| {
                yew::platform::spawn_local(async move {
                    if let Err(err) = session_ctx.session.restore(&*api_ctx).await {
                        console::warn!(format!("session restore failed: {err}"));
                    }
                });
                || ()
            },
            (),
        );
    }

    html! {
        <ContextProvider<ApiCtx> context={(*api_ctx).clone()}>
            <ContextProvider<SessionCtx> context={(*session_ctx).clone()}>
                <BrowserRouter>
                    <AppRoutes />
                </BrowserRouter>
            </ContextProvider<SessionCtx>>
        </ContextProvider<ApiCtx>>
    }
}

#[function_component(AppRoutes)]
fn app_routes() -> Html {
    let session_ctx = use_context::<SessionCtx>();
    // The guard reads token presence; the selector only schedules re-renders.
    let _signed_in = use_selector(|store: &AppStore| store.session.user.is_some());

    let authenticated = session_ctx
        .as_ref()
        .is_some_and(|ctx| ctx.session.is_authenticated());

    html! {
        <Switch<Route> render={move |route: Route| {
            let Some(view) = route.view() else {
                return html! { <Redirect<Route> to={Route::Login} /> };
            };
            match resolve(view, authenticated) {
                GuardDecision::Redirect(target) => html! { <Redirect<Route> to={Route::from(target)} /> },
                GuardDecision::Render(ViewKind::Login) => html! { <LoginPage /> },
                GuardDecision::Render(ViewKind::Courses) => html! {
                    <>
                        <Header active={ViewKind::Courses} />
                        <BrowsePage />
                    </>
                },
                GuardDecision::Render(ViewKind::Admin) => html! {
                    <>
                        <Header active={ViewKind::Admin} />
                        <AdminPage />
                    </>
                },
            }
        }} />
    }
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<LecternApp>::with_root(root).render();
    } else {
        yew::Renderer::<LecternApp>::new().render();
    }
}
