//! Top navigation bar.

use crate::app::{Route, SessionCtx};
use crate::core::guard::{ViewKind, can_manage};
use crate::core::store::AppStore;
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
pub(crate) struct HeaderProps {
    pub active: ViewKind,
}

#[function_component(Header)]
pub(crate) fn header(props: &HeaderProps) -> Html {
    let session_ctx = use_context::<SessionCtx>();
    let navigator = use_navigator();
    let user = (*use_selector(|store: &AppStore| store.session.user.clone())).clone();

    let logout = Callback::from(move |_: MouseEvent| {
        if let Some(ctx) = &session_ctx {
            ctx.session.logout();
        }
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Login);
        }
    });

    html! {
        <header class="app-header">
            <div class="brand">
                <strong>{"Lectern"}</strong>
            </div>
            <nav>
                {nav_item(Route::Courses, "Courses", props.active == ViewKind::Courses)}
                {if can_manage(user.as_ref()) {
                    nav_item(Route::Admin, "Admin", props.active == ViewKind::Admin)
                } else { html! {} }}
            </nav>
            <div class="user">
                {if let Some(user) = &user {
                    html! { <span class="muted">{user.display_name().to_string()}</span> }
                } else { html! {} }}
                <button class="ghost" onclick={logout}>{"Sign out"}</button>
            </div>
        </header>
    }
}

fn nav_item(route: Route, label: &str, active: bool) -> Html {
    html! {
        <Link<Route> to={route} classes={classes!("nav-item", active.then_some("active"))}>
            {label.to_string()}
        </Link<Route>>
    }
}
