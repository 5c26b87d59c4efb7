//! Sign-in page.

use crate::app::{ApiCtx, Route, SessionCtx};
use crate::features::login::state::LoginForm;
use gloo::console;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::use_navigator;

#[function_component(LoginPage)]
pub(crate) fn login_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let session_ctx = use_context::<SessionCtx>();
    let navigator = use_navigator();
    let form = use_state(LoginForm::default);

    let on_username = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*form).clone();
                next.username = input.value();
                form.set(next);
            }
        })
    };
    let on_password = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*form).clone();
                next.password = input.value();
                form.set(next);
            }
        })
    };

    let on_submit = {
        let form = form.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let (Some(api), Some(session)) = (api_ctx.clone(), session_ctx.clone()) else {
                console::error!("login form mounted without api/session context");
                return;
            };
            let mut pending = (*form).clone();
            let Some(request) = pending.begin_submit() else {
                return;
            };
            form.set(pending.clone());
            let form = form.clone();
            let navigator = navigator.clone();
            yew::platform::spawn_local(async move {
                match session.session.login(&*api, &request).await {
                    Ok(_) => {
                        pending.succeed();
                        form.set(pending);
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Courses);
                        }
                    }
                    Err(err) => {
                        pending.fail(&err);
                        form.set(pending);
                    }
                }
            });
        })
    };

    html! {
        <div class="login-page">
            <form class="card" onsubmit={on_submit}>
                <header>
                    <h2>{"Sign in to Lectern"}</h2>
                </header>
                <label class="stack">
                    <span>{"Username"}</span>
                    <input type="text" autocomplete="username" value={form.username.clone()}
                        disabled={form.busy} oninput={on_username} />
                </label>
                <label class="stack">
                    <span>{"Password"}</span>
                    <input type="password" autocomplete="current-password" value={form.password.clone()}
                        disabled={form.busy} oninput={on_password} />
                </label>
                {if let Some(err) = &form.error {
                    html! { <p class="error-text">{err.clone()}</p> }
                } else { html! {} }}
                <button class="solid" type="submit" disabled={form.busy}>
                    {if form.busy { "Signing in…" } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
