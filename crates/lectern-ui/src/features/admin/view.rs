//! Admin dashboard page.

use crate::app::{ApiCtx, SessionCtx};
use crate::core::catalog::CategoryChoice;
use crate::core::guard::can_manage;
use crate::core::store::AppStore;
use crate::core::tree::{TreeRow, all_rows};
use crate::features::admin::state::{AdminGate, AdminState};
use gloo::console;
use lectern_api_models::{Category, CourseTree, ScanResult};
use web_sys::HtmlSelectElement;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

#[function_component(AdminPage)]
pub(crate) fn admin_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let session_ctx = use_context::<SessionCtx>();
    let user = (*use_selector(|store: &AppStore| store.session.user.clone())).clone();
    let admin = use_selector(|store: &AppStore| store.admin.clone());

    {
        let api_ctx = api_ctx.clone();
        let session_ctx = session_ctx.clone();
        use_effect_with_deps(
            move |_| {
                if let (Some(api), Some(session)) = (api_ctx, session_ctx) {
                    refresh_tree(api.clone(), session.clone());
                    load_categories(api, session);
                }
                || ()
            },
            (),
        );
    }

    let on_rescan = {
        let api_ctx = api_ctx.clone();
        let session_ctx = session_ctx.clone();
        let user = user.clone();
        Callback::from(move |_: MouseEvent| {
            let (Some(api), Some(session)) = (api_ctx.clone(), session_ctx.clone()) else {
                return;
            };
            let mut gate = AdminGate::NotAdmin;
            Dispatch::<AppStore>::new()
                .reduce_mut(|store| gate = store.admin.begin_rescan(user.as_ref()));
            if gate != AdminGate::Allowed {
                console::warn!(format!("rescan not started: {gate:?}"));
                return;
            }
            yew::platform::spawn_local(async move {
                let outcome = api.rescan().await;
                if let Err(err) = &outcome {
                    session.report("rescan", err);
                }
                let mut refresh = false;
                Dispatch::<AppStore>::new().reduce_mut(|store| {
                    refresh = store
                        .admin
                        .finish_rescan(outcome.map_err(|err| err.to_string()));
                });
                if refresh {
                    refresh_tree(api, session);
                }
            });
        })
    };

    let on_category = {
        let api_ctx = api_ctx.clone();
        let session_ctx = session_ctx.clone();
        let user = user.clone();
        Callback::from(move |(course_id, value): (i64, String)| {
            let (Some(api), Some(session)) = (api_ctx.clone(), session_ctx.clone()) else {
                return;
            };
            let mut request = Err(AdminGate::NotAdmin);
            Dispatch::<AppStore>::new().reduce_mut(|store| {
                request = store
                    .admin
                    .begin_category_change(user.as_ref(), course_id, &value);
            });
            let update = match request {
                Ok(update) => update,
                Err(gate) => {
                    console::warn!(format!("category change not sent: {gate:?}"));
                    return;
                }
            };
            yew::platform::spawn_local(async move {
                let outcome = api.set_course_category(course_id, &update).await;
                if let Err(err) = &outcome {
                    session.report("updating the course category", err);
                }
                let mut refresh = false;
                Dispatch::<AppStore>::new().reduce_mut(|store| {
                    refresh = store
                        .admin
                        .finish_category_change(outcome.map(|_| ()).map_err(|err| err.to_string()));
                });
                if refresh {
                    refresh_tree(api, session);
                }
            });
        })
    };

    let manage = can_manage(user.as_ref());

    html! {
        <div class="admin-page">
            <section class="card">
                <header>
                    <h2>{"Library administration"}</h2>
                </header>
                {if manage {
                    html! {
                        <button class="solid" disabled={admin.scanning} onclick={on_rescan}>
                            {if admin.scanning { "Scanning…" } else { "Rescan course folder" }}
                        </button>
                    }
                } else {
                    html! { <p class="muted">{"Administrator access is required to change the library."}</p> }
                }}
                {admin.error.as_ref().map_or_else(|| html! {}, |err| html! { <p class="error-text">{err.clone()}</p> })}
                {admin.scan_result.as_ref().map_or_else(|| html! {}, scan_panel)}
            </section>
            {if admin.loading {
                html! { <p class="muted">{"Loading courses…"}</p> }
            } else {
                html! {
                    <section class="admin-courses">
                        {for admin.courses.iter().map(|course| course_card(course, &admin, manage, &on_category))}
                    </section>
                }
            }}
        </div>
    }
}

fn scan_panel(result: &ScanResult) -> Html {
    html! {
        <div class={classes!("scan-result", if result.success { "ok" } else { "failed" })}>
            <p>{result.message.clone()}</p>
            <ul>
                <li>{format!("Courses created: {}", result.courses_created)}</li>
                <li>{format!("Courses updated: {}", result.courses_updated)}</li>
                <li>{format!("Modules created: {}", result.modules_created)}</li>
                <li>{format!("Lessons created: {}", result.lessons_created)}</li>
                <li>{format!("Categories created: {}", result.categories_created)}</li>
            </ul>
        </div>
    }
}

fn course_card(
    tree: &CourseTree,
    admin: &AdminState,
    manage: bool,
    on_category: &Callback<(i64, String)>,
) -> Html {
    let course_id = tree.course.id;
    let current = CategoryChoice::select_value(tree.course.category_id);
    let onchange = on_category.reform(move |e: Event| {
        let value = e
            .target_dyn_into::<HtmlSelectElement>()
            .map(|select| select.value())
            .unwrap_or_default();
        (course_id, value)
    });
    let saving = admin.saving_course == Some(course_id);
    html! {
        <article class="card course">
            <header>
                <h3>{tree.course.title.clone()}</h3>
                <label class="category-select">
                    <span>{"Category"}</span>
                    <select disabled={!manage || saving} onchange={onchange}>
                        {for admin.categories.iter().map(|category| category_option(category, &current))}
                    </select>
                </label>
            </header>
            <ul class="course-outline">
                {for all_rows(tree).iter().map(outline_row)}
            </ul>
        </article>
    }
}

fn category_option(category: &Category, current: &str) -> Html {
    let value = category.id.to_string();
    let selected = value == current;
    html! { <option value={value} selected={selected}>{category.name.clone()}</option> }
}

fn outline_row(row: &TreeRow<'_>) -> Html {
    match *row {
        TreeRow::Module { module, depth, .. } => html! {
            <li class="module" style={format!("padding-left: {depth}rem")}>{module.title.clone()}</li>
        },
        TreeRow::Lesson { lesson, depth } => html! {
            <li class="lesson" style={format!("padding-left: {depth}rem")}>{lesson.title.clone()}</li>
        },
        TreeRow::Course { .. } => html! {},
    }
}

fn refresh_tree(api: ApiCtx, session: SessionCtx) {
    Dispatch::<AppStore>::new().reduce_mut(|store| store.admin.loading = true);
    yew::platform::spawn_local(async move {
        match api.course_tree().await {
            Ok(courses) => {
                Dispatch::<AppStore>::new().reduce_mut(|store| store.admin.set_tree(courses));
            }
            Err(err) => {
                session.report("loading the course tree", &err);
                Dispatch::<AppStore>::new()
                    .reduce_mut(|store| store.admin.set_error(err.to_string()));
            }
        }
    });
}

fn load_categories(api: ApiCtx, session: SessionCtx) {
    yew::platform::spawn_local(async move {
        match api.categories().await {
            Ok(categories) => {
                Dispatch::<AppStore>::new()
                    .reduce_mut(|store| store.admin.set_categories(&categories));
            }
            Err(err) => session.report("loading categories", &err),
        }
    });
}
