//! Course browser page.

use crate::app::{ApiCtx, SessionCtx};
use crate::components::course_tree::{CourseTreeView, OwnedRow};
use crate::components::player::LessonPlayer;
use crate::components::sidebar::CategorySidebar;
use crate::core::format::duration_label;
use crate::core::store::AppStore;
use crate::core::tree::{Step, TreeNode};
use crate::features::browse::state::BrowseState;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

#[function_component(BrowsePage)]
pub(crate) fn browse_page() -> Html {
    let api_ctx = use_context::<ApiCtx>();
    let session_ctx = use_context::<SessionCtx>();
    let dispatch = Dispatch::<AppStore>::new();
    let browse = use_selector(|store: &AppStore| store.browse.clone());

    {
        let api_ctx = api_ctx.clone();
        let session_ctx = session_ctx.clone();
        use_effect_with_deps(
            move |_| {
                if let (Some(api), Some(session)) = (api_ctx, session_ctx) {
                    load_library(api, session);
                }
                || ()
            },
            (),
        );
    }

    let on_select = {
        let api_ctx = api_ctx.clone();
        let session_ctx = session_ctx.clone();
        let dispatch = dispatch.clone();
        Callback::from(move |lesson_id: i64| {
            let mut fetch = None;
            dispatch.reduce_mut(|store| fetch = store.browse.select(lesson_id));
            fetch_summary(api_ctx.clone(), session_ctx.clone(), fetch);
        })
    };
    let on_step = |step: Step| {
        let api_ctx = api_ctx.clone();
        let session_ctx = session_ctx.clone();
        let dispatch = dispatch.clone();
        Callback::from(move |()| {
            let mut fetch = None;
            dispatch.reduce_mut(|store| fetch = store.browse.step(step));
            fetch_summary(api_ctx.clone(), session_ctx.clone(), fetch);
        })
    };
    let on_toggle = {
        let dispatch = dispatch.clone();
        Callback::from(move |node: TreeNode| dispatch.reduce_mut(|store| store.browse.toggle(node)))
    };
    let on_expand_all = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.reduce_mut(|store| store.browse.expand_all()))
    };
    let on_collapse_all = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.reduce_mut(|store| store.browse.collapse_all()))
    };
    let on_category = {
        let api_ctx = api_ctx.clone();
        let session_ctx = session_ctx.clone();
        let dispatch = dispatch.clone();
        Callback::from(move |category_id: Option<i64>| {
            let mut fetch = None;
            dispatch.reduce_mut(|store| fetch = store.browse.choose_category(category_id));
            if let (Some(id), Some(api), Some(session)) =
                (fetch, api_ctx.clone(), session_ctx.clone())
            {
                load_category(api, session, id);
            }
        })
    };

    let rows: Vec<OwnedRow> = browse.rows().iter().map(OwnedRow::from).collect();
    let selected_id = browse.selected.as_ref().map(|lesson| lesson.id);

    html! {
        <div class="browse-page">
            <CategorySidebar
                categories={browse.categories.clone()}
                selected={browse.category_filter}
                on_select={on_category}
            />
            <section class="library">
                <div class="toolbar">
                    <button class="ghost" onclick={on_expand_all}>{"Expand all"}</button>
                    <button class="ghost" onclick={on_collapse_all}>{"Collapse all"}</button>
                </div>
                {status_line(&browse)}
                <CourseTreeView rows={rows} selected={selected_id} on_toggle={on_toggle} on_select={on_select} />
            </section>
            <section class="viewer">
                {if let (Some(lesson), Some(api)) = (&browse.selected, &api_ctx) {
                    html! {
                        <LessonPlayer
                            lesson={lesson.clone()}
                            source={api.file_url(&lesson.file_path)}
                            can_previous={browse.can_step(Step::Previous)}
                            can_next={browse.can_step(Step::Next)}
                            on_previous={on_step(Step::Previous)}
                            on_next={on_step(Step::Next)}
                        />
                    }
                } else {
                    html! { <p class="muted">{"Choose a lesson to start."}</p> }
                }}
                {summary_card(&browse)}
            </section>
        </div>
    }
}

fn status_line(browse: &BrowseState) -> Html {
    if browse.loading {
        html! { <p class="muted">{"Loading courses…"}</p> }
    } else if let Some(error) = &browse.error {
        html! { <p class="error-text">{error.clone()}</p> }
    } else {
        html! {}
    }
}

fn summary_card(browse: &BrowseState) -> Html {
    let Some(course) = &browse.summary else {
        return html! {};
    };
    let created = course.created_on().map(|date| date.to_string());
    html! {
        <aside class="course-summary">
            <h3>{course.title.clone()}</h3>
            {course.description.as_ref().map_or_else(|| html! {}, |text| html! { <p>{text.clone()}</p> })}
            <p class="muted">
                {format!("{} lessons · {}", course.total_lessons, duration_label(course.total_duration))}
            </p>
            {created.map_or_else(|| html! {}, |date| html! { <p class="muted">{format!("Added {date}")}</p> })}
        </aside>
    }
}

fn load_library(api: ApiCtx, session: SessionCtx) {
    let dispatch = Dispatch::<AppStore>::new();
    dispatch.reduce_mut(|store| store.browse.loading = true);
    {
        let api = api.clone();
        let session = session.clone();
        yew::platform::spawn_local(async move {
            match api.course_tree().await {
                Ok(courses) => Dispatch::<AppStore>::new()
                    .reduce_mut(|store| store.browse.set_tree(courses)),
                Err(err) => {
                    session.report("loading the course tree", &err);
                    Dispatch::<AppStore>::new()
                        .reduce_mut(|store| store.browse.set_error(err.to_string()));
                }
            }
        });
    }
    yew::platform::spawn_local(async move {
        match api.categories().await {
            Ok(categories) => {
                Dispatch::<AppStore>::new().reduce_mut(|store| store.browse.categories = categories);
            }
            Err(err) => session.report("loading categories", &err),
        }
    });
}

fn load_category(api: ApiCtx, session: SessionCtx, category_id: i64) {
    yew::platform::spawn_local(async move {
        match api.courses(Some(category_id)).await {
            Ok(courses) => Dispatch::<AppStore>::new().reduce_mut(|store| {
                store.browse.apply_category_courses(category_id, &courses);
            }),
            Err(err) => session.report("loading category courses", &err),
        }
    });
}

fn fetch_summary(api: Option<ApiCtx>, session: Option<SessionCtx>, course_id: Option<i64>) {
    let (Some(api), Some(session), Some(course_id)) = (api, session, course_id) else {
        return;
    };
    yew::platform::spawn_local(async move {
        match api.course(course_id).await {
            Ok(course) => Dispatch::<AppStore>::new().reduce_mut(|store| store.browse.set_summary(course)),
            Err(err) => session.report("loading the course summary", &err),
        }
    });
}
