//! Collapsible course tree for the browser page.
//!
//! Rows come pre-flattened from `core::tree`, so rendering never recurses.

use crate::core::format::duration_label;
use crate::core::tree::{TreeNode, TreeRow};
use lectern_api_models::MediaKind;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct CourseTreeProps {
    pub rows: Vec<OwnedRow>,
    pub selected: Option<i64>,
    pub on_toggle: Callback<TreeNode>,
    pub on_select: Callback<i64>,
}

/// Render-ready copy of a [`TreeRow`], detached from the snapshot's lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct OwnedRow {
    pub node: RowNode,
    pub title: String,
    pub depth: usize,
    pub detail: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RowNode {
    Branch { node: TreeNode, expanded: bool },
    Lesson { id: i64, kind: MediaKind },
}

impl From<&TreeRow<'_>> for OwnedRow {
    fn from(row: &TreeRow<'_>) -> Self {
        match *row {
            TreeRow::Course { course, expanded } => Self {
                node: RowNode::Branch {
                    node: TreeNode::Course(course.course.id),
                    expanded,
                },
                title: course.course.title.clone(),
                depth: 0,
                detail: Some(format!(
                    "{} lessons · {}",
                    course.course.total_lessons,
                    duration_label(course.course.total_duration)
                )),
            },
            TreeRow::Module {
                module,
                depth,
                expanded,
            } => Self {
                node: RowNode::Branch {
                    node: TreeNode::Module(module.id),
                    expanded,
                },
                title: module.title.clone(),
                depth,
                detail: None,
            },
            TreeRow::Lesson { lesson, depth } => Self {
                node: RowNode::Lesson {
                    id: lesson.id,
                    kind: lesson.media_kind(),
                },
                title: lesson.title.clone(),
                depth,
                detail: lesson.duration.map(duration_label),
            },
        }
    }
}

#[function_component(CourseTreeView)]
pub(crate) fn course_tree_view(props: &CourseTreeProps) -> Html {
    if props.rows.is_empty() {
        return html! { <p class="muted">{"No courses yet."}</p> };
    }
    html! {
        <ul class="course-tree">
            {for props.rows.iter().map(|row| render_row(row, props))}
        </ul>
    }
}

fn render_row(row: &OwnedRow, props: &CourseTreeProps) -> Html {
    let indent = format!("padding-left: {}rem", row.depth);
    let detail = row
        .detail
        .as_ref()
        .map_or_else(|| html! {}, |detail| html! { <span class="muted">{detail.clone()}</span> });
    match row.node {
        RowNode::Branch { node, expanded } => {
            let on_toggle = props.on_toggle.clone();
            html! {
                <li class={classes!("branch", expanded.then_some("open"))} style={indent}>
                    <button class="ghost" onclick={Callback::from(move |_: MouseEvent| on_toggle.emit(node))}>
                        <span class="chevron">{if expanded { "▾" } else { "▸" }}</span>
                        {row.title.clone()}
                    </button>
                    {detail}
                </li>
            }
        }
        RowNode::Lesson { id, kind } => {
            let on_select = props.on_select.clone();
            let active = props.selected == Some(id);
            html! {
                <li class={classes!("lesson", kind_class(kind), active.then_some("active"))} style={indent}>
                    <button class="ghost" onclick={Callback::from(move |_: MouseEvent| on_select.emit(id))}>
                        {row.title.clone()}
                    </button>
                    {detail}
                </li>
            }
        }
    }
}

const fn kind_class(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Video => "video",
        MediaKind::Audio => "audio",
        MediaKind::Document => "document",
        MediaKind::Other => "other",
    }
}
