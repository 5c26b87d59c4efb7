//! Category filter sidebar.

use lectern_api_models::Category;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct CategorySidebarProps {
    pub categories: Vec<Category>,
    pub selected: Option<i64>,
    pub on_select: Callback<Option<i64>>,
}

#[function_component(CategorySidebar)]
pub(crate) fn category_sidebar(props: &CategorySidebarProps) -> Html {
    let entry = |id: Option<i64>, label: String| {
        let on_select = props.on_select.clone();
        let active = props.selected == id;
        html! {
            <li>
                <button
                    class={classes!("category", active.then_some("active"))}
                    onclick={Callback::from(move |_: MouseEvent| on_select.emit(id))}
                >
                    {label}
                </button>
            </li>
        }
    };

    html! {
        <aside class="category-sidebar">
            <h3>{"Categories"}</h3>
            <ul>
                {entry(None, "All".to_string())}
                {for props.categories.iter().map(|category| {
                    let label = match &category.icon {
                        Some(icon) => format!("{icon} {}", category.name),
                        None => category.name.clone(),
                    };
                    entry(Some(category.id), label)
                })}
            </ul>
        </aside>
    }
}
