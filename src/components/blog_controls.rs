//! Blog Controls Component
//!
//! Filter, search and sort inputs for the blog list.

use leptos::prelude::*;

use crate::blog::{SortKey, FILTER_ALL};

#[component]
pub fn BlogControls(
    /// Categories and tags offered by the filter
    #[prop(into)] options: Signal<Vec<String>>,
    #[prop(into)] on_filter: Callback<String>,
    /// Raw keystrokes; debouncing is the caller's job
    #[prop(into)] on_search: Callback<String>,
    #[prop(into)] on_sort: Callback<SortKey>,
) -> impl IntoView {
    view! {
        <div class="blog-controls">
            <select
                class="blog-filter"
                aria-label="Filter posts"
                on:change=move |ev| on_filter.run(event_target_value(&ev))
            >
                <option value=FILTER_ALL>"All topics"</option>
                <For
                    each=move || options.get()
                    key=|option| option.clone()
                    children=move |option| {
                        let value = option.clone();
                        view! { <option value=value>{option}</option> }
                    }
                />
            </select>

            <input
                type="search"
                class="blog-search"
                placeholder="Search titles…"
                aria-label="Search posts"
                on:input=move |ev| on_search.run(event_target_value(&ev))
            />

            <select
                class="blog-sort"
                aria-label="Sort posts"
                on:change=move |ev| {
                    match SortKey::parse(&event_target_value(&ev)) {
                        Some(key) => on_sort.run(key),
                        None => log::warn!("[BLOG] unknown sort option"),
                    }
                }
            >
                {SortKey::ALL
                    .into_iter()
                    .map(|key| view! { <option value=key.as_str()>{key.label()}</option> })
                    .collect_view()}
            </select>
        </div>
    }
}
