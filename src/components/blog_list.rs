//! Blog List Component
//!
//! Loads the feed once, then renders a filtered, searched, sorted and
//! paginated view of it.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::blog::{cancel_pair, BrowserFeedClient, FeedError, ListState, LoadStatus, SortKey};
use crate::components::{BlogCard, BlogControls};
use crate::config::{FeedConfig, SEARCH_DEBOUNCE_MS};
use crate::debounce::Debouncer;

#[component]
pub fn BlogList(
    #[prop(optional)]
    config: Option<FeedConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let list = RwSignal::new(ListState::new(config.per_page));
    let status = RwSignal::new(LoadStatus::Idle);
    let debouncer = StoredValue::new_local(Debouncer::new(SEARCH_DEBOUNCE_MS));

    // Idle -> Loading -> Ready | Error
    // Shared so a remount within the cache window is served from memory
    let client = BrowserFeedClient::shared(config);
    let (cancel, cancel_signal) = cancel_pair();
    status.set(LoadStatus::Loading);
    spawn_local(async move {
        log::info!("[BLOG] loading posts from {}", client.url());
        match client.fetch_posts(&cancel_signal).await {
            Ok(entries) => {
                let _ = list.try_update(|l| l.set_items(entries));
                let _ = status.try_set(LoadStatus::Ready);
            }
            Err(FeedError::Cancelled) => log::debug!("[BLOG] fetch cancelled"),
            Err(err) => {
                log::error!("[BLOG] {}", err);
                let _ = status.try_set(LoadStatus::Error(err.to_string()));
            }
        }
    });

    on_cleanup(move || {
        cancel.cancel();
        let _ = debouncer.try_update_value(|d| d.cancel());
    });

    let options = Memo::new(move |_| list.with(|l| l.filter_options()));
    let on_filter = move |value: String| list.update(|l| l.apply_filter(&value));
    let on_sort = move |key: SortKey| list.update(|l| l.apply_sort(key));
    let on_search = move |value: String| {
        debouncer.update_value(|d| {
            d.call(move || {
                let _ = list.try_update(|l| l.apply_search(&value));
            })
        });
    };

    let is_loading = move || status.with(|s| matches!(s, LoadStatus::Idle | LoadStatus::Loading));

    view! {
        <section class="blog-list" aria-busy=move || is_loading().to_string()>
            <BlogControls options=options on_filter=on_filter on_search=on_search on_sort=on_sort />

            <p class=move || if is_loading() { "blog-loading" } else { "blog-loading hidden" }>
                "Loading posts…"
            </p>

            {move || match status.get() {
                LoadStatus::Error(message) => view! {
                    <p class="blog-error" role="alert">{message}</p>
                }.into_any(),
                LoadStatus::Ready => view! { <BlogEntries list=list /> }.into_any(),
                LoadStatus::Idle | LoadStatus::Loading => ().into_any(),
            }}
        </section>
    }
}

/// Visible window of the list plus the "load more" button
#[component]
fn BlogEntries(list: RwSignal<ListState>) -> impl IntoView {
    let has_more = move || list.with(|l| l.has_more());

    view! {
        {move || {
            let visible = list.with(|l| l.visible().to_vec());
            if visible.is_empty() {
                view! { <p class="no-results">"No posts match your filters."</p> }.into_any()
            } else {
                view! {
                    <div class="blog-grid">
                        {visible.into_iter().map(|entry| view! { <BlogCard entry=entry /> }).collect_view()}
                    </div>
                }
                .into_any()
            }
        }}
        <button
            class=move || if has_more() { "load-more" } else { "load-more hidden" }
            on:click=move |_| {
                list.update(|l| {
                    l.load_more();
                });
            }
        >
            "Load more"
        </button>
    }
}
