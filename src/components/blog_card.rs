use leptos::prelude::*;

use crate::markdown::{excerpt, EXCERPT_CHARS};
use crate::models::BlogEntry;

#[component]
pub fn BlogCard(entry: BlogEntry) -> impl IntoView {
    let summary = excerpt(&entry.content, EXCERPT_CHARS);
    let meta = format!(
        "{} · {} · {} min read",
        entry.author,
        entry.display_date(),
        entry.reading_minutes()
    );
    let image = entry
        .image
        .clone()
        .filter(|src| !src.is_empty())
        .map(|src| view! { <img class="blog-card__image" src=src alt=entry.title.clone() loading="lazy" /> });

    view! {
        <article class="blog-card">
            {image}
            <span class="blog-card__category">{entry.category}</span>
            <h3 class="blog-card__title">{entry.title}</h3>
            <p class="blog-card__meta">{meta}</p>
            <p class="blog-card__excerpt">{summary}</p>
            <ul class="blog-card__tags">
                {entry.tags.into_iter().map(|tag| view! { <li class="tag">{tag}</li> }).collect_view()}
            </ul>
        </article>
    }
}
