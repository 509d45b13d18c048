//! Page Widgets App
//!
//! One page hosting the three widgets; they share nothing but the logger.

use leptos::prelude::*;

use crate::board::BoardItem;
use crate::components::{BlogList, DropBoard, NavBar};
use crate::nav::NavLink;

const CARD_LABELS: [&str; 5] = ["Research", "Design", "Build", "Review", "Ship"];

#[component]
pub fn App() -> impl IntoView {
    let links = vec![
        NavLink::new("board", "Board"),
        NavLink::new("blog", "Blog"),
        NavLink::new("about", "About"),
    ];
    let cards: Vec<BoardItem> = CARD_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| BoardItem { id: i as u32 + 1, label: label.to_string() })
        .collect();

    view! {
        <NavBar links=links />

        <main class="page">
            <section id="board" class="page-section">
                <h2>"Board"</h2>
                <p>"Drag a card into a slot. Each slot holds one card; on touch devices, press and hold to pick one up."</p>
                <DropBoard items=cards zone_count=3 />
            </section>

            <section id="blog" class="page-section">
                <h2>"Blog"</h2>
                <BlogList />
            </section>

            <section id="about" class="page-section">
                <h2>"About"</h2>
                <p>"A handful of small browser widgets written with Leptos."</p>
            </section>
        </main>
    }
}
