//! Drop Board Component
//!
//! A pool of draggable cards and a row of drop zones holding one card each.

use leptos::prelude::*;
use leptos_dragdrop::*;

use crate::board::{Board, BoardItem, DropOutcome};

#[component]
pub fn DropBoard(
    items: Vec<BoardItem>,
    #[prop(default = 3)]
    zone_count: usize,
) -> impl IntoView {
    let board = RwSignal::new(Board::new(items, zone_count));
    let dnd = create_dnd_signals();

    let listeners = bind_global_handlers(dnd, move |item_id, zone_id| {
        let outcome = board.try_update(|b| b.drop_item(item_id, zone_id as usize)).flatten();
        match outcome {
            Some(DropOutcome { evicted: Some(old) }) => log::info!(
                "[DND] item {} dropped into zone {}, cleared item {}",
                item_id, zone_id, old.id
            ),
            Some(_) => log::info!("[DND] item {} dropped into zone {}", item_id, zone_id),
            None => log::debug!("[DND] drop of item {} on zone {} ignored", item_id, zone_id),
        }
    });
    log::debug!("[DND] board bound {} document listeners", listeners.len());
    let listeners = StoredValue::new_local(listeners);
    on_cleanup(move || listeners.dispose());

    let pool = move || board.with(|b| b.pool.clone());

    view! {
        <div class="drop-board">
            <div class="drop-pool">
                <For
                    each=pool
                    key=|item| item.id
                    children=move |item| view! { <DraggableCard dnd=dnd item=item /> }
                />
            </div>

            <div class="drop-zones">
                {(0..zone_count)
                    .map(|zone| {
                        let zone_id = zone as u32;
                        let occupant = move || board.with(|b| b.occupant(zone).cloned());
                        view! {
                            <div
                                class=move || {
                                    let mut c = "drop-zone".to_string();
                                    if dnd.is_over(zone_id) { c.push_str(" drag-over"); }
                                    c
                                }
                                data-drop-zone=zone_id.to_string()
                                on:mouseenter=make_on_zone_mouseenter(dnd, zone_id)
                                on:mouseleave=make_on_mouseleave(dnd)
                            >
                                {move || occupant().map(|item| view! { <DraggableCard dnd=dnd item=item /> })}
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// A card that can be picked up by mouse or long press
#[component]
fn DraggableCard(dnd: DndSignals, item: BoardItem) -> impl IntoView {
    let id = item.id;

    view! {
        <div
            class=move || if dnd.is_dragging(id) { "draggable-item dragging" } else { "draggable-item" }
            style=move || dnd.drag_style(id)
            on:mousedown=make_on_mousedown(dnd, id)
            on:touchstart=make_on_touchstart(dnd, id)
        >
            {item.label}
        </div>
    }
}
