//! Leptos DragDrop Utilities
//!
//! Drag-and-drop of items into single-occupant drop zones.
//! Mouse drags start after a movement threshold (click vs drag);
//! touch drags start after a long press.

mod listener;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

pub use listener::{DndListeners, GlobalListener};

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

/// Touch hold time before a drag activates
pub const LONG_PRESS_MS: u32 = 200;

/// Attribute carrying a drop zone's id
pub const ZONE_ATTR: &str = "data-drop-zone";

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_id_read: ReadSignal<Option<u32>>,
    pub dragging_id_write: WriteSignal<Option<u32>>,
    /// Zone currently under the pointer while dragging
    pub drop_zone_read: ReadSignal<Option<u32>>,
    pub drop_zone_write: WriteSignal<Option<u32>>,
    /// Pending item id (pressed but not yet dragging)
    pub pending_id_read: ReadSignal<Option<u32>>,
    pub pending_id_write: WriteSignal<Option<u32>>,
    /// Press position for movement detection
    pub start_read: ReadSignal<(i32, i32)>,
    pub start_write: WriteSignal<(i32, i32)>,
    /// Latest pointer position while dragging
    pub pointer_read: ReadSignal<Option<(i32, i32)>>,
    pub pointer_write: WriteSignal<Option<(i32, i32)>>,
    long_press: StoredValue<Option<Timeout>, LocalStorage>,
}

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_id_read, dragging_id_write) = signal(None::<u32>);
    let (drop_zone_read, drop_zone_write) = signal(None::<u32>);
    let (pending_id_read, pending_id_write) = signal(None::<u32>);
    let (start_read, start_write) = signal((0i32, 0i32));
    let (pointer_read, pointer_write) = signal(None::<(i32, i32)>);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_zone_read,
        drop_zone_write,
        pending_id_read,
        pending_id_write,
        start_read,
        start_write,
        pointer_read,
        pointer_write,
        long_press: StoredValue::new_local(None),
    }
}

impl DndSignals {
    pub fn is_dragging(&self, item_id: u32) -> bool {
        self.dragging_id_read.get() == Some(item_id)
    }

    pub fn is_over(&self, zone_id: u32) -> bool {
        self.dragging_id_read.get().is_some() && self.drop_zone_read.get() == Some(zone_id)
    }

    /// Inline style for the dragged item; empty when it is not being dragged
    pub fn drag_style(&self, item_id: u32) -> String {
        if self.dragging_id_read.get() != Some(item_id) {
            return String::new();
        }
        match self.pointer_read.get() {
            Some(pointer) => translate_style(self.start_read.get(), pointer),
            None => String::new(),
        }
    }

    fn cancel_long_press(&self) {
        // Dropping a Timeout clears it
        let _ = self.long_press.try_set_value(None);
    }
}

/// True once the pointer moved far enough from `start` to count as a drag
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    (current.0 - start.0).abs() > DRAG_THRESHOLD_PX || (current.1 - start.1).abs() > DRAG_THRESHOLD_PX
}

pub fn translate_style(start: (i32, i32), pointer: (i32, i32)) -> String {
    format!(
        "transform: translate({}px, {}px);",
        pointer.0 - start.0,
        pointer.1 - start.1
    )
}

pub fn parse_zone_id(attr: Option<String>) -> Option<u32> {
    attr?.trim().parse().ok()
}

/// Resolve the drop zone under a viewport point.
/// The dragged element needs `pointer-events: none` so it is not the hit.
pub fn zone_at_point(x: i32, y: i32) -> Option<u32> {
    let document = web_sys::window()?.document()?;
    let hit = document.element_from_point(x as f32, y as f32)?;
    let zone = hit.closest(&format!("[{}]", ZONE_ATTR)).ok()??;
    parse_zone_id(zone.get_attribute(ZONE_ATTR))
}

/// End drag operation, clearing every transient bit of state
pub fn end_drag(dnd: &DndSignals) {
    dnd.cancel_long_press();
    dnd.dragging_id_write.set(None);
    dnd.drop_zone_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.pointer_write.set(None);
}

fn is_control(target: Option<web_sys::EventTarget>) -> bool {
    match target {
        Some(target) => {
            target.dyn_ref::<web_sys::HtmlInputElement>().is_some()
                || target.dyn_ref::<web_sys::HtmlButtonElement>().is_some()
        }
        None => false,
    }
}

/// Create mousedown handler for draggable items
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, item_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 || is_control(ev.target()) {
            return;
        }
        dnd.pending_id_write.set(Some(item_id));
        dnd.start_write.set((ev.client_x(), ev.client_y()));
    }
}

/// Create touchstart handler for draggable items
/// Arms the long-press timer; the drag only activates once it fires
pub fn make_on_touchstart(dnd: DndSignals, item_id: u32) -> impl Fn(web_sys::TouchEvent) + Copy + 'static {
    move |ev: web_sys::TouchEvent| {
        if ev.touches().length() != 1 || is_control(ev.target()) {
            return;
        }
        let Some(touch) = ev.touches().get(0) else { return };
        let start = (touch.client_x(), touch.client_y());
        dnd.pending_id_write.set(Some(item_id));
        dnd.start_write.set(start);

        let timer = Timeout::new(LONG_PRESS_MS, move || {
            if dnd.pending_id_read.get_untracked() == Some(item_id) {
                log::debug!("[DND] long press activated drag for item {}", item_id);
                dnd.dragging_id_write.set(Some(item_id));
                dnd.pointer_write.set(Some(start));
            }
        });
        let _ = dnd.long_press.try_set_value(Some(timer));
    }
}

/// Create mouseenter handler for zones
pub fn make_on_zone_mouseenter(dnd: DndSignals, zone_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_zone_write.set(Some(zone_id));
        }
    }
}

/// Create mouseleave handler for zones
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_zone_write.set(None);
        }
    }
}

fn finish<F>(dnd: &DndSignals, on_drop: &F)
where
    F: Fn(u32, u32),
{
    let dragged = dnd.dragging_id_read.get_untracked();
    let zone = dnd.drop_zone_read.get_untracked();
    end_drag(dnd);

    match (dragged, zone) {
        (Some(item_id), Some(zone_id)) => on_drop(item_id, zone_id),
        (Some(item_id), None) => log::debug!("[DND] item {} released outside any zone", item_id),
        _ => {}
    }
}

fn on_pointer_move(dnd: DndSignals, current: (i32, i32)) {
    if dnd.dragging_id_read.get_untracked().is_some() {
        dnd.pointer_write.set(Some(current));
    }
}

/// Bind document-level move/release handlers for mouse and touch.
///
/// `on_drop(item_id, zone_id)` runs for every completed drop. The returned
/// listeners stay attached until dropped.
pub fn bind_global_handlers<F>(dnd: DndSignals, on_drop: F) -> DndListeners
where
    F: Fn(u32, u32) + Clone + 'static,
{
    let mut listeners = DndListeners::default();

    listeners.push(GlobalListener::on_document("mousemove", true, move |ev| {
        let Some(ev) = ev.dyn_ref::<web_sys::MouseEvent>() else { return };
        let current = (ev.client_x(), ev.client_y());
        let pending = dnd.pending_id_read.get_untracked();

        if pending.is_some() && dnd.dragging_id_read.get_untracked().is_none() {
            if exceeds_threshold(dnd.start_read.get_untracked(), current) {
                dnd.dragging_id_write.set(pending);
            }
        }
        on_pointer_move(dnd, current);
    }));

    let drop_mouse = on_drop.clone();
    listeners.push(GlobalListener::on_document("mouseup", true, move |_ev| {
        finish(&dnd, &drop_mouse);
    }));

    listeners.push(GlobalListener::on_document("touchmove", false, move |ev| {
        let Some(touch_ev) = ev.dyn_ref::<web_sys::TouchEvent>() else { return };
        let Some(touch) = touch_ev.touches().get(0) else { return };
        let current = (touch.client_x(), touch.client_y());

        if dnd.dragging_id_read.get_untracked().is_some() {
            // Keep the page from scrolling under the finger
            ev.prevent_default();
            on_pointer_move(dnd, current);
            let zone = zone_at_point(current.0, current.1);
            if zone != dnd.drop_zone_read.get_untracked() {
                dnd.drop_zone_write.set(zone);
            }
        } else if dnd.pending_id_read.get_untracked().is_some()
            && exceeds_threshold(dnd.start_read.get_untracked(), current)
        {
            // Finger moved before the long press fired: it is a scroll
            dnd.cancel_long_press();
            dnd.pending_id_write.set(None);
        }
    }));

    let drop_touch = on_drop;
    listeners.push(GlobalListener::on_document("touchend", true, move |_ev| {
        finish(&dnd, &drop_touch);
    }));

    listeners.push(GlobalListener::on_document("touchcancel", true, move |_ev| {
        end_drag(&dnd);
    }));

    listeners
}
