//! Document-level listeners that unregister themselves on drop.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub struct GlobalListener {
    target: web_sys::EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl GlobalListener {
    /// Attach `handler` to the document. `passive: false` is required for
    /// handlers that call `prevent_default` on touchmove.
    pub fn on_document<F>(event: &'static str, passive: bool, handler: F) -> Option<Self>
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let document = web_sys::window()?.document()?;
        let target: web_sys::EventTarget = document.into();
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(handler);

        let options = web_sys::AddEventListenerOptions::new();
        options.set_passive(passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .ok()?;

        Some(Self { target, event, callback })
    }
}

impl Drop for GlobalListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Listeners registered by one DnD surface; dropping removes them all.
#[derive(Default)]
pub struct DndListeners(Vec<GlobalListener>);

impl DndListeners {
    pub(crate) fn push(&mut self, listener: Option<GlobalListener>) {
        match listener {
            Some(listener) => self.0.push(listener),
            None => log::warn!("[DND] could not attach document listener"),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
