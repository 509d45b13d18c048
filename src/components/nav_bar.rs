//! Navigation Bar Component
//!
//! Sticky bar with a collapsible mobile menu, scroll-spy highlighting and
//! keyboard navigation between links.

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::NavConfig;
use crate::nav::{
    cycle_focus, is_mobile, is_sticky, key_action, section_from_hash, FocusStep, KeyAction,
    NavLink, NavState, SpyEntry,
};

/// Observes sections; disconnects when dropped
struct SectionObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl SectionObserver {
    fn observe<F>(section_ids: &[String], root_margin: &str, on_entries: F) -> Option<Self>
    where
        F: Fn(Vec<SpyEntry>) + 'static,
    {
        let document = web_sys::window()?.document()?;
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let entries = entries
                    .iter()
                    .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| SpyEntry {
                        section_id: entry.target().id(),
                        is_intersecting: entry.is_intersecting(),
                    })
                    .collect();
                on_entries(entries);
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_root_margin(root_margin);
        init.set_threshold(&JsValue::from_f64(0.0));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init).ok()?;

        for id in section_ids {
            match document.get_element_by_id(id) {
                Some(section) => observer.observe(&section),
                None => log::warn!("[NAV] no section #{} to observe", id),
            }
        }

        Some(Self { observer, _callback: callback })
    }
}

impl Drop for SectionObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

fn scroll_y() -> f64 {
    web_sys::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

fn scroll_to_section(section_id: &str) {
    let Some(section) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(section_id))
    else {
        log::warn!("[NAV] section #{} not found", section_id);
        return;
    };
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    options.set_block(web_sys::ScrollLogicalPosition::Start);
    section.scroll_into_view_with_scroll_into_view_options(&options);
}

fn push_hash(section_id: &str) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else { return };
    let url = format!("#{}", section_id);
    if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(&url)) {
        log::warn!("[NAV] pushState failed: {:?}", e);
    }
}

fn location_hash() -> Option<String> {
    web_sys::window()?.location().hash().ok()
}

fn active_element() -> Option<web_sys::Element> {
    web_sys::window()?.document()?.active_element()
}

fn focus_within(nav: &web_sys::HtmlElement) -> bool {
    active_element().is_some_and(|el| nav.contains(Some(&el)))
}

/// Move focus among the bar's links, wrapping at both ends
fn move_focus(nav: &web_sys::HtmlElement, step: FocusStep) {
    let Ok(nodes) = nav.query_selector_all(".nav-link") else { return };
    let links: Vec<web_sys::HtmlElement> = (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .collect();

    let current = active_element()
        .and_then(|el| links.iter().position(|link| link.is_same_node(Some(&el))));

    if let Some(next) = cycle_focus(current, links.len(), step) {
        let _ = links[next].focus();
    }
}

#[component]
pub fn NavBar(
    links: Vec<NavLink>,
    #[prop(optional)]
    config: Option<NavConfig>,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    let breakpoint = config.mobile_breakpoint_px;
    let root_margin = config.spy_root_margin;

    let state = RwSignal::new(NavState::default());
    let nav_ref = NodeRef::<leptos::html::Nav>::new();
    let toggle_ref = NodeRef::<leptos::html::Button>::new();
    let nav_offset = StoredValue::new(0.0f64);
    let links = StoredValue::new(links);
    let observer = StoredValue::new_local(None::<SectionObserver>);

    // Mount: measure, start the scroll-spy, honor a deep link
    Effect::new(move |_| {
        let Some(nav) = nav_ref.get() else { return };
        nav_offset.set_value(nav.get_bounding_client_rect().top() + scroll_y());

        let ids: Vec<String> =
            links.with_value(|l| l.iter().map(|link| link.section_id.clone()).collect());
        let spy = SectionObserver::observe(&ids, root_margin, move |entries| {
            if state.try_update(|s| s.apply_spy(&entries)).unwrap_or(false) {
                let active = state.with_untracked(|s| s.active.clone());
                log::debug!("[NAV] active section: {:?}", active);
            }
        });
        observer.set_value(spy);

        if let Some(hash) = location_hash() {
            let target = links
                .with_value(|l| section_from_hash(&hash, l).map(|link| link.section_id.clone()));
            if let Some(section_id) = target {
                log::debug!("[NAV] deep link to #{}", section_id);
                scroll_to_section(&section_id);
                state.update(|s| s.active = Some(section_id));
            }
        }
    });

    let resize = window_event_listener(ev::resize, move |_| {
        let width = viewport_width();
        // Untracked read first; a write would notify subscribers on every resize
        if !state.with_untracked(|s| s.closes_on_resize(width, breakpoint)) {
            return;
        }
        if state.try_update(|s| s.on_resize(width, breakpoint)).unwrap_or(false) {
            log::debug!("[NAV] viewport {}px, mobile menu closed", width);
        }
    });

    let scroll = window_event_listener(ev::scroll, move |_| {
        let sticky = is_sticky(scroll_y(), nav_offset.get_value());
        if state.with_untracked(|s| s.sticky) != sticky {
            state.update(|s| s.sticky = sticky);
        }
    });

    let keydown = window_event_listener(ev::keydown, move |ev| {
        let menu_open = state.with_untracked(|s| s.menu_open);
        let focus_in_nav = nav_ref.get_untracked().is_some_and(|nav| focus_within(&nav));
        let Some(action) = key_action(&ev.key(), menu_open, focus_in_nav) else { return };
        ev.prevent_default();
        match action {
            KeyAction::CloseMenu => {
                state.update(|s| s.close_menu());
                if let Some(toggle) = toggle_ref.get_untracked() {
                    let _ = toggle.focus();
                }
            }
            KeyAction::Focus(step) => {
                if let Some(nav) = nav_ref.get_untracked() {
                    move_focus(&nav, step);
                }
            }
        }
    });

    on_cleanup(move || {
        resize.remove();
        scroll.remove();
        keydown.remove();
        observer.dispose();
        log::debug!("[NAV] listeners removed");
    });

    let activate = move |section_id: String| {
        scroll_to_section(&section_id);
        push_hash(&section_id);
        let mobile = is_mobile(viewport_width(), breakpoint);
        state.update(|s| {
            s.active = Some(section_id);
            if mobile {
                s.close_menu();
            }
        });
    };

    view! {
        <nav
            node_ref=nav_ref
            class=move || if state.with(|s| s.sticky) { "site-nav sticky" } else { "site-nav" }
            aria-label="Main"
        >
            <button
                node_ref=toggle_ref
                class="nav-toggle"
                aria-controls="primary-nav"
                aria-expanded=move || state.with(|s| s.aria_expanded())
                on:click=move |_| state.update(|s| s.toggle_menu())
            >
                "Menu"
            </button>
            <ul
                id="primary-nav"
                class=move || if state.with(|s| s.menu_open) { "nav-list nav-list--visible" } else { "nav-list" }
            >
                {links
                    .get_value()
                    .into_iter()
                    .map(|link| {
                        let href = link.href();
                        let id = link.section_id.clone();
                        let id_for_class = id.clone();
                        let id_for_aria = id.clone();
                        view! {
                            <li>
                                <a
                                    href=href
                                    class=move || {
                                        if state.with(|s| s.is_active(&id_for_class)) { "nav-link active" } else { "nav-link" }
                                    }
                                    aria-current=move || state.with(|s| s.is_active(&id_for_aria)).then_some("page")
                                    on:click=move |ev: web_sys::MouseEvent| {
                                        ev.prevent_default();
                                        activate(id.clone());
                                    }
                                >
                                    {link.label}
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}
