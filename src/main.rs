//! Page Widgets Frontend Entry Point

mod app;
mod blog;
mod board;
mod components;
mod config;
mod debounce;
mod markdown;
mod models;
mod nav;

use app::App;
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info };
    if let Err(e) = rolling_logger::init(level, config::LOG_BUFFER_LINES) {
        web_sys::console::warn_1(&format!("logger not installed: {}", e).into());
    }

    log::info!("[APP] mounting");
    mount_to_body(App);
}
