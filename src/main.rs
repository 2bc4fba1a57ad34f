//! BrushBunni Admin Reorder Entry Point

mod app;
mod commands;
mod components;
mod config;
mod debug;
mod delete;
mod error;
mod models;
mod reorder;
mod store;
#[cfg(test)]
mod testing;

use app::App;
use config::AdminConfig;
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();

    let loaded = AdminConfig::load_from_page();
    let level = loaded.as_ref().map_or(LevelFilter::Info, AdminConfig::level);
    if let Err(e) = rolling_logger::init_logger(level, rolling_logger::DEFAULT_CAPACITY) {
        web_sys::console::warn_1(&format!("logger already set: {}", e).into());
    }
    debug::install_log_hook();

    let config = match loaded {
        Ok(config) => Some(config),
        Err(e) => {
            log::error!("admin reorder disabled: {}", e);
            None
        }
    };
    mount_to_body(move || view! { <App config=config.clone() /> });
}
