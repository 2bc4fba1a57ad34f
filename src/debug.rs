//! Console access to the buffered log
//!
//! `window.adminReorderLog()` returns the most recent log lines, so a
//! failed save can be inspected from the browser console after the fact.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

use crate::error::js_message;

/// Name of the function installed on `window`
pub const LOG_HOOK: &str = "adminReorderLog";

/// Buffered lines, oldest first, one per line
pub fn log_dump() -> String {
    rolling_logger::recent_lines().join("\n")
}

pub fn install_log_hook() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let hook = Closure::<dyn Fn() -> String>::new(|| log_dump());
    if let Err(e) = js_sys::Reflect::set(&window, &JsValue::from_str(LOG_HOOK), hook.as_ref()) {
        log::warn!("could not install {}: {}", LOG_HOOK, js_message(&e));
    }
    hook.forget();
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    #[test]
    fn test_log_dump_includes_recent_lines() {
        let _ = rolling_logger::init_logger(LevelFilter::Debug, 16);
        log::info!("order saved for #result_list tbody");
        log::debug!("attached 4 rows");

        let dump = log_dump();
        let lines: Vec<&str> = dump.lines().collect();
        assert!(lines.iter().any(|l| l.contains("order saved for #result_list tbody")));
        assert!(lines.last().is_some_and(|l| l.ends_with("attached 4 rows")));
    }
}
