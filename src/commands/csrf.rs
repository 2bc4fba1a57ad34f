//! Anti-forgery Token Lookup
//!
//! A page-embedded form field wins; otherwise the token cookie.

use percent_encoding::percent_decode_str;
use wasm_bindgen::JsCast;

use crate::config::CsrfConfig;

/// Value of cookie `name` in a `document.cookie` string, percent-decoded
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| percent_decode_str(value).decode_utf8_lossy().into_owned())
}

/// Token from the page, if any
pub fn csrf_token(config: &CsrfConfig) -> Option<String> {
    let document = web_sys::window()?.document()?;

    let selector = format!("[name={}]", config.field_name);
    let from_field = document
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|input| input.value())
        .filter(|v| !v.is_empty());
    if from_field.is_some() {
        return from_field;
    }

    let cookies = document.dyn_into::<web_sys::HtmlDocument>().ok()?.cookie().ok()?;
    cookie_value(&cookies, &config.cookie_name).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value() {
        let cookies = "sessionid=abc; csrftoken=Tk%2Fz9; theme=dark";
        assert_eq!(cookie_value(cookies, "csrftoken").as_deref(), Some("Tk/z9"));
        assert_eq!(cookie_value(cookies, "theme").as_deref(), Some("dark"));
        assert_eq!(cookie_value(cookies, "missing"), None);
    }

    #[test]
    fn test_cookie_name_must_match_exactly() {
        let cookies = "xcsrftoken=wrong;csrftoken=right";
        assert_eq!(cookie_value(cookies, "csrftoken").as_deref(), Some("right"));
    }

    #[test]
    fn test_cookie_value_may_contain_equals() {
        assert_eq!(cookie_value("t=a=b", "t").as_deref(), Some("a=b"));
        assert_eq!(cookie_value("", "t"), None);
    }
}
