//! Locale-aware timestamp formatting.

use chrono::{DateTime, Utc};

/// Long date plus two-digit time in the browser's locale, e.g.
/// "May 1, 2024 at 02:05 PM" for `en-US`.
#[cfg(target_arch = "wasm32")]
pub fn created_at(at: &DateTime<Utc>) -> String {
    use wasm_bindgen::JsValue;

    let date = js_sys::Date::new(&JsValue::from_f64(at.timestamp_millis() as f64));
    let options = js_sys::Object::new();
    for (key, value) in [
        ("year", "numeric"),
        ("month", "long"),
        ("day", "numeric"),
        ("hour", "2-digit"),
        ("minute", "2-digit"),
    ] {
        let _ = js_sys::Reflect::set(&options, &key.into(), &value.into());
    }

    let locale = web_sys::window()
        .and_then(|w| w.navigator().language())
        .unwrap_or_else(|| "en-US".to_string());

    date.to_locale_date_string(&locale, &options).into()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn created_at(at: &DateTime<Utc>) -> String {
    notes_common::format::format_created_at(at)
}
