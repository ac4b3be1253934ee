// Console logging and DOM measuring helpers.
use wasm_bindgen::JsValue;
use web_sys::{Element, TouchList};

use crate::state::{Point, Viewport};

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

pub fn cwarn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

/// Current on-screen rect of `el`.
pub fn viewport_of(el: &Element) -> Viewport {
    let rect = el.get_bounding_client_rect();
    Viewport::new(rect.left(), rect.top(), rect.width(), rect.height())
}

/// Active touches converted to viewport-local points, in list order.
pub fn touch_points(touches: &TouchList, viewport: &Viewport) -> Vec<Point> {
    (0..touches.length())
        .filter_map(|i| touches.item(i))
        .map(|t| viewport.to_local(t.client_x() as f64, t.client_y() as f64))
        .collect()
}

/// Appends a `timestamp` query parameter so a re-uploaded avatar is not served from cache.
pub fn cache_busted(url: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}timestamp={}", url, sep, js_sys::Date::now() as u64)
}
