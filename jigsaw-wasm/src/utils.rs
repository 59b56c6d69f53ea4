use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use wasm_bindgen::JsValue;
use web_sys::{DomRect, Element};

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

// encodeURIComponent-compatible escape set, plus the quotes that would
// otherwise terminate the CSS url() literal.
const MASK_URL_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'#')
    .add(b'%')
    .add(b'{')
    .add(b'}')
    .add(b'\'')
    .add(b'&');

/// Inline data URL for an SVG mask document.
pub fn svg_data_url(svg: &str) -> String {
    format!(
        "data:image/svg+xml,{}",
        utf8_percent_encode(svg, MASK_URL_SET)
    )
}

/// Top-left corner of an element in viewport coordinates.
pub fn origin_of(el: &Element) -> (f64, f64) {
    let rect: DomRect = el.get_bounding_client_rect();
    (rect.left(), rect.top())
}

/// Whether a viewport point falls inside an element's bounding box.
pub fn contains_point(el: &Element, x: f64, y: f64) -> bool {
    let rect = el.get_bounding_client_rect();
    x >= rect.left() && x <= rect.right() && y >= rect.top() && y <= rect.bottom()
}
