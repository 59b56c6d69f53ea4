use jigsaw_core::{Outline, background_offset};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::state::App;
use crate::utils::svg_data_url;

pub fn px(v: f64) -> String {
    format!("{v}px")
}

pub fn set_pos(el: &HtmlElement, pos: (f64, f64)) {
    let style = el.style();
    let _ = style.set_property("left", &px(pos.0));
    let _ = style.set_property("top", &px(pos.1));
}

pub fn set_z_index(el: &HtmlElement, z: &str) {
    let _ = el.style().set_property("z-index", z);
}

/// Creates the bare piece element in the staging container. Sizing,
/// background and mask are applied by [`style_piece`].
pub fn create_piece(app: &App) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = app.document.create_element("div")?.dyn_into()?;
    el.set_class_name("piece");
    app.staging.append_child(&el)?;
    Ok(el)
}

/// Applies everything that depends on the current board geometry: box
/// size, background slice alignment and the silhouette mask. Rerun for
/// every piece after a resize.
pub fn style_piece(app: &App, slot: usize) {
    let geometry = &app.geometry;
    let piece = app.session.piece(slot);
    let el = &app.piece_els[slot];
    let style = el.style();

    let _ = style.set_property("width", &px(geometry.piece_w));
    let _ = style.set_property("height", &px(geometry.piece_h));
    let _ = style.set_property("background-image", &format!("url('{}')", app.image_src));
    let _ = style.set_property(
        "background-size",
        &format!("{}px {}px", geometry.board_w, geometry.board_h),
    );
    let (bx, by) = background_offset(piece.row, piece.col, geometry);
    let _ = style.set_property("background-position", &format!("{bx}px {by}px"));

    let outline = Outline::build(piece.row, piece.col, app.session.profile(), geometry);
    let url = format!("url(\"{}\")", svg_data_url(&outline.mask_svg()));
    for prop in ["-webkit-mask-image", "mask-image"] {
        let _ = style.set_property(prop, &url);
    }
    for prop in ["-webkit-mask-repeat", "mask-repeat"] {
        let _ = style.set_property(prop, "no-repeat");
    }
    for prop in ["-webkit-mask-size", "mask-size"] {
        let _ = style.set_property(prop, "100% 100%");
    }
}

/// Moves an element into `parent` (no-op when already there) and positions
/// it in the new parent's coordinates.
pub fn place_in(el: &HtmlElement, parent: &HtmlElement, pos: (f64, f64)) {
    let _ = parent.append_child(el);
    set_pos(el, pos);
}

pub fn mark_locked(el: &HtmlElement) {
    let _ = el.class_list().add_1("locked");
    set_z_index(el, "5");
}

pub fn update_badges(app: &App) {
    app.progress_badge.set_inner_text(&format!(
        "{} / {}",
        app.session.placed(),
        app.grid().total()
    ));
}

pub fn set_done_enabled(app: &App, enabled: bool) {
    if enabled {
        let _ = app.done_btn.remove_attribute("disabled");
    } else {
        let _ = app.done_btn.set_attribute("disabled", "disabled");
    }
}

pub fn show_image_error(app: &App, src: &str) {
    app.board.set_inner_html(&format!(
        "<div class=\"p-3 text-danger\">Could not load <b>{src}</b>. \
         Make sure it exists next to the page.</div>"
    ));
}

/// Small celebratory burst on level completion.
pub fn pop_hearts(app: &App) {
    let Some(body) = app.document.body() else {
        return;
    };
    for i in 0..18u32 {
        let Ok(el) = app.document.create_element("span") else {
            continue;
        };
        let Ok(el) = el.dyn_into::<HtmlElement>() else {
            continue;
        };
        el.set_inner_text("\u{1F496}");
        let style = el.style();
        let _ = style.set_property("position", "fixed");
        let _ = style.set_property("left", &format!("{}vw", (i * 137) % 100));
        let _ = style.set_property("top", "110vh");
        let _ = style.set_property("font-size", &px(16.0 + f64::from((i * 7) % 18)));
        let _ = style.set_property("z-index", "2000");
        let _ = style.set_property("transition", "transform 1200ms ease, opacity 1200ms ease");
        if body.append_child(&el).is_err() {
            continue;
        }
        let _ = style.set_property("opacity", "0");
        let _ = style.set_property(
            "transform",
            &format!("translateY(-130vh) rotate({}deg)", (i as i32 * 23) % 60 - 30),
        );
        let el2 = el.clone();
        let cleanup = wasm_bindgen::closure::Closure::once_into_js(move || {
            el2.remove();
        });
        let _ = app
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(cleanup.unchecked_ref(), 1300);
    }
}
