//! Browser glue for the jigsaw core: DOM pieces with CSS-mask silhouettes,
//! pointer-event drags, localStorage progress and debounced resize.

use std::cell::RefCell;
use std::rc::Rc;

use jigsaw_core::{
    BoardGeometry, DragTracker, LevelSession, Mulberry32, compose_seed, get_or_create_seed,
    progress,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlImageElement};

mod constants;
mod dom;
mod events;
mod state;
mod storage;
mod utils;

use constants::{IMAGE_EXT, TOTAL_LEVELS};
use state::{App, Shared, STATE};
use storage::LocalStore;
use utils::log;

fn element(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("#{id} not found")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str(&format!("#{id} is not an HTML element")))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let board = element(&document, "board")?;
    let staging = element(&document, "tray")?;
    let level_badge = element(&document, "levelBadge")?;
    let progress_badge = element(&document, "progressBadge")?;
    let done_btn = element(&document, "doneBtn")?;

    let store = LocalStore::new(&window);
    let start_level = progress::load(&store)
        .map(|record| record.level)
        .unwrap_or(1)
        .clamp(1, TOTAL_LEVELS);

    let grid = jigsaw_core::GridDims::new(constants::ROWS, constants::COLS);
    let app = App {
        window,
        document,
        board,
        staging,
        level_badge,
        progress_badge,
        done_btn,
        store,
        session: LevelSession::new(start_level, 0, grid),
        geometry: BoardGeometry::compute(1.0, 1.0, grid),
        tracker: DragTracker::new(),
        jitter_rng: Mulberry32::new(compose_seed(js_sys::Date::now(), js_sys::Math::random())),
        aspect: 0.0,
        image_src: String::new(),
        piece_els: Vec::new(),
        last_staging: (0.0, 0.0),
        resize_timer: None,
    };

    let shared: Shared = Rc::new(RefCell::new(app));
    STATE.with(|st| st.replace(Some(shared.clone())));

    events::wire_buttons(shared.clone())?;
    events::observe_resize(shared.clone())?;
    load_level(shared, start_level);
    Ok(())
}

/// Starts (or restarts) a level: stable seed, fresh session, new piece
/// elements once the level image has loaded.
pub(crate) fn load_level(state: Shared, level: u32) {
    {
        let mut app = state.borrow_mut();
        let fresh = compose_seed(js_sys::Date::now(), js_sys::Math::random());
        let seed = get_or_create_seed(&app.store, level, fresh);
        app.session = LevelSession::new(level, seed, app.grid());
        app.tracker = DragTracker::new();
        app.piece_els.clear();
        app.aspect = 0.0;
        app.image_src = format!("img{level}.{IMAGE_EXT}");
        app.board.set_inner_html("");
        app.staging.set_inner_html("");
        app.level_badge.set_inner_text(&format!("Level {level}"));
        dom::update_badges(&app);
        dom::set_done_enabled(&app, false);
    }
    load_image(state);
}

fn load_image(state: Shared) {
    let src = state.borrow().image_src.clone();
    let Ok(img) = HtmlImageElement::new() else {
        return;
    };

    {
        let st = state.clone();
        let img2 = img.clone();
        let onload = Closure::once(move || {
            if let Err(err) = on_image_loaded(&st, &img2) {
                log(&format!("level setup failed: {err:?}"));
            }
        });
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();
    }
    {
        let st = state.clone();
        let src2 = src.clone();
        let onerror = Closure::once(move || {
            let app = st.borrow();
            dom::show_image_error(&app, &src2);
        });
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onerror.forget();
    }
    img.set_src(&src);
}

fn on_image_loaded(state: &Shared, img: &HtmlImageElement) -> Result<(), JsValue> {
    {
        let mut app = state.borrow_mut();
        app.aspect = f64::from(img.natural_width()) / f64::from(img.natural_height().max(1));
        let geometry = BoardGeometry::compute(
            f64::from(app.board.client_width()),
            app.aspect,
            app.grid(),
        );
        app.geometry = geometry;
        app.board
            .style()
            .set_property("height", &dom::px(geometry.board_h))?;

        for _ in 0..app.grid().total() {
            let el = dom::create_piece(&app)?;
            app.piece_els.push(el);
        }
        for slot in 0..app.piece_els.len() {
            dom::style_piece(&app, slot);
        }

        let staging = app.staging_size();
        {
            let App {
                session,
                jitter_rng,
                ..
            } = &mut *app;
            session.scatter(jitter_rng, staging, &geometry);
        }
        for slot in 0..app.piece_els.len() {
            dom::set_pos(&app.piece_els[slot], app.session.piece(slot).pos);
            let z = 1 + (app.jitter_rng.next_unit() * 50.0) as i32;
            dom::set_z_index(&app.piece_els[slot], &z.to_string());
        }

        // Restore locked pieces persisted for this level.
        if let Some(record) = progress::load(&app.store)
            && record.level == app.session.level()
        {
            let record = record.validate(app.grid().total());
            app.session.restore_locked(&record.locked, &geometry);
            for &slot in &record.locked {
                if app.session.piece(slot).locked {
                    let el = &app.piece_els[slot];
                    dom::place_in(el, &app.board, app.session.piece(slot).pos);
                    dom::mark_locked(el);
                }
            }
            dom::update_badges(&app);
            if app.session.is_complete() {
                dom::set_done_enabled(&app, true);
            }
        }

        app.last_staging = staging;
    }

    let total = state.borrow().piece_els.len();
    for slot in 0..total {
        events::wire_piece(state.clone(), slot)?;
    }
    Ok(())
}

/// Advances past a completed level; finishing the last one clears the
/// persisted record.
pub(crate) fn next_level(state: Shared) {
    let (complete, level) = {
        let app = state.borrow();
        (app.session.is_complete(), app.session.level())
    };
    if !complete {
        return;
    }

    let next = level + 1;
    if next > TOTAL_LEVELS {
        let app = state.borrow();
        progress::clear_all(&app.store);
        app.board
            .set_inner_html("<div class=\"p-3\">All levels complete. Well done!</div>");
        return;
    }

    {
        let app = state.borrow();
        let seed = compose_seed(js_sys::Date::now(), js_sys::Math::random());
        progress::save(&app.store, next, seed, &[]);
    }
    load_level(state, next);
}
