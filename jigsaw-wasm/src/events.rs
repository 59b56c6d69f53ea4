use jigsaw_core::{BoardGeometry, DropOutcome, PointerId, progress};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlElement, PointerEvent, ResizeObserver};

use crate::constants::RESIZE_DEBOUNCE_MS;
use crate::dom;
use crate::state::{App, Shared};
use crate::utils::{contains_point, log, origin_of};

fn container_el(app: &App, slot: usize) -> HtmlElement {
    match app.session.piece(slot).container {
        jigsaw_core::ContainerKind::Board => app.board.clone(),
        jigsaw_core::ContainerKind::Staging => app.staging.clone(),
    }
}

/// Wires pointer handlers for one piece element. Drags are keyed by the
/// event's pointer id, so simultaneous touch contacts stay independent.
pub fn wire_piece(state: Shared, slot: usize) -> Result<(), JsValue> {
    let el = state.borrow().piece_els[slot].clone();

    {
        let st = state.clone();
        let el2 = el.clone();
        let ondown = Closure::<dyn FnMut(PointerEvent)>::wrap(Box::new(move |e: PointerEvent| {
            let mut app = st.borrow_mut();
            let piece = *app.session.piece(slot);
            if piece.locked {
                return;
            }
            let (ox, oy) = origin_of(&container_el(&app, slot));
            let pointer_pos = (f64::from(e.client_x()) - ox, f64::from(e.client_y()) - oy);
            if app
                .tracker
                .begin(PointerId(e.pointer_id()), &piece, pointer_pos)
            {
                let _ = el2.set_pointer_capture(e.pointer_id());
                dom::set_z_index(&el2, "999");
            }
        }));
        el.add_event_listener_with_callback("pointerdown", ondown.as_ref().unchecked_ref())?;
        ondown.forget();
    }

    {
        let st = state.clone();
        let el2 = el.clone();
        let onmove = Closure::<dyn FnMut(PointerEvent)>::wrap(Box::new(move |e: PointerEvent| {
            let mut app = st.borrow_mut();
            let pointer = PointerId(e.pointer_id());
            if app.tracker.dragged_slot(pointer) != Some(slot) {
                return;
            }
            let (ox, oy) = origin_of(&container_el(&app, slot));
            let pointer_pos = (f64::from(e.client_x()) - ox, f64::from(e.client_y()) - oy);
            if let Some((_, pos)) = app.tracker.motion(pointer, pointer_pos) {
                app.session.set_position(slot, pos);
                dom::set_pos(&el2, pos);
            }
        }));
        el.add_event_listener_with_callback("pointermove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    for event in ["pointerup", "pointercancel"] {
        let st = state.clone();
        let onup = Closure::<dyn FnMut(PointerEvent)>::wrap(Box::new(move |e: PointerEvent| {
            handle_drop(&st, slot, &e);
        }));
        el.add_event_listener_with_callback(event, onup.as_ref().unchecked_ref())?;
        onup.forget();
    }

    Ok(())
}

/// Settles a drag: decide which container the pointer released over,
/// translate the piece into that container's coordinates and let the
/// session lock or keep it.
fn handle_drop(state: &Shared, slot: usize, e: &PointerEvent) {
    let mut app = state.borrow_mut();
    let pointer = PointerId(e.pointer_id());
    if app.tracker.dragged_slot(pointer) != Some(slot) {
        return;
    }
    app.tracker.finish(pointer);

    let piece = *app.session.piece(slot);
    let (ox, oy) = origin_of(&container_el(&app, slot));
    let screen_pos = (ox + piece.pos.0, oy + piece.pos.1);
    let el = app.piece_els[slot].clone();
    let geometry = app.geometry;

    let over_board = contains_point(&app.board, f64::from(e.client_x()), f64::from(e.client_y()));
    if over_board {
        let (bx, by) = origin_of(&app.board);
        let drop_pos = (screen_pos.0 - bx, screen_pos.1 - by);
        match app.session.drop_on_board(slot, drop_pos, &geometry) {
            DropOutcome::Locked { completed } => {
                dom::place_in(&el, &app.board, app.session.piece(slot).pos);
                dom::mark_locked(&el);
                progress::save(
                    &app.store,
                    app.session.level(),
                    app.session.seed(),
                    &app.session.locked_slots(),
                );
                dom::update_badges(&app);
                if completed {
                    dom::set_done_enabled(&app, true);
                    dom::pop_hearts(&app);
                    log("level complete");
                }
                return;
            }
            DropOutcome::Stayed { pos } => {
                dom::place_in(&el, &app.board, pos);
            }
        }
    } else {
        let (sx, sy) = origin_of(&app.staging);
        let staging = app.staging_size();
        let pos = (screen_pos.0 - sx, screen_pos.1 - sy);
        let clamped = app.session.drop_on_staging(slot, pos, staging, &geometry);
        dom::place_in(&el, &app.staging, clamped);
    }

    let z = 10 + (app.jitter_rng.next_unit() * 50.0) as i32;
    dom::set_z_index(&el, &z.to_string());
}

/// Shuffle, reset and next-level buttons.
pub fn wire_buttons(state: Shared) -> Result<(), JsValue> {
    let document = state.borrow().document.clone();

    if let Some(btn) = document.get_element_by_id("shuffleBtn") {
        let btn: HtmlElement = btn.dyn_into()?;
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let mut app = st.borrow_mut();
            let staging = app.staging_size();
            let geometry = app.geometry;
            let App {
                session,
                jitter_rng,
                ..
            } = &mut *app;
            session.scatter(jitter_rng, staging, &geometry);
            for piece in app.session.pieces().to_vec() {
                if !piece.locked && piece.container == jigsaw_core::ContainerKind::Staging {
                    dom::set_pos(&app.piece_els[piece.slot], piece.pos);
                }
            }
        }));
        btn.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    if let Some(btn) = document.get_element_by_id("resetBtn") {
        let btn: HtmlElement = btn.dyn_into()?;
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let level = {
                let app = st.borrow();
                progress::clear_locked_for_level(&app.store, app.session.level());
                app.session.level()
            };
            crate::load_level(st.clone(), level);
        }));
        btn.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let done = state.borrow().done_btn.clone();
        let st = state.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            crate::next_level(st.clone());
        }));
        done.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    Ok(())
}

/// Observes both containers and coalesces bursts of notifications into one
/// geometry recompute per quiet window.
pub fn observe_resize(state: Shared) -> Result<(), JsValue> {
    let st = state.clone();
    let callback = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        schedule_resize(&st);
    }));
    let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
    {
        let app = state.borrow();
        observer.observe(&app.board);
        observer.observe(&app.staging);
    }
    callback.forget();
    // The observer must outlive this scope to keep delivering events.
    std::mem::forget(observer);
    Ok(())
}

fn schedule_resize(state: &Shared) {
    let mut app = state.borrow_mut();
    if let Some(timer) = app.resize_timer.take() {
        app.window.clear_timeout_with_handle(timer);
    }
    let st = state.clone();
    let fire = Closure::once_into_js(move || {
        perform_resize(&st);
    });
    app.resize_timer = app
        .window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            fire.unchecked_ref(),
            RESIZE_DEBOUNCE_MS,
        )
        .ok();
}

/// The debounced recompute: fresh geometry from the final measured size,
/// masks rebuilt at the new scale, locked pieces pinned to their new
/// targets and staging pieces scaled proportionally.
fn perform_resize(state: &Shared) {
    let mut app = state.borrow_mut();
    app.resize_timer = None;
    if app.aspect <= 0.0 || app.piece_els.is_empty() {
        return;
    }

    let geometry = BoardGeometry::compute(
        f64::from(app.board.client_width()),
        app.aspect,
        app.grid(),
    );
    let _ = app.board.style().set_property("height", &dom::px(geometry.board_h));

    let staging = app.staging_size();
    let prev = app.last_staging;
    let scale = (
        if prev.0 > 0.0 { staging.0 / prev.0 } else { 1.0 },
        if prev.1 > 0.0 { staging.1 / prev.1 } else { 1.0 },
    );

    app.geometry = geometry;
    app.session.rescale(&geometry, staging, scale);
    for slot in 0..app.piece_els.len() {
        dom::style_piece(&app, slot);
        dom::set_pos(&app.piece_els[slot], app.session.piece(slot).pos);
    }
    app.last_staging = staging;
}
