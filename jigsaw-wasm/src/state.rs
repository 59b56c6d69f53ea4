use std::cell::RefCell;
use std::rc::Rc;

use jigsaw_core::{BoardGeometry, DragTracker, GridDims, LevelSession, Mulberry32};
use web_sys::{Document, HtmlElement, Window};

use crate::constants::{COLS, ROWS};
use crate::storage::LocalStore;

/// Global application state stored behind an `Rc<RefCell<_>>` so it can be
/// shared across the WASM callbacks.
pub struct App {
    pub window: Window,
    pub document: Document,
    pub board: HtmlElement,
    pub staging: HtmlElement,
    pub level_badge: HtmlElement,
    pub progress_badge: HtmlElement,
    pub done_btn: HtmlElement,
    pub store: LocalStore,
    pub session: LevelSession,
    pub geometry: BoardGeometry,
    pub tracker: DragTracker,
    /// Stream for scatter and z-index jitter; piece shapes never draw
    /// from it.
    pub jitter_rng: Mulberry32,
    /// Natural aspect ratio of the current level image.
    pub aspect: f64,
    pub image_src: String,
    /// Piece elements indexed by slot.
    pub piece_els: Vec<HtmlElement>,
    /// Staging size at the last layout pass, for proportional rescale.
    pub last_staging: (f64, f64),
    pub resize_timer: Option<i32>,
}

impl App {
    pub fn grid(&self) -> GridDims {
        GridDims::new(ROWS, COLS)
    }

    pub fn staging_size(&self) -> (f64, f64) {
        (
            self.staging.client_width() as f64,
            self.staging.client_height() as f64,
        )
    }
}

pub type Shared = Rc<RefCell<App>>;

/// Thread local storage for the single runtime state instance.
thread_local! {
    pub static STATE: RefCell<Option<Shared>> = const { RefCell::new(None) };
}
