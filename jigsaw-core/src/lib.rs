//! Core logic for a grid jigsaw puzzle: deterministic edge profiles, piece
//! outlines, board sizing, drag/snap/lock state and persisted progress.
//!
//! Everything here is pure and backend-independent; the browser glue crate
//! translates outlines to CSS masks, pointer events to drags and the
//! progress store to `localStorage`.

pub mod drag;
pub mod edges;
pub mod outline;
pub mod progress;
pub mod rng;
pub mod seed;
pub mod session;
pub mod sizing;
pub mod snap;

pub use drag::{DragTracker, PointerId, clamp_to_bounds};
pub use edges::{EdgeProfile, Side};
pub use outline::{Outline, PathCmd, Point, background_offset};
pub use progress::{LevelProgress, MemoryStore, ProgressStore, RECORD_VERSION};
pub use rng::Mulberry32;
pub use seed::{compose_seed, get_or_create_seed};
pub use session::{ContainerKind, DropOutcome, LevelSession, PieceState};
pub use sizing::{BoardGeometry, GridDims, TAB_RATIO};
pub use snap::{SNAP_TOLERANCE_PX, snap_tolerance, target_position};
