use std::collections::HashMap;

use crate::session::PieceState;

/// Platform pointer identifier (mouse, touch contact or pen).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub i32);

#[derive(Clone, Copy, Debug)]
struct ActiveDrag {
    slot: usize,
    grab_x: f64,
    grab_y: f64,
}

/// Live drags, one per pointer.
///
/// Each drag is keyed by its own pointer id, so concurrent touch contacts
/// carry independent drags without arbitration. A pointer is either idle
/// (absent from the map) or dragging; `finish`/`cancel` settle it back to
/// idle.
#[derive(Debug, Default)]
pub struct DragTracker {
    active: HashMap<PointerId, ActiveDrag>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a drag on `piece`. Locked pieces refuse the drag (no-op).
    /// `pointer_pos` is in the coordinates of the piece's container; the
    /// grab offset keeps the piece from jumping under the pointer.
    pub fn begin(&mut self, pointer: PointerId, piece: &PieceState, pointer_pos: (f64, f64)) -> bool {
        if piece.locked {
            return false;
        }
        self.active.insert(
            pointer,
            ActiveDrag {
                slot: piece.slot,
                grab_x: pointer_pos.0 - piece.pos.0,
                grab_y: pointer_pos.1 - piece.pos.1,
            },
        );
        true
    }

    /// Position update for a pointer move; `None` when the pointer holds no
    /// drag.
    pub fn motion(&self, pointer: PointerId, pointer_pos: (f64, f64)) -> Option<(usize, (f64, f64))> {
        let drag = self.active.get(&pointer)?;
        Some((
            drag.slot,
            (pointer_pos.0 - drag.grab_x, pointer_pos.1 - drag.grab_y),
        ))
    }

    /// Settles the pointer's drag, returning the dragged slot.
    pub fn finish(&mut self, pointer: PointerId) -> Option<usize> {
        self.active.remove(&pointer).map(|d| d.slot)
    }

    pub fn cancel(&mut self, pointer: PointerId) -> Option<usize> {
        self.finish(pointer)
    }

    pub fn dragged_slot(&self, pointer: PointerId) -> Option<usize> {
        self.active.get(&pointer).map(|d| d.slot)
    }
}

/// Constrains a piece position so its box stays inside a container.
pub fn clamp_to_bounds(pos: (f64, f64), bounds: (f64, f64), piece: (f64, f64)) -> (f64, f64) {
    let max_x = (bounds.0 - piece.0).max(0.0);
    let max_y = (bounds.1 - piece.1).max(0.0);
    (pos.0.clamp(0.0, max_x), pos.1.clamp(0.0, max_y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ContainerKind;

    fn piece(slot: usize, locked: bool) -> PieceState {
        PieceState {
            slot,
            row: 0,
            col: slot,
            locked,
            pos: (10.0, 20.0),
            container: ContainerKind::Staging,
        }
    }

    #[test]
    fn drag_follows_pointer_with_grab_offset() {
        let mut tracker = DragTracker::new();
        let p = piece(0, false);
        assert!(tracker.begin(PointerId(1), &p, (14.0, 25.0)));
        let (slot, pos) = tracker.motion(PointerId(1), (114.0, 125.0)).unwrap();
        assert_eq!(slot, 0);
        assert_eq!(pos, (110.0, 120.0));
    }

    #[test]
    fn locked_piece_refuses_drag() {
        let mut tracker = DragTracker::new();
        let p = piece(3, true);
        assert!(!tracker.begin(PointerId(1), &p, (0.0, 0.0)));
        assert!(tracker.motion(PointerId(1), (5.0, 5.0)).is_none());
    }

    #[test]
    fn pointers_drag_independently() {
        let mut tracker = DragTracker::new();
        tracker.begin(PointerId(1), &piece(0, false), (10.0, 20.0));
        tracker.begin(PointerId(2), &piece(1, false), (10.0, 20.0));
        assert_eq!(tracker.dragged_slot(PointerId(1)), Some(0));
        assert_eq!(tracker.dragged_slot(PointerId(2)), Some(1));
        assert_eq!(tracker.finish(PointerId(1)), Some(0));
        assert_eq!(tracker.dragged_slot(PointerId(1)), None);
        assert_eq!(tracker.dragged_slot(PointerId(2)), Some(1));
    }

    #[test]
    fn clamp_keeps_piece_inside() {
        assert_eq!(
            clamp_to_bounds((-5.0, 900.0), (400.0, 300.0), (72.0, 72.0)),
            (0.0, 228.0)
        );
        // Container smaller than the piece degrades to the origin.
        assert_eq!(
            clamp_to_bounds((50.0, 50.0), (40.0, 40.0), (72.0, 72.0)),
            (0.0, 0.0)
        );
    }
}
