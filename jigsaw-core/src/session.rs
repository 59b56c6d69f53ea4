use crate::drag::clamp_to_bounds;
use crate::edges::EdgeProfile;
use crate::rng::Mulberry32;
use crate::sizing::{BoardGeometry, GridDims};
use crate::snap::{snap_tolerance, target_position, within_tolerance};

/// Margin kept around scattered pieces in the staging container.
pub const SCATTER_MARGIN: f64 = 8.0;

/// Which container currently holds a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    Staging,
    Board,
}

/// Per-piece record. `slot`, `row` and `col` are fixed at level load;
/// everything else is mutated through [`LevelSession`] only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieceState {
    pub slot: usize,
    pub row: usize,
    pub col: usize,
    pub locked: bool,
    pub pos: (f64, f64),
    pub container: ContainerKind,
}

/// Result of dropping a piece onto the board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropOutcome {
    /// Snapped to its slot. `completed` is true exactly when this lock
    /// filled the final free slot.
    Locked { completed: bool },
    /// Missed (or slot taken); the piece keeps the clamped drop position.
    Stayed { pos: (f64, f64) },
}

/// All mutable puzzle state for one level: the edge profile, the piece
/// records and slot occupancy. Created at level load, replaced wholesale at
/// the next one.
#[derive(Clone, Debug)]
pub struct LevelSession {
    level: u32,
    seed: u32,
    grid: GridDims,
    profile: EdgeProfile,
    pieces: Vec<PieceState>,
    occupied: Vec<bool>,
    placed: usize,
}

impl LevelSession {
    pub fn new(level: u32, seed: u32, grid: GridDims) -> Self {
        let profile = EdgeProfile::generate(seed, grid.rows, grid.cols);
        let pieces = (0..grid.total())
            .map(|slot| PieceState {
                slot,
                row: slot / grid.cols,
                col: slot % grid.cols,
                locked: false,
                pos: (0.0, 0.0),
                container: ContainerKind::Staging,
            })
            .collect();
        Self {
            level,
            seed,
            grid,
            profile,
            pieces,
            occupied: vec![false; grid.total()],
            placed: 0,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn grid(&self) -> GridDims {
        self.grid
    }

    pub fn profile(&self) -> &EdgeProfile {
        &self.profile
    }

    pub fn piece(&self, slot: usize) -> &PieceState {
        &self.pieces[slot]
    }

    pub fn pieces(&self) -> &[PieceState] {
        &self.pieces
    }

    pub fn placed(&self) -> usize {
        self.placed
    }

    pub fn is_complete(&self) -> bool {
        self.placed == self.grid.total()
    }

    /// Slots currently locked, in ascending order. This is what gets
    /// persisted after every successful lock.
    pub fn locked_slots(&self) -> Vec<usize> {
        self.pieces
            .iter()
            .filter(|p| p.locked)
            .map(|p| p.slot)
            .collect()
    }

    /// Moves an unlocked piece. Locked pieces ignore the call.
    pub fn set_position(&mut self, slot: usize, pos: (f64, f64)) {
        let piece = &mut self.pieces[slot];
        if !piece.locked {
            piece.pos = pos;
        }
    }

    /// Reparents an unlocked piece, keeping whatever position the caller
    /// has already translated into the new container's coordinates.
    pub fn set_container(&mut self, slot: usize, container: ContainerKind, pos: (f64, f64)) {
        let piece = &mut self.pieces[slot];
        if !piece.locked {
            piece.container = container;
            piece.pos = pos;
        }
    }

    /// Randomizes staging positions for every unlocked piece still in the
    /// staging container. The caller owns the RNG; shapes never depend on
    /// this stream.
    pub fn scatter(&mut self, rng: &mut Mulberry32, staging: (f64, f64), geometry: &BoardGeometry) {
        let max_x = SCATTER_MARGIN.max(staging.0 - geometry.piece_w - SCATTER_MARGIN);
        let max_y = SCATTER_MARGIN.max(staging.1 - geometry.piece_h - SCATTER_MARGIN);
        for piece in &mut self.pieces {
            if piece.locked || piece.container != ContainerKind::Staging {
                continue;
            }
            piece.pos = (
                rng.next_between(SCATTER_MARGIN, max_x),
                rng.next_between(SCATTER_MARGIN, max_y),
            );
        }
    }

    /// Drop in board coordinates: lock when the piece is free, its slot is
    /// unoccupied and both axis deltas are within tolerance; otherwise the
    /// piece stays where it fell, clamped to the board.
    pub fn drop_on_board(
        &mut self,
        slot: usize,
        drop_pos: (f64, f64),
        geometry: &BoardGeometry,
    ) -> DropOutcome {
        let piece = self.pieces[slot];
        if piece.locked {
            // Interacting with a locked piece is a silent no-op.
            return DropOutcome::Stayed { pos: piece.pos };
        }
        let target = target_position(piece.row, piece.col, geometry);

        if !self.occupied[slot] && within_tolerance(drop_pos, target, snap_tolerance(geometry)) {
            return DropOutcome::Locked {
                completed: self.lock(slot, target),
            };
        }

        let clamped = clamp_to_bounds(
            drop_pos,
            (geometry.board_w, geometry.board_h),
            (geometry.piece_w, geometry.piece_h),
        );
        self.set_container(slot, ContainerKind::Board, clamped);
        DropOutcome::Stayed { pos: clamped }
    }

    /// Drop outside the board: the piece returns to staging, clamped to the
    /// staging bounds. Never an error.
    pub fn drop_on_staging(
        &mut self,
        slot: usize,
        pos: (f64, f64),
        staging: (f64, f64),
        geometry: &BoardGeometry,
    ) -> (f64, f64) {
        let clamped = clamp_to_bounds(pos, staging, (geometry.piece_w, geometry.piece_h));
        self.set_container(slot, ContainerKind::Staging, clamped);
        clamped
    }

    /// Relocks persisted slots at their exact targets. Out-of-range slots
    /// are ignored; returns how many pieces were restored.
    pub fn restore_locked(&mut self, slots: &[usize], geometry: &BoardGeometry) -> usize {
        let mut restored = 0;
        for &slot in slots {
            if slot >= self.grid.total() || self.pieces[slot].locked || self.occupied[slot] {
                continue;
            }
            let piece = self.pieces[slot];
            self.lock(slot, target_position(piece.row, piece.col, geometry));
            restored += 1;
        }
        restored
    }

    /// Recomputes piece positions after a geometry change. Locked pieces go
    /// exactly to their new targets; staging pieces scale proportionally
    /// with the staging container; loose board pieces are reclamped.
    pub fn rescale(
        &mut self,
        geometry: &BoardGeometry,
        staging: (f64, f64),
        staging_scale: (f64, f64),
    ) {
        for slot in 0..self.pieces.len() {
            let piece = self.pieces[slot];
            if piece.locked {
                self.pieces[slot].pos = target_position(piece.row, piece.col, geometry);
            } else {
                match piece.container {
                    ContainerKind::Staging => {
                        let scaled = (piece.pos.0 * staging_scale.0, piece.pos.1 * staging_scale.1);
                        self.pieces[slot].pos = clamp_to_bounds(
                            scaled,
                            staging,
                            (geometry.piece_w, geometry.piece_h),
                        );
                    }
                    ContainerKind::Board => {
                        self.pieces[slot].pos = clamp_to_bounds(
                            piece.pos,
                            (geometry.board_w, geometry.board_h),
                            (geometry.piece_w, geometry.piece_h),
                        );
                    }
                }
            }
        }
    }

    fn lock(&mut self, slot: usize, target: (f64, f64)) -> bool {
        let piece = &mut self.pieces[slot];
        piece.locked = true;
        piece.container = ContainerKind::Board;
        piece.pos = target;
        self.occupied[slot] = true;
        self.placed += 1;
        self.placed == self.grid.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snap::snap_tolerance;

    fn geometry() -> BoardGeometry {
        BoardGeometry::compute(960.0, 2.0, GridDims::new(10, 20))
    }

    fn session() -> LevelSession {
        LevelSession::new(1, 42, GridDims::new(10, 20))
    }

    #[test]
    fn exact_drop_locks_and_occupies() {
        let geom = geometry();
        let mut s = session();
        let target = target_position(0, 0, &geom);
        let outcome = s.drop_on_board(0, target, &geom);
        assert_eq!(outcome, DropOutcome::Locked { completed: false });
        assert!(s.piece(0).locked);
        assert_eq!(s.piece(0).pos, target);
        assert_eq!(s.piece(0).container, ContainerKind::Board);
        assert_eq!(s.locked_slots(), vec![0]);
    }

    #[test]
    fn drop_past_tolerance_stays_free() {
        let geom = geometry();
        let mut s = session();
        let target = target_position(0, 0, &geom);
        let off = (target.0 + snap_tolerance(&geom) + 1.0, target.1);
        let outcome = s.drop_on_board(0, off, &geom);
        assert!(matches!(outcome, DropOutcome::Stayed { .. }));
        assert!(!s.piece(0).locked);
        assert_eq!(s.placed(), 0);
    }

    #[test]
    fn missed_drop_is_clamped_to_board() {
        let geom = geometry();
        let mut s = session();
        let outcome = s.drop_on_board(5, (-40.0, 10_000.0), &geom);
        let expected = (0.0, geom.board_h - geom.piece_h);
        assert_eq!(outcome, DropOutcome::Stayed { pos: expected });
        assert_eq!(s.piece(5).pos, expected);
    }

    #[test]
    fn locked_piece_never_reverts() {
        let geom = geometry();
        let mut s = session();
        let target = target_position(0, 0, &geom);
        s.drop_on_board(0, target, &geom);

        s.set_position(0, (500.0, 500.0));
        s.set_container(0, ContainerKind::Staging, (1.0, 1.0));
        let again = s.drop_on_board(0, target, &geom);
        assert!(matches!(again, DropOutcome::Stayed { .. }));
        assert!(s.piece(0).locked);
        assert_eq!(s.piece(0).pos, target);
        assert_eq!(s.placed(), 1);
    }

    #[test]
    fn completion_fires_exactly_once() {
        let geom = BoardGeometry::compute(100.0, 1.0, GridDims::new(1, 2));
        let mut s = LevelSession::new(1, 7, GridDims::new(1, 2));
        let first = s.drop_on_board(0, target_position(0, 0, &geom), &geom);
        assert_eq!(first, DropOutcome::Locked { completed: false });
        let last = s.drop_on_board(1, target_position(0, 1, &geom), &geom);
        assert_eq!(last, DropOutcome::Locked { completed: true });
        assert!(s.is_complete());
    }

    #[test]
    fn restore_skips_out_of_range_and_duplicates() {
        let geom = geometry();
        let mut s = session();
        let restored = s.restore_locked(&[3, 3, 9_999], &geom);
        assert_eq!(restored, 1);
        assert!(s.piece(3).locked);
        assert_eq!(s.piece(3).pos, target_position(0, 3, &geom));
        assert_eq!(s.placed(), 1);
    }

    #[test]
    fn scatter_stays_inside_staging() {
        let geom = geometry();
        let mut s = session();
        let mut rng = Mulberry32::new(99);
        let staging = (600.0, 400.0);
        s.scatter(&mut rng, staging, &geom);
        for p in s.pieces() {
            assert!(p.pos.0 >= SCATTER_MARGIN);
            assert!(p.pos.0 <= staging.0 - geom.piece_w - SCATTER_MARGIN);
            assert!(p.pos.1 >= SCATTER_MARGIN);
            assert!(p.pos.1 <= staging.1 - geom.piece_h - SCATTER_MARGIN);
        }
    }

    #[test]
    fn rescale_moves_locked_to_new_target_and_scales_staging() {
        let old_geom = geometry();
        let mut s = session();
        s.drop_on_board(0, target_position(0, 0, &old_geom), &old_geom);
        s.set_position(7, (100.0, 50.0));

        let new_geom = BoardGeometry::compute(480.0, 2.0, GridDims::new(10, 20));
        s.rescale(&new_geom, (1200.0, 800.0), (2.0, 2.0));

        assert_eq!(s.piece(0).pos, target_position(0, 0, &new_geom));
        assert_eq!(s.piece(7).pos, (200.0, 100.0));
    }
}
