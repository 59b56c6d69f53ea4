/// Fixed grid dimensions for a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDims {
    pub rows: usize,
    pub cols: usize,
}

impl GridDims {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn total(&self) -> usize {
        self.rows * self.cols
    }
}

/// Tab overhang as a fraction of the smaller cell dimension.
pub const TAB_RATIO: f64 = 0.26;

/// Board, cell and piece metrics for the current viewport.
///
/// `piece_w`/`piece_h` include the tab overhang on every side so a piece's
/// rendered box never clips an outward bump.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardGeometry {
    pub board_w: f64,
    pub board_h: f64,
    pub cell_w: f64,
    pub cell_h: f64,
    pub tab: f64,
    pub piece_w: f64,
    pub piece_h: f64,
}

impl BoardGeometry {
    /// Derives all metrics from the available width, the source image's
    /// aspect ratio and the grid. Pure and idempotent; rerun whenever the
    /// hosting container is measured again.
    pub fn compute(board_w: f64, aspect_ratio: f64, grid: GridDims) -> Self {
        let ratio = if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            aspect_ratio
        } else {
            1.0
        };
        let board_w = board_w.max(1.0);
        let board_h = (board_w / ratio).round();
        let cell_w = board_w / grid.cols as f64;
        let cell_h = board_h / grid.rows as f64;
        let tab = (cell_w.min(cell_h) * TAB_RATIO).round();
        Self {
            board_w,
            board_h,
            cell_w,
            cell_h,
            tab,
            piece_w: cell_w + tab * 2.0,
            piece_h: cell_h + tab * 2.0,
        }
    }

    pub fn cell_min(&self) -> f64 {
        self.cell_w.min(self.cell_h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_board_metrics() {
        let g = BoardGeometry::compute(960.0, 2.0, GridDims::new(10, 20));
        assert_eq!(g.board_h, 480.0);
        assert_eq!(g.cell_w, 48.0);
        assert_eq!(g.cell_h, 48.0);
        assert_eq!(g.tab, 12.0);
        assert_eq!(g.piece_w, 72.0);
        assert_eq!(g.piece_h, 72.0);
    }

    #[test]
    fn recompute_is_idempotent() {
        let grid = GridDims::new(10, 20);
        let a = BoardGeometry::compute(1234.0, 1.5, grid);
        let b = BoardGeometry::compute(1234.0, 1.5, grid);
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_aspect_falls_back_to_square() {
        let g = BoardGeometry::compute(800.0, 0.0, GridDims::new(4, 4));
        assert_eq!(g.board_h, 800.0);
        let g = BoardGeometry::compute(800.0, f64::NAN, GridDims::new(4, 4));
        assert_eq!(g.board_h, 800.0);
    }

    #[test]
    fn tab_tracks_smaller_cell() {
        // Wide cells, short rows: the overhang follows the cell height.
        let g = BoardGeometry::compute(1000.0, 4.0, GridDims::new(5, 5));
        assert_eq!(g.cell_h, 50.0);
        assert_eq!(g.tab, (50.0 * TAB_RATIO).round());
    }
}
