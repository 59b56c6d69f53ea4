use crate::sizing::BoardGeometry;

/// Snap distance at the reference cell size. Larger than a bare grid snap
/// because the tab overhang shifts piece boxes off the cell grid.
pub const SNAP_TOLERANCE_PX: f64 = 22.0;

/// Cell size the nominal tolerance was tuned at.
pub const REFERENCE_CELL_PX: f64 = 48.0;

/// Current snap tolerance, scaled with the cell size so the feel is the
/// same on small and large viewports.
pub fn snap_tolerance(geometry: &BoardGeometry) -> f64 {
    SNAP_TOLERANCE_PX * geometry.cell_min() / REFERENCE_CELL_PX
}

/// Board-relative position a locked piece box occupies for its slot.
pub fn target_position(row: usize, col: usize, geometry: &BoardGeometry) -> (f64, f64) {
    (
        col as f64 * geometry.cell_w - geometry.tab,
        row as f64 * geometry.cell_h - geometry.tab,
    )
}

/// Both axis deltas within tolerance.
pub fn within_tolerance(drop: (f64, f64), target: (f64, f64), tolerance: f64) -> bool {
    (drop.0 - target.0).abs() <= tolerance && (drop.1 - target.1).abs() <= tolerance
}
