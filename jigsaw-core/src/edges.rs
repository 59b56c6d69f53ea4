use crate::rng::Mulberry32;

/// One of a piece's four sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// Tab/hole orientation for every internal grid boundary, derived from a
/// level seed.
///
/// A boundary is stored once and consulted from both sides: the boundary
/// between cells `(r, c)` and `(r, c + 1)` decides the right side of the
/// first and the left side of the second, so the two outlines are
/// complementary by construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeProfile {
    rows: usize,
    cols: usize,
    /// `vertical[r][c]` for c in 1..cols is the boundary left of cell (r, c).
    vertical: Vec<Vec<i8>>,
    /// `horizontal[r][c]` for r in 1..rows is the boundary above cell (r, c).
    horizontal: Vec<Vec<i8>>,
}

impl EdgeProfile {
    /// Deterministically assigns +1/-1 to every internal boundary.
    ///
    /// Vertical boundaries are drawn first, then horizontal ones, both in
    /// row-major order from a single generator stream. The traversal order
    /// is part of the persisted-shape contract: changing it would reshape
    /// every saved puzzle.
    pub fn generate(seed: u32, rows: usize, cols: usize) -> Self {
        let mut rng = Mulberry32::new(seed);
        let mut vertical = vec![vec![0i8; cols + 1]; rows];
        let mut horizontal = vec![vec![0i8; cols]; rows + 1];

        for row in vertical.iter_mut() {
            for cell in row.iter_mut().take(cols).skip(1) {
                *cell = if rng.next_unit() < 0.5 { 1 } else { -1 };
            }
        }
        for row in horizontal.iter_mut().take(rows).skip(1) {
            for cell in row.iter_mut() {
                *cell = if rng.next_unit() < 0.5 { 1 } else { -1 };
            }
        }

        Self {
            rows,
            cols,
            vertical,
            horizontal,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Shape of one side of cell `(r, c)`: 0 flat (board boundary),
    /// +1 protruding tab, -1 recessed hole.
    ///
    /// The sign flips between the two cells that share a boundary, so
    /// facing sides always interlock.
    pub fn side_type(&self, r: usize, c: usize, side: Side) -> i8 {
        match side {
            Side::Top => {
                if r == 0 {
                    0
                } else if self.horizontal[r][c] == 1 {
                    -1
                } else {
                    1
                }
            }
            Side::Bottom => {
                if r == self.rows - 1 {
                    0
                } else if self.horizontal[r + 1][c] == 1 {
                    1
                } else {
                    -1
                }
            }
            Side::Left => {
                if c == 0 {
                    0
                } else if self.vertical[r][c] == 1 {
                    -1
                } else {
                    1
                }
            }
            Side::Right => {
                if c == self.cols - 1 {
                    0
                } else if self.vertical[r][c + 1] == 1 {
                    1
                } else {
                    -1
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic() {
        let a = EdgeProfile::generate(42, 10, 20);
        let b = EdgeProfile::generate(42, 10, 20);
        assert_eq!(a, b);
    }

    #[test]
    fn board_boundaries_are_flat() {
        let p = EdgeProfile::generate(7, 4, 5);
        for c in 0..5 {
            assert_eq!(p.side_type(0, c, Side::Top), 0);
            assert_eq!(p.side_type(3, c, Side::Bottom), 0);
        }
        for r in 0..4 {
            assert_eq!(p.side_type(r, 0, Side::Left), 0);
            assert_eq!(p.side_type(r, 4, Side::Right), 0);
        }
    }

    #[test]
    fn internal_boundaries_are_complementary() {
        let p = EdgeProfile::generate(0xC0FF_EE00, 6, 8);
        for r in 0..6 {
            for c in 0..7 {
                let right = p.side_type(r, c, Side::Right);
                let left = p.side_type(r, c + 1, Side::Left);
                assert_ne!(right, 0);
                assert_eq!(right, -left, "boundary ({r},{c})|({r},{})", c + 1);
            }
        }
        for r in 0..5 {
            for c in 0..8 {
                let bottom = p.side_type(r, c, Side::Bottom);
                let top = p.side_type(r + 1, c, Side::Top);
                assert_ne!(bottom, 0);
                assert_eq!(bottom, -top, "boundary ({r},{c})-({},{c})", r + 1);
            }
        }
    }

    #[test]
    fn corner_piece_seed_42() {
        // 20x10 grid from the reference scenario: the top-left corner is
        // flat on its outer sides and interlocked on the inner ones.
        let p = EdgeProfile::generate(42, 10, 20);
        assert_eq!(p.side_type(0, 0, Side::Top), 0);
        assert_eq!(p.side_type(0, 0, Side::Left), 0);
        assert_eq!(
            p.side_type(0, 0, Side::Right),
            -p.side_type(0, 1, Side::Left)
        );
        assert_eq!(
            p.side_type(0, 0, Side::Bottom),
            -p.side_type(1, 0, Side::Top)
        );
    }
}
