use serde::{Deserialize, Serialize};

use crate::edges::{EdgeProfile, Side};
use crate::sizing::BoardGeometry;

/// Basic two dimensional point used for geometry operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl From<(f64, f64)> for Point {
    fn from(v: (f64, f64)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

/// One step of a closed vector path. Rendering backends translate these to
/// whatever clipping or masking primitive they offer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    /// Cubic segment: two control points, then the end point.
    CurveTo(Point, Point, Point),
    Close,
}

/// Width of a tab bump relative to the smaller cell dimension.
pub const BUMP_WIDTH_RATIO: f64 = 0.52;
/// Height of a tab bump relative to the tab overhang.
pub const BUMP_HEIGHT_RATIO: f64 = 0.95;
/// A bump never takes more than this share of its own edge, so very small
/// cells cannot produce self-intersecting curves.
pub const BUMP_EDGE_CAP: f64 = 0.6;

/// Closed silhouette of a single piece, in piece-box coordinates
/// (`0..piece_w` x `0..piece_h`, cell inset by the tab overhang).
#[derive(Clone, Debug, PartialEq)]
pub struct Outline {
    cmds: Vec<PathCmd>,
    width: f64,
    height: f64,
}

impl Outline {
    /// Builds the outline for the piece at `(row, col)`.
    ///
    /// The path starts at the inset top-left corner and walks the four
    /// edges clockwise. A side of type +1 always bulges outward, -1 always
    /// recesses inward, so two pieces sharing a boundary interlock without
    /// gap or overlap. The command list only changes with `geometry`; the
    /// side types are fixed for the life of the level.
    pub fn build(row: usize, col: usize, profile: &EdgeProfile, geometry: &BoardGeometry) -> Self {
        let tab = geometry.tab;
        let x0 = tab;
        let y0 = tab;
        let x1 = tab + geometry.cell_w;
        let y1 = tab + geometry.cell_h;

        let bump_w = geometry.cell_min() * BUMP_WIDTH_RATIO;
        let bump_h = tab * BUMP_HEIGHT_RATIO;

        let top = profile.side_type(row, col, Side::Top);
        let right = profile.side_type(row, col, Side::Right);
        let bottom = profile.side_type(row, col, Side::Bottom);
        let left = profile.side_type(row, col, Side::Left);

        let mut cmds = vec![PathCmd::MoveTo(Point { x: x0, y: y0 })];
        edge_h(&mut cmds, x0, x1, y0, top, bump_w, bump_h, -1.0);
        edge_v(&mut cmds, y0, y1, x1, right, bump_w, bump_h, 1.0);
        edge_h(&mut cmds, x1, x0, y1, bottom, bump_w, bump_h, 1.0);
        edge_v(&mut cmds, y1, y0, x0, left, bump_w, bump_h, -1.0);
        cmds.push(PathCmd::Close);

        Self {
            cmds,
            width: geometry.piece_w,
            height: geometry.piece_h,
        }
    }

    pub fn commands(&self) -> &[PathCmd] {
        &self.cmds
    }

    /// SVG path data (`M`/`L`/`C`/`Z`) for the silhouette.
    pub fn to_svg_path(&self) -> String {
        let mut d = String::new();
        for cmd in &self.cmds {
            if !d.is_empty() {
                d.push(' ');
            }
            match cmd {
                PathCmd::MoveTo(p) => d.push_str(&format!("M {} {}", fmt(p.x), fmt(p.y))),
                PathCmd::LineTo(p) => d.push_str(&format!("L {} {}", fmt(p.x), fmt(p.y))),
                PathCmd::CurveTo(c1, c2, p) => d.push_str(&format!(
                    "C {} {} {} {} {} {}",
                    fmt(c1.x),
                    fmt(c1.y),
                    fmt(c2.x),
                    fmt(c2.y),
                    fmt(p.x),
                    fmt(p.y)
                )),
                PathCmd::Close => d.push('Z'),
            }
        }
        d
    }

    /// Minimal SVG document for use as a mask image over the piece box.
    pub fn mask_svg(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\"><path d=\"{d}\" fill=\"white\"/></svg>",
            w = fmt(self.width),
            h = fmt(self.height),
            d = self.to_svg_path(),
        )
    }
}

/// Offset that aligns the full background image with this piece's slice,
/// independent of where the piece currently sits on screen.
pub fn background_offset(row: usize, col: usize, geometry: &BoardGeometry) -> (f64, f64) {
    (
        -(col as f64 * geometry.cell_w - geometry.tab),
        -(row as f64 * geometry.cell_h - geometry.tab),
    )
}

fn fmt(v: f64) -> String {
    // Two decimals keep mask data URLs short without visible error.
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Horizontal edge from `x_a` to `x_b` at height `y`. `dir_sign` is -1 for
/// the top edge and +1 for the bottom edge so that a +1 side type always
/// points away from the cell.
#[allow(clippy::too_many_arguments)]
fn edge_h(
    cmds: &mut Vec<PathCmd>,
    x_a: f64,
    x_b: f64,
    y: f64,
    side_type: i8,
    bump_w: f64,
    bump_h: f64,
    dir_sign: f64,
) {
    if side_type == 0 {
        cmds.push(PathCmd::LineTo(Point { x: x_b, y }));
        return;
    }

    let len = (x_b - x_a).abs();
    let mid = (x_a + x_b) / 2.0;
    let dir = if x_b >= x_a { 1.0 } else { -1.0 };

    let bw = bump_w.min(len * BUMP_EDGE_CAP);
    let near = mid - dir * bw / 2.0;
    let far = mid + dir * bw / 2.0;

    let outward = dir_sign * f64::from(side_type) * bump_h;
    let c1 = bw * 0.22;
    let c2 = bw * 0.28;

    cmds.push(PathCmd::LineTo(Point { x: near, y }));
    cmds.push(PathCmd::CurveTo(
        Point {
            x: near + dir * c1,
            y,
        },
        Point {
            x: mid - dir * c2,
            y: y + outward,
        },
        Point {
            x: mid,
            y: y + outward,
        },
    ));
    cmds.push(PathCmd::CurveTo(
        Point {
            x: mid + dir * c2,
            y: y + outward,
        },
        Point {
            x: far - dir * c1,
            y,
        },
        Point { x: far, y },
    ));
    cmds.push(PathCmd::LineTo(Point { x: x_b, y }));
}

/// Vertical edge from `y_a` to `y_b` at `x`. `dir_sign` is +1 for the right
/// edge and -1 for the left edge.
#[allow(clippy::too_many_arguments)]
fn edge_v(
    cmds: &mut Vec<PathCmd>,
    y_a: f64,
    y_b: f64,
    x: f64,
    side_type: i8,
    bump_w: f64,
    bump_h: f64,
    dir_sign: f64,
) {
    if side_type == 0 {
        cmds.push(PathCmd::LineTo(Point { x, y: y_b }));
        return;
    }

    let len = (y_b - y_a).abs();
    let mid = (y_a + y_b) / 2.0;
    let dir = if y_b >= y_a { 1.0 } else { -1.0 };

    let bw = bump_w.min(len * BUMP_EDGE_CAP);
    let near = mid - dir * bw / 2.0;
    let far = mid + dir * bw / 2.0;

    let outward = dir_sign * f64::from(side_type) * bump_h;
    let c1 = bw * 0.22;
    let c2 = bw * 0.28;

    cmds.push(PathCmd::LineTo(Point { x, y: near }));
    cmds.push(PathCmd::CurveTo(
        Point {
            x,
            y: near + dir * c1,
        },
        Point {
            x: x + outward,
            y: mid - dir * c2,
        },
        Point {
            x: x + outward,
            y: mid,
        },
    ));
    cmds.push(PathCmd::CurveTo(
        Point {
            x: x + outward,
            y: mid + dir * c2,
        },
        Point {
            x,
            y: far - dir * c1,
        },
        Point { x, y: far },
    ));
    cmds.push(PathCmd::LineTo(Point { x, y: y_b }));
}
