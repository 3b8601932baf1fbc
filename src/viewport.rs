//! Mapping between window pixels and curve space.
//!
//! The editor window shows the square `[-10, 10] x [-10, 10]` of curve space
//! with y pointing up; 750 pixels span 20 units.

use kurbo::Point;
#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

/// Width of the visible curve-space square.
pub const EXTENT: f64 = 20.0;
/// Pixels covering [`EXTENT`].
pub const PIXELS: f64 = 750.0;

const SCALE: f64 = EXTENT / PIXELS;
const HALF: f64 = EXTENT / 2.0;

/// A position in window pixels, origin at the top left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_")
)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> ScreenPoint {
        ScreenPoint { x, y }
    }

    /// Round a fractional window position to the nearest pixel.
    pub fn round(p: Point) -> ScreenPoint {
        ScreenPoint {
            x: p.x.round() as i32,
            y: p.y.round() as i32,
        }
    }
}

pub fn screen_to_curve(p: ScreenPoint) -> Point {
    Point::new(p.x as f64 * SCALE - HALF, HALF - p.y as f64 * SCALE)
}

/// The inverse of [`screen_to_curve`], in fractional pixels.
pub fn curve_to_screen(p: Point) -> Point {
    Point::new((p.x + HALF) / SCALE, (HALF - p.y) / SCALE)
}
