//! Uniform B-spline curves for interactive 2D curve design.
//!
//! The curve is defined by an ordered control polygon and an order `k`
//! (degree + 1). A clamped, uniform knot vector is derived from the number
//! of control points, and points on the curve are evaluated with a
//! localized de Boor recursion over the active knot span.
//!
//! [`Scene`] wraps the math in a per-frame update step: it takes a snapshot
//! of queued input, applies it to the control points, and produces the
//! [`Drawable`]s a renderer needs for that frame.

mod bspline;
mod control;
mod knots;
mod scene;
pub mod viewport;

pub use crate::bspline::{sample_curve, BSpline};
pub use control::ControlPoints;
pub use knots::KnotVector;
pub use scene::{Color, DrainOrder, Drawable, Frame, InputQueue, Params, Scene};
pub use viewport::ScreenPoint;
