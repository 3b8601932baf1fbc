//! One editing pass: apply queued input, rebuild the curve, emit drawables.

use std::mem;

use kurbo::Point;
#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

use crate::bspline::BSpline;
use crate::control::ControlPoints;
use crate::viewport::{screen_to_curve, ScreenPoint};

const CONTROL_POINT_COLOR: Color = Color::rgb(1.0, 0.0, 0.0);
const CURVE_COLOR: Color = Color::rgb(0.0, 1.0, 0.0);
const MARKER_COLOR: Color = Color::rgb(0.0, 0.0, 1.0);

/// The order in which a pass applies the events of each queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_", rename_all = "lowercase")
)]
pub enum DrainOrder {
    /// Most recent event first.
    Lifo,
    /// Oldest event first.
    Fifo,
}

/// Inputs to a pass that are not edits to the control points.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_", default)
)]
pub struct Params {
    /// The order of the curve (degree + 1).
    pub order: usize,
    /// Parameter increment between curve samples.
    pub step: f64,
    /// Per-axis tolerance, in curve units, for removing a control point.
    pub epsilon: f64,
    pub drain_order: DrainOrder,
    /// If set, the curve point at this parameter is drawn as a marker.
    pub marker: Option<f64>,
}

/// Click positions collected since the last pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputQueue {
    added: Vec<ScreenPoint>,
    removed: Vec<ScreenPoint>,
    clear: bool,
}

/// An RGB color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_")
)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// A primitive for the renderer, in curve-space coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Drawable {
    /// Each vertex is drawn as an isolated dot.
    Points { vertices: Vec<Point>, color: Color },
    /// The vertices are joined, in order, by line segments.
    LineStrip { vertices: Vec<Point>, color: Color },
}

/// Everything to draw for one pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    drawables: Vec<Drawable>,
}

/// The editable state: the control points.
///
/// Everything else (knots, the curve) is derived from scratch on each
/// [`update`](Scene::update).
#[derive(Clone, Debug, Default)]
pub struct Scene {
    points: ControlPoints,
    /// Parameters of the previous pass; only used to log when they change.
    last_params: Option<Params>,
}

impl Default for DrainOrder {
    fn default() -> Self {
        DrainOrder::Lifo
    }
}

impl DrainOrder {
    fn arrange<T>(self, mut events: Vec<T>) -> Vec<T> {
        if self == DrainOrder::Lifo {
            events.reverse();
        }
        events
    }
}

impl Default for Params {
    fn default() -> Self {
        Params {
            order: 4,
            step: 0.001,
            epsilon: 0.1,
            drain_order: DrainOrder::Lifo,
            marker: None,
        }
    }
}

impl InputQueue {
    pub fn new() -> InputQueue {
        InputQueue::default()
    }

    /// Queue a click that adds a control point.
    pub fn push_added(&mut self, p: ScreenPoint) {
        self.added.push(p);
    }

    /// Queue a click that removes the control point under it.
    pub fn push_removed(&mut self, p: ScreenPoint) {
        self.removed.push(p);
    }

    /// Remove all control points before applying the queued clicks.
    pub fn request_clear(&mut self) {
        self.clear = true;
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && !self.clear
    }

    /// Take the queued events, leaving this queue empty.
    pub fn take(&mut self) -> InputQueue {
        mem::take(self)
    }
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Color {
        Color { r, g, b }
    }
}

impl Drawable {
    pub fn vertices(&self) -> &[Point] {
        match self {
            Drawable::Points { vertices, .. } | Drawable::LineStrip { vertices, .. } => vertices,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Drawable::Points { color, .. } | Drawable::LineStrip { color, .. } => *color,
        }
    }
}

impl Frame {
    pub fn drawables(&self) -> &[Drawable] {
        &self.drawables
    }

    /// The sampled curve, empty if there were too few control points.
    pub fn curve(&self) -> &[Point] {
        self.drawables
            .iter()
            .find_map(|d| match d {
                Drawable::LineStrip { vertices, .. } => Some(vertices.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }
}

impl Scene {
    pub fn new() -> Scene {
        Scene::default()
    }

    /// Start from an existing set of control points.
    pub fn with_points(points: ControlPoints) -> Scene {
        Scene {
            points,
            last_params: None,
        }
    }

    pub fn points(&self) -> &ControlPoints {
        &self.points
    }

    /// Run one pass.
    ///
    /// The snapshot is applied in a fixed sequence: a pending clear first,
    /// then every added point, then every removal, each queue in
    /// `params.drain_order`. The curve is then rebuilt for the resulting
    /// points.
    pub fn update(&mut self, input: InputQueue, params: &Params) -> Frame {
        if self.last_params.as_ref() != Some(params) {
            log::debug!("parameters changed: {:?}", params);
            self.last_params = Some(params.clone());
        }

        let InputQueue {
            added,
            removed,
            clear,
        } = input;
        if clear {
            log::debug!("clearing {} control points", self.points.len());
            self.points.clear();
        }
        for p in params.drain_order.arrange(added) {
            let pt = screen_to_curve(p);
            log::debug!("adding control point ({:.3}, {:.3})", pt.x, pt.y);
            self.points.add(pt);
        }
        for p in params.drain_order.arrange(removed) {
            let pt = screen_to_curve(p);
            match self.points.remove_nearest(pt, params.epsilon) {
                Some(old) => log::debug!("removed control point ({:.3}, {:.3})", old.x, old.y),
                None => log::trace!("no control point near ({:.3}, {:.3})", pt.x, pt.y),
            }
        }

        self.frame(params)
    }

    /// Build the drawables for the current points without applying any input.
    pub fn frame(&self, params: &Params) -> Frame {
        let mut drawables: Vec<Drawable> = self
            .points
            .iter()
            .map(|&p| Drawable::Points {
                vertices: vec![p],
                color: CONTROL_POINT_COLOR,
            })
            .collect();

        if let Some(spline) = BSpline::new(self.points.points(), params.order) {
            let curve = spline.sample(params.step);
            log::trace!(
                "order {} over {} points: {} samples",
                params.order,
                self.points.len(),
                curve.len()
            );
            if !curve.is_empty() {
                drawables.push(Drawable::LineStrip {
                    vertices: curve,
                    color: CURVE_COLOR,
                });
            }
            if let Some(p) = params.marker.and_then(|u| spline.eval(u)) {
                drawables.push(Drawable::Points {
                    vertices: vec![p],
                    color: MARKER_COLOR,
                });
            }
        }

        Frame { drawables }
    }
}
