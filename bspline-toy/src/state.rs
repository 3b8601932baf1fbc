use std::sync::Arc;

use druid::Data;

use bspline::{ControlPoints, Frame, InputQueue, Params, Scene};

pub const MIN_ORDER: usize = 2;
pub const MIN_STEP: f64 = 0.001;
pub const MAX_STEP: f64 = 1.0;
const MARKER_STEP: f64 = 0.05;

/// Bring parameters from outside the editor (config, saved sessions) into
/// the range the key bindings allow.
pub fn clamp_params(params: Params) -> Params {
    Params {
        order: params.order.max(MIN_ORDER),
        step: params.step.max(MIN_STEP).min(MAX_STEP),
        ..params
    }
}

/// The application data.
///
/// The scene only changes inside [`ToyState::run_pass`]; the parameters may
/// change at any time and take effect on the next pass.
#[derive(Clone, Debug, Data)]
pub struct ToyState {
    scene: Arc<Scene>,
    params: Arc<Params>,
    frame: Arc<Frame>,
}

impl ToyState {
    /// Parameters out of the editable range are clamped first.
    pub fn new(points: ControlPoints, params: Params) -> ToyState {
        let params = clamp_params(params);
        let scene = Scene::with_points(points);
        let frame = scene.frame(&params);
        ToyState {
            scene: Arc::new(scene),
            params: Arc::new(params),
            frame: Arc::new(frame),
        }
    }

    pub fn points(&self) -> &ControlPoints {
        self.scene.points()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Apply the queued input and rebuild the frame.
    pub fn run_pass(&mut self, input: InputQueue) {
        let params = Arc::clone(&self.params);
        let frame = Arc::make_mut(&mut self.scene).update(input, &params);
        self.frame = Arc::new(frame);
    }

    pub fn change_order(&mut self, delta: isize) {
        let params = Arc::make_mut(&mut self.params);
        let order = (params.order as isize + delta).max(MIN_ORDER as isize);
        params.order = order as usize;
    }

    /// Multiply the sampling step by `factor`, within `MIN_STEP..=MAX_STEP`.
    pub fn scale_step(&mut self, factor: f64) {
        let params = Arc::make_mut(&mut self.params);
        params.step = (params.step * factor).max(MIN_STEP).min(MAX_STEP);
    }

    pub fn toggle_marker(&mut self) {
        let params = Arc::make_mut(&mut self.params);
        params.marker = match params.marker {
            Some(_) => None,
            None => Some(0.0),
        };
    }

    /// Move the marker along the curve parameter, wrapping within `[0, 1)`.
    pub fn move_marker(&mut self, steps: isize) {
        let params = Arc::make_mut(&mut self.params);
        if let Some(u) = params.marker {
            let u = (u + steps as f64 * MARKER_STEP).rem_euclid(1.0);
            // guard against rounding up to the excluded right end
            params.marker = Some(if u < 1.0 { u } else { 0.0 });
        }
    }

    pub fn status(&self) -> String {
        let marker = match self.params.marker {
            Some(u) => format!("  marker: {:.2}", u),
            None => String::new(),
        };
        format!(
            "order: {}  step: {}  points: {}  samples: {}{}",
            self.params.order,
            self.params.step,
            self.scene.points().len(),
            self.frame.curve().len(),
            marker
        )
    }
}
