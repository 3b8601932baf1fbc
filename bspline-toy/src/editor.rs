use druid::{
    commands,
    kurbo::{BezPath, Circle},
    widget::{prelude::*, Label},
    Color, Data, KbKey, KeyEvent, MouseButton, Point,
};

use bspline::viewport::curve_to_screen;
use bspline::{Drawable, InputQueue, ScreenPoint};

use crate::save::Session;
use crate::state::ToyState;

const POINT_RADIUS: f64 = 2.5;
const CURVE_WIDTH: f64 = 1.0;
const LABEL_PADDING: f64 = 10.0;

/// The drawing surface.
///
/// Clicks and key presses are queued as they arrive; the queue is handed to
/// [`ToyState::run_pass`] on the next animation frame, and the resulting
/// frame is what gets painted.
pub struct Editor {
    status: Label<ToyState>,
    status_size: Size,
    input: InputQueue,
    background: Color,
}

impl Editor {
    pub fn new(background: [f32; 3]) -> Editor {
        Editor {
            status: Label::new(|data: &ToyState, _env: &Env| data.status())
                .with_text_size(12.0)
                .with_text_color(Color::grey(0.1)),
            status_size: Size::ZERO,
            input: InputQueue::new(),
            background: to_color(background),
        }
    }

    /// Returns `true` if the key changed the state.
    fn key_down(&mut self, key: &KeyEvent, data: &mut ToyState) -> bool {
        match &key.key {
            KbKey::ArrowUp => data.change_order(1),
            KbKey::ArrowDown => data.change_order(-1),
            KbKey::ArrowRight => data.scale_step(2.0),
            KbKey::ArrowLeft => data.scale_step(0.5),
            KbKey::Character(c) if c == "c" => self.input.request_clear(),
            KbKey::Character(c) if c == "m" => data.toggle_marker(),
            KbKey::Character(c) if c == "." => data.move_marker(1),
            KbKey::Character(c) if c == "," => data.move_marker(-1),
            _ => return false,
        }
        true
    }
}

impl Widget<ToyState> for Editor {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut ToyState, env: &Env) {
        match event {
            Event::WindowConnected => {
                ctx.request_focus();
                ctx.request_anim_frame();
            }
            Event::MouseDown(m) => {
                let pos = ScreenPoint::round(m.pos);
                match m.button {
                    MouseButton::Right => self.input.push_added(pos),
                    MouseButton::Left => self.input.push_removed(pos),
                    _ => (),
                }
                ctx.request_anim_frame();
            }
            Event::KeyDown(k) => {
                if self.key_down(k, data) {
                    ctx.request_anim_frame();
                    ctx.set_handled();
                }
            }
            Event::AnimFrame(_) => {
                data.run_pass(self.input.take());
                #[cfg(target_arch = "wasm32")]
                Session::capture(data).save_to_url();
                ctx.request_paint();
            }
            Event::Command(cmd) if cmd.is(commands::SAVE_FILE) => {
                if let Some(file_info) = cmd.get_unchecked(commands::SAVE_FILE) {
                    let saved = Session::capture(data)
                        .to_json()
                        .and_then(|json| std::fs::write(file_info.path(), json).map_err(Into::into));
                    match saved {
                        Ok(()) => log::info!("saved session to {}", file_info.path().display()),
                        Err(e) => log::error!("error writing json: {}", e),
                    }
                }
            }
            _ => (),
        }
        self.status.event(ctx, event, data, env);
    }

    fn lifecycle(&mut self, ctx: &mut LifeCycleCtx, event: &LifeCycle, data: &ToyState, env: &Env) {
        self.status.lifecycle(ctx, event, data, env);
    }

    fn update(&mut self, ctx: &mut UpdateCtx, old_data: &ToyState, data: &ToyState, env: &Env) {
        if !old_data.same(data) {
            ctx.request_layout();
            ctx.request_paint();
        }
        self.status.update(ctx, old_data, data, env);
    }

    fn layout(
        &mut self,
        ctx: &mut LayoutCtx,
        bc: &BoxConstraints,
        data: &ToyState,
        env: &Env,
    ) -> Size {
        self.status_size = self.status.layout(ctx, &bc.loosen(), data, env);
        bc.max()
    }

    fn paint(&mut self, ctx: &mut PaintCtx, data: &ToyState, _env: &Env) {
        ctx.clear(self.background.clone());
        for drawable in data.frame().drawables() {
            let c = drawable.color();
            let color = to_color([c.r, c.g, c.b]);
            match drawable {
                Drawable::Points { vertices, .. } => {
                    for &p in vertices {
                        ctx.fill(Circle::new(curve_to_screen(p), POINT_RADIUS), &color);
                    }
                }
                Drawable::LineStrip { vertices, .. } => {
                    ctx.stroke(polyline(vertices), &color, CURVE_WIDTH);
                }
            }
        }

        let origin = (
            LABEL_PADDING,
            ctx.size().height - self.status_size.height - LABEL_PADDING,
        );
        self.status.draw_at(ctx, origin);
    }
}

fn polyline(vertices: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut screen = vertices.iter().map(|&p| curve_to_screen(p));
    if let Some(first) = screen.next() {
        path.move_to(first);
        for p in screen {
            path.line_to(p);
        }
    }
    path
}

fn to_color([r, g, b]: [f32; 3]) -> Color {
    Color::rgb(r as f64, g as f64, b as f64)
}
