//! Render a curve described in a JSON file to SVG.
//!
//! The file holds the control points and, optionally, the parameters:
//!
//! ```json
//! { "points": [{ "x": -5, "y": 0 }, { "x": 0, "y": 5 }, { "x": 5, "y": 0 }],
//!   "params": { "order": 3, "step": 0.01 } }
//! ```

use serde_::Deserialize;

use bspline::viewport::{curve_to_screen, PIXELS};
use bspline::{ControlPoints, Drawable, Params, Scene};

#[derive(Deserialize, Debug)]
#[serde(crate = "serde_")]
struct Input {
    points: ControlPoints,
    #[serde(default)]
    params: Params,
}

fn svg_color(c: bspline::Color) -> String {
    let byte = |v: f32| (v.max(0.0).min(1.0) * 255.0).round() as u8;
    format!("#{:02x}{:02x}{:02x}", byte(c.r), byte(c.g), byte(c.b))
}

fn main() {
    let path = std::env::args().nth(1).expect("needs filename");
    let data = std::fs::read_to_string(path).unwrap();
    let input: Input = serde_json::from_str(&data).unwrap();
    let frame = Scene::with_points(input.points).frame(&input.params);

    println!(
        r##"<!DOCTYPE html>
<html>
    <body>
    <svg height="{0}" width="{0}">"##,
        PIXELS
    );
    for drawable in frame.drawables() {
        let color = svg_color(drawable.color());
        match drawable {
            Drawable::Points { vertices, .. } => {
                for &p in vertices {
                    let p = curve_to_screen(p);
                    println!(
                        r#"      <circle cx="{}" cy="{}" r="3" fill="{}" />"#,
                        p.x, p.y, color
                    );
                }
            }
            Drawable::LineStrip { vertices, .. } => {
                let pts: Vec<String> = vertices
                    .iter()
                    .map(|&p| {
                        let p = curve_to_screen(p);
                        format!("{},{}", p.x, p.y)
                    })
                    .collect();
                println!(
                    r#"      <polyline points="{}" fill="none" stroke="{}" />"#,
                    pts.join(" "),
                    color
                );
            }
        }
    }
    println!(
        r#"    </svg>
    </body>
</html>"#
    );
}
