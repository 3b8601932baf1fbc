//! Draw a B-spline through a random control polygon.
//!
//! Prints an HTML page with an SVG of the control polygon, its control
//! points, and the curve of each order from 2 to 5.

use rand::distributions::{Distribution, Uniform};

use kurbo::{BezPath, Point};

use bspline::viewport::{curve_to_screen, PIXELS};
use bspline::BSpline;

const COLORS: [&str; 4] = ["#999", "#c33", "#3a3", "#33c"];

fn main() {
    let mut rng = rand::thread_rng();
    const N: usize = 10;
    let coord = Uniform::from(-9.0..9.0);
    let pts = (0..N)
        .map(|_| Point::new(coord.sample(&mut rng), coord.sample(&mut rng)))
        .collect::<Vec<_>>();

    let mut polygon = BezPath::new();
    polygon.move_to(curve_to_screen(pts[0]));
    for &p in &pts[1..] {
        polygon.line_to(curve_to_screen(p));
    }

    println!(
        r##"<!DOCTYPE html>
<html>
    <body>
    <svg height="{0}" width="{0}">
      <path d="{1}" fill="none" stroke="#ddd" stroke-dasharray="4" />"##,
        PIXELS,
        polygon.to_svg()
    );
    for (order, color) in (2..6).zip(COLORS.iter()) {
        let spline = match BSpline::new(&pts[..], order) {
            Some(spline) => spline,
            None => continue,
        };
        let mut path = BezPath::new();
        for (i, p) in spline.samples(0.005).enumerate() {
            if i == 0 {
                path.move_to(curve_to_screen(p));
            } else {
                path.line_to(curve_to_screen(p));
            }
        }
        println!(
            r#"      <path d="{}" fill="none" stroke="{}" />"#,
            path.to_svg(),
            color
        );
    }
    for &pt in &pts {
        let pt = curve_to_screen(pt);
        println!(
            r#"      <circle cx="{}" cy="{}" r="3" fill="red" />"#,
            pt.x, pt.y
        )
    }
    println!(
        r#"    </svg>
    </body>
</html>"#
    );
}
