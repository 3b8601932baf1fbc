//! Evaluation of uniform B-spline curves.

use std::borrow::Cow;

use kurbo::{BezPath, Point};
use smallvec::SmallVec;

use crate::knots::KnotVector;

/// Blending buffer; orders up to this size stay on the stack.
type Blend = SmallVec<[Point; 8]>;

/// A B-spline curve ready for evaluation.
///
/// The knot vector is computed when the curve is created, from the number of
/// control points and the order, so it can never be out of date with respect
/// to the points it is evaluated against. Build a new `BSpline` whenever the
/// control points or the order change.
#[derive(Clone, Debug)]
pub struct BSpline<'a> {
    pts: Cow<'a, [Point]>,
    knots: KnotVector,
    order: usize,
}

impl<'a> BSpline<'a> {
    /// Create a curve of the given order over the control points.
    ///
    /// Returns `None` if `order < 2` or there are fewer points than `order`;
    /// there is no curve to draw in that case.
    pub fn new(pts: impl Into<Cow<'a, [Point]>>, order: usize) -> Option<BSpline<'a>> {
        let pts = pts.into();
        if order < 2 || pts.len() < order {
            return None;
        }
        let knots = KnotVector::clamped_uniform(pts.len() - 1, order);
        Some(BSpline { pts, knots, order })
    }

    /// Return an owned version of this `BSpline`, cloning the points if necessary.
    pub fn into_owned(self) -> BSpline<'static> {
        BSpline {
            pts: Cow::Owned(self.pts.into_owned()),
            knots: self.knots,
            order: self.order,
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn knots(&self) -> &KnotVector {
        &self.knots
    }

    pub fn points(&self) -> &[Point] {
        &self.pts
    }

    /// Index of the last control point.
    fn last(&self) -> usize {
        self.pts.len() - 1
    }

    /// Evaluate the curve at parameter `u`.
    ///
    /// Only the `order` control points influencing the span containing `u`
    /// take part: they are blended pairwise, one level per degree, until a
    /// single point remains (de Boor's algorithm). Returns `None` if `u` is
    /// outside `[0, 1)`.
    pub fn eval(&self, u: f64) -> Option<Point> {
        let k = self.order;
        let last = self.last();
        let d = self.knots.find_span(u, k, last)?;
        if d + 1 < k || d > last {
            return None;
        }
        let mut c: Blend = (0..k).map(|j| self.pts[d - j]).collect();
        for r in (2..=k).rev() {
            for s in 0..=r - 2 {
                let i = d - s;
                let w = blend_weight(u, self.knots[i], self.knots[i + r - 1]);
                c[s] = c[s + 1].lerp(c[s], w);
            }
        }
        let p = c[0];
        if p.x.is_finite() && p.y.is_finite() {
            Some(p)
        } else {
            None
        }
    }

    /// Evaluate the curve at `0, step, 2 * step, ...` up to but excluding 1.
    ///
    /// Parameters that produce no point are skipped. About `1 / step`
    /// parameters are visited whatever the curve, with no upper bound, so
    /// callers taking `step` from user input should bound it first.
    pub fn samples(&self, step: f64) -> impl Iterator<Item = Point> + '_ {
        params(step).filter_map(move |u| self.eval(u))
    }

    /// Collect [`samples`](BSpline::samples) into a polyline.
    pub fn sample(&self, step: f64) -> Vec<Point> {
        let mut result = Vec::with_capacity(sample_count(step));
        result.extend(self.samples(step));
        result
    }

    /// Render the sampled polyline as a path.
    pub fn to_bez_path(&self, step: f64) -> BezPath {
        let mut path = BezPath::new();
        let mut samples = self.samples(step);
        if let Some(p) = samples.next() {
            path.move_to(p);
            for p in samples {
                path.line_to(p);
            }
        }
        path
    }
}

/// Sample the curve of the given order through `pts`.
///
/// Empty if there are not enough points for a curve of this order. The cost
/// grows as `1 / step`; see [`BSpline::samples`].
pub fn sample_curve(pts: &[Point], order: usize, step: f64) -> Vec<Point> {
    BSpline::new(pts, order)
        .map(|spline| spline.sample(step))
        .unwrap_or_default()
}

/// The weight of the lower point when blending over the knot interval `[lo, hi]`.
///
/// A zero-width interval contributes nothing from the lower point.
fn blend_weight(u: f64, lo: f64, hi: f64) -> f64 {
    let width = hi - lo;
    if width > 0.0 {
        (u - lo) / width
    } else {
        0.0
    }
}

fn params(step: f64) -> impl Iterator<Item = f64> {
    let valid = step.is_finite() && step > 0.0;
    (0u64..)
        .map(move |i| i as f64 * step)
        .take_while(move |&u| valid && u < 1.0)
}

fn sample_count(step: f64) -> usize {
    if step.is_finite() && step > 0.0 {
        (1.0 / step).ceil().min(1e6) as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::distributions::{Distribution, Uniform};

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&p| p.into()).collect()
    }

    fn assert_near(a: Point, b: Point) {
        assert_approx_eq!(a.x, b.x, 1e-9);
        assert_approx_eq!(a.y, b.y, 1e-9);
    }

    fn binomial(n: usize, i: usize) -> f64 {
        (0..i).fold(1.0, |acc, j| acc * (n - j) as f64 / (j + 1) as f64)
    }

    /// Direct Bernstein evaluation of a single Bézier span.
    fn bernstein(pts: &[Point], t: f64) -> Point {
        let n = pts.len() - 1;
        let mut x = 0.0;
        let mut y = 0.0;
        for (i, p) in pts.iter().enumerate() {
            let b = binomial(n, i) * t.powi(i as i32) * (1.0 - t).powi((n - i) as i32);
            x += b * p.x;
            y += b * p.y;
        }
        Point::new(x, y)
    }

    #[test]
    fn quadratic_starts_at_first_point() {
        let pts = pts(&[(0., 0.), (1., 1.), (2., 0.)]);
        let spline = BSpline::new(&pts[..], 3).unwrap();
        assert_eq!(spline.knots().as_slice(), &[0., 0., 0., 1., 1., 1.]);
        assert_near(spline.eval(0.0).unwrap(), Point::new(0., 0.));
        assert_near(spline.eval(0.5).unwrap(), Point::new(1., 0.5));
    }

    #[test]
    fn single_span_is_bezier() {
        let mut rng = rand::thread_rng();
        let coord = Uniform::from(-10.0..10.0);
        for order in 2..7 {
            let pts: Vec<Point> = (0..order)
                .map(|_| Point::new(coord.sample(&mut rng), coord.sample(&mut rng)))
                .collect();
            let spline = BSpline::new(&pts[..], order).unwrap();
            for i in 0..20 {
                let t = i as f64 / 20.0;
                assert_near(spline.eval(t).unwrap(), bernstein(&pts, t));
            }
        }
    }

    #[test]
    fn too_few_points() {
        let pts = pts(&[(0., 0.), (1., 1.)]);
        assert!(BSpline::new(&pts[..], 4).is_none());
        assert!(sample_curve(&pts, 4, 0.01).is_empty());
        assert!(BSpline::new(&pts[..], 1).is_none());
    }

    #[test]
    fn right_end_is_excluded() {
        let pts = pts(&[(0., 0.), (1., 1.), (2., 0.), (3., 1.)]);
        let spline = BSpline::new(&pts[..], 3).unwrap();
        assert!(spline.eval(1.0).is_none());
        assert!(spline.eval(-0.01).is_none());
        // clamped: the curve approaches the last control point
        let end = spline.eval(1.0 - 1e-9).unwrap();
        assert!(end.distance(Point::new(3., 1.)) < 1e-6);
    }

    #[test]
    fn sample_count_depends_only_on_step() {
        let few = pts(&[(0., 0.), (1., 1.), (2., 0.)]);
        let many = pts(&[(0., 0.), (1., 1.), (2., 0.), (3., 3.), (4., 0.), (5., 5.)]);
        let a = sample_curve(&few, 3, 0.25);
        let b = sample_curve(&many, 3, 0.25);
        assert_eq!(a.len(), 4);
        assert_eq!(b.len(), 4);
        assert_eq!(sample_curve(&many, 4, 0.1).len(), 10);
        assert_eq!(sample_curve(&many, 4, 0.001).len(), 1000);
    }

    #[test]
    fn degenerate_steps() {
        let pts = pts(&[(0., 0.), (1., 1.), (2., 0.)]);
        assert!(sample_curve(&pts, 3, 0.0).is_empty());
        assert!(sample_curve(&pts, 3, -0.5).is_empty());
        assert!(sample_curve(&pts, 3, f64::NAN).is_empty());
        assert_eq!(sample_curve(&pts, 3, 1.0).len(), 1);
        assert_eq!(sample_curve(&pts, 3, 3.0).len(), 1);
    }

    #[test]
    fn sampling_is_repeatable() {
        let pts = pts(&[(0., 0.), (1., 3.), (2., -1.), (4., 2.), (5., 0.)]);
        let spline = BSpline::new(&pts[..], 4).unwrap();
        assert_eq!(spline.sample(0.01), spline.sample(0.01));
        assert_eq!(spline.sample(0.01), sample_curve(&pts, 4, 0.01));
    }

    #[test]
    fn curve_stays_in_control_hull_box() {
        let mut rng = rand::thread_rng();
        let coord = Uniform::from(-10.0..10.0);
        let counts = Uniform::from(2..20usize);
        for _ in 0..50 {
            let n = counts.sample(&mut rng);
            let pts: Vec<Point> = (0..n)
                .map(|_| Point::new(coord.sample(&mut rng), coord.sample(&mut rng)))
                .collect();
            let min_x = pts.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
            let max_x = pts.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
            let min_y = pts.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
            let max_y = pts.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
            for order in 2..=n.min(6) {
                for p in sample_curve(&pts, order, 0.05) {
                    assert!(p.x >= min_x - 1e-9 && p.x <= max_x + 1e-9);
                    assert!(p.y >= min_y - 1e-9 && p.y <= max_y + 1e-9);
                }
            }
        }
    }

    #[test]
    fn translation_moves_curve() {
        let pts = pts(&[(0., 0.), (1., 3.), (2., -1.), (4., 2.), (5., 0.), (7., 1.)]);
        let shifted: Vec<Point> = pts.iter().map(|&p| p + kurbo::Vec2::new(2.5, -1.0)).collect();
        let a = sample_curve(&pts, 4, 0.05);
        let b = sample_curve(&shifted, 4, 0.05);
        assert_eq!(a.len(), b.len());
        for (p, q) in a.iter().zip(&b) {
            assert_near(*p + kurbo::Vec2::new(2.5, -1.0), *q);
        }
    }

    #[test]
    fn order_two_is_the_control_polygon() {
        let pts = pts(&[(0., 0.), (2., 2.), (4., 0.)]);
        let spline = BSpline::new(&pts[..], 2).unwrap();
        assert_near(spline.eval(0.25).unwrap(), Point::new(1., 1.));
        assert_near(spline.eval(0.5).unwrap(), Point::new(2., 2.));
        assert_near(spline.eval(0.75).unwrap(), Point::new(3., 1.));
    }

    #[test]
    fn zero_width_interval_weight() {
        assert_eq!(blend_weight(0.5, 0.5, 0.5), 0.0);
        assert_eq!(blend_weight(0.5, 1.0, 0.0), 0.0);
        assert_approx_eq!(blend_weight(0.25, 0.0, 1.0), 0.25);
    }

    #[test]
    fn bez_path_is_polyline() {
        let pts = pts(&[(0., 0.), (1., 1.), (2., 0.)]);
        let spline = BSpline::new(pts, 3).unwrap().into_owned();
        let path = spline.to_bez_path(0.25);
        assert_eq!(path.elements().len(), 4);
    }
}
