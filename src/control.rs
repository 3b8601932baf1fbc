//! The control polygon.

use std::iter::FromIterator;

use kurbo::Point;
#[cfg(feature = "serde")]
use serde_::{Deserialize, Serialize};

/// An ordered set of control points.
///
/// The order of the points defines the control polygon, and with it the
/// shape of the curve; points are only ever appended, removed or cleared,
/// never reordered. Coincident points are allowed and are distinct by
/// position in the sequence.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_", transparent)
)]
pub struct ControlPoints {
    pts: Vec<Point>,
}

impl ControlPoints {
    pub fn new() -> ControlPoints {
        ControlPoints::default()
    }

    /// Append a point to the end of the polygon.
    pub fn add(&mut self, p: impl Into<Point>) {
        self.pts.push(p.into());
    }

    /// Remove the first point that lies within `epsilon` of `p` on both axes.
    ///
    /// The test is per axis (`|dx| < epsilon && |dy| < epsilon`), not a
    /// euclidean distance. Returns the removed point, if any.
    pub fn remove_nearest(&mut self, p: impl Into<Point>, epsilon: f64) -> Option<Point> {
        let p = p.into();
        let ix = self
            .pts
            .iter()
            .position(|pt| (p.x - pt.x).abs() < epsilon && (p.y - pt.y).abs() < epsilon)?;
        Some(self.pts.remove(ix))
    }

    pub fn clear(&mut self) {
        self.pts.clear();
    }

    pub fn points(&self) -> &[Point] {
        &self.pts
    }

    pub fn len(&self) -> usize {
        self.pts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.pts.iter()
    }
}

impl From<Vec<Point>> for ControlPoints {
    fn from(pts: Vec<Point>) -> ControlPoints {
        ControlPoints { pts }
    }
}

impl<P: Into<Point>> FromIterator<P> for ControlPoints {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> ControlPoints {
        ControlPoints {
            pts: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ControlPoints {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.pts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_keeps_insertion_order() {
        let mut pts = ControlPoints::new();
        pts.add((1.0, 1.0));
        pts.add((0.0, 0.0));
        pts.add((1.0, 1.0));
        assert_eq!(
            pts.points(),
            &[
                Point::new(1.0, 1.0),
                Point::new(0.0, 0.0),
                Point::new(1.0, 1.0)
            ]
        );
    }

    #[test]
    fn remove_within_epsilon() {
        let mut pts: ControlPoints = vec![(1.0, 1.0), (3.0, 4.0)].into_iter().collect();
        let removed = pts.remove_nearest((3.05, 3.96), 0.1);
        assert_eq!(removed, Some(Point::new(3.0, 4.0)));
        assert_eq!(pts.points(), &[Point::new(1.0, 1.0)]);
    }

    #[test]
    fn remove_is_per_axis() {
        let mut pts: ControlPoints = vec![(3.0, 4.0)].into_iter().collect();
        assert_eq!(pts.remove_nearest((3.2, 4.0), 0.1), None);
        // inside a 0.1 box but farther than 0.1 in euclidean distance
        assert!(pts.remove_nearest((3.09, 4.09), 0.1).is_some());
        assert!(pts.is_empty());
    }

    #[test]
    fn remove_takes_first_match() {
        let mut pts: ControlPoints = vec![(0.0, 0.0), (5.0, 5.0), (0.01, 0.0)]
            .into_iter()
            .collect();
        assert_eq!(pts.remove_nearest((0.02, 0.0), 0.1), Some(Point::ORIGIN));
        assert_eq!(
            pts.points(),
            &[Point::new(5.0, 5.0), Point::new(0.01, 0.0)]
        );
    }

    #[test]
    fn remove_from_empty_is_noop() {
        let mut pts = ControlPoints::new();
        assert_eq!(pts.remove_nearest((0.0, 0.0), 1.0), None);
    }

    #[test]
    fn clear_empties() {
        let mut pts: ControlPoints = vec![(0.0, 0.0), (1.0, 0.0)].into_iter().collect();
        pts.clear();
        assert_eq!(pts.len(), 0);
    }
}
