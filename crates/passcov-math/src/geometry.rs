//! Field geometry: points, lines and the distances between them.
//!
//! Coordinates are in yards in the tracking data's field frame. Lines are kept
//! in general form `ax + by + c = 0` so that vertical lines are representable.

use serde::{Deserialize, Serialize};

/// A position on the field.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use passcov_math::geometry::Point;
    /// let d = Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0));
    /// assert_eq!(d, 5.0);
    /// ```
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Distance between two possibly missing samples.
///
/// Returns `None` when either side is absent, so a missing tracking sample is
/// never confused with a computed distance of zero.
#[must_use]
pub fn distance_between(a: Option<Point>, b: Option<Point>) -> Option<f64> {
    Some(a?.distance(b?))
}

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
#[display("line has a = b = 0 and no direction")]
pub struct DegenerateLineError;

/// A line `ax + by + c = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Line {
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// `y = slope * x + intercept` rewritten as `slope * x - y + intercept = 0`.
    #[must_use]
    pub const fn from_slope_intercept(slope: f64, intercept: f64) -> Self {
        Self::new(slope, -1.0, intercept)
    }

    /// The vertical line `x = x0`.
    #[must_use]
    pub const fn vertical(x0: f64) -> Self {
        Self::new(1.0, 0.0, -x0)
    }

    /// Perpendicular distance from `point` to this line.
    ///
    /// The result is invariant to scaling `(a, b, c)` by any nonzero constant.
    ///
    /// # Errors
    ///
    /// Returns [`DegenerateLineError`] when `a` and `b` are both zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use passcov_math::geometry::{Line, Point};
    /// let x_axis = Line::from_slope_intercept(0.0, 0.0);
    /// assert_eq!(x_axis.distance_to(Point::new(7.0, -2.0)).unwrap(), 2.0);
    /// ```
    pub fn distance_to(&self, point: Point) -> Result<f64, DegenerateLineError> {
        let den = self.a.hypot(self.b);
        if den == 0.0 {
            return Err(DegenerateLineError);
        }
        let num = (self.a * point.x + self.b * point.y + self.c).abs();
        Ok(num / den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_distance_to_horizontal_and_vertical() {
        let horizontal = Line::from_slope_intercept(0.0, 2.0);
        assert!((horizontal.distance_to(Point::new(-4.0, 5.0)).unwrap() - 3.0).abs() < EPS);

        let vertical = Line::vertical(1.0);
        assert!((vertical.distance_to(Point::new(-4.0, 5.0)).unwrap() - 5.0).abs() < EPS);
    }

    #[test]
    fn test_distance_to_is_scale_invariant() {
        let line = Line::new(2.0, -1.0, 3.0);
        let point = Point::new(1.5, -7.25);
        let base = line.distance_to(point).unwrap();
        for k in [-3.0, -0.5, 0.001, 2.0, 1e6] {
            let scaled = Line::new(line.a * k, line.b * k, line.c * k);
            let d = scaled.distance_to(point).unwrap();
            assert!((d - base).abs() < 1e-6, "k={k}: {d} != {base}");
        }
    }

    #[test]
    fn test_distance_to_degenerate_line() {
        let line = Line::new(0.0, 0.0, 5.0);
        assert_eq!(line.distance_to(Point::new(1.0, 1.0)), Err(DegenerateLineError));
    }

    #[test]
    fn test_distance_between_absent() {
        let p = Point::new(1.0, 1.0);
        assert_eq!(distance_between(Some(p), None), None);
        assert_eq!(distance_between(None, Some(p)), None);
        assert_eq!(distance_between(Some(p), Some(p)), Some(0.0));
    }
}
