//! Ordinary least-squares line fitting.

use crate::geometry::{Line, Point};

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum FitLineError {
    #[display("at least 2 points are needed to fit a line, got {count}")]
    TooFewPoints { count: usize },
    #[display("all {count} points coincide")]
    NoSpread { count: usize },
    #[display("fitted coefficients are not finite")]
    NonFinite,
}

/// Result of fitting a line through a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineFit {
    /// Regular least-squares fit of `y` on `x`.
    SlopeIntercept { slope: f64, intercept: f64 },
    /// All points share the same `x`; the fit is the line `x = x0`.
    Vertical { x0: f64 },
}

impl LineFit {
    /// The fit in general form.
    ///
    /// A slope/intercept fit maps to `a = slope, b = -1, c = intercept`.
    #[must_use]
    pub fn line(self) -> Line {
        match self {
            LineFit::SlopeIntercept { slope, intercept } => {
                Line::from_slope_intercept(slope, intercept)
            }
            LineFit::Vertical { x0 } => Line::vertical(x0),
        }
    }
}

/// Fits a line through `points` by least squares of `y` on `x`.
///
/// When every point has the same `x` the regression is undefined; if the
/// points still spread along `y` the vertical line through them is returned.
///
/// # Errors
///
/// - [`FitLineError::TooFewPoints`] for fewer than two points
/// - [`FitLineError::NoSpread`] when all points coincide
/// - [`FitLineError::NonFinite`] when the input contains NaN or infinities
///
/// # Examples
///
/// ```
/// use passcov_math::{geometry::Point, regression::{fit_line, LineFit}};
///
/// let fit = fit_line(&[Point::new(0.0, 1.0), Point::new(2.0, 5.0)]).unwrap();
/// assert_eq!(fit, LineFit::SlopeIntercept { slope: 2.0, intercept: 1.0 });
/// ```
#[expect(clippy::cast_precision_loss)]
#[expect(clippy::float_cmp)]
pub fn fit_line(points: &[Point]) -> Result<LineFit, FitLineError> {
    let count = points.len();
    let [first, ..] = points else {
        return Err(FitLineError::TooFewPoints { count });
    };
    if count < 2 {
        return Err(FitLineError::TooFewPoints { count });
    }

    // exact comparison: the mean of identical values may not round-trip
    if points.iter().all(|p| p.x == first.x) {
        if !first.x.is_finite() || points.iter().any(|p| !p.y.is_finite()) {
            return Err(FitLineError::NonFinite);
        }
        if points.iter().all(|p| p.y == first.y) {
            return Err(FitLineError::NoSpread { count });
        }
        return Ok(LineFit::Vertical { x0: first.x });
    }

    let n = count as f64;
    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / n;
    if !mean_x.is_finite() || !mean_y.is_finite() {
        return Err(FitLineError::NonFinite);
    }

    let (sxx, sxy) = points.iter().fold((0.0, 0.0), |(sxx, sxy), p| {
        let dx = p.x - mean_x;
        (sxx + dx * dx, sxy + dx * (p.y - mean_y))
    });
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    if !slope.is_finite() || !intercept.is_finite() {
        return Err(FitLineError::NonFinite);
    }
    Ok(LineFit::SlopeIntercept { slope, intercept })
}
