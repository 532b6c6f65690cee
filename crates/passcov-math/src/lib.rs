//! Numeric kernel for pass-coverage analysis.
//!
//! This crate collects the small amount of math the analysis pipeline needs:
//!
//! - **Geometry**: field points, lines in `ax + by + c = 0` form, and distances
//! - **Regression**: least-squares line fitting through ball positions
//! - **Descriptive statistics**: population mean and variance over optional samples
//!
//! # Modules
//!
//! - [`geometry`]: [`Point`](geometry::Point) and [`Line`](geometry::Line)
//! - [`regression`]: [`fit_line`](regression::fit_line)
//! - [`descriptive`]: [`MeanVariance`](descriptive::MeanVariance)
//!
//! # Examples
//!
//! ## Fitting a trajectory and measuring distance to it
//!
//! ```
//! use passcov_math::{geometry::Point, regression::fit_line};
//!
//! let ball = [Point::new(0.0, 1.0), Point::new(1.0, 2.0), Point::new(2.0, 3.0)];
//! let line = fit_line(&ball).unwrap().line();
//!
//! let distance = line.distance_to(Point::new(0.0, 3.0)).unwrap();
//! assert!((distance - 2.0_f64.sqrt()).abs() < 1e-9);
//! ```
//!
//! ## Summarizing samples with gaps
//!
//! ```
//! use passcov_math::descriptive::MeanVariance;
//!
//! let stats = MeanVariance::from_optional([Some(1.0), None, Some(3.0)]);
//! assert_eq!(stats.mean, 2.0);
//! assert_eq!(stats.variance, 1.0);
//! ```

pub mod descriptive;
pub mod geometry;
pub mod regression;
