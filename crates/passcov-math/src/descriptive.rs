/// Population mean and variance of a series.
///
/// Samples that are absent or non-finite are excluded before computing. An
/// empty series summarizes to mean `0.0` and variance `0.0`, so downstream
/// tables always have a value to write.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeanVariance {
    /// Number of samples that contributed.
    pub count: usize,
    /// The arithmetic mean.
    pub mean: f64,
    /// The population variance (divided by `count`, not `count - 1`).
    pub variance: f64,
}

impl MeanVariance {
    /// Computes mean and variance over present, finite values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use passcov_math::descriptive::MeanVariance;
    /// let stats = MeanVariance::from_optional([Some(2.0), Some(4.0), None, Some(f64::NAN)]);
    /// assert_eq!(stats.count, 2);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.variance, 1.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_optional<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let values = values
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        if values.is_empty() {
            return Self::default();
        }

        let count = values.len();
        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        Self {
            count,
            mean,
            variance,
        }
    }

    /// Computes mean and variance over finite values.
    #[must_use]
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self::from_optional(values.into_iter().map(Some))
    }
}
