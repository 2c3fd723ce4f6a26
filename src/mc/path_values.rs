// src/mc/path_values.rs
//! Per-path random variable
//!
//! One `f64` per simulated path, indexed consistently by path across every
//! quantity read from a simulation (asset values, numeraire, weights,
//! running extrema, payoffs). Arithmetic is elementwise; operands must have
//! the same number of paths, otherwise ndarray panics on the shape mismatch.
//!
//! Sample statistics use the `n - 1` normalisation.

use ndarray::{Array1, Zip};
use statrs::statistics::Statistics;
use std::ops::{Add, Div, Mul, Sub};

#[derive(Clone, Debug, PartialEq)]
pub struct PathValues {
    values: Array1<f64>,
}

impl PathValues {
    pub fn new(values: Array1<f64>) -> Self {
        PathValues { values }
    }

    pub fn from_vec(values: Vec<f64>) -> Self {
        PathValues {
            values: Array1::from(values),
        }
    }

    /// The same value on every path
    pub fn constant(value: f64, paths: usize) -> Self {
        PathValues {
            values: Array1::from_elem(paths, value),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, path: usize) -> Option<f64> {
        self.values.get(path).copied()
    }

    pub fn as_array(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn into_array(self) -> Array1<f64> {
        self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.values.iter()
    }

    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|x| x.is_finite())
    }

    /// Elementwise `max(self, other)`
    pub fn max_with(&self, other: &PathValues) -> PathValues {
        let values = Zip::from(&self.values)
            .and(&other.values)
            .par_map_collect(|&a, &b| a.max(b));
        PathValues { values }
    }

    /// Elementwise `min(self, other)`
    pub fn min_with(&self, other: &PathValues) -> PathValues {
        let values = Zip::from(&self.values)
            .and(&other.values)
            .par_map_collect(|&a, &b| a.min(b));
        PathValues { values }
    }

    /// Elementwise `max(self, floor)`
    pub fn floor(&self, floor: f64) -> PathValues {
        PathValues {
            values: self.values.mapv(|x| x.max(floor)),
        }
    }

    /// Elementwise `min(self, cap)`
    pub fn cap(&self, cap: f64) -> PathValues {
        PathValues {
            values: self.values.mapv(|x| x.min(cap)),
        }
    }

    pub fn average(&self) -> f64 {
        self.values.iter().mean()
    }

    /// Sample variance; NaN for fewer than two paths
    pub fn variance(&self) -> f64 {
        self.values.iter().variance()
    }

    /// Sample covariance with `other`; NaN for fewer than two paths
    pub fn covariance(&self, other: &PathValues) -> f64 {
        self.values.iter().covariance(other.values.iter())
    }

    pub fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Standard error of the sample mean, `sd / √n`
    pub fn standard_error(&self) -> f64 {
        self.standard_deviation() / (self.len() as f64).sqrt()
    }
}

impl From<Vec<f64>> for PathValues {
    fn from(values: Vec<f64>) -> Self {
        PathValues::from_vec(values)
    }
}

macro_rules! impl_path_values_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<&PathValues> for &PathValues {
            type Output = PathValues;

            fn $method(self, rhs: &PathValues) -> PathValues {
                PathValues {
                    values: &self.values $op &rhs.values,
                }
            }
        }

        impl $trait<f64> for &PathValues {
            type Output = PathValues;

            fn $method(self, rhs: f64) -> PathValues {
                PathValues {
                    values: &self.values $op rhs,
                }
            }
        }
    };
}

impl_path_values_op!(Add, add, +);
impl_path_values_op!(Sub, sub, -);
impl_path_values_op!(Mul, mul, *);
impl_path_values_op!(Div, div, /);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample() -> PathValues {
        PathValues::from_vec(vec![1.0, 4.0, 2.0, 7.0])
    }

    #[test]
    fn test_elementwise_arithmetic() {
        let a = sample();
        let b = PathValues::from_vec(vec![2.0, 2.0, 4.0, 1.0]);

        assert_eq!((&a + &b), PathValues::from_vec(vec![3.0, 6.0, 6.0, 8.0]));
        assert_eq!((&a - &b), PathValues::from_vec(vec![-1.0, 2.0, -2.0, 6.0]));
        assert_eq!((&a * &b), PathValues::from_vec(vec![2.0, 8.0, 8.0, 7.0]));
        assert_eq!((&a / &b), PathValues::from_vec(vec![0.5, 2.0, 0.5, 7.0]));
        assert_eq!((&a * 2.0), PathValues::from_vec(vec![2.0, 8.0, 4.0, 14.0]));
        assert_eq!((&a - 1.0), PathValues::from_vec(vec![0.0, 3.0, 1.0, 6.0]));
    }

    #[test]
    fn test_min_max() {
        let a = sample();
        let b = PathValues::from_vec(vec![3.0, 3.0, 3.0, 3.0]);

        assert_eq!(a.max_with(&b), PathValues::from_vec(vec![3.0, 4.0, 3.0, 7.0]));
        assert_eq!(a.min_with(&b), PathValues::from_vec(vec![1.0, 3.0, 2.0, 3.0]));
        assert_eq!(a.floor(3.0), a.max_with(&b));
        assert_eq!(a.cap(3.0), a.min_with(&b));
    }

    #[test]
    fn test_sample_statistics() {
        let a = sample();
        let b = PathValues::from_vec(vec![2.0, 8.0, 4.0, 14.0]);

        assert_abs_diff_eq!(a.average(), 3.5, epsilon = 1e-15);
        // Σ(x - 3.5)² = 6.25 + 0.25 + 2.25 + 12.25 = 21
        assert_abs_diff_eq!(a.variance(), 7.0, epsilon = 1e-14);
        assert_abs_diff_eq!(a.covariance(&b), 14.0, epsilon = 1e-13);
        assert_abs_diff_eq!(a.standard_error(), (7.0_f64 / 4.0).sqrt(), epsilon = 1e-14);
    }

    #[test]
    fn test_single_path_variance_undefined() {
        let single = PathValues::constant(5.0, 1);
        assert!(single.variance().is_nan());
        assert!(!single.standard_error().is_finite());
    }

    #[test]
    #[should_panic]
    fn test_length_mismatch_panics() {
        let _ = &sample() + &PathValues::constant(1.0, 3);
    }
}
