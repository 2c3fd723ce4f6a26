// src/mc/time_grid.rs
use crate::error::{validation::*, PricingError, PricingResult};

/// Tolerance when matching a requested time against grid points
pub const TIME_TOLERANCE: f64 = 1e-10;

/// Strictly increasing simulation times starting at 0
#[derive(Clone, Debug, PartialEq)]
pub struct TimeDiscretization {
    times: Vec<f64>,
}

impl TimeDiscretization {
    /// `0, Δt, 2Δt, ..., horizon` with `steps` equal steps
    pub fn uniform(steps: usize, horizon: f64) -> PricingResult<Self> {
        validate_steps(steps)?;
        validate_positive("horizon", horizon)?;
        validate_finite("horizon", horizon)?;

        let dt = horizon / steps as f64;
        let mut times: Vec<f64> = (0..steps).map(|i| i as f64 * dt).collect();
        times.push(horizon);
        Ok(TimeDiscretization { times })
    }

    pub fn from_times(times: Vec<f64>) -> PricingResult<Self> {
        match times.first() {
            Some(&first) if first == 0.0 => {}
            _ => {
                return Err(PricingError::InvalidConfiguration {
                    field: "times".to_string(),
                    reason: "time grid must start at 0".to_string(),
                })
            }
        }
        if times.windows(2).any(|w| w[1] <= w[0] || !w[1].is_finite()) {
            return Err(PricingError::InvalidConfiguration {
                field: "times".to_string(),
                reason: "time grid must be finite and strictly increasing".to_string(),
            });
        }
        Ok(TimeDiscretization { times })
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn number_of_times(&self) -> usize {
        self.times.len()
    }

    pub fn number_of_steps(&self) -> usize {
        self.times.len() - 1
    }

    pub fn time(&self, index: usize) -> Option<f64> {
        self.times.get(index).copied()
    }

    /// Last simulated time
    pub fn horizon(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Index of the last grid time `≤ time` (up to [`TIME_TOLERANCE`]),
    /// `None` outside `[0, horizon]`
    pub fn time_index_at_or_below(&self, time: f64) -> Option<usize> {
        if !time.is_finite() || time < -TIME_TOLERANCE || time > self.horizon() + TIME_TOLERANCE {
            return None;
        }
        let above = self.times.partition_point(|&t| t <= time + TIME_TOLERANCE);
        Some(above.saturating_sub(1))
    }

    /// Whether `time` is a grid point (within [`TIME_TOLERANCE`])
    pub fn contains(&self, time: f64) -> bool {
        self.time_index_at_or_below(time)
            .map_or(false, |index| (self.times[index] - time).abs() <= TIME_TOLERANCE)
    }

    /// Grid restricted to the times `≤ end` (within tolerance)
    pub fn truncated(&self, end: f64) -> PricingResult<Self> {
        let last = self
            .time_index_at_or_below(end)
            .ok_or(PricingError::TimeOutOfRange {
                time: end,
                horizon: self.horizon(),
            })?;
        Ok(TimeDiscretization {
            times: self.times[..=last].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_grid() {
        let grid = TimeDiscretization::uniform(4, 0.5).unwrap();
        assert_eq!(grid.times(), &[0.0, 0.125, 0.25, 0.375, 0.5]);
        assert_eq!(grid.number_of_times(), 5);
        assert_eq!(grid.number_of_steps(), 4);
        assert_eq!(grid.horizon(), 0.5);
    }

    #[test]
    fn test_uniform_grid_ends_on_horizon() {
        let grid = TimeDiscretization::uniform(1000, 0.7).unwrap();
        assert_eq!(grid.horizon(), 0.7);
        assert_eq!(grid.time(0), Some(0.0));
    }

    #[test]
    fn test_invalid_grids() {
        assert!(TimeDiscretization::uniform(0, 1.0).is_err());
        assert!(TimeDiscretization::uniform(10, 0.0).is_err());
        assert!(TimeDiscretization::from_times(vec![]).is_err());
        assert!(TimeDiscretization::from_times(vec![0.1, 0.2]).is_err());
        assert!(TimeDiscretization::from_times(vec![0.0, 0.2, 0.2]).is_err());
        assert!(TimeDiscretization::from_times(vec![0.0, 0.1, 0.3]).is_ok());
    }

    #[test]
    fn test_index_lookup() {
        let grid = TimeDiscretization::uniform(4, 1.0).unwrap();

        assert_eq!(grid.time_index_at_or_below(0.0), Some(0));
        assert_eq!(grid.time_index_at_or_below(0.5), Some(2));
        assert_eq!(grid.time_index_at_or_below(0.5 - 1e-12), Some(2));
        assert_eq!(grid.time_index_at_or_below(0.6), Some(2));
        assert_eq!(grid.time_index_at_or_below(1.0), Some(4));
        assert_eq!(grid.time_index_at_or_below(1.0 + 1e-12), Some(4));
        assert_eq!(grid.time_index_at_or_below(1.1), None);
        assert_eq!(grid.time_index_at_or_below(-0.1), None);
        assert_eq!(grid.time_index_at_or_below(f64::NAN), None);
    }

    #[test]
    fn test_contains_grid_points_only() {
        let grid = TimeDiscretization::uniform(100, 1.0).unwrap();

        assert!(grid.contains(0.0));
        assert!(grid.contains(0.5));
        assert!(grid.contains(0.07 + 1e-12));
        assert!(!grid.contains(0.005));
        assert!(!grid.contains(0.999));
        assert!(!grid.contains(1.5));
    }

    #[test]
    fn test_truncated() {
        let grid = TimeDiscretization::uniform(4, 1.0).unwrap();
        let head = grid.truncated(0.6).unwrap();

        assert_eq!(head.times(), &[0.0, 0.25, 0.5]);
        assert_eq!(grid.truncated(1.0).unwrap(), grid);
        assert!(grid.truncated(2.0).is_err());
    }
}
