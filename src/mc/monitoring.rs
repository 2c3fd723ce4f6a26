// src/mc/monitoring.rs
//! Monitoring dates and pathwise running extrema
//!
//! A fixing count of zero samples the extremum on every simulation time,
//! approximating continuous monitoring. A count `n > 0` samples `n + 1`
//! dates picked from the grid by rounding `i (N - 1) / n`, `i = 0..=n`,
//! where `N` is the number of grid times. When `n` exceeds the grid
//! resolution some grid times repeat, which is harmless for an extremum.
//!
//! The trackers are left folds over the monitoring dates; each fold step
//! is an elementwise min/max across paths.

use crate::error::PricingResult;
use crate::mc::path_values::PathValues;
use crate::mc::simulation::PathSimulation;
use crate::mc::time_grid::TimeDiscretization;

/// Monitoring dates for `fixings` observations on `grid`
pub fn build_monitoring_times(fixings: usize, grid: &TimeDiscretization) -> Vec<f64> {
    let times = grid.times();
    if fixings == 0 {
        return times.to_vec();
    }

    let last_index = (times.len() - 1) as f64;
    (0..=fixings)
        .map(|i| {
            let index = (i as f64 * last_index / fixings as f64).round() as usize;
            times[index]
        })
        .collect()
}

/// Pathwise maximum of underlying `underlying_index` over `times`
///
/// Starts from zero, so the underlying is assumed non-negative.
pub fn running_max<S: PathSimulation + ?Sized>(
    simulation: &S,
    times: &[f64],
    underlying_index: usize,
) -> PricingResult<PathValues> {
    times.iter().try_fold(simulation.constant(0.0), |max_value, &time| {
        let underlying = simulation.asset_value(time, underlying_index)?;
        Ok(max_value.max_with(&underlying))
    })
}

/// Pathwise minimum of underlying `underlying_index` over `times`
pub fn running_min<S: PathSimulation + ?Sized>(
    simulation: &S,
    times: &[f64],
    underlying_index: usize,
) -> PricingResult<PathValues> {
    times
        .iter()
        .try_fold(simulation.constant(f64::MAX), |min_value, &time| {
            let underlying = simulation.asset_value(time, underlying_index)?;
            Ok(min_value.min_with(&underlying))
        })
}
