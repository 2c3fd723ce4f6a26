// src/mc/mc_engine.rs
use crate::analytics::lookback_analytic::MarketParameters;
use crate::error::{PricingError, PricingResult};
use crate::mc::control_variate::{ControlVariateLookback, ControlVariateStatus};
use crate::mc::lookback::LookbackOption;
use crate::mc::path_values::PathValues;
use crate::mc::simulation::PathSimulation;
use tracing::{debug, info};

/// Scalar Monte Carlo estimate
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct McEstimate {
    pub price: f64,
    pub standard_error: f64,
    pub paths: usize,
}

impl McEstimate {
    /// Mean and standard error of time-0 per-path values
    ///
    /// # Errors
    ///
    /// Returns `PricingError` for:
    /// - fewer than two paths (standard error undefined)
    /// - non-finite price or standard error
    pub fn from_values(values: &PathValues, method: &str) -> PricingResult<Self> {
        let paths = values.len();
        if paths < 2 {
            return Err(PricingError::DegenerateSample {
                statistic: "standard error".to_string(),
                paths,
                reason: "at least two paths are required".to_string(),
            });
        }

        let price = values.average();
        let standard_error = values.standard_error();

        if !price.is_finite() {
            return Err(PricingError::NumericalInstability {
                method: method.to_string(),
                reason: format!("Price estimate is not finite: {}", price),
            });
        }
        if !standard_error.is_finite() {
            return Err(PricingError::NumericalInstability {
                method: method.to_string(),
                reason: format!("Standard error is not finite: {}", standard_error),
            });
        }

        Ok(McEstimate {
            price,
            standard_error,
            paths,
        })
    }

    /// `price ± z · standard_error`
    pub fn confidence_interval(&self, z: f64) -> (f64, f64) {
        (
            self.price - z * self.standard_error,
            self.price + z * self.standard_error,
        )
    }
}

/// Control-variate price with the plain estimate on the same paths
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlVariatePrice {
    pub estimate: McEstimate,
    pub plain: McEstimate,
    pub status: ControlVariateStatus,
}

impl ControlVariatePrice {
    /// `sd(Z) / sd(Z_c)`; 1 whenever the control was not applied
    pub fn variance_reduction_ratio(&self) -> f64 {
        self.plain.standard_error / self.estimate.standard_error
    }
}

/// Monte Carlo price of a lookback option
///
/// The time-0 average of [`LookbackOption::value`], with its standard error.
pub fn mc_price_lookback<S: PathSimulation + ?Sized>(
    option: &LookbackOption,
    simulation: &S,
) -> PricingResult<McEstimate> {
    let values = option.value(0.0, simulation)?;
    let estimate = McEstimate::from_values(&values, "Monte Carlo")?;
    debug!(
        payoff = option.payoff().name(),
        fixings = option.monitoring_count(),
        price = estimate.price,
        standard_error = estimate.standard_error,
        "lookback price"
    );
    Ok(estimate)
}

/// Monte Carlo price using the continuously monitored contract as control
pub fn mc_price_lookback_with_control_variate<S: PathSimulation + ?Sized>(
    option: &LookbackOption,
    simulation: &S,
) -> PricingResult<ControlVariatePrice> {
    let estimate = ControlVariateLookback::new(*option).value(0.0, simulation)?;

    Ok(ControlVariatePrice {
        estimate: McEstimate::from_values(&estimate.values, "Control Variate Monte Carlo")?,
        plain: McEstimate::from_values(&estimate.plain, "Monte Carlo")?,
        status: estimate.status,
    })
}

/// Ratio of sample standard deviations `sd(plain) / sd(corrected)`
pub fn variance_reduction_ratio(plain: &PathValues, corrected: &PathValues) -> f64 {
    plain.standard_deviation() / corrected.standard_deviation()
}

/// Simulated and continuity-corrected prices for one fixing count
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixingConvergencePoint {
    pub fixings: usize,
    pub monte_carlo: McEstimate,
    pub corrected_analytic: f64,
}

/// Sweep the number of fixings on one simulation
///
/// A count of 0 gives the continuously monitored contract and its plain
/// analytic price.
pub fn fixing_convergence<S: PathSimulation + ?Sized>(
    option: &LookbackOption,
    fixing_counts: &[usize],
    simulation: &S,
    market: &MarketParameters,
) -> PricingResult<Vec<FixingConvergencePoint>> {
    market.validate()?;
    info!(
        payoff = option.payoff().name(),
        points = fixing_counts.len(),
        paths = simulation.number_of_paths(),
        "fixing convergence sweep"
    );

    fixing_counts
        .iter()
        .map(|&fixings| {
            let product = option.with_monitoring(fixings);
            Ok(FixingConvergencePoint {
                fixings,
                monte_carlo: mc_price_lookback(&product, simulation)?,
                corrected_analytic: product.analytic_price(market),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::payoffs::LookbackPayoff;
    use crate::mc::simulation::{MonteCarloAssetSimulation, SimulationConfig};
    use crate::models::gbm::Gbm;
    use approx::assert_relative_eq;

    fn simulation() -> MonteCarloAssetSimulation<Gbm> {
        let config = SimulationConfig {
            paths: 4_000,
            steps: 200,
            horizon: 0.5,
            ..Default::default()
        };
        MonteCarloAssetSimulation::new(Gbm::new(100.0, 0.1, 0.3).unwrap(), config).unwrap()
    }

    #[test]
    fn test_estimate_from_values() {
        let values = PathValues::from_vec(vec![1.0, 4.0, 2.0, 7.0]);
        let estimate = McEstimate::from_values(&values, "test").unwrap();

        assert_eq!(estimate.paths, 4);
        assert_relative_eq!(estimate.price, 3.5);
        assert_relative_eq!(estimate.standard_error, (7.0_f64 / 4.0).sqrt(), max_relative = 1e-14);

        let (low, high) = estimate.confidence_interval(2.0);
        assert_relative_eq!(high - low, 4.0 * estimate.standard_error, max_relative = 1e-14);
    }

    #[test]
    fn test_estimate_rejects_degenerate_values() {
        assert!(McEstimate::from_values(&PathValues::constant(1.0, 1), "test").is_err());
        let infinite = PathValues::from_vec(vec![1.0, f64::INFINITY]);
        assert!(matches!(
            McEstimate::from_values(&infinite, "test"),
            Err(PricingError::NumericalInstability { .. })
        ));
    }

    #[test]
    fn test_price_matches_option_price() {
        let sim = simulation();
        let option = LookbackOption::new(0.5, LookbackPayoff::FloatingStrikePut).with_monitoring(25);

        let estimate = mc_price_lookback(&option, &sim).unwrap();
        assert_relative_eq!(estimate.price, option.price(&sim).unwrap(), max_relative = 1e-14);
        assert_eq!(estimate.paths, 4_000);
    }

    #[test]
    fn test_control_variate_price_reduces_error() {
        let sim = simulation();
        let option = LookbackOption::new(0.5, LookbackPayoff::FixedStrikeCall { strike: 100.0 })
            .with_monitoring(20);

        let result = mc_price_lookback_with_control_variate(&option, &sim).unwrap();
        assert!(result.status.is_applied());
        assert!(result.variance_reduction_ratio() > 1.0);
        assert!(result.estimate.standard_error < result.plain.standard_error);
    }

    #[test]
    fn test_variance_reduction_ratio() {
        let plain = PathValues::from_vec(vec![0.0, 4.0, 0.0, 4.0]);
        let corrected = PathValues::from_vec(vec![1.0, 3.0, 1.0, 3.0]);
        assert_relative_eq!(variance_reduction_ratio(&plain, &corrected), 2.0, max_relative = 1e-14);
    }

    #[test]
    fn test_fixing_convergence_sweep() {
        let sim = simulation();
        let market = MarketParameters::new(100.0, 0.1, 0.3).unwrap();
        let option = LookbackOption::new(0.5, LookbackPayoff::FixedStrikeCall { strike: 100.0 });

        // nested grids on 200 steps
        let points = fixing_convergence(&option, &[10, 50, 200, 0], &sim, &market).unwrap();

        assert_eq!(points.len(), 4);
        for pair in points.windows(2) {
            assert!(pair[1].monte_carlo.price >= pair[0].monte_carlo.price);
            assert!(pair[1].corrected_analytic > pair[0].corrected_analytic);
        }
        // 200 fixings on 200 steps is the full grid
        assert_relative_eq!(points[2].monte_carlo.price, points[3].monte_carlo.price, max_relative = 1e-14);
    }
}
