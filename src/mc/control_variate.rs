// src/mc/control_variate.rs
//! Control-variate estimator for lookback options
//!
//! # Method
//!
//! The target `Z` is the option as configured (usually discretely
//! monitored). The control `Y` is the same contract monitored on every
//! simulation time, evaluated on the same paths, whose expectation `μ_Y`
//! is known in closed form under Black-Scholes dynamics. The estimator
//! ```text
//! Z_c = Z - c (Y - μ_Y),    c = Cov(Z, Y) / Var(Y)
//! ```
//! keeps the mean of `Z` (the correction has expectation zero) while
//! removing the part of its variance explained by `Y`.
//!
//! `μ_Y` uses the time-0 spot read from the simulation and the rate and
//! volatility of the underlying's model. When the simulation cannot provide
//! Black-Scholes parameters the plain estimator `Z` is returned together
//! with [`ControlVariateStatus::ModelMismatch`].
//!
//! A continuously monitored target is the control itself (`Z = Y`, so `Z_c`
//! would collapse to the constant `μ_Y`); it is returned uncorrected with
//! [`ControlVariateStatus::TargetIsControl`].
//!
//! `Z` and `Y` are both formed at time 0, then moved to the evaluation time
//! with the numeraire and weights of the simulation.
//!
//! Note the control is itself a simulated quantity: on a finite grid `E[Y]`
//! sits slightly below the continuous `μ_Y`, and `c` times that gap shows up
//! as a small bias in `Z_c`.

use crate::error::{PricingError, PricingResult};
use crate::mc::lookback::{check_evaluation_time, rebase, LookbackOption};
use crate::mc::path_values::PathValues;
use crate::mc::simulation::PathSimulation;
use tracing::{debug, warn};

/// Whether the control was applied
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlVariateStatus {
    Applied {
        /// Estimated `c = Cov(Z, Y) / Var(Y)`
        coefficient: f64,
        /// Analytic `μ_Y`
        control_mean: f64,
    },
    /// No Black-Scholes parameters available; values are the plain estimator
    ModelMismatch,
    /// The target is itself continuously monitored, so it coincides with
    /// the control; values are the plain estimator
    TargetIsControl,
}

impl ControlVariateStatus {
    pub fn is_applied(&self) -> bool {
        matches!(self, ControlVariateStatus::Applied { .. })
    }
}

#[derive(Clone, Debug)]
pub struct ControlVariateEstimate {
    /// `Z_c` per path (equal to `Z` on fallback)
    pub values: PathValues,
    /// Plain estimator `Z` per path
    pub plain: PathValues,
    pub status: ControlVariateStatus,
}

#[derive(Clone, Copy, Debug)]
pub struct ControlVariateLookback {
    option: LookbackOption,
}

impl ControlVariateLookback {
    pub fn new(option: LookbackOption) -> Self {
        ControlVariateLookback { option }
    }

    pub fn option(&self) -> &LookbackOption {
        &self.option
    }

    /// The continuously monitored control contract
    pub fn control(&self) -> LookbackOption {
        self.option.with_monitoring(0)
    }

    pub fn value<S: PathSimulation + ?Sized>(
        &self,
        evaluation_time: f64,
        simulation: &S,
    ) -> PricingResult<ControlVariateEstimate> {
        check_evaluation_time(evaluation_time, self.option.maturity())?;

        let underlying = self.option.underlying_index();
        let target = self.option.value(0.0, simulation)?;

        let (corrected, status) = match simulation.black_scholes_parameters(underlying) {
            _ if self.option.monitoring_count() == 0 => {
                debug!(
                    payoff = self.option.payoff().name(),
                    "target is continuously monitored, control not applied"
                );
                (target.clone(), ControlVariateStatus::TargetIsControl)
            }
            None => {
                warn!(
                    payoff = self.option.payoff().name(),
                    underlying,
                    "underlying is not Black-Scholes, falling back to plain Monte Carlo"
                );
                (target.clone(), ControlVariateStatus::ModelMismatch)
            }
            Some(params) => {
                let spot = simulation.asset_value(0.0, underlying)?.average();
                let market = params.with_spot(spot);
                let control_mean = self.control().analytic_price(&market);

                let control = self.control().value(0.0, simulation)?;
                let coefficient = optimal_coefficient(&target, &control)?;
                debug!(coefficient, control_mean, "control variate coefficient");

                let correction = &(&control - control_mean) * coefficient;
                (
                    &target - &correction,
                    ControlVariateStatus::Applied {
                        coefficient,
                        control_mean,
                    },
                )
            }
        };

        Ok(ControlVariateEstimate {
            values: rebase(&corrected, 0.0, evaluation_time, simulation)?,
            plain: rebase(&target, 0.0, evaluation_time, simulation)?,
            status,
        })
    }
}

/// `Cov(Z, Y) / Var(Y)` from the sample
///
/// # Errors
/// [`PricingError::DegenerateSample`] when the control variance is zero or
/// undefined (fewer than two paths).
pub fn optimal_coefficient(target: &PathValues, control: &PathValues) -> PricingResult<f64> {
    let paths = control.len();
    if paths < 2 {
        return Err(PricingError::DegenerateSample {
            statistic: "Var(Y)".to_string(),
            paths,
            reason: "at least two paths are required".to_string(),
        });
    }

    let variance = control.variance();
    if !variance.is_finite() || variance <= 0.0 {
        return Err(PricingError::DegenerateSample {
            statistic: "Var(Y)".to_string(),
            paths,
            reason: format!("control variance is {}", variance),
        });
    }

    let coefficient = target.covariance(control) / variance;
    if !coefficient.is_finite() {
        return Err(PricingError::NumericalInstability {
            method: "control variate".to_string(),
            reason: format!("coefficient is not finite: {}", coefficient),
        });
    }
    Ok(coefficient)
}
