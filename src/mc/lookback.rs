// src/mc/lookback.rs
//! Monte Carlo valuation of a single lookback product
//!
//! # Discounting
//!
//! The maturity payoff `V(T)` is converted to the simulation measure and
//! re-expressed at the evaluation time `t`:
//! ```text
//! V(t) = V(T) / N(T) · w(T) · N(t) / w(t)
//! ```
//! where `N` is the numeraire and `w` the Monte Carlo weights read from the
//! simulation. The time-0 average of `V(0)` is the price.
//!
//! Monitoring dates are taken from the part of the simulation grid up to
//! maturity, so a simulation with a longer horizon never leaks post-maturity
//! values into the extremum.

use crate::analytics::lookback_analytic::MarketParameters;
use crate::error::{validation::*, PricingError, PricingResult};
use crate::mc::monitoring::{build_monitoring_times, running_max, running_min};
use crate::mc::path_values::PathValues;
use crate::mc::payoffs::{Extremum, LookbackPayoff};
use crate::mc::simulation::PathSimulation;
use crate::mc::time_grid::TIME_TOLERANCE;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LookbackOption {
    maturity: f64,
    payoff: LookbackPayoff,
    underlying_index: usize,
    monitoring_count: usize,
}

impl LookbackOption {
    /// Continuously monitored option on underlying 0
    pub fn new(maturity: f64, payoff: LookbackPayoff) -> Self {
        LookbackOption {
            maturity,
            payoff,
            underlying_index: 0,
            monitoring_count: 0,
        }
    }

    pub fn with_underlying(mut self, underlying_index: usize) -> Self {
        self.underlying_index = underlying_index;
        self
    }

    /// Number of discrete fixings; 0 monitors every simulation time
    pub fn with_monitoring(mut self, monitoring_count: usize) -> Self {
        self.monitoring_count = monitoring_count;
        self
    }

    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    pub fn payoff(&self) -> LookbackPayoff {
        self.payoff
    }

    pub fn underlying_index(&self) -> usize {
        self.underlying_index
    }

    pub fn monitoring_count(&self) -> usize {
        self.monitoring_count
    }

    pub fn validate(&self) -> PricingResult<()> {
        validate_positive("maturity", self.maturity)?;
        validate_finite("maturity", self.maturity)?;
        if let Some(strike) = self.payoff.strike() {
            validate_positive("strike", strike)?;
            validate_finite("strike", strike)?;
        }
        Ok(())
    }

    /// Monitoring dates on the simulation grid up to maturity
    ///
    /// # Errors
    /// - [`PricingError::MaturityBeyondHorizon`] when the grid stops before maturity
    /// - [`PricingError::MaturityOffGrid`] when maturity falls between grid times
    pub fn monitoring_times<S: PathSimulation + ?Sized>(&self, simulation: &S) -> PricingResult<Vec<f64>> {
        let grid = simulation.time_discretization();
        if self.maturity > grid.horizon() + TIME_TOLERANCE {
            return Err(PricingError::MaturityBeyondHorizon {
                maturity: self.maturity,
                horizon: grid.horizon(),
            });
        }
        if !grid.contains(self.maturity) {
            let grid_time = grid
                .time_index_at_or_below(self.maturity)
                .and_then(|index| grid.time(index))
                .unwrap_or(0.0);
            return Err(PricingError::MaturityOffGrid {
                maturity: self.maturity,
                grid_time,
            });
        }
        let grid = grid.truncated(self.maturity)?;
        Ok(build_monitoring_times(self.monitoring_count, &grid))
    }

    /// Undiscounted payoff at maturity, per path
    pub fn payoff_at_maturity<S: PathSimulation + ?Sized>(&self, simulation: &S) -> PricingResult<PathValues> {
        self.validate()?;
        let times = self.monitoring_times(simulation)?;

        let extremum = match self.payoff.extremum() {
            Extremum::Maximum => running_max(simulation, &times, self.underlying_index)?,
            Extremum::Minimum => running_min(simulation, &times, self.underlying_index)?,
        };
        let terminal = simulation.asset_value(self.maturity, self.underlying_index)?;

        Ok(self.payoff.evaluate(&extremum, &terminal))
    }

    /// Value at `evaluation_time` per path
    ///
    /// # Errors
    /// - [`PricingError::EvaluationAfterMaturity`] when `evaluation_time > maturity`
    /// - [`PricingError::MaturityBeyondHorizon`] when the grid stops before maturity
    /// - [`PricingError::MaturityOffGrid`] when maturity is not a simulation time
    pub fn value<S: PathSimulation + ?Sized>(
        &self,
        evaluation_time: f64,
        simulation: &S,
    ) -> PricingResult<PathValues> {
        check_evaluation_time(evaluation_time, self.maturity)?;
        let payoff = self.payoff_at_maturity(simulation)?;
        rebase(&payoff, self.maturity, evaluation_time, simulation)
    }

    /// Time-0 Monte Carlo price
    pub fn price<S: PathSimulation + ?Sized>(&self, simulation: &S) -> PricingResult<f64> {
        Ok(self.value(0.0, simulation)?.average())
    }

    /// Closed-form price under Black-Scholes: continuous formula without
    /// fixings, continuity-corrected otherwise
    pub fn analytic_price(&self, market: &MarketParameters) -> f64 {
        self.payoff
            .analytic_price(market, self.maturity, self.monitoring_count)
    }
}

pub(crate) fn check_evaluation_time(evaluation_time: f64, maturity: f64) -> PricingResult<()> {
    validate_non_negative("evaluation_time", evaluation_time)?;
    validate_finite("evaluation_time", evaluation_time)?;
    if evaluation_time > maturity + TIME_TOLERANCE {
        return Err(PricingError::EvaluationAfterMaturity {
            evaluation_time,
            maturity,
        });
    }
    Ok(())
}

/// Re-express per-path values known at `from` as values at `to`
pub(crate) fn rebase<S: PathSimulation + ?Sized>(
    values: &PathValues,
    from: f64,
    to: f64,
    simulation: &S,
) -> PricingResult<PathValues> {
    let numeraire_from = simulation.numeraire(from)?;
    let weights_from = simulation.monte_carlo_weights(from)?;
    let normalized = &(values / &numeraire_from) * &weights_from;

    let numeraire_to = simulation.numeraire(to)?;
    let weights_to = simulation.monte_carlo_weights(to)?;
    Ok(&(&normalized * &numeraire_to) / &weights_to)
}
