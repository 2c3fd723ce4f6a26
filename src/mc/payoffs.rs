// src/mc/payoffs.rs
//! Lookback Payoff Functions
//!
//! # Mathematical Definitions
//!
//! With `M = max_i S(t_i)` and `m = min_i S(t_i)` over the monitoring dates:
//!
//! ## Floating strike
//! - **Call**: `max(S_T - m, 0)` - buy at the lowest observed price
//! - **Put**: `max(M - S_T, 0)` - sell at the highest observed price
//!
//! ## Fixed strike
//! - **Call**: `max(M - K, 0)`
//! - **Put**: `max(K - m, 0)`
//!
//! Floating-strike payoffs are non-negative by construction whenever the
//! terminal date is monitored; the floor at zero is kept for coarse grids.

use crate::analytics::continuity_correction::{
    discrete_fixed_strike_call, discrete_fixed_strike_put, discrete_floating_strike_call,
    discrete_floating_strike_put,
};
use crate::analytics::lookback_analytic::MarketParameters;
use crate::mc::path_values::PathValues;

/// Which running extremum a payoff depends on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extremum {
    Maximum,
    Minimum,
}

/// The four lookback flavors
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LookbackPayoff {
    /// max(max S - K, 0)
    FixedStrikeCall { strike: f64 },

    /// max(K - min S, 0)
    FixedStrikePut { strike: f64 },

    /// max(S_T - min S, 0)
    FloatingStrikeCall,

    /// max(max S - S_T, 0)
    FloatingStrikePut,
}

impl LookbackPayoff {
    pub fn name(&self) -> &'static str {
        match self {
            LookbackPayoff::FixedStrikeCall { .. } => "fixed-strike call",
            LookbackPayoff::FixedStrikePut { .. } => "fixed-strike put",
            LookbackPayoff::FloatingStrikeCall => "floating-strike call",
            LookbackPayoff::FloatingStrikePut => "floating-strike put",
        }
    }

    pub fn strike(&self) -> Option<f64> {
        match self {
            LookbackPayoff::FixedStrikeCall { strike } | LookbackPayoff::FixedStrikePut { strike } => {
                Some(*strike)
            }
            LookbackPayoff::FloatingStrikeCall | LookbackPayoff::FloatingStrikePut => None,
        }
    }

    pub fn extremum(&self) -> Extremum {
        match self {
            LookbackPayoff::FixedStrikeCall { .. } | LookbackPayoff::FloatingStrikePut => {
                Extremum::Maximum
            }
            LookbackPayoff::FixedStrikePut { .. } | LookbackPayoff::FloatingStrikeCall => {
                Extremum::Minimum
            }
        }
    }

    pub fn uses_terminal_value(&self) -> bool {
        matches!(
            self,
            LookbackPayoff::FloatingStrikeCall | LookbackPayoff::FloatingStrikePut
        )
    }

    /// Undiscounted payoff per path from the tracked extremum and the
    /// terminal value
    pub fn evaluate(&self, extremum: &PathValues, terminal: &PathValues) -> PathValues {
        match self {
            LookbackPayoff::FixedStrikeCall { strike } => (extremum - *strike).floor(0.0),
            LookbackPayoff::FixedStrikePut { strike } => (&(extremum - *strike) * -1.0).floor(0.0),
            LookbackPayoff::FloatingStrikeCall => (terminal - extremum).floor(0.0),
            LookbackPayoff::FloatingStrikePut => (extremum - terminal).floor(0.0),
        }
    }

    /// Payoff of a single path sampled on the monitoring dates; the last
    /// entry is the terminal value
    pub fn calculate(&self, path: &[f64]) -> f64 {
        let terminal = match path.last() {
            Some(&value) => value,
            None => return 0.0,
        };
        let max_value = path.iter().copied().fold(0.0, f64::max);
        let min_value = path.iter().copied().fold(f64::MAX, f64::min);

        match self {
            LookbackPayoff::FixedStrikeCall { strike } => (max_value - strike).max(0.0),
            LookbackPayoff::FixedStrikePut { strike } => (strike - min_value).max(0.0),
            LookbackPayoff::FloatingStrikeCall => (terminal - min_value).max(0.0),
            LookbackPayoff::FloatingStrikePut => (max_value - terminal).max(0.0),
        }
    }

    /// Closed-form price; `fixings == 0` is continuous monitoring, otherwise
    /// the continuity-corrected discrete price
    pub fn analytic_price(&self, market: &MarketParameters, maturity: f64, fixings: usize) -> f64 {
        let MarketParameters {
            spot,
            rate,
            volatility,
        } = *market;
        match self {
            LookbackPayoff::FixedStrikeCall { strike } => {
                discrete_fixed_strike_call(spot, rate, volatility, maturity, *strike, fixings)
            }
            LookbackPayoff::FixedStrikePut { strike } => {
                discrete_fixed_strike_put(spot, rate, volatility, maturity, *strike, fixings)
            }
            LookbackPayoff::FloatingStrikeCall => {
                discrete_floating_strike_call(spot, rate, volatility, maturity, fixings)
            }
            LookbackPayoff::FloatingStrikePut => {
                discrete_floating_strike_put(spot, rate, volatility, maturity, fixings)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::lookback_analytic::{
        fixed_strike_call, fixed_strike_put, floating_strike_call, floating_strike_put,
    };
    use approx::assert_relative_eq;

    const ALL: [LookbackPayoff; 4] = [
        LookbackPayoff::FixedStrikeCall { strike: 100.0 },
        LookbackPayoff::FixedStrikePut { strike: 100.0 },
        LookbackPayoff::FloatingStrikeCall,
        LookbackPayoff::FloatingStrikePut,
    ];

    #[test]
    fn test_single_path_payoffs() {
        let path = [100.0, 112.0, 95.0, 104.0];

        assert_eq!(LookbackPayoff::FixedStrikeCall { strike: 100.0 }.calculate(&path), 12.0);
        assert_eq!(LookbackPayoff::FixedStrikePut { strike: 100.0 }.calculate(&path), 5.0);
        assert_eq!(LookbackPayoff::FloatingStrikeCall.calculate(&path), 9.0);
        assert_eq!(LookbackPayoff::FloatingStrikePut.calculate(&path), 8.0);
        assert_eq!(LookbackPayoff::FixedStrikeCall { strike: 120.0 }.calculate(&path), 0.0);
        assert_eq!(LookbackPayoff::FloatingStrikePut.calculate(&[]), 0.0);
    }

    #[test]
    fn test_vector_evaluation_matches_single_path() {
        let paths = [
            vec![100.0, 112.0, 95.0, 104.0],
            vec![100.0, 90.0, 85.0, 88.0],
            vec![100.0, 101.0, 130.0, 125.0],
        ];
        let terminal = PathValues::from_vec(paths.iter().map(|p| p[3]).collect());
        let maxima =
            PathValues::from_vec(paths.iter().map(|p| p.iter().copied().fold(0.0, f64::max)).collect());
        let minima = PathValues::from_vec(
            paths.iter().map(|p| p.iter().copied().fold(f64::MAX, f64::min)).collect(),
        );

        for payoff in ALL.iter() {
            let extremum = match payoff.extremum() {
                Extremum::Maximum => &maxima,
                Extremum::Minimum => &minima,
            };
            let values = payoff.evaluate(extremum, &terminal);
            for (i, path) in paths.iter().enumerate() {
                assert_eq!(values.get(i).unwrap(), payoff.calculate(path), "{}", payoff.name());
            }
        }
    }

    #[test]
    fn test_continuous_analytic_dispatch() {
        let market = MarketParameters::new(100.0, 0.1, 0.3).unwrap();

        assert_relative_eq!(
            ALL[0].analytic_price(&market, 0.5, 0),
            fixed_strike_call(100.0, 0.1, 0.3, 0.5, 100.0)
        );
        assert_relative_eq!(
            ALL[1].analytic_price(&market, 0.5, 0),
            fixed_strike_put(100.0, 0.1, 0.3, 0.5, 100.0)
        );
        assert_relative_eq!(ALL[2].analytic_price(&market, 0.5, 0), floating_strike_call(100.0, 0.1, 0.3, 0.5));
        assert_relative_eq!(ALL[3].analytic_price(&market, 0.5, 0), floating_strike_put(100.0, 0.1, 0.3, 0.5));
    }

    #[test]
    fn test_discrete_analytic_below_continuous() {
        let market = MarketParameters::new(100.0, 0.1, 0.3).unwrap();
        for payoff in ALL.iter() {
            let continuous = payoff.analytic_price(&market, 0.5, 0);
            let discrete = payoff.analytic_price(&market, 0.5, 50);
            assert!(discrete < continuous, "{}: {} vs {}", payoff.name(), discrete, continuous);
        }
    }

    #[test]
    fn test_flavor_metadata() {
        assert_eq!(ALL[0].strike(), Some(100.0));
        assert_eq!(ALL[2].strike(), None);
        assert!(ALL[3].uses_terminal_value());
        assert!(!ALL[1].uses_terminal_value());
        assert_eq!(ALL[1].extremum(), Extremum::Minimum);
        assert_eq!(ALL[3].extremum(), Extremum::Maximum);
    }
}
