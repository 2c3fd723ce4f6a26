// src/analytics/continuity_correction.rs
//! Discrete-monitoring continuity correction (Broadie-Glasserman-Kou)
//!
//! # Mathematical Foundation
//!
//! A lookback observed at `m` equally spaced dates sees a smaller extremum
//! than its continuously monitored counterpart. To first order the discrete
//! extremum behaves like the continuous one shifted by
//! ```text
//! θ = β σ √(T/m),    β = -ζ(1/2)/√(2π) ≈ 0.5826
//! ```
//! which gives, for the floating-strike contracts,
//! ```text
//! P_m(S) = e^(-θ) P(S e^θ)  + (e^(-θ) - 1) S
//! C_m(S) = e^(θ)  C(S e^-θ) - (e^(θ)  - 1) S
//! ```
//! As `m → ∞` the shift vanishes and the continuous prices are recovered.
//!
//! A fixing count of zero denotes continuous monitoring (`θ = 0`).

use super::lookback_analytic::{floating_strike_call, floating_strike_put};

/// Correction constant `-ζ(1/2)/√(2π)`
pub const BGK_BETA: f64 = 0.5826;

/// Spot shift `θ = β σ √(T/m)`; zero for continuous monitoring
pub fn correction_shift(volatility: f64, maturity: f64, fixings: usize) -> f64 {
    if fixings == 0 {
        return 0.0;
    }
    BGK_BETA * volatility * (maturity / fixings as f64).sqrt()
}

/// Discretely monitored floating-strike lookback call
pub fn discrete_floating_strike_call(
    spot: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    fixings: usize,
) -> f64 {
    if maturity <= 0.0 || volatility <= 0.0 {
        return 0.0;
    }
    let theta = correction_shift(volatility, maturity, fixings);
    let shifted = floating_strike_call(spot * (-theta).exp(), rate, volatility, maturity);
    theta.exp() * shifted - (theta.exp() - 1.0) * spot
}

/// Discretely monitored floating-strike lookback put
pub fn discrete_floating_strike_put(
    spot: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    fixings: usize,
) -> f64 {
    if maturity <= 0.0 || volatility <= 0.0 {
        return 0.0;
    }
    let theta = correction_shift(volatility, maturity, fixings);
    let shifted = floating_strike_put(spot * theta.exp(), rate, volatility, maturity);
    (-theta).exp() * shifted + ((-theta).exp() - 1.0) * spot
}

/// Discretely monitored fixed-strike lookback call
///
/// Same replication as the continuous case, with the corrected floating put
/// struck at `max(S, K)` as the replicating leg. The correction is only
/// asymptotic and nothing is floored, so far out-of-the-money contracts with
/// very few fixings can come out negative.
pub fn discrete_fixed_strike_call(
    spot: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    strike: f64,
    fixings: usize,
) -> f64 {
    if maturity <= 0.0 || volatility <= 0.0 {
        return 0.0;
    }
    let floating_put =
        discrete_floating_strike_put(spot.max(strike), rate, volatility, maturity, fixings);
    floating_put + spot - strike * (-rate * maturity).exp()
}

/// Discretely monitored fixed-strike lookback put, replicated from the
/// corrected floating call struck at `min(S, K)`
pub fn discrete_fixed_strike_put(
    spot: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    strike: f64,
    fixings: usize,
) -> f64 {
    if maturity <= 0.0 || volatility <= 0.0 {
        return 0.0;
    }
    let floating_call =
        discrete_floating_strike_call(spot.min(strike), rate, volatility, maturity, fixings);
    floating_call + strike * (-rate * maturity).exp() - spot
}
