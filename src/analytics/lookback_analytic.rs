// src/analytics/lookback_analytic.rs
//! Closed-form prices of continuously monitored lookback options
//!
//! # Mathematical Foundation
//!
//! Under Black-Scholes dynamics
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//! the running extremum of a geometric Brownian motion has a known joint law
//! with the terminal value, which gives closed forms for the floating-strike
//! contracts (Goldman-Sosin-Gatto). The contract is assumed to start today,
//! so the running minimum/maximum is initialised at `S₀`.
//!
//! Fixed-strike prices follow from static replication: a fixed-strike
//! lookback is a floating-strike lookback whose running extremum has been
//! reset to `max(S₀, K)` (call) or `min(S₀, K)` (put), plus a forward.
//!
//! # Zero-Rate Limit
//!
//! The general formulas contain the factor `σ²/(2r)`. For `|r|` below
//! [`ZERO_RATE_THRESHOLD`] the analytic limit `r → 0` is evaluated instead,
//! so no `1/r` division is ever executed near the singularity.

use crate::error::{validation::*, PricingResult};
use crate::math_utils::{norm_cdf, norm_pdf};

/// Below this absolute rate the `r → 0` limit branch is used
pub const ZERO_RATE_THRESHOLD: f64 = 1e-8;

/// Black-Scholes market inputs for the analytic formulas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketParameters {
    /// Spot price S₀
    pub spot: f64,
    /// Continuously compounded risk-free rate r
    pub rate: f64,
    /// Lognormal volatility σ
    pub volatility: f64,
}

impl MarketParameters {
    /// Validated constructor: `spot > 0`, `rate` finite, `volatility > 0`
    pub fn new(spot: f64, rate: f64, volatility: f64) -> PricingResult<Self> {
        let params = MarketParameters {
            spot,
            rate,
            volatility,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> PricingResult<()> {
        validate_positive("spot", self.spot)?;
        validate_finite("rate", self.rate)?;
        validate_positive("volatility", self.volatility)?;
        Ok(())
    }

    /// Same market with a different spot
    pub fn with_spot(&self, spot: f64) -> Self {
        MarketParameters { spot, ..*self }
    }
}

/// Floating-strike lookback call, payoff `S_T - min_{t≤T} S_t`
///
/// # Formula
/// ```text
/// d = (r + σ²/2)√T / σ
/// C = S Φ(d) - e^(-rT) S Φ(d - σ√T)
///   + e^(-rT) σ²/(2r) S [Φ(-d + 2r√T/σ) - e^(rT) Φ(-d)]
/// ```
///
/// For `|r| < 1e-8`, with `a = σ√T/2`:
/// ```text
/// C = S [Φ(a) - Φ(-a)] + S [σ√T φ(a) - σ²T/2 Φ(-a)]
/// ```
///
/// Returns 0 when `maturity ≤ 0` or `volatility ≤ 0`.
pub fn floating_strike_call(spot: f64, rate: f64, volatility: f64, maturity: f64) -> f64 {
    if maturity <= 0.0 || volatility <= 0.0 {
        return 0.0;
    }

    let sqrt_t = maturity.sqrt();
    let sigma_sqrt_t = volatility * sqrt_t;

    if rate.abs() < ZERO_RATE_THRESHOLD {
        let a = 0.5 * sigma_sqrt_t;
        let cdf_a = norm_cdf(a);
        let cdf_minus_a = norm_cdf(-a);

        let base = spot * (cdf_a - cdf_minus_a);
        let limit_term = spot
            * (sigma_sqrt_t * norm_pdf(a) - 0.5 * volatility * volatility * maturity * cdf_minus_a);
        return base + limit_term;
    }

    let discount = (-rate * maturity).exp();
    let d = (rate + 0.5 * volatility * volatility) * sqrt_t / volatility;

    let term1 = spot * norm_cdf(d);
    let term2 = -discount * spot * norm_cdf(d - sigma_sqrt_t);
    let bracket = norm_cdf(-d + 2.0 * rate * sqrt_t / volatility)
        - (rate * maturity).exp() * norm_cdf(-d);
    let term3 = discount * volatility * volatility / (2.0 * rate) * spot * bracket;

    term1 + term2 + term3
}

/// Floating-strike lookback put, payoff `max_{t≤T} S_t - S_T`
///
/// # Formula
/// ```text
/// P = -S Φ(-d) + e^(-rT) S Φ(-d + σ√T)
///   + e^(-rT) σ²/(2r) S [e^(rT) Φ(d) - Φ(d - 2r√T/σ)]
/// ```
///
/// For `|r| < 1e-8`:
/// ```text
/// P = S [Φ(a) - Φ(-a)] + S [σ√T φ(a) + σ²T/2 Φ(a)]
/// ```
pub fn floating_strike_put(spot: f64, rate: f64, volatility: f64, maturity: f64) -> f64 {
    if maturity <= 0.0 || volatility <= 0.0 {
        return 0.0;
    }

    let sqrt_t = maturity.sqrt();
    let sigma_sqrt_t = volatility * sqrt_t;

    if rate.abs() < ZERO_RATE_THRESHOLD {
        let a = 0.5 * sigma_sqrt_t;
        let cdf_a = norm_cdf(a);
        let cdf_minus_a = norm_cdf(-a);

        let base = spot * (cdf_a - cdf_minus_a);
        let limit_term =
            spot * (sigma_sqrt_t * norm_pdf(a) + 0.5 * volatility * volatility * maturity * cdf_a);
        return base + limit_term;
    }

    let discount = (-rate * maturity).exp();
    let d = (rate + 0.5 * volatility * volatility) * sqrt_t / volatility;

    let term1 = -spot * norm_cdf(-d);
    let term2 = discount * spot * norm_cdf(-d + sigma_sqrt_t);
    let bracket = (rate * maturity).exp() * norm_cdf(d)
        - norm_cdf(d - 2.0 * rate * sqrt_t / volatility);
    let term3 = discount * volatility * volatility / (2.0 * rate) * spot * bracket;

    term1 + term2 + term3
}

/// Fixed-strike lookback call, payoff `max(max_{t≤T} S_t - K, 0)`
///
/// ```text
/// C_fixed(S, K) = P_floating(max(S, K)) + S - K e^(-rT)
/// ```
///
/// The replication is returned unfloored so that it pairs exactly with
/// [`fixed_strike_put`]. For strikes well above spot the raw value is
/// negative.
pub fn fixed_strike_call(spot: f64, rate: f64, volatility: f64, maturity: f64, strike: f64) -> f64 {
    if maturity <= 0.0 || volatility <= 0.0 {
        return 0.0;
    }
    let reset = spot.max(strike);
    let floating_put = floating_strike_put(reset, rate, volatility, maturity);
    floating_put + spot - strike * (-rate * maturity).exp()
}

/// Fixed-strike lookback put, payoff `max(K - min_{t≤T} S_t, 0)`
///
/// ```text
/// P_fixed(S, K) = C_floating(min(S, K)) + K e^(-rT) - S
/// ```
///
/// Unfloored, so it goes negative for strikes well below spot.
pub fn fixed_strike_put(spot: f64, rate: f64, volatility: f64, maturity: f64, strike: f64) -> f64 {
    if maturity <= 0.0 || volatility <= 0.0 {
        return 0.0;
    }
    let reset = spot.min(strike);
    let floating_call = floating_strike_call(reset, rate, volatility, maturity);
    floating_call + strike * (-rate * maturity).exp() - spot
}
