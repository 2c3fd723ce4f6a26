// src/models/bachelier.rs
//! Bachelier (normal) dynamics with a risk-neutral drift
//!
//! ```text
//! dS_t = r S_t dt + σ dW_t
//! ```
//!
//! The solution is Gaussian, so the transition is sampled exactly:
//! ```text
//! S_{t+Δt} = S_t e^(rΔt) + σ √((e^(2rΔt) - 1) / (2r)) Z
//! ```
//! with the `r → 0` limit `σ √Δt` for the standard deviation.
//!
//! Paths can become negative. The lookback trackers assume non-negative
//! trajectories, so keep `σ√T` small relative to `S₀` when pricing with it.

use super::model::SDEModel;
use crate::analytics::lookback_analytic::ZERO_RATE_THRESHOLD;
use crate::error::{validation::*, PricingResult};

#[derive(Clone, Copy, Debug)]
pub struct Bachelier {
    pub s0: f64,
    pub r: f64,
    /// Absolute (price-unit) volatility
    pub sigma: f64,
}

impl Bachelier {
    pub fn new(s0: f64, r: f64, sigma: f64) -> PricingResult<Self> {
        validate_positive("s0", s0)?;
        validate_finite("r", r)?;
        validate_positive("sigma", sigma)?;
        Ok(Bachelier { s0, r, sigma })
    }

    /// Standard deviation of `S_{t+dt}` given `S_t`
    fn transition_std(&self, dt: f64) -> f64 {
        if self.r.abs() < ZERO_RATE_THRESHOLD {
            self.sigma * dt.sqrt()
        } else {
            self.sigma * (((2.0 * self.r * dt).exp() - 1.0) / (2.0 * self.r)).sqrt()
        }
    }
}

impl SDEModel for Bachelier {
    fn name(&self) -> &'static str {
        "Bachelier"
    }

    fn initial_value(&self) -> f64 {
        self.s0
    }

    fn riskfree_rate(&self) -> f64 {
        self.r
    }

    fn drift(&self, s: f64, _t: f64) -> f64 {
        self.r * s
    }

    fn diffusion(&self, _s: f64, _t: f64) -> f64 {
        self.sigma
    }

    fn diffusion_derivative(&self, _s: f64, _t: f64) -> f64 {
        0.0
    }

    fn exact_step(&self, s: f64, dt: f64, normal_draw: f64) -> Option<f64> {
        Some(s * (self.r * dt).exp() + self.transition_std(dt) * normal_draw)
    }
}
