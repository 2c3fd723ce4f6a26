// src/models/gbm.rs
use super::model::SDEModel;
use crate::analytics::lookback_analytic::MarketParameters;
use crate::error::PricingResult;

/// Black-Scholes dynamics `dS = r S dt + σ S dW`
#[derive(Clone, Copy, Debug)]
pub struct Gbm {
    pub s0: f64,
    pub r: f64,
    pub sigma: f64,
}

impl Gbm {
    pub fn new(s0: f64, r: f64, sigma: f64) -> PricingResult<Self> {
        let params = MarketParameters::new(s0, r, sigma)?;
        Ok(Self::from_market(&params))
    }

    pub fn from_market(params: &MarketParameters) -> Self {
        Gbm {
            s0: params.spot,
            r: params.rate,
            sigma: params.volatility,
        }
    }
}

impl SDEModel for Gbm {
    fn name(&self) -> &'static str {
        "Black-Scholes"
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

    fn diffusion(&self, s: f64, _t: f64) -> f64 {
        self.sigma * s
    }

    fn diffusion_derivative(&self, _s: f64, _t: f64) -> f64 {
        self.sigma
    }

    /// `S_{t+dt} = S_t exp((r - σ²/2) dt + σ √dt Z)`
    fn exact_step(&self, s: f64, dt: f64, normal_draw: f64) -> Option<f64> {
        Some(s * ((self.r - 0.5 * self.sigma * self.sigma) * dt + self.sigma * dt.sqrt() * normal_draw).exp())
    }

    fn black_scholes_parameters(&self) -> Option<MarketParameters> {
        Some(MarketParameters {
            spot: self.s0,
            rate: self.r,
            volatility: self.sigma,
        })
    }
}
