// src/models/model.rs
use crate::analytics::lookback_analytic::MarketParameters;

/// Scalar diffusion `dS_t = a(S_t, t) dt + b(S_t, t) dW_t` under the
/// risk-neutral measure
pub trait SDEModel: Send + Sync {
    fn name(&self) -> &'static str;

    /// Value of the process at time 0
    fn initial_value(&self) -> f64;

    /// Constant short rate used for drift and numeraire
    fn riskfree_rate(&self) -> f64;

    fn drift(&self, s: f64, t: f64) -> f64;
    fn diffusion(&self, s: f64, t: f64) -> f64;
    fn diffusion_derivative(&self, s: f64, t: f64) -> f64;

    /// Closed-form transition over `dt` driven by one standard normal draw,
    /// if the model has one
    fn exact_step(&self, _s: f64, _dt: f64, _normal_draw: f64) -> Option<f64> {
        None
    }

    /// Black-Scholes inputs when the dynamics are lognormal with constant
    /// coefficients; `None` for every other family
    fn black_scholes_parameters(&self) -> Option<MarketParameters> {
        None
    }
}
