// src/solvers/milstein.rs
//! Milstein Scheme for Higher-Order SDE Integration
//!
//! # Mathematical Framework
//!
//! Euler-Maruyama plus the Itô correction term:
//! ```text
//! X_{n+1} = X_n + a Δt + b ΔW_n + ½ b b' [(ΔW_n)² - Δt]
//! ```
//! with `b' = ∂b/∂x`. Strong order 1.0. For additive noise (`b' = 0`, e.g.
//! Bachelier) it coincides with Euler-Maruyama.

use crate::models::model::SDEModel;
use crate::rng;
use rand::Rng;

/// Milstein numerical scheme for SDE integration
pub struct Milstein;

impl Milstein {
    /// Single Milstein step driven by a pre-drawn standard normal `z`
    pub fn step_with_draw<M: SDEModel + ?Sized>(model: &M, s: f64, t: f64, dt: f64, z: f64) -> f64 {
        let drift_val = model.drift(s, t);
        let diffusion_val = model.diffusion(s, t);
        let diffusion_derivative_val = model.diffusion_derivative(s, t);

        let dw = dt.sqrt() * z;

        s + drift_val * dt
            + diffusion_val * dw
            + 0.5 * diffusion_val * diffusion_derivative_val * (dw * dw - dt)
    }

    pub fn step<M: SDEModel + ?Sized, R: Rng + ?Sized>(model: &M, s: &mut f64, t: f64, dt: f64, rng: &mut R) {
        let normal_draw = rng::get_normal_draw(rng);
        *s = Self::step_with_draw(model, *s, t, dt, normal_draw);
    }
}
