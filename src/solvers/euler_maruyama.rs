// src/solvers/euler_maruyama.rs
//! Euler-Maruyama Scheme for SDE Integration
//!
//! # Mathematical Framework
//!
//! For a general SDE:
//! ```text
//! dX_t = a(X_t, t) dt + b(X_t, t) dW_t
//! ```
//!
//! the scheme advances
//! ```text
//! X_{n+1} = X_n + a(X_n, t_n) Δt + b(X_n, t_n) ΔW_n,    ΔW_n = √Δt Z_n
//! ```
//!
//! Strong order 0.5, weak order 1.0. Used by the path simulator for models
//! without a closed-form transition, and on request for any model.

use crate::models::model::SDEModel;
use crate::rng;
use rand::Rng;

/// Euler-Maruyama numerical scheme for SDE integration
pub struct EulerMaruyama;

impl EulerMaruyama {
    /// Single step driven by a pre-drawn standard normal `z`
    pub fn step_with_draw<M: SDEModel + ?Sized>(model: &M, s: f64, t: f64, dt: f64, z: f64) -> f64 {
        let drift_term = model.drift(s, t) * dt;
        let diffusion_term = model.diffusion(s, t) * dt.sqrt() * z;
        s + drift_term + diffusion_term
    }

    /// Single step drawing its own normal from `rng`
    pub fn step<M: SDEModel + ?Sized, R: Rng + ?Sized>(
        model: &M,
        s: &mut f64,
        t: f64,
        dt: f64,
        rng: &mut R,
    ) {
        let normal_draw = rng::get_normal_draw(rng);
        *s = Self::step_with_draw(model, *s, t, dt, normal_draw);
    }
}
