// src/solvers/mod.rs
pub mod euler_maruyama;
pub mod milstein;

use crate::models::model::SDEModel;
use euler_maruyama::EulerMaruyama;
use milstein::Milstein;

/// Time-stepping scheme used by the path simulator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Scheme {
    /// Model's closed-form transition, Euler-Maruyama when it has none
    #[default]
    Exact,
    EulerMaruyama,
    Milstein,
}

impl Scheme {
    /// Advance `s` from `t` to `t + dt` with the standard normal draw `z`
    pub fn advance<M: SDEModel + ?Sized>(&self, model: &M, s: f64, t: f64, dt: f64, z: f64) -> f64 {
        match self {
            Scheme::Exact => model
                .exact_step(s, dt, z)
                .unwrap_or_else(|| EulerMaruyama::step_with_draw(model, s, t, dt, z)),
            Scheme::EulerMaruyama => EulerMaruyama::step_with_draw(model, s, t, dt, z),
            Scheme::Milstein => Milstein::step_with_draw(model, s, t, dt, z),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scheme::Exact => "Exact",
            Scheme::EulerMaruyama => "Euler-Maruyama",
            Scheme::Milstein => "Milstein",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bachelier::Bachelier;
    use crate::models::gbm::Gbm;
    use approx::assert_relative_eq;

    #[test]
    fn test_milstein_matches_euler_for_additive_noise() {
        let model = Bachelier::new(100.0, 0.03, 12.0).unwrap();
        for &z in &[-1.7, 0.0, 0.4, 2.2] {
            let euler = Scheme::EulerMaruyama.advance(&model, 100.0, 0.0, 0.01, z);
            let milstein = Scheme::Milstein.advance(&model, 100.0, 0.0, 0.01, z);
            assert_relative_eq!(euler, milstein, max_relative = 1e-15);
        }
    }

    #[test]
    fn test_schemes_agree_for_small_steps() {
        let gbm = Gbm::new(100.0, 0.05, 0.2).unwrap();
        let dt = 1e-6;
        let exact = Scheme::Exact.advance(&gbm, 100.0, 0.0, dt, 2.0);
        let euler = Scheme::EulerMaruyama.advance(&gbm, 100.0, 0.0, dt, 2.0);
        let milstein = Scheme::Milstein.advance(&gbm, 100.0, 0.0, dt, 2.0);

        assert!((exact - euler).abs() < 1e-5);
        assert!((exact - milstein).abs() < (exact - euler).abs());
    }

    #[test]
    fn test_default_scheme_is_exact() {
        assert_eq!(Scheme::default(), Scheme::Exact);
        assert_eq!(Scheme::Milstein.name(), "Milstein");
    }
}
