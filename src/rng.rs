// src/rng.rs
//! Random Number Generation for Path Simulation
//!
//! # Design
//!
//! Every simulated path owns an independent `StdRng` stream whose seed is a
//! deterministic function of `(base_seed, asset, path)`. Results are therefore
//! identical regardless of how Rayon schedules paths over threads.
//!
//! # Antithetic Pairs
//!
//! With antithetic sampling enabled, paths `2k` and `2k + 1` share one stream:
//! the odd path consumes the same draws negated, `Z → -Z`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Factory for per-path random streams
#[derive(Debug, Clone, Copy)]
pub struct PathRngFactory {
    base_seed: u64,
    paths: usize,
    antithetic: bool,
}

impl PathRngFactory {
    pub fn new(base_seed: u64, paths: usize, antithetic: bool) -> Self {
        Self {
            base_seed,
            paths,
            antithetic,
        }
    }

    /// Stream index shared by a path and its antithetic partner
    fn stream_index(&self, path: usize) -> usize {
        if self.antithetic {
            path / 2
        } else {
            path
        }
    }

    /// Sign applied to every draw of `path`
    pub fn draw_sign(&self, path: usize) -> f64 {
        if self.antithetic && path % 2 == 1 {
            -1.0
        } else {
            1.0
        }
    }

    /// Create the random stream for a given asset and path
    pub fn create_path_rng(&self, asset: usize, path: usize) -> StdRng {
        let stream = (asset as u64)
            .wrapping_mul(self.paths as u64)
            .wrapping_add(self.stream_index(path) as u64);
        seed_rng_from_u64(self.base_seed.wrapping_add(stream))
    }

    /// Standard normal increments for one path (already sign-adjusted)
    pub fn normal_draws(&self, asset: usize, path: usize, count: usize) -> Vec<f64> {
        let mut rng = self.create_path_rng(asset, path);
        let sign = self.draw_sign(path);
        (0..count)
            .map(|_| sign * get_normal_draw(&mut rng))
            .collect()
    }
}

pub fn seed_rng_from_u64(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn get_normal_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}
