//! # lookback-mc: Lookback Option Valuation
//!
//! Analytic and Monte Carlo pricing of lookback options (payoffs on the
//! running maximum or minimum of the underlying) under constant-parameter
//! dynamics.
//!
//! ## Key Features
//!
//! - **Closed forms**: continuously monitored fixed- and floating-strike
//!   calls and puts, with a stable `r → 0` limit
//! - **Discrete monitoring**: Broadie-Glasserman-Kou continuity correction
//! - **Monte Carlo**: parallel path generation with Rayon, any fixing count,
//!   evaluation at any time up to maturity
//! - **Variance Reduction**: continuously monitored contract as control
//!   variate, antithetic paths
//!
//! ## Quick Start
//!
//! ```rust
//! use lookback_mc::analytics::lookback_analytic::MarketParameters;
//! use lookback_mc::mc::lookback::LookbackOption;
//! use lookback_mc::mc::mc_engine::mc_price_lookback;
//! use lookback_mc::mc::payoffs::LookbackPayoff;
//! use lookback_mc::mc::simulation::{MonteCarloAssetSimulation, SimulationConfig};
//! use lookback_mc::models::gbm::Gbm;
//!
//! let market = MarketParameters::new(100.0, 0.1, 0.3).expect("valid market");
//! let config = SimulationConfig {
//!     paths: 2_000,
//!     steps: 100,
//!     horizon: 0.5,
//!     ..Default::default()
//! };
//! let simulation = MonteCarloAssetSimulation::new(Gbm::from_market(&market), config)
//!     .expect("valid simulation");
//!
//! // Fixed-strike call observed on 50 dates
//! let option = LookbackOption::new(0.5, LookbackPayoff::FixedStrikeCall { strike: 100.0 })
//!     .with_monitoring(50);
//!
//! let estimate = mc_price_lookback(&option, &simulation).expect("valid product");
//! let corrected = option.analytic_price(&market);
//! println!("MC {:.4} ± {:.4}, corrected analytic {:.4}",
//!          estimate.price, estimate.standard_error, corrected);
//! ```
//!
//! ## Logging
//!
//! The library emits `tracing` events and never installs a subscriber.

// Module declarations
pub mod analytics;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod output;
pub mod rng;
pub mod solvers;

// Re-export commonly used types for convenience
pub use analytics::lookback_analytic::MarketParameters;
pub use error::{PricingError, PricingResult};
pub use mc::lookback::LookbackOption;
pub use mc::payoffs::LookbackPayoff;
