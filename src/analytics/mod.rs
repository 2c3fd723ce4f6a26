// src/analytics/mod.rs
pub mod continuity_correction;
pub mod lookback_analytic;
