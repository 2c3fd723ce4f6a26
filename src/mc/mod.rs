// src/mc/mod.rs
pub mod control_variate;
pub mod lookback;
pub mod mc_engine;
pub mod monitoring;
pub mod path_values;
pub mod payoffs;
pub mod simulation;
pub mod time_grid;
