// src/models/mod.rs
pub mod bachelier;
pub mod gbm;
pub mod model;
