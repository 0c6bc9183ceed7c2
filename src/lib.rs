//! PlantGuard CLI

pub mod analyze;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod intake;
pub mod render;
