pub mod config;
pub mod engine;
pub mod goal;
pub mod similarity;
pub mod strategy;

pub use config::{ConfigError, ScoringConfig, StrategyParams};
pub use engine::{Candidate, Resolution, SelectorEngine};
pub use strategy::Strategy;
