pub mod config;
pub mod landmark_smoother;
pub mod score_aggregator;
pub mod score_engine;
pub mod session;
