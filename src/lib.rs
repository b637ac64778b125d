pub mod core;
pub mod models;

pub use crate::core::config::ScoringConfig;
pub use crate::core::landmark_smoother::LandmarkSmoother;
pub use crate::core::score_aggregator::ScoreAggregator;
pub use crate::core::session::ScoringSession;
pub use crate::models::pose::{BodyLandmark, Landmark, PoseError, PoseLandmarks, PoseResult};
pub use crate::models::scores::{HorizontalScoreDebug, Metric, ScoreResult};
