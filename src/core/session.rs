// Per-session scoring pipeline: smoother -> engine -> aggregator

use tracing::{debug, info};
use uuid::Uuid;

use crate::core::config::ScoringConfig;
use crate::core::landmark_smoother::LandmarkSmoother;
use crate::core::score_aggregator::ScoreAggregator;
use crate::core::score_engine;
use crate::models::pose::PoseLandmarks;
use crate::models::scores::{FrameScores, Metric, ScoreResult, SessionStatistics};

/// Mutable scoring state for one stream or one image-processing run.
///
/// Each active stream gets its own session; smoother and aggregator state
/// are never shared across sessions or across a live/still mode switch.
/// Frames must arrive in capture order, from a single caller at a time —
/// both accumulators are order-sensitive.
pub struct ScoringSession {
    id: String,
    started_at: i64,
    smoother: LandmarkSmoother,
    aggregator: ScoreAggregator,
    frames_seen: u64,
    frames_with_pose: u64,
}

impl ScoringSession {
    pub fn new(config: &ScoringConfig) -> Self {
        let id = Uuid::new_v4().to_string();
        info!("started scoring session {}", id);
        Self {
            id,
            started_at: chrono::Utc::now().timestamp_millis(),
            smoother: LandmarkSmoother::with_alpha(config.smoothing_alpha),
            aggregator: ScoreAggregator::with_capacity(config.aggregation_window),
            frames_seen: 0,
            frames_with_pose: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn started_at(&self) -> i64 {
        self.started_at
    }

    /// Feed one captured frame. `None` means the pose source detected
    /// nobody; the frame is counted but smoother and aggregator state stay
    /// untouched.
    pub fn process_frame(
        &mut self,
        timestamp: i64,
        landmarks: Option<&PoseLandmarks>,
    ) -> Option<FrameScores> {
        self.frames_seen += 1;
        let raw = match landmarks {
            Some(raw) => raw,
            None => {
                debug!("frame at {}: no detection", timestamp);
                return None;
            }
        };
        self.frames_with_pose += 1;

        let smoothed = self.smoother.update(raw);
        let scores = score_engine::compute_all_metrics(&smoothed);
        self.aggregator
            .observe(Metric::Horizontal, scores.horizontal_score);
        self.aggregator
            .observe(Metric::ShoulderTilt, scores.shoulder_tilt_score);

        Some(FrameScores {
            timestamp,
            scores,
            horizontal_mean: self
                .aggregator
                .mean(Metric::Horizontal)
                .unwrap_or(scores.horizontal_score),
            shoulder_tilt_mean: self
                .aggregator
                .mean(Metric::ShoulderTilt)
                .unwrap_or(scores.shoulder_tilt_score),
        })
    }

    /// One-shot evaluation of a still image: scores the snapshot directly,
    /// bypassing smoothing and aggregation. Produces the same scores the
    /// stream path would for an identical, already-stable pose.
    pub fn score_still(landmarks: &PoseLandmarks) -> ScoreResult {
        score_engine::compute_all_metrics(landmarks)
    }

    pub fn statistics(&self) -> SessionStatistics {
        SessionStatistics {
            session_id: self.id.clone(),
            started_at: self.started_at,
            frames_seen: self.frames_seen,
            frames_with_pose: self.frames_with_pose,
            horizontal_mean: self.aggregator.mean(Metric::Horizontal),
            shoulder_tilt_mean: self.aggregator.mean(Metric::ShoulderTilt),
        }
    }
}
