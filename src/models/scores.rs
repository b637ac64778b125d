// Data models for posture scores and per-session reporting

use serde::{Deserialize, Serialize};

use crate::models::pose::Landmark;

// ==============================================================================
// Metric names
// ==============================================================================

/// The metrics the engine computes for every pose snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Horizontal,
    ShoulderTilt,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Horizontal, Metric::ShoulderTilt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Horizontal => "horizontal_score",
            Metric::ShoulderTilt => "shoulder_tilt_score",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "horizontal_score" => Some(Metric::Horizontal),
            "shoulder_tilt_score" => Some(Metric::ShoulderTilt),
            _ => None,
        }
    }
}

// ==============================================================================
// Score results
// ==============================================================================

/// Scores for one pose snapshot, each in [0, 1] and never NaN.
///
/// Holds exactly the two base metrics. The combined squareness value is a
/// separate entry point (`score_engine::shoulder_squareness`) and is kept out
/// of this result on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub horizontal_score: f32,
    pub shoulder_tilt_score: f32,
}

impl ScoreResult {
    pub fn get(&self, metric: Metric) -> f32 {
        match metric {
            Metric::Horizontal => self.horizontal_score,
            Metric::ShoulderTilt => self.shoulder_tilt_score,
        }
    }

    pub fn entries(&self) -> [(Metric, f32); 2] {
        [
            (Metric::Horizontal, self.horizontal_score),
            (Metric::ShoulderTilt, self.shoulder_tilt_score),
        ]
    }
}

/// Diagnostic snapshot of the horizontal-metric computation, including the
/// two shoulder landmarks as captured at evaluation time. Recomputed per
/// call, never persisted.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HorizontalScoreDebug {
    pub score: f32,
    pub angle_deg: f32,
    pub dx: f32,
    pub dz: f32,
    pub vis_sym: f32,
    pub left: Landmark,
    pub right: Landmark,
}

impl HorizontalScoreDebug {
    /// The degenerate result: zero score, a 90 degree angle, and invalid
    /// landmark echoes. Numeric score fields stay valid floats.
    pub fn blank() -> Self {
        Self {
            score: 0.0,
            angle_deg: 90.0,
            dx: 0.0,
            dz: 0.0,
            vis_sym: 0.0,
            left: Landmark::invalid(),
            right: Landmark::invalid(),
        }
    }
}

// ==============================================================================
// Session DTOs
// ==============================================================================

/// Output of one live-stream frame: the raw scores plus the current rolling
/// means over the trailing window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FrameScores {
    pub timestamp: i64,
    pub scores: ScoreResult,
    pub horizontal_mean: f32,
    pub shoulder_tilt_mean: f32,
}

/// Summary of a scoring session so far
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatistics {
    pub session_id: String,
    pub started_at: i64,
    pub frames_seen: u64,
    pub frames_with_pose: u64,
    pub horizontal_mean: Option<f32>,
    pub shoulder_tilt_mean: Option<f32>,
}
