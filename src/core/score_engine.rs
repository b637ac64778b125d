// Geometric posture scoring over one frame's shoulder landmarks.
//
// Every function here is pure and deterministic. Missing, occluded, or
// degenerate input routes to a documented sentinel value instead of an
// error; emitted scores are always valid floats in [0, 1].

use crate::models::pose::{BodyLandmark, Landmark, PoseLandmarks};
use crate::models::scores::{HorizontalScoreDebug, ScoreResult};

/// A landmark participates in scoring only when its visibility is strictly
/// above this floor.
pub const VISIBILITY_FLOOR: f32 = 0.3;

/// Vector magnitudes below this are treated as degenerate geometry
/// (coincident points), avoiding division by zero.
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// Both shoulders, if present and usable. Any failure here means the metric
/// returns its sentinel.
fn usable_shoulders(landmarks: &PoseLandmarks) -> Option<(&Landmark, &Landmark)> {
    let left = landmarks.get(BodyLandmark::LeftShoulder)?;
    let right = landmarks.get(BodyLandmark::RightShoulder)?;
    if !left.is_usable(VISIBILITY_FLOOR) || !right.is_usable(VISIBILITY_FLOOR) {
        return None;
    }
    Some((left, right))
}

/// Landmark echo for debug records: position as observed, visibility-or-0.
fn echo(landmark: &Landmark) -> Landmark {
    Landmark::new(
        landmark.x,
        landmark.y,
        landmark.z,
        Some(landmark.visibility.unwrap_or(0.0)),
    )
}

/// How square-on the shoulders face the camera (yaw), with the full
/// diagnostic breakdown.
///
/// The score is the cosine of the shoulder line's yaw angle in the X-Z
/// plane (1 = fully frontal, 0 = in profile), discounted by the visibility
/// asymmetry between the two shoulders.
pub fn horizontal_score_detailed(landmarks: &PoseLandmarks) -> HorizontalScoreDebug {
    let (left, right) = match usable_shoulders(landmarks) {
        Some(pair) => pair,
        None => return HorizontalScoreDebug::blank(),
    };
    if !left.z.is_finite() || !right.z.is_finite() {
        return HorizontalScoreDebug::blank();
    }

    let dx = left.x - right.x;
    let dz = left.z - right.z;
    let len = dx.hypot(dz);
    if len < DEGENERATE_EPSILON {
        // Shoulders coincide in the X-Z plane
        return HorizontalScoreDebug::blank();
    }

    let geom = dx.abs() / len;
    let vis_sym = 1.0 - (left.visibility_or_default() - right.visibility_or_default()).abs();
    let angle_deg = dz.abs().atan2(dx.abs()).to_degrees();

    HorizontalScoreDebug {
        score: geom * vis_sym,
        angle_deg,
        dx,
        dz,
        vis_sym,
        left: echo(left),
        right: echo(right),
    }
}

/// The horizontal (yaw) score alone
pub fn horizontal_score(landmarks: &PoseLandmarks) -> f32 {
    horizontal_score_detailed(landmarks).score
}

/// Shoulder-line levelness (roll): 1 when the shoulder line is perfectly
/// horizontal in the image plane, 0 when vertical. Unusable or coincident
/// shoulders score 0.
pub fn shoulder_tilt_score(landmarks: &PoseLandmarks) -> f32 {
    let (left, right) = match usable_shoulders(landmarks) {
        Some(pair) => pair,
        None => return 0.0,
    };

    let dx = left.x - right.x;
    let dy = left.y - right.y;
    if dx.abs() < DEGENERATE_EPSILON && dy.abs() < DEGENERATE_EPSILON {
        return 0.0;
    }

    let angle = dy.abs().atan2(dx.abs());
    1.0 - angle / std::f32::consts::FRAC_PI_2
}

/// Combined squareness: the geometric mean of the yaw and roll scores, so a
/// low score on either axis dominates the result.
///
/// Deliberately not part of [`compute_all_metrics`]; callers running a
/// combined framing analysis use this entry point directly.
pub fn shoulder_squareness(landmarks: &PoseLandmarks) -> f32 {
    let q = (horizontal_score(landmarks) * shoulder_tilt_score(landmarks)).sqrt();
    if q.is_finite() {
        q
    } else {
        0.0
    }
}

/// The two base metrics for one pose snapshot
pub fn compute_all_metrics(landmarks: &PoseLandmarks) -> ScoreResult {
    ScoreResult {
        horizontal_score: horizontal_score(landmarks),
        shoulder_tilt_score: shoulder_tilt_score(landmarks),
    }
}
