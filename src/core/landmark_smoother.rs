// Temporal landmark smoothing - de-jitters raw per-frame positions before scoring

use crate::models::pose::{BodyLandmark, Landmark, PoseLandmarks};

/// Default EMA weight for the newest sample. Larger values track the raw
/// signal more closely; 1.0 disables smoothing entirely.
pub const DEFAULT_SMOOTHING_ALPHA: f32 = 0.2;

/// Exponential-moving-average filter over landmark positions, owned by one
/// session (one camera stream or one image-processing run).
///
/// Positions are smoothed per axis; visibility is copied verbatim from the
/// raw frame so an occlusion flips confidence instantly even while the
/// position stays smoothed. A slot the detector stops returning keeps
/// reporting its last smoothed value with no expiry or decay.
pub struct LandmarkSmoother {
    smoothed: PoseLandmarks,
    alpha: f32,
}

impl LandmarkSmoother {
    pub fn new() -> Self {
        Self::with_alpha(DEFAULT_SMOOTHING_ALPHA)
    }

    pub fn with_alpha(alpha: f32) -> Self {
        Self {
            smoothed: PoseLandmarks::new(),
            alpha,
        }
    }

    /// Clear all smoothed state. Must run once per new session so state
    /// never leaks across streams.
    pub fn reset(&mut self) {
        self.smoothed = PoseLandmarks::new();
    }

    /// Fold one raw frame into the smoothed state and return the full
    /// current state (including slots untouched by this frame).
    ///
    /// A slot seen for the first time is adopted verbatim; after that each
    /// present slot blends `alpha * raw + (1 - alpha) * previous` per axis.
    pub fn update(&mut self, raw: &PoseLandmarks) -> PoseLandmarks {
        for slot in BodyLandmark::ALL {
            let Some(sample) = raw.get(slot) else {
                // Absent from this frame: last smoothed value stays as-is
                continue;
            };
            let next = match self.smoothed.get(slot) {
                Some(prev) => Landmark::new(
                    self.alpha * sample.x + (1.0 - self.alpha) * prev.x,
                    self.alpha * sample.y + (1.0 - self.alpha) * prev.y,
                    self.alpha * sample.z + (1.0 - self.alpha) * prev.z,
                    sample.visibility,
                ),
                None => *sample,
            };
            self.smoothed.set(slot, next);
        }
        self.smoothed.clone()
    }
}

impl Default for LandmarkSmoother {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_at(x: f32, visibility: f32) -> PoseLandmarks {
        let mut landmarks = PoseLandmarks::new();
        landmarks.set(
            BodyLandmark::LeftShoulder,
            Landmark::new(x, 0.5, 0.0, Some(visibility)),
        );
        landmarks
    }

    #[test]
    fn test_first_frame_adopted_verbatim() {
        let mut smoother = LandmarkSmoother::new();
        let out = smoother.update(&frame_at(0.42, 0.9));
        let lm = out.left_shoulder.unwrap();
        assert_eq!(lm.x, 0.42);
        assert_eq!(lm.visibility, Some(0.9));
    }

    #[test]
    fn test_converges_geometrically_toward_constant() {
        let mut smoother = LandmarkSmoother::new();
        smoother.update(&frame_at(0.0, 1.0));

        // Distance to the constant shrinks by (1 - alpha) every frame
        let mut expected_distance = 1.0_f32;
        for _ in 0..10 {
            let out = smoother.update(&frame_at(1.0, 1.0));
            expected_distance *= 1.0 - DEFAULT_SMOOTHING_ALPHA;
            let distance = 1.0 - out.left_shoulder.unwrap().x;
            assert!((distance - expected_distance).abs() < 1e-5);
        }
    }

    #[test]
    fn test_absent_slot_stays_sticky() {
        let mut smoother = LandmarkSmoother::new();
        smoother.update(&frame_at(0.42, 0.9));

        // Frames with only the nose present leave the shoulder untouched
        let mut nose_only = PoseLandmarks::new();
        nose_only.set(BodyLandmark::Nose, Landmark::new(0.5, 0.2, 0.0, Some(1.0)));
        for _ in 0..5 {
            let out = smoother.update(&nose_only);
            let lm = out.left_shoulder.unwrap();
            assert_eq!(lm.x, 0.42);
            assert_eq!(lm.visibility, Some(0.9));
        }
    }

    #[test]
    fn test_visibility_copied_verbatim() {
        let mut smoother = LandmarkSmoother::new();
        smoother.update(&frame_at(0.4, 1.0));
        let out = smoother.update(&frame_at(0.4, 0.05));
        // Position smoothed, visibility flipped instantly
        assert_eq!(out.left_shoulder.unwrap().visibility, Some(0.05));
    }

    #[test]
    fn test_slot_first_seen_mid_stream_adopted_verbatim() {
        let mut smoother = LandmarkSmoother::new();
        smoother.update(&frame_at(0.4, 1.0));

        let mut with_nose = frame_at(0.4, 1.0);
        with_nose.set(BodyLandmark::Nose, Landmark::new(0.7, 0.2, 0.0, Some(1.0)));
        let out = smoother.update(&with_nose);
        assert_eq!(out.nose.unwrap().x, 0.7);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut smoother = LandmarkSmoother::new();
        smoother.update(&frame_at(0.42, 0.9));
        smoother.reset();

        let out = smoother.update(&PoseLandmarks::new());
        assert!(out.is_empty());

        // After reset the next observed frame is adopted, not blended
        let out = smoother.update(&frame_at(0.9, 1.0));
        assert_eq!(out.left_shoulder.unwrap().x, 0.9);
    }
}
