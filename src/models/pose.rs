// Data models for body-pose landmarks consumed by the scoring engine

use serde::{Deserialize, Serialize};

// ==============================================================================
// Landmark
// ==============================================================================

/// A single 3D pose landmark with an optional detection confidence
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32, // Normalized [0, 1] image coordinates
    pub y: f32, // Normalized [0, 1] image coordinates
    pub z: f32, // Relative depth, larger = farther from the camera
    pub visibility: Option<f32>, // Detection confidence [0, 1]; None = not reported
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: Option<f32>) -> Self {
        Self {
            x,
            y,
            z,
            visibility,
        }
    }

    /// Visibility with the uniform default: a landmark whose detector did not
    /// report a confidence is treated as fully visible.
    pub fn visibility_or_default(&self) -> f32 {
        self.visibility.unwrap_or(1.0)
    }

    /// Whether this landmark may participate in scoring. Visibility must be
    /// strictly above the threshold.
    pub fn is_usable(&self, threshold: f32) -> bool {
        self.visibility_or_default() > threshold
    }

    /// The "not available" sentinel echoed inside degenerate debug records.
    /// Positions are NaN, visibility is zero.
    pub fn invalid() -> Self {
        Self {
            x: f32::NAN,
            y: f32::NAN,
            z: f32::NAN,
            visibility: Some(0.0),
        }
    }
}

// ==============================================================================
// Landmark indices (MediaPipe Pose numbering, consumed subset only)
// ==============================================================================

/// The body landmarks the scoring engine reads. Indices follow the MediaPipe
/// Pose model; everything else the detector emits is ignored upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BodyLandmark {
    Nose = 0,
    LeftEye = 2,
    RightEye = 5,
    LeftShoulder = 11,
    RightShoulder = 12,
}

impl BodyLandmark {
    pub const ALL: [BodyLandmark; 5] = [
        BodyLandmark::Nose,
        BodyLandmark::LeftEye,
        BodyLandmark::RightEye,
        BodyLandmark::LeftShoulder,
        BodyLandmark::RightShoulder,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(BodyLandmark::Nose),
            2 => Some(BodyLandmark::LeftEye),
            5 => Some(BodyLandmark::RightEye),
            11 => Some(BodyLandmark::LeftShoulder),
            12 => Some(BodyLandmark::RightShoulder),
            _ => None,
        }
    }
}

// ==============================================================================
// Pose landmarks (one frame)
// ==============================================================================

/// Raw landmark as emitted by the detector bridge, keyed by model index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RawLandmark {
    pub index: u8,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub visibility: Option<f32>,
}

/// One frame's landmarks, as a fixed set of optional slots rather than a
/// dynamic index map. "Slot present" is an explicit check; slot order never
/// matters. Produced fresh each frame and never mutated by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoseLandmarks {
    pub nose: Option<Landmark>,
    pub left_eye: Option<Landmark>,
    pub right_eye: Option<Landmark>,
    pub left_shoulder: Option<Landmark>,
    pub right_shoulder: Option<Landmark>,
}

impl PoseLandmarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: BodyLandmark) -> Option<&Landmark> {
        match slot {
            BodyLandmark::Nose => self.nose.as_ref(),
            BodyLandmark::LeftEye => self.left_eye.as_ref(),
            BodyLandmark::RightEye => self.right_eye.as_ref(),
            BodyLandmark::LeftShoulder => self.left_shoulder.as_ref(),
            BodyLandmark::RightShoulder => self.right_shoulder.as_ref(),
        }
    }

    pub fn set(&mut self, slot: BodyLandmark, landmark: Landmark) {
        match slot {
            BodyLandmark::Nose => self.nose = Some(landmark),
            BodyLandmark::LeftEye => self.left_eye = Some(landmark),
            BodyLandmark::RightEye => self.right_eye = Some(landmark),
            BodyLandmark::LeftShoulder => self.left_shoulder = Some(landmark),
            BodyLandmark::RightShoulder => self.right_shoulder = Some(landmark),
        }
    }

    pub fn is_empty(&self) -> bool {
        BodyLandmark::ALL.iter().all(|slot| self.get(*slot).is_none())
    }

    /// Build a frame from detector output. Indices outside the consumed set
    /// are dropped; a duplicate index keeps the last occurrence.
    pub fn from_raw(raw: &[RawLandmark]) -> Self {
        let mut landmarks = Self::new();
        for entry in raw {
            if let Some(slot) = BodyLandmark::from_index(entry.index) {
                landmarks.set(
                    slot,
                    Landmark::new(entry.x, entry.y, entry.z, entry.visibility),
                );
            }
        }
        landmarks
    }
}

// ==============================================================================
// Error Types
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PoseError {
    #[error("Invalid landmark payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(String),
}

pub type PoseResult<T> = Result<T, PoseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_default() {
        let reported = Landmark::new(0.5, 0.5, 0.0, Some(0.4));
        let unreported = Landmark::new(0.5, 0.5, 0.0, None);
        assert_eq!(reported.visibility_or_default(), 0.4);
        assert_eq!(unreported.visibility_or_default(), 1.0);
    }

    #[test]
    fn test_usability_threshold_is_strict() {
        let at_threshold = Landmark::new(0.5, 0.5, 0.0, Some(0.3));
        let above = Landmark::new(0.5, 0.5, 0.0, Some(0.31));
        assert!(!at_threshold.is_usable(0.3), "visibility == threshold is unusable");
        assert!(above.is_usable(0.3));
    }

    #[test]
    fn test_invalid_sentinel() {
        let sentinel = Landmark::invalid();
        assert!(sentinel.x.is_nan());
        assert!(sentinel.y.is_nan());
        assert!(sentinel.z.is_nan());
        assert_eq!(sentinel.visibility, Some(0.0));
    }

    #[test]
    fn test_body_landmark_index_round_trip() {
        for slot in BodyLandmark::ALL {
            assert_eq!(BodyLandmark::from_index(slot.index()), Some(slot));
        }
        // Indices the engine never reads
        assert_eq!(BodyLandmark::from_index(1), None);
        assert_eq!(BodyLandmark::from_index(13), None);
    }

    #[test]
    fn test_from_raw_ignores_unknown_indices() {
        let raw = vec![
            RawLandmark {
                index: 11,
                x: 0.4,
                y: 0.5,
                z: 0.0,
                visibility: Some(0.9),
            },
            RawLandmark {
                index: 23, // hip, not consumed
                x: 0.5,
                y: 0.9,
                z: 0.0,
                visibility: Some(0.9),
            },
        ];
        let landmarks = PoseLandmarks::from_raw(&raw);
        assert!(landmarks.left_shoulder.is_some());
        assert!(landmarks.right_shoulder.is_none());
        assert!(!landmarks.is_empty());
    }

    #[test]
    fn test_raw_landmark_visibility_optional_in_json() {
        let json = r#"{"index": 12, "x": 0.6, "y": 0.5, "z": 0.1}"#;
        let raw: RawLandmark = serde_json::from_str(json).unwrap();
        assert_eq!(raw.visibility, None);
        let landmarks = PoseLandmarks::from_raw(&[raw]);
        assert_eq!(
            landmarks.right_shoulder.unwrap().visibility_or_default(),
            1.0
        );
    }
}
