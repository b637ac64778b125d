// Data models for pose landmarks and posture scores

pub mod pose;
pub mod scores;
