use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::pose::{PoseError, PoseResult};

/// Scoring pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    /// EMA weight for the newest landmark sample, in (0, 1]; 1.0 disables
    /// smoothing
    pub smoothing_alpha: f32,
    /// Trailing-window length for score averaging, in frames
    pub aggregation_window: usize,
    /// Expected capture rate; the default window covers about one second at
    /// this rate
    pub target_fps: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: 0.2,
            aggregation_window: 30,
            target_fps: 30,
        }
    }
}

impl ScoringConfig {
    /// Load configuration from file, creating with defaults if it doesn't exist
    pub fn load() -> PoseResult<Self> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .map_err(|e| PoseError::Io(e.to_string()))?;
            let config: ScoringConfig = serde_json::from_str(&contents)
                .map_err(|e| PoseError::InvalidConfig(e.to_string()))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> PoseResult<()> {
        self.validate()?;

        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PoseError::Io(e.to_string()))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PoseError::InvalidConfig(e.to_string()))?;
        std::fs::write(&config_path, contents).map_err(|e| PoseError::Io(e.to_string()))?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> PoseResult<()> {
        if self.smoothing_alpha <= 0.0 || self.smoothing_alpha > 1.0 {
            return Err(PoseError::InvalidConfig(format!(
                "Invalid smoothing alpha: {}. Must be greater than 0.0 and at most 1.0",
                self.smoothing_alpha
            )));
        }

        if self.aggregation_window == 0 || self.aggregation_window > 3600 {
            return Err(PoseError::InvalidConfig(format!(
                "Invalid aggregation window: {}. Must be between 1 and 3600 frames",
                self.aggregation_window
            )));
        }

        if self.target_fps == 0 || self.target_fps > 240 {
            return Err(PoseError::InvalidConfig(format!(
                "Invalid target FPS: {}. Must be between 1 and 240",
                self.target_fps
            )));
        }

        Ok(())
    }

    /// Get the configuration file path
    fn get_config_path() -> PoseResult<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| PoseError::Io("Could not determine home directory".to_string()))?;

        let mut path = PathBuf::from(home);
        path.push(".posecheck");
        path.push("config");
        path.push("settings.json");

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScoringConfig::default();
        assert_eq!(config.smoothing_alpha, 0.2);
        assert_eq!(config.aggregation_window, 30);
        assert_eq!(config.target_fps, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ScoringConfig::default();

        // Alpha must stay in (0, 1]
        config.smoothing_alpha = 0.0;
        assert!(config.validate().is_err());
        config.smoothing_alpha = 1.5;
        assert!(config.validate().is_err());
        config.smoothing_alpha = 1.0;
        assert!(config.validate().is_ok());
        config.smoothing_alpha = 0.2;

        config.aggregation_window = 0;
        assert!(config.validate().is_err());
        config.aggregation_window = 30;

        config.target_fps = 0;
        assert!(config.validate().is_err());
        config.target_fps = 500;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = ScoringConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ScoringConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
