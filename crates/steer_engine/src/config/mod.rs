//! Configuration system
//!
//! Tuning parameters for agents and their steering behaviours, loadable
//! from TOML or RON files.

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Physical tuning for a moving agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Mass, divides steering force during integration
    pub mass: f32,
    /// Speed cap in units per tick
    pub max_speed: f32,
    /// Magnitude cap on the per-tick steering force
    pub max_force: f32,
    /// Maximum turn rate in radians per tick
    pub max_turn_rate: f32,
    /// Bounding radius
    pub radius: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            max_speed: 5.0,
            max_force: 10.0,
            max_turn_rate: std::f32::consts::PI,
            radius: 1.0,
        }
    }
}

impl Config for AgentConfig {}

/// Tuning for the steering behaviour pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteeringConfig {
    /// Wall avoidance force multiplier
    pub wall_weight: f32,
    /// Obstacle avoidance force multiplier
    pub obstacle_weight: f32,
    /// Separation force multiplier
    pub separation_weight: f32,
    /// Alignment force multiplier
    pub alignment_weight: f32,
    /// Cohesion force multiplier
    pub cohesion_weight: f32,
    /// Neighbour query radius for the group behaviours
    pub view_distance: f32,
    /// Forward feeler length; side feelers use half of it
    pub wall_detection_length: f32,
    /// Radius of the wander circle
    pub wander_radius: f32,
    /// Distance of the wander circle ahead of the agent
    pub wander_distance: f32,
    /// Magnitude of the per-tick random wander displacement
    pub wander_jitter: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            wall_weight: 1.0,
            obstacle_weight: 1.0,
            separation_weight: 1.0,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            view_distance: 50.0,
            wall_detection_length: 40.0,
            wander_radius: 10.0,
            wander_distance: 30.0,
            wander_jitter: 1.0,
        }
    }
}

impl Config for SteeringConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steering_config_toml_round_trip() {
        let config = SteeringConfig {
            view_distance: 75.0,
            ..SteeringConfig::default()
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let back: SteeringConfig = toml::from_str(&text).unwrap();
        assert!((back.view_distance - 75.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let err = AgentConfig::default().save_to_file("agents.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_agent_config_defaults_are_sane() {
        let config = AgentConfig::default();
        assert!(config.mass > 0.0);
        assert!(config.max_force > 0.0);
    }
}
