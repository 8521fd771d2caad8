//! Top-level planning configuration and file loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::collision::CollisionSection;
use super::error::ConfigLoadError;
use super::planner::PlannerConfig;

/// Default location searched by [`PlanConfig::load_default`]
pub const DEFAULT_CONFIG_PATH: &str = "configs/plan.yaml";

/// Full planning configuration loaded from YAML
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct PlanConfig {
    /// Tree planner settings
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Obstacles and segment checking
    #[serde(default)]
    pub collision: CollisionSection,
}

impl PlanConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/plan.yaml), or use defaults
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string and validate
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: PlanConfig =
            serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config.planner.validate()?;
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        serde_yaml::to_string(self).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = PlanConfig::default();
        assert_eq!(config.planner.step_size, 1.0);
        assert!(config.collision.is_empty());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = PlanConfig::default();
        let yaml = config.to_yaml().unwrap();
        let parsed = PlanConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
planner:
  max_iterations: 2000
  step_size: 0.5
collision:
  margin: 0.2
  obstacles:
    - center: [5.0, 0.0]
      radius: 1.5
"#;
        let config = PlanConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.planner.max_iterations, 2000);
        assert_eq!(config.planner.step_size, 0.5);
        assert_eq!(config.planner.goal_sample_rate, 0.2);
        assert_eq!(config.collision.obstacles.len(), 1);
        assert_eq!(config.collision.segment_samples, 10);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let yaml = "planner:\n  step_size: -1.0\n";
        match PlanConfig::from_yaml(yaml) {
            Err(ConfigLoadError::Invalid(ConfigError::NonPositiveStepSize(v))) => {
                assert_eq!(v, -1.0)
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            PlanConfig::from_yaml("planner: [1, 2"),
            Err(ConfigLoadError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "planner:\n  seed: 7\n  variant: rrt").unwrap();

        let config = PlanConfig::load(file.path()).unwrap();
        assert_eq!(config.planner.seed, 7);

        let missing = PlanConfig::load(Path::new("/nonexistent/plan.yaml"));
        assert!(matches!(missing, Err(ConfigLoadError::Io(_))));
    }
}
