use crate::core::classifier::LogisticRegression;
use crate::core::trainer::{DEFAULT_SAMPLES_PER_LEAD, DEFAULT_SPLIT_SEED, DEFAULT_TEST_FRACTION};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, ScoringError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub training: TrainingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: String,
    /// Inverse L2 penalty strength.
    pub regularization: f64,
    pub max_iter: usize,
    pub tolerance: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: "model.bin".to_string(),
            regularization: LogisticRegression::DEFAULT_REGULARIZATION,
            max_iter: LogisticRegression::DEFAULT_MAX_ITER,
            tolerance: LogisticRegression::DEFAULT_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub samples_per_lead: usize,
    pub test_fraction: f64,
    pub split_seed: u64,
    pub label_seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            samples_per_lead: DEFAULT_SAMPLES_PER_LEAD,
            test_fraction: DEFAULT_TEST_FRACTION,
            split_seed: DEFAULT_SPLIT_SEED,
            label_seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "matches.json".to_string(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ScoringError::MissingConfigError {
                field: format!("config file {}", path.as_ref().display()),
            },
            _ => ScoringError::IoError(e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScoringError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MODEL_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScoringError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("model.path", &self.model.path)?;
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_exclusive_range(
            "model.regularization",
            self.model.regularization,
            0.0,
            f64::INFINITY,
        )?;
        validation::validate_range("model.max_iter", self.model.max_iter, 1, 1_000_000)?;
        validation::validate_exclusive_range(
            "model.tolerance",
            self.model.tolerance,
            0.0,
            f64::INFINITY,
        )?;
        validation::validate_positive_number(
            "training.samples_per_lead",
            self.training.samples_per_lead,
            1,
        )?;
        validation::validate_exclusive_range(
            "training.test_fraction",
            self.training.test_fraction,
            0.0,
            1.0,
        )?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn model_path(&self) -> &str {
        &self.model.path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn samples_per_lead(&self) -> usize {
        self.training.samples_per_lead
    }

    fn test_fraction(&self) -> f64 {
        self.training.test_fraction
    }

    fn split_seed(&self) -> u64 {
        self.training.split_seed
    }

    fn label_seed(&self) -> Option<u64> {
        self.training.label_seed
    }

    fn regularization(&self) -> f64 {
        self.model.regularization
    }

    fn max_iter(&self) -> usize {
        self.model.max_iter
    }

    fn tolerance(&self) -> f64 {
        self.model.tolerance
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[model]
path = "/var/lib/scoring/model.bin"
regularization = 0.5
max_iter = 50
tolerance = 0.001

[training]
samples_per_lead = 5
test_fraction = 0.25
split_seed = 7
label_seed = 99

[output]
path = "out/matches.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.model_path(), "/var/lib/scoring/model.bin");
        assert_eq!(config.max_iter(), 50);
        assert_eq!(config.regularization(), 0.5);
        assert_eq!(config.samples_per_lead(), 5);
        assert_eq!(config.split_seed(), 7);
        assert_eq!(config.label_seed(), Some(99));
        assert_eq!(config.output_path(), "out/matches.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = TomlConfig::from_toml_str("[model]\npath = \"custom.bin\"\n").unwrap();

        assert_eq!(config.model_path(), "custom.bin");
        assert_eq!(config.regularization(), 1.0);
        assert_eq!(config.max_iter(), 100);
        assert_eq!(config.samples_per_lead(), 3);
        assert_eq!(config.test_fraction(), 0.2);
        assert_eq!(config.split_seed(), 42);
        assert_eq!(config.label_seed(), None);
        assert_eq!(config, TomlConfig {
            model: ModelConfig {
                path: "custom.bin".to_string(),
                ..Default::default()
            },
            ..Default::default()
        });
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LEAD_SCORING_TEST_MODEL_DIR", "/tmp/models");

        let config =
            TomlConfig::from_toml_str("[model]\npath = \"${LEAD_SCORING_TEST_MODEL_DIR}/model.bin\"\n")
                .unwrap();
        assert_eq!(config.model_path(), "/tmp/models/model.bin");

        std::env::remove_var("LEAD_SCORING_TEST_MODEL_DIR");
    }

    #[test]
    fn test_unset_env_var_is_left_in_place() {
        let config =
            TomlConfig::from_toml_str("[output]\npath = \"${LEAD_SCORING_TEST_UNSET}/m.json\"\n")
                .unwrap();
        assert_eq!(config.output_path(), "${LEAD_SCORING_TEST_UNSET}/m.json");
    }

    #[test]
    fn test_config_validation() {
        let bad_fraction = TomlConfig::from_toml_str("[training]\ntest_fraction = 1.5\n").unwrap();
        assert!(matches!(
            bad_fraction.validate(),
            Err(ScoringError::InvalidConfigValueError { ref field, .. }) if field == "training.test_fraction"
        ));

        let bad_samples = TomlConfig::from_toml_str("[training]\nsamples_per_lead = 0\n").unwrap();
        assert!(bad_samples.validate().is_err());

        let bad_path = TomlConfig::from_toml_str("[model]\npath = \"\"\n").unwrap();
        assert!(bad_path.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let result = TomlConfig::from_toml_str("[model\npath = 1");
        assert!(matches!(result, Err(ScoringError::ConfigValidationError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[training]\nsamples_per_lead = 2\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.samples_per_lead(), 2);
    }

    #[test]
    fn test_missing_config_file_is_reported() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");

        let err = TomlConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ScoringError::MissingConfigError { ref field } if field.contains("absent.toml")));
        assert_eq!(err.severity(), crate::utils::error::ErrorSeverity::High);
    }
}
