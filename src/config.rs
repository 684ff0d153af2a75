//! Configuration management for the relevance engine

use crate::error::{Result, RelevanceError};
use crate::processing::embedding_manager::EmbeddingModelInfo;
use crate::processing::scoring::{ALPHA, W_GOOD, W_MUST};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Missing sections fall back to their defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub models: ModelConfig,
    pub scoring: ScoringConfig,
    pub enrichment: EnrichmentConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    pub default_embedding_model: String,
    /// Extra catalogue entries by model id; an id already in the built-in
    /// catalogue is replaced
    #[serde(default)]
    pub available_models: BTreeMap<String, EmbeddingModelInfo>,
}

/// Blending and requirement weights used by the score composer and hard matcher
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub alpha: f64,
    pub must_weight: f64,
    pub good_weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    pub enabled: bool,
    pub model: String,
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub resume_char_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            alpha: ALPHA,
            must_weight: W_MUST,
            good_weight: W_GOOD,
        }
    }
}

impl ScoringConfig {
    /// Hard requirements must dominate both the blend and the requirement weighting
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.5 && self.alpha <= 1.0) {
            return Err(RelevanceError::Configuration(format!(
                "scoring.alpha must be in (0.5, 1.0], got {}",
                self.alpha
            )));
        }
        if !(self.good_weight > 0.0 && self.must_weight > self.good_weight) {
            return Err(RelevanceError::Configuration(format!(
                "scoring.must_weight ({}) must exceed scoring.good_weight ({}) and both must be positive",
                self.must_weight, self.good_weight
            )));
        }
        Ok(())
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "gemini-1.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 120,
            resume_char_limit: 4000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-relevance")
            .join("models");

        Self {
            models: ModelConfig {
                models_dir,
                default_embedding_model: "potion-base-8M".to_string(),
                available_models: BTreeMap::new(),
            },
            scoring: ScoringConfig::default(),
            enrichment: EnrichmentConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)?;
            config.scoring.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-relevance")
            .join("config.toml")
    }

    pub fn models_dir(&self) -> &PathBuf {
        &self.models.models_dir
    }

    /// Directory the default embedding model is expected in
    pub fn embedding_model_path(&self) -> PathBuf {
        self.models
            .models_dir
            .join(&self.models.default_embedding_model)
    }
}
