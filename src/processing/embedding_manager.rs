//! Embedding model management: catalogue, download and lookup of Model2Vec models

use crate::error::{Result, RelevanceError};
use hf_hub::api::tokio::Api;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;
use strsim::jaro_winkler;
use tokio::fs;

/// Information about an available embedding model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingModelInfo {
    pub name: String,
    pub repo_id: String,
    pub size_mb: u64,
    pub description: String,
    pub dimensions: u32,
}

/// Manager for embedding models: download, discovery and selection
pub struct EmbeddingModelManager {
    models_dir: PathBuf,
    available_models: BTreeMap<String, EmbeddingModelInfo>,
    downloaded_models: HashSet<String>,
}

impl EmbeddingModelManager {
    pub async fn new(models_dir: PathBuf) -> Result<Self> {
        if !models_dir.exists() {
            fs::create_dir_all(&models_dir).await?;
        }

        let mut manager = Self {
            models_dir,
            available_models: Self::catalogue(),
            downloaded_models: HashSet::new(),
        };

        manager.scan_downloaded_models().await?;
        Ok(manager)
    }

    /// Add or replace catalogue entries, typically from `models.available_models`
    pub fn with_models(mut self, models: impl IntoIterator<Item = (String, EmbeddingModelInfo)>) -> Self {
        self.available_models.extend(models);
        self
    }

    fn catalogue() -> BTreeMap<String, EmbeddingModelInfo> {
        let mut models = BTreeMap::new();

        models.insert(
            "potion-base-8M".to_string(),
            EmbeddingModelInfo {
                name: "Potion Base 8M".to_string(),
                repo_id: "minishlab/potion-base-8M".to_string(),
                size_mb: 33,
                description: "Compact Model2Vec embeddings, recommended default".to_string(),
                dimensions: 256,
            },
        );

        models.insert(
            "m2v-base".to_string(),
            EmbeddingModelInfo {
                name: "Model2Vec Base".to_string(),
                repo_id: "minishlab/M2V_base_output".to_string(),
                size_mb: 90,
                description: "Model2Vec base output model".to_string(),
                dimensions: 256,
            },
        );

        models.insert(
            "potion-retrieval-32M".to_string(),
            EmbeddingModelInfo {
                name: "Potion Retrieval 32M".to_string(),
                repo_id: "minishlab/potion-retrieval-32M".to_string(),
                size_mb: 128,
                description: "Larger Model2Vec model tuned for retrieval".to_string(),
                dimensions: 512,
            },
        );

        models
    }

    async fn scan_downloaded_models(&mut self) -> Result<()> {
        let mut entries = fs::read_dir(&self.models_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir()
                && Self::is_valid_model_directory(&entry.path()).await
            {
                self.downloaded_models
                    .insert(entry.file_name().to_string_lossy().to_string());
            }
        }

        Ok(())
    }

    /// A Model2Vec directory needs a tokenizer and safetensors weights
    async fn is_valid_model_directory(path: &Path) -> bool {
        fs::metadata(path.join("tokenizer.json")).await.is_ok()
            && fs::metadata(path.join("model.safetensors")).await.is_ok()
    }

    /// Download a model from the Hugging Face Hub into `models_dir/<model_id>`
    pub async fn download_model(&mut self, model_id: &str, force: bool) -> Result<PathBuf> {
        let model_id = self.resolve_model_id(model_id).ok_or_else(|| self.unknown_model(model_id))?;
        let model_info = self
            .available_models
            .get(&model_id)
            .cloned()
            .ok_or_else(|| RelevanceError::ModelNotFound(model_id.clone()))?;

        let model_dir = self.models_dir.join(&model_id);
        if !force && self.downloaded_models.contains(&model_id) {
            return Ok(model_dir);
        }

        fs::create_dir_all(&model_dir).await?;

        let api = Api::new()
            .map_err(|e| RelevanceError::Network(format!("Failed to initialize HF API: {}", e)))?;
        let repo = api.model(model_info.repo_id.clone());

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(120));

        for (file, required) in [
            ("model.safetensors", true),
            ("tokenizer.json", true),
            ("config.json", false),
        ] {
            spinner.set_message(format!("{}: {}", model_info.repo_id, file));
            match repo.get(file).await {
                Ok(cached_path) => {
                    fs::copy(&cached_path, model_dir.join(file)).await?;
                    log::debug!("Downloaded {} for {}", file, model_id);
                }
                Err(e) if required => {
                    spinner.finish_and_clear();
                    return Err(RelevanceError::Network(format!(
                        "Failed to download required file {}: {}",
                        file, e
                    )));
                }
                Err(e) => log::warn!("Optional file {} not available: {}", file, e),
            }
        }

        spinner.finish_and_clear();
        self.downloaded_models.insert(model_id.clone());
        log::info!("Embedding model {} stored in {}", model_id, model_dir.display());

        Ok(model_dir)
    }

    pub fn get_model_path(&self, model_id: &str) -> Option<PathBuf> {
        if self.downloaded_models.contains(model_id) {
            Some(self.models_dir.join(model_id))
        } else {
            None
        }
    }

    pub fn list_available_models(&self) -> Vec<(&String, &EmbeddingModelInfo)> {
        self.available_models.iter().collect()
    }

    pub fn is_model_downloaded(&self, model_id: &str) -> bool {
        self.downloaded_models.contains(model_id)
    }

    pub fn get_model_info(&self, model_id: &str) -> Option<&EmbeddingModelInfo> {
        self.resolve_model_id(model_id)
            .and_then(|id| self.available_models.get(&id))
    }

    /// Resolve a model id, repo id or display name to a catalogue id
    pub fn resolve_model_id(&self, input: &str) -> Option<String> {
        if self.available_models.contains_key(input) {
            return Some(input.to_string());
        }

        let input_lower = input.to_lowercase();
        self.available_models
            .iter()
            .find(|(id, info)| {
                info.repo_id == input
                    || info.name.to_lowercase() == input_lower
                    || id.to_lowercase() == input_lower
            })
            .map(|(id, _)| id.clone())
    }

    /// Closest catalogue id, for "did you mean" hints
    pub fn suggest_model_id(&self, input: &str) -> Option<&str> {
        let input_lower = input.to_lowercase();
        self.available_models
            .keys()
            .map(|id| (id, jaro_winkler(&input_lower, &id.to_lowercase())))
            .filter(|(_, similarity)| *similarity >= 0.8)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id.as_str())
    }

    fn unknown_model(&self, input: &str) -> RelevanceError {
        match self.suggest_model_id(input) {
            Some(suggestion) => RelevanceError::ModelNotFound(format!(
                "{} (did you mean '{}'?)",
                input, suggestion
            )),
            None => RelevanceError::ModelNotFound(input.to_string()),
        }
    }
}
