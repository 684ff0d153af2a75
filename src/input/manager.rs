//! Input manager routing resume files to the right extractor

use crate::error::{Result, RelevanceError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(path) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.is_file() {
            return Err(RelevanceError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match FileType::from_path(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text resume: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown resume: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(RelevanceError::UnsupportedFormat(format!(
                    "Unsupported resume file type: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_extracts_and_caches() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resume.md");
        std::fs::write(&path, "# Skills\n\n- Python\n- SQL").unwrap();

        let mut manager = InputManager::new();
        let text = manager.extract_text(&path).await.unwrap();
        assert_eq!(text, "Skills\nPython\nSQL");
        assert_eq!(manager.cache_size(), 1);

        std::fs::remove_file(&path).unwrap();
        assert_eq!(manager.extract_text(&path).await.unwrap(), text);

        manager.clear_cache();
        assert!(manager.extract_text(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_cache_can_be_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resume.txt");
        std::fs::write(&path, "Rust").unwrap();

        let mut manager = InputManager::new().with_cache(false);
        manager.extract_text(&path).await.unwrap();
        assert_eq!(manager.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_rejects_missing_and_unsupported_files() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = InputManager::new();

        let missing = manager.extract_text(&temp_dir.path().join("nope.txt")).await;
        assert!(matches!(missing, Err(RelevanceError::InvalidInput(_))));

        let docx = temp_dir.path().join("resume.docx");
        std::fs::write(&docx, "binary").unwrap();
        let unsupported = manager.extract_text(&docx).await;
        assert!(matches!(unsupported, Err(RelevanceError::UnsupportedFormat(_))));
    }
}
