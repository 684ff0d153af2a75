//! File type detection by extension

use std::path::Path;

/// Resume document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" | "text" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    /// Files without an extension are read as plain text
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Text)
    }
}

/// Job description file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobFileType {
    Toml,
    Json,
}

impl JobFileType {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "toml" => Some(JobFileType::Toml),
            "json" => Some(JobFileType::Json),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_file_types() {
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("markdown"), FileType::Markdown);
        assert_eq!(FileType::from_path(Path::new("cv.txt")), FileType::Text);
        assert_eq!(FileType::from_path(Path::new("README")), FileType::Text);
        assert_eq!(FileType::from_path(Path::new("cv.docx")), FileType::Unknown);
    }

    #[test]
    fn test_job_file_types() {
        assert_eq!(JobFileType::from_path(Path::new("job.toml")), Some(JobFileType::Toml));
        assert_eq!(JobFileType::from_path(Path::new("job.JSON")), Some(JobFileType::Json));
        assert_eq!(JobFileType::from_path(Path::new("job.yaml")), None);
    }
}
