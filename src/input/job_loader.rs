//! Job description files in TOML or JSON

use crate::error::{Result, RelevanceError};
use crate::input::file_detector::JobFileType;
use crate::processing::job::JobSpec;
use std::path::Path;
use tokio::fs;

pub async fn load_job(path: &Path) -> Result<JobSpec> {
    let file_type = job_file_type(path)?;
    let content = fs::read_to_string(path).await.map_err(|e| {
        RelevanceError::InvalidInput(format!("Cannot read job file {}: {}", path.display(), e))
    })?;

    let job = match file_type {
        JobFileType::Toml => toml::from_str::<JobSpec>(&content).map_err(|e| {
            RelevanceError::InvalidInput(format!("Invalid job file {}: {}", path.display(), e))
        })?,
        JobFileType::Json => serde_json::from_str::<JobSpec>(&content).map_err(|e| {
            RelevanceError::InvalidInput(format!("Invalid job file {}: {}", path.display(), e))
        })?,
    };

    log::info!(
        "Loaded job '{}' ({} must-have, {} good-to-have)",
        job.title(),
        job.must_have().len(),
        job.good_to_have().len()
    );
    Ok(job)
}

pub async fn save_job(job: &JobSpec, path: &Path) -> Result<()> {
    let content = match job_file_type(path)? {
        JobFileType::Toml => toml::to_string_pretty(job)?,
        JobFileType::Json => serde_json::to_string_pretty(job)?,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(path, content).await?;
    Ok(())
}

fn job_file_type(path: &Path) -> Result<JobFileType> {
    JobFileType::from_path(path).ok_or_else(|| {
        RelevanceError::UnsupportedFormat(format!(
            "Job files must be .toml or .json: {}",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_toml_job() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("job.toml");
        std::fs::write(
            &path,
            "title = \"Data Engineer\"\nmust_have = [\"Python\", \"SQL\"]\ngood_to_have = [\"Docker\"]\n",
        )
        .unwrap();

        let job = load_job(&path).await.unwrap();
        assert_eq!(job.title(), "Data Engineer");
        assert_eq!(job.must_have(), ["python", "sql"]);
        assert_eq!(job.good_to_have(), ["docker"]);
    }

    #[tokio::test]
    async fn test_save_then_load_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("jobs").join("dev.json");
        let job = JobSpec::from_form("Dev", "Rust, Tokio", "gRPC", "BSc");

        save_job(&job, &path).await.unwrap();
        assert_eq!(load_job(&path).await.unwrap(), job);
    }

    #[tokio::test]
    async fn test_rejects_bad_job_files() {
        let temp_dir = TempDir::new().unwrap();

        let yaml = temp_dir.path().join("job.yaml");
        std::fs::write(&yaml, "title: Dev").unwrap();
        assert!(matches!(
            load_job(&yaml).await,
            Err(RelevanceError::UnsupportedFormat(_))
        ));

        let broken = temp_dir.path().join("job.json");
        std::fs::write(&broken, "{\"must_have\": \"python\"}").unwrap();
        assert!(matches!(
            load_job(&broken).await,
            Err(RelevanceError::InvalidInput(_))
        ));
    }
}
