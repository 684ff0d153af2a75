//! Text extraction from resume documents

use crate::error::{Result, RelevanceError};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        // pdf-extract is CPU bound and panics on some malformed files
        let parsed = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| {
            RelevanceError::PdfExtraction(format!(
                "PDF parser aborted on '{}': {}",
                path.display(),
                e
            ))
        })?;

        parsed.map_err(|e| {
            RelevanceError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Plain text of a Markdown document, one block per line
pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Text(content) | Event::Code(content) => text.push_str(&content),
            Event::SoftBreak => text.push(' '),
            Event::HardBreak | Event::Rule => text.push('\n'),
            Event::End(Tag::Paragraph | Tag::Heading(..) | Tag::Item | Tag::CodeBlock(_)) => {
                text.push('\n')
            }
            _ => {}
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_markdown_to_text() {
        let markdown = "# Jane Doe\n\n**Backend engineer** with `Rust` and *Go*.\n\n- Kubernetes\n- PostgreSQL\n\n[Portfolio](https://example.com)";
        let text = markdown_to_text(markdown);

        assert_eq!(
            text,
            "Jane Doe\nBackend engineer with Rust and Go.\nKubernetes\nPostgreSQL\nPortfolio"
        );
    }

    #[tokio::test]
    async fn test_plain_text_tolerates_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resume.txt");
        std::fs::write(&path, b"Python \xff developer").unwrap();

        let text = PlainTextExtractor.extract(&path).await.unwrap();
        assert!(text.starts_with("Python"));
        assert!(text.ends_with("developer"));
    }

    #[tokio::test]
    async fn test_invalid_pdf_is_extraction_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resume.pdf");
        std::fs::write(&path, b"not a pdf").unwrap();

        let result = PdfExtractor.extract(&path).await;
        assert!(matches!(result, Err(RelevanceError::PdfExtraction(_))));
    }

    #[tokio::test]
    async fn test_truncated_pdf_is_extraction_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("truncated.pdf");
        std::fs::write(&path, b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\ntrailer\n<< /Root 1 0 R").unwrap();

        let result = PdfExtractor.extract(&path).await;
        assert!(matches!(result, Err(RelevanceError::PdfExtraction(_))));
    }
}
