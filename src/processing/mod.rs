//! Requirement extraction, matching and scoring

pub mod embedding_manager;
pub mod evaluator;
pub mod extractor;
pub mod feedback;
pub mod hard_matcher;
pub mod job;
pub mod scoring;
pub mod semantic;
pub mod synonyms;
pub mod text_processor;
