//! Resume text extraction and job file loading

pub mod file_detector;
pub mod job_loader;
pub mod manager;
pub mod text_extractor;

pub use job_loader::{load_job, save_job};
pub use manager::InputManager;
