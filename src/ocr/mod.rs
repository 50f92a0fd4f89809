//! LinkedIn screenshot OCR: preprocess, extract text with an external engine,
//! write the text back into the matching expert tasting.

pub mod backfill;
pub mod preprocess;
pub mod tesseract;

use std::path::Path;

use thiserror::Error;

pub use backfill::{clean_text, run_backfill, BackfillSummary};
pub use tesseract::{TesseractConfig, TesseractEngine};

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("image processing failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{binary} exited with {status}: {stderr}")]
    Engine {
        binary: String,
        status: String,
        stderr: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Text extraction from one image file.
pub trait OcrEngine {
    fn extract_text(&mut self, image_path: &Path) -> Result<String, OcrError>;
}
