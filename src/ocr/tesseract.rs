//! Tesseract engine (CLI wrapper).

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use tracing::debug;

use crate::ocr::preprocess::prepare_for_ocr;
use crate::ocr::{OcrEngine, OcrError};

#[derive(Debug, Clone)]
pub struct TesseractConfig {
    pub binary_path: String,
    pub lang: String,
    /// Page segmentation mode; 6 treats the image as one uniform block of text.
    pub psm: u8,
    /// Engine mode; 1 is the LSTM engine.
    pub oem: u8,
}

impl Default for TesseractConfig {
    fn default() -> Self {
        Self {
            binary_path: "tesseract".to_string(),
            lang: "eng".to_string(),
            psm: 6,
            oem: 1,
        }
    }
}

pub struct TesseractEngine {
    config: TesseractConfig,
    runs: u32,
}

impl TesseractEngine {
    pub fn new(config: TesseractConfig) -> Self {
        Self { config, runs: 0 }
    }

    fn scratch_path(&mut self) -> PathBuf {
        self.runs += 1;
        std::env::temp_dir().join(format!(
            "tasting-audit-ocr-{}-{}.png",
            std::process::id(),
            self.runs
        ))
    }

    fn run_cli(&self, input: &Path) -> Result<String, OcrError> {
        let binary = &self.config.binary_path;
        let output = Command::new(binary)
            .arg(input)
            .arg("stdout")
            .arg("-l")
            .arg(&self.config.lang)
            .arg("--oem")
            .arg(self.config.oem.to_string())
            .arg("--psm")
            .arg(self.config.psm.to_string())
            .output()
            .map_err(|source| OcrError::Spawn {
                binary: binary.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(OcrError::Engine {
                binary: binary.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl OcrEngine for TesseractEngine {
    fn extract_text(&mut self, image_path: &Path) -> Result<String, OcrError> {
        let start = Instant::now();

        let img = image::open(image_path)?;
        let prepared = prepare_for_ocr(&img);
        let scratch = self.scratch_path();
        prepared.save(&scratch)?;

        let result = self.run_cli(&scratch);
        let _ = std::fs::remove_file(&scratch);

        debug!(
            image = %image_path.display(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "tesseract finished"
        );
        result
    }
}
