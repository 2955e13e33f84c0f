use std::io::Write;
use std::process::{Command, Stdio};

use image::GrayImage;
use tracing::{debug, info};

use super::raster::encode_png;
use crate::error::RecognizeError;

/// External text-recognition engine. The host owns its lifecycle: the
/// recognizer calls `initialize` at most once, the host calls `shutdown`.
pub trait OcrEngine: Send {
    fn initialize(&mut self) -> Result<(), RecognizeError>;
    fn recognize(&mut self, image: &GrayImage) -> Result<String, RecognizeError>;
    fn shutdown(&mut self) {}
}

impl<E: OcrEngine + ?Sized> OcrEngine for Box<E> {
    fn initialize(&mut self) -> Result<(), RecognizeError> {
        (**self).initialize()
    }

    fn recognize(&mut self, image: &GrayImage) -> Result<String, RecognizeError> {
        (**self).recognize(image)
    }

    fn shutdown(&mut self) {
        (**self).shutdown()
    }
}

/// Runs the `tesseract` command line, piping a PNG through stdin.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    command: String,
    language: String,
}

impl TesseractEngine {
    pub fn new(command: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
        }
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new("tesseract", "eng")
    }
}

impl OcrEngine for TesseractEngine {
    fn initialize(&mut self) -> Result<(), RecognizeError> {
        let output = Command::new(&self.command)
            .arg("--version")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| RecognizeError::Unavailable(format!("{}: {e}", self.command)))?;

        if !output.status.success() {
            return Err(RecognizeError::Unavailable(format!(
                "{} exited with {}",
                self.command, output.status
            )));
        }

        let banner = String::from_utf8_lossy(&output.stdout);
        info!(
            "OCR engine ready: {}",
            banner.lines().next().unwrap_or(&self.command)
        );
        Ok(())
    }

    fn recognize(&mut self, image: &GrayImage) -> Result<String, RecognizeError> {
        let png = encode_png(image)?;

        // psm 7: treat the image as a single text line
        let mut child = Command::new(&self.command)
            .args(["stdin", "stdout", "-l", &self.language, "--psm", "7"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&png)?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(RecognizeError::Engine(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("raw OCR output: {:?}", text);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_missing_binary_is_unavailable() {
        let mut engine = TesseractEngine::new("spelldrill-no-such-ocr-binary", "eng");
        assert_matches!(engine.initialize(), Err(RecognizeError::Unavailable(_)));
    }

    #[test]
    fn test_missing_binary_recognize_is_io_error() {
        let mut engine = TesseractEngine::new("spelldrill-no-such-ocr-binary", "eng");
        let image = GrayImage::new(4, 4);
        assert_matches!(engine.recognize(&image), Err(RecognizeError::Io(_)));
    }
}
