use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ink::{CanvasSize, RasterOptions};

/// Largest logical canvas edge accepted from the config file.
pub const MAX_CANVAS_EDGE: f64 = 1024.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Pause between a word appearing and it being read out.
    pub speak_delay_ms: u64,
    pub speech: bool,
    /// Synthesizer command line; discovered on `PATH` when unset.
    pub speech_command: Option<String>,
    /// Recognizer command line printing one transcript per line.
    pub dictation_command: Option<String>,
    pub ocr_command: String,
    pub ocr_language: String,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub raster_scale: u32,
    /// How long recognized ink stays visible before the canvas clears.
    pub ink_grace_ms: u64,
    pub remote_dictionary: bool,
    pub shuffle: bool,
}

impl Default for Config {
    fn default() -> Self {
        let canvas = CanvasSize::default();
        Self {
            speak_delay_ms: 500,
            speech: true,
            speech_command: None,
            dictation_command: None,
            ocr_command: "tesseract".to_string(),
            ocr_language: "eng".to_string(),
            canvas_width: canvas.width,
            canvas_height: canvas.height,
            raster_scale: RasterOptions::default().scale,
            ink_grace_ms: 2000,
            remote_dictionary: false,
            shuffle: false,
        }
    }
}

impl Config {
    pub fn speak_delay(&self) -> Duration {
        Duration::from_millis(self.speak_delay_ms)
    }

    pub fn ink_grace(&self) -> Duration {
        Duration::from_millis(self.ink_grace_ms)
    }

    /// Falls back to the default canvas when the stored size is unusable;
    /// oversized edges are capped at [`MAX_CANVAS_EDGE`].
    pub fn canvas(&self) -> CanvasSize {
        let usable = |edge: f64| edge.is_finite() && edge > 0.0;
        if usable(self.canvas_width) && usable(self.canvas_height) {
            CanvasSize {
                width: self.canvas_width.min(MAX_CANVAS_EDGE),
                height: self.canvas_height.min(MAX_CANVAS_EDGE),
            }
        } else {
            CanvasSize::default()
        }
    }

    pub fn raster(&self) -> RasterOptions {
        RasterOptions {
            scale: self.raster_scale,
            ..RasterOptions::default()
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "spelldrill") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("spelldrill_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(e) => tracing::warn!("ignoring invalid config {}: {e}", self.path.display()),
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
