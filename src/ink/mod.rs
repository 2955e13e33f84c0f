//! Handwriting input: capture pointer strokes, then turn them into text.

pub mod capture;
pub mod fallback;
pub mod ocr;
pub mod raster;
pub mod recognizer;
pub mod worker;

pub use capture::{CanvasSize, DisplayRect, InkSurface, Point, Stroke};
pub use ocr::{OcrEngine, TesseractEngine};
pub use raster::RasterOptions;
pub use recognizer::{InkRecognizer, Provenance, RecognitionResult};
pub use worker::{RecognitionWorker, Recognized};
