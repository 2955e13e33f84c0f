use tracing::{debug, info, warn};

use super::capture::{CanvasSize, Stroke};
use super::fallback;
use super::ocr::OcrEngine;
use super::raster::{self, RasterOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Provenance {
    Ocr,
    Fallback,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionResult {
    pub text: String,
    pub provenance: Provenance,
}

impl RecognitionResult {
    fn empty() -> Self {
        Self {
            text: String::new(),
            provenance: Provenance::Empty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    Uninitialized,
    Ready,
    Failed,
}

/// Lower-cases and keeps only `a..=z`.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}

/// Turns captured ink into a best-guess word. Never fails: engine problems
/// fall back to the stroke heuristic.
pub struct InkRecognizer<E: OcrEngine> {
    engine: E,
    state: EngineState,
    canvas: CanvasSize,
    raster: RasterOptions,
}

impl<E: OcrEngine> InkRecognizer<E> {
    pub fn new(engine: E, canvas: CanvasSize, raster: RasterOptions) -> Self {
        Self {
            engine,
            state: EngineState::Uninitialized,
            canvas,
            raster,
        }
    }

    pub fn recognize(&mut self, strokes: &[Stroke]) -> RecognitionResult {
        if strokes.is_empty() {
            return RecognitionResult::empty();
        }

        let result = match self.run_engine(strokes) {
            Some(text) if !text.is_empty() => RecognitionResult {
                text,
                provenance: Provenance::Ocr,
            },
            _ => {
                debug!("OCR produced nothing usable, analysing stroke pattern");
                RecognitionResult {
                    text: fallback::guess(strokes),
                    provenance: Provenance::Fallback,
                }
            }
        };

        info!(
            "recognized {:?} via {} from {} strokes",
            result.text,
            result.provenance,
            strokes.len()
        );
        result
    }

    pub fn engine_ready(&self) -> bool {
        self.state == EngineState::Ready
    }

    /// Hands the engine back to the host, which owns its shutdown.
    pub fn into_engine(self) -> E {
        self.engine
    }

    fn run_engine(&mut self, strokes: &[Stroke]) -> Option<String> {
        if self.state == EngineState::Uninitialized {
            self.state = match self.engine.initialize() {
                Ok(()) => EngineState::Ready,
                Err(e) => {
                    warn!("OCR engine failed to initialize, using stroke fallback: {e}");
                    EngineState::Failed
                }
            };
        }
        if self.state != EngineState::Ready {
            return None;
        }

        let image = raster::render(strokes, self.canvas, self.raster);
        match self.engine.recognize(&image) {
            Ok(raw) => Some(normalize(&raw)),
            Err(e) => {
                warn!("handwriting recognition error: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecognizeError;
    use crate::ink::capture::Point;
    use image::GrayImage;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default, Clone)]
    struct Calls {
        init: Arc<AtomicUsize>,
        recognize: Arc<AtomicUsize>,
    }

    struct ScriptedEngine {
        calls: Calls,
        init_ok: bool,
        reply: Result<&'static str, &'static str>,
    }

    impl ScriptedEngine {
        fn new(init_ok: bool, reply: Result<&'static str, &'static str>) -> (Self, Calls) {
            let calls = Calls::default();
            (
                Self {
                    calls: calls.clone(),
                    init_ok,
                    reply,
                },
                calls,
            )
        }
    }

    impl OcrEngine for ScriptedEngine {
        fn initialize(&mut self) -> Result<(), RecognizeError> {
            self.calls.init.fetch_add(1, Ordering::SeqCst);
            if self.init_ok {
                Ok(())
            } else {
                Err(RecognizeError::Unavailable("scripted".into()))
            }
        }

        fn recognize(&mut self, image: &GrayImage) -> Result<String, RecognizeError> {
            self.calls.recognize.fetch_add(1, Ordering::SeqCst);
            assert!(image.width() >= 530);
            self.reply
                .map(str::to_string)
                .map_err(|e| RecognizeError::Engine(e.into()))
        }
    }

    fn recognizer(engine: ScriptedEngine) -> InkRecognizer<ScriptedEngine> {
        InkRecognizer::new(engine, CanvasSize::default(), RasterOptions::default())
    }

    fn wide_stroke() -> Vec<Stroke> {
        vec![Stroke::new(vec![
            Point {
                x: 10.0,
                y: 70.0,
                timestamp: 0,
            },
            Point {
                x: 200.0,
                y: 80.0,
                timestamp: 1,
            },
        ])
        .unwrap()]
    }

    #[test]
    fn test_normalize_keeps_lowercase_letters_only() {
        assert_eq!(normalize("  Cat!\n"), "cat");
        assert_eq!(normalize("d o-g 42"), "dog");
        assert_eq!(normalize("...\n"), "");
    }

    #[test]
    fn test_empty_input_never_touches_engine() {
        let (engine, calls) = ScriptedEngine::new(true, Ok("cat"));
        let mut r = recognizer(engine);

        let result = r.recognize(&[]);
        assert_eq!(result.text, "");
        assert_eq!(result.provenance, Provenance::Empty);
        assert_eq!(calls.init.load(Ordering::SeqCst), 0);
        assert_eq!(calls.recognize.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_ocr_text_is_normalized() {
        let (engine, _) = ScriptedEngine::new(true, Ok(" Apple.\n"));
        let mut r = recognizer(engine);

        let result = r.recognize(&wide_stroke());
        assert_eq!(result.text, "apple");
        assert_eq!(result.provenance, Provenance::Ocr);
    }

    #[test]
    fn test_engine_error_falls_back_deterministically() {
        let (engine, _) = ScriptedEngine::new(true, Err("boom"));
        let mut r = recognizer(engine);

        let first = r.recognize(&wide_stroke());
        let second = r.recognize(&wide_stroke());
        assert_eq!(first.text, "l");
        assert_eq!(first.provenance, Provenance::Fallback);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unreadable_ocr_output_falls_back() {
        let (engine, _) = ScriptedEngine::new(true, Ok("?!"));
        let mut r = recognizer(engine);

        let result = r.recognize(&wide_stroke());
        assert_eq!(result.text, "l");
        assert_eq!(result.provenance, Provenance::Fallback);
    }

    #[test]
    fn test_engine_initialized_once() {
        let (engine, calls) = ScriptedEngine::new(true, Ok("cat"));
        let mut r = recognizer(engine);

        r.recognize(&wide_stroke());
        r.recognize(&wide_stroke());
        r.recognize(&wide_stroke());

        assert!(r.engine_ready());
        assert_eq!(calls.init.load(Ordering::SeqCst), 1);
        assert_eq!(calls.recognize.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_failed_initialization_is_not_retried() {
        let (engine, calls) = ScriptedEngine::new(false, Ok("cat"));
        let mut r = recognizer(engine);

        assert_eq!(r.recognize(&wide_stroke()).text, "l");
        assert_eq!(r.recognize(&wide_stroke()).text, "l");

        assert!(!r.engine_ready());
        assert_eq!(calls.init.load(Ordering::SeqCst), 1);
        assert_eq!(calls.recognize.load(Ordering::SeqCst), 0);
    }
}
