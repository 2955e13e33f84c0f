use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, info};

use super::capture::Stroke;
use super::ocr::OcrEngine;
use super::recognizer::{InkRecognizer, RecognitionResult};

/// A finished request, tagged with the ticket it was submitted under so the
/// host can drop results that belong to a word no longer on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognized {
    pub ticket: u64,
    pub result: RecognitionResult,
}

/// Runs recognition off the UI thread, one request at a time. Dropping the
/// worker (or calling [`shutdown`](Self::shutdown)) stops the thread and
/// shuts the engine down.
pub struct RecognitionWorker {
    jobs: Option<Sender<(u64, Vec<Stroke>)>>,
    handle: Option<JoinHandle<()>>,
    pending: bool,
}

impl RecognitionWorker {
    pub fn spawn<E>(mut recognizer: InkRecognizer<E>, results: Sender<Recognized>) -> Self
    where
        E: OcrEngine + 'static,
    {
        let (jobs, rx) = mpsc::channel::<(u64, Vec<Stroke>)>();
        let handle = thread::spawn(move || {
            for (ticket, strokes) in rx {
                let result = recognizer.recognize(&strokes);
                if results.send(Recognized { ticket, result }).is_err() {
                    break;
                }
            }
            debug!("recognition worker stopping");
            recognizer.into_engine().shutdown();
        });

        Self {
            jobs: Some(jobs),
            handle: Some(handle),
            pending: false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Queues the strokes unless a request is already in flight. The result
    /// comes back carrying `ticket`.
    pub fn submit(&mut self, strokes: Vec<Stroke>, ticket: u64) -> bool {
        if self.pending {
            return false;
        }
        match &self.jobs {
            Some(jobs) if jobs.send((ticket, strokes)).is_ok() => {
                self.pending = true;
                true
            }
            _ => false,
        }
    }

    /// Call when the result for the last submission arrived.
    pub fn complete(&mut self) {
        self.pending = false;
    }

    pub fn shutdown(&mut self) {
        self.jobs.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            info!("recognition engine shut down");
        }
    }
}

impl Drop for RecognitionWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecognizeError;
    use crate::ink::capture::Point;
    use crate::ink::recognizer::Provenance;
    use crate::ink::{CanvasSize, RasterOptions};
    use image::GrayImage;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct Echo {
        shut_down: Arc<AtomicBool>,
    }

    impl OcrEngine for Echo {
        fn initialize(&mut self) -> Result<(), RecognizeError> {
            Ok(())
        }

        fn recognize(&mut self, _image: &GrayImage) -> Result<String, RecognizeError> {
            Ok("Cat".into())
        }

        fn shutdown(&mut self) {
            self.shut_down.store(true, Ordering::SeqCst);
        }
    }

    fn stroke() -> Stroke {
        let p = |x, y| Point { x, y, timestamp: 0 };
        Stroke::new(vec![p(10.0, 10.0), p(60.0, 40.0)]).unwrap()
    }

    #[test]
    fn test_one_request_in_flight() {
        let shut_down = Arc::new(AtomicBool::new(false));
        let recognizer = InkRecognizer::new(
            Echo {
                shut_down: shut_down.clone(),
            },
            CanvasSize::default(),
            RasterOptions::default(),
        );
        let (tx, rx) = mpsc::channel();
        let mut worker = RecognitionWorker::spawn(recognizer, tx);

        assert!(worker.submit(vec![stroke()], 1));
        assert!(worker.is_pending());
        assert!(!worker.submit(vec![stroke()], 2));

        let done = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(done.ticket, 1);
        assert_eq!(done.result.text, "cat");
        assert_eq!(done.result.provenance, Provenance::Ocr);

        worker.complete();
        assert!(worker.submit(vec![stroke()], 7));
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap().ticket, 7);
        worker.complete();

        worker.shutdown();
        assert!(shut_down.load(Ordering::SeqCst));
        assert!(!worker.submit(vec![stroke()], 8));
    }
}
