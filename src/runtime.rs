use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};

use crate::ink::Recognized;
use crate::speech::DictationUpdate;
use crate::summary::ReplayRequest;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    Tick,
    /// A handwriting recognition request finished.
    Recognized(Recognized),
    Dictation(DictationUpdate),
    Replay(ReplayRequest),
}

impl From<Recognized> for AppEvent {
    fn from(done: Recognized) -> Self {
        AppEvent::Recognized(done)
    }
}

impl From<DictationUpdate> for AppEvent {
    fn from(update: DictationUpdate) -> Self {
        AppEvent::Dictation(update)
    }
}

impl From<ReplayRequest> for AppEvent {
    fn from(request: ReplayRequest) -> Self {
        AppEvent::Replay(request)
    }
}

/// Source of events for the app loop (terminal input plus background work)
pub trait AppEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source using crossterm. Background workers report into
/// the same queue through [`sender`](Self::sender).
pub struct CrosstermEventSource {
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let input = tx.clone();

        thread::spawn(move || loop {
            let ev = match event::read() {
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => AppEvent::Key(key),
                Ok(CtEvent::Mouse(mouse)) => AppEvent::Mouse(mouse),
                Ok(CtEvent::Resize(_, _)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if input.send(ev).is_err() {
                break;
            }
        });

        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AppEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Feeds everything received on `rx` into the app queue. Returns the
/// sending half for the producer; the bridge thread ends when it is dropped.
pub fn bridge<T>(app: Sender<AppEvent>) -> (Sender<T>, JoinHandle<()>)
where
    T: Into<AppEvent> + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<T>();
    let handle = thread::spawn(move || {
        for item in rx {
            if app.send(item.into()).is_err() {
                break;
            }
        }
    });
    (tx, handle)
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl AppEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: AppEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: AppEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    pub fn source(&self) -> &E {
        &self.event_source
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> AppEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ink::{Provenance, RecognitionResult};
    use std::sync::mpsc;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(1));
        let runner = Runner::new(es, ticker);

        // With no events available, step should yield Tick
        let ev = runner.step();
        match ev {
            AppEvent::Tick => {}
            _ => panic!("expected Tick on timeout"),
        }
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Resize).unwrap();
        let es = TestEventSource::new(rx);
        let ticker = FixedTicker::new(Duration::from_millis(10));
        let runner = Runner::new(es, ticker);

        match runner.step() {
            AppEvent::Resize => {}
            _ => panic!("expected Resize event"),
        }
    }

    #[test]
    fn bridge_wraps_background_results() {
        let (tx, rx) = mpsc::channel();
        let (results, handle) = bridge::<Recognized>(tx);
        results
            .send(Recognized {
                ticket: 3,
                result: RecognitionResult {
                    text: "cat".into(),
                    provenance: Provenance::Fallback,
                },
            })
            .unwrap();
        drop(results);
        handle.join().unwrap();

        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(10)),
        );
        match runner.step() {
            AppEvent::Recognized(done) => {
                assert_eq!(done.ticket, 3);
                assert_eq!(done.result.text, "cat");
            }
            other => panic!("expected Recognized, got {other:?}"),
        }
    }

    #[test]
    fn bridge_carries_replay_requests() {
        let (tx, rx) = mpsc::channel();
        let (replay, _handle) = bridge::<ReplayRequest>(tx);
        replay
            .send(ReplayRequest {
                words: vec!["dog".into()],
            })
            .unwrap();

        match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
            AppEvent::Replay(request) => assert_eq!(request.words, vec!["dog".to_string()]),
            other => panic!("expected Replay, got {other:?}"),
        }
    }
}
