//! Speech in and out through external programs. Both directions are
//! optional: a missing synthesizer or recognizer is reported once and the
//! quiz carries on without it.

use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::CapabilityError;

/// Relative speaking rate; 1.0 is the synthesizer's normal speed.
pub const VOICE_RATE: f64 = 0.6;
pub const VOICE_PITCH: f64 = 1.1;

const SYNTHESIZERS: [&str; 4] = ["espeak-ng", "espeak", "say", "spd-say"];

pub trait Speaker: Send + Sync {
    fn speak(&self, text: &str) -> Result<(), CapabilityError>;
}

/// Splits a configured command line on whitespace.
fn split_command(command: &str) -> Option<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    Some((program, parts.collect()))
}

fn on_path(program: &str) -> bool {
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}

/// Voice arguments for the synthesizers we know how to drive.
fn voice_args(program: &str, rate: f64, pitch: f64) -> Vec<String> {
    let name = program.rsplit('/').next().unwrap_or(program);
    match name {
        "espeak-ng" | "espeak" => vec![
            "-s".into(),
            ((175.0 * rate).round() as u32).to_string(),
            "-p".into(),
            ((50.0 * pitch).round().min(99.0) as u32).to_string(),
        ],
        "say" => vec!["-r".into(), ((175.0 * rate).round() as u32).to_string()],
        "spd-say" => vec![
            "-w".into(),
            "-r".into(),
            (((rate - 1.0) * 100.0).round() as i32).to_string(),
            "-p".into(),
            (((pitch - 1.0) * 100.0).round() as i32).to_string(),
        ],
        _ => Vec::new(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
}

impl CommandSpeaker {
    /// First known synthesizer found on `PATH`.
    pub fn discover() -> Option<Self> {
        SYNTHESIZERS
            .iter()
            .find(|p| on_path(p))
            .map(|p| Self::from_command(p))
            .and_then(Result::ok)
    }

    /// A configured command line; the text is appended as the last argument.
    pub fn from_command(command: &str) -> Result<Self, CapabilityError> {
        let (program, mut args) =
            split_command(command).ok_or(CapabilityError::Unsupported("speech synthesis"))?;
        args.extend(voice_args(&program, VOICE_RATE, VOICE_PITCH));
        Ok(Self { program, args })
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, text: &str) -> Result<(), CapabilityError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| CapabilityError::Launch {
                command: self.program.clone(),
                source,
            })?;

        if !status.success() {
            debug!("{} exited with {status}", self.program);
        }
        Ok(())
    }
}

/// Used when no synthesizer could be found.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSpeech;

impl Speaker for NoSpeech {
    fn speak(&self, _text: &str) -> Result<(), CapabilityError> {
        Err(CapabilityError::Unsupported("speech synthesis"))
    }
}

/// Speech switched off on purpose: says nothing and reports nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Muted;

impl Speaker for Muted {
    fn speak(&self, _text: &str) -> Result<(), CapabilityError> {
        Ok(())
    }
}

/// Fire-and-forget speech on helper threads. Utterances are serialized so
/// they queue instead of talking over each other. The first failure is kept
/// as a notice for the host to show; later failures are only logged.
#[derive(Clone)]
pub struct Announcer {
    speaker: Arc<Mutex<Box<dyn Speaker>>>,
    prompt_delay: Duration,
    reported: Arc<AtomicBool>,
    notice: Arc<Mutex<Option<String>>>,
}

impl Announcer {
    pub fn new(speaker: Box<dyn Speaker>, prompt_delay: Duration) -> Self {
        Self {
            speaker: Arc::new(Mutex::new(speaker)),
            prompt_delay,
            reported: Arc::new(AtomicBool::new(false)),
            notice: Arc::new(Mutex::new(None)),
        }
    }

    pub fn muted() -> Self {
        Self::new(Box::new(Muted), Duration::ZERO)
    }

    pub fn prompt_delay(&self) -> Duration {
        self.prompt_delay
    }

    /// Reads a newly shown word after the prompt delay.
    pub fn prompt(&self, word: &str) -> JoinHandle<()> {
        self.spawn(word.to_string(), self.prompt_delay)
    }

    pub fn say(&self, text: &str) -> JoinHandle<()> {
        self.spawn(text.to_string(), Duration::ZERO)
    }

    /// The pending capability notice, at most once per announcer.
    pub fn take_notice(&self) -> Option<String> {
        self.notice.lock().ok().and_then(|mut n| n.take())
    }

    fn spawn(&self, text: String, delay: Duration) -> JoinHandle<()> {
        let announcer = self.clone();
        thread::spawn(move || {
            if !delay.is_zero() {
                thread::sleep(delay);
            }
            announcer.speak_now(&text);
        })
    }

    fn speak_now(&self, text: &str) {
        let result = match self.speaker.lock() {
            Ok(speaker) => speaker.speak(text),
            Err(_) => return,
        };

        if let Err(e) = result {
            if self.reported.swap(true, Ordering::SeqCst) {
                debug!("speech failed again: {e}");
                return;
            }
            warn!("speech unavailable: {e}");
            if let Ok(mut notice) = self.notice.lock() {
                *notice = Some(e.to_string());
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictationUpdate {
    /// Latest partial transcript; replaces the previous one.
    Transcript(String),
    /// The recognizer stopped on its own or was stopped.
    Ended,
}

pub trait Listener: Send {
    fn start(&mut self, updates: Sender<DictationUpdate>) -> Result<(), CapabilityError>;
    fn stop(&mut self);
    fn is_listening(&self) -> bool;
}

/// Runs a recognizer program and treats every stdout line as the current
/// transcript.
pub struct CommandListener {
    command: String,
    child: Option<Child>,
    reader: Option<JoinHandle<()>>,
}

impl CommandListener {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            child: None,
            reader: None,
        }
    }
}

impl Listener for CommandListener {
    fn start(&mut self, updates: Sender<DictationUpdate>) -> Result<(), CapabilityError> {
        if self.child.is_some() {
            return Ok(());
        }

        let (program, args) =
            split_command(&self.command).ok_or(CapabilityError::Unsupported("dictation"))?;
        let mut child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| CapabilityError::Launch {
                command: program.clone(),
                source,
            })?;

        let stdout = child.stdout.take();
        self.reader = Some(thread::spawn(move || {
            if let Some(stdout) = stdout {
                for line in BufReader::new(stdout).lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if updates
                        .send(DictationUpdate::Transcript(line.to_string()))
                        .is_err()
                    {
                        return;
                    }
                }
            }
            let _ = updates.send(DictationUpdate::Ended);
        }));

        info!("dictation started with {program}");
        self.child = Some(child);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                debug!("dictation process already gone: {e}");
            }
            let _ = child.wait();
            info!("dictation stopped");
        }
        // the reader ends on its own once the pipe closes
        self.reader.take();
    }

    fn is_listening(&self) -> bool {
        self.child.is_some()
    }
}

impl Drop for CommandListener {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedListener;

impl Listener for UnsupportedListener {
    fn start(&mut self, _updates: Sender<DictationUpdate>) -> Result<(), CapabilityError> {
        Err(CapabilityError::Unsupported("speech recognition"))
    }

    fn stop(&mut self) {}

    fn is_listening(&self) -> bool {
        false
    }
}
