pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use spelldrill::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    error::{StoreError, WordListError},
    ink::{InkRecognizer, InkSurface, OcrEngine, RecognitionWorker, Recognized, TesseractEngine},
    reconciler::AnswerUpdate,
    runtime::{self, AppEvent, AppEventSource, CrosstermEventSource, FixedTicker, Runner, Ticker},
    speech::{
        Announcer, CommandListener, CommandSpeaker, DictationUpdate, Listener, NoSpeech, Speaker,
        UnsupportedListener,
    },
    store::{SqliteWordStore, WordStore},
    summary::{ReplayRequest, Summary},
    translation::{ChainTranslator, DictionaryApi, StaticTranslations, Translator},
    word_list::WordList,
    Effect, Event, SessionState, Transition,
};
use std::{
    error::Error,
    fs::OpenOptions,
    io::{self, stdin},
    path::PathBuf,
    sync::{mpsc::Sender, Mutex},
    time::{Duration, Instant},
};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use webbrowser::Browser;

const TICK_RATE_MS: u64 = 100;

/// spelling practice in the terminal: listen, then type, say or draw the word
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    version,
    about,
    long_about = "A vocabulary spelling trainer. Each word is read aloud; answer by typing, by dictation through an external recognizer, or by handwriting with the mouse on the ink pad."
)]
pub struct Cli {
    /// newline-delimited word list to practise (replaces the saved list)
    #[clap(short = 'f', long)]
    words_file: Option<PathBuf>,

    /// add a word to the list; repeat for more
    #[clap(short = 'w', long = "word")]
    words: Vec<String>,

    /// shuffle the words at the start of every session
    #[clap(short = 's', long)]
    shuffle: bool,

    /// pause in milliseconds before a new word is read out
    #[clap(long)]
    speak_delay_ms: Option<u64>,

    /// never read words or feedback aloud
    #[clap(long)]
    no_speech: bool,

    /// speech synthesizer command; the text is passed as the last argument
    #[clap(long)]
    speech_command: Option<String>,

    /// dictation command printing one transcript per line on stdout
    #[clap(long)]
    dictation_command: Option<String>,

    /// tesseract binary used for handwriting recognition
    #[clap(long)]
    ocr_command: Option<String>,

    /// also look up English definitions online when a word is not in the built-in table
    #[clap(long)]
    remote_dictionary: bool,

    /// write the saved word list into DIR and exit
    #[clap(long, value_name = "DIR")]
    export: Option<PathBuf>,
}

impl Cli {
    /// Folds flags into the stored config; returns whether anything changed.
    fn apply_to(&self, config: &mut Config) -> bool {
        let before = config.clone();

        if self.shuffle {
            config.shuffle = true;
        }
        if let Some(ms) = self.speak_delay_ms {
            config.speak_delay_ms = ms;
        }
        if self.no_speech {
            config.speech = false;
        }
        if let Some(cmd) = &self.speech_command {
            config.speech = true;
            config.speech_command = Some(cmd.clone());
        }
        if let Some(cmd) = &self.dictation_command {
            config.dictation_command = Some(cmd.clone());
        }
        if let Some(cmd) = &self.ocr_command {
            config.ocr_command = cmd.clone();
        }
        if self.remote_dictionary {
            config.remote_dictionary = true;
        }

        *config != before
    }

    /// The list to start with and whether it differs from what was saved.
    fn initial_words(&self, store: &dyn WordStore) -> Result<(WordList, bool), WordListError> {
        let (mut words, mut changed) = match &self.words_file {
            Some(path) => {
                let mut words = WordList::default();
                words.import(path)?;
                (words, true)
            }
            None => (WordList::new(store.load()), false),
        };

        for word in &self.words {
            match words.add(word) {
                Ok(()) => changed = true,
                Err(e) => debug!("skipping --word {word:?}: {e}"),
            }
        }

        Ok((words, changed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    WordManager,
    Quiz,
    Summary,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ManagerMode {
    #[default]
    Browse,
    AddWord,
    BulkAdd,
    ImportPath,
}

#[derive(Debug, Default)]
pub struct ManagerState {
    pub mode: ManagerMode,
    pub input: String,
    pub selected: usize,
}

/// Everything the app talks to outside its own state.
pub struct Services {
    pub translator: Box<dyn Translator>,
    pub announcer: Announcer,
    pub listener: Box<dyn Listener>,
    pub store: Box<dyn WordStore>,
    pub ocr: Box<dyn OcrEngine>,
}

impl Services {
    fn from_config(config: &Config, store: Box<dyn WordStore>) -> Self {
        let mut translator = ChainTranslator::new().with(StaticTranslations::embedded());
        if config.remote_dictionary {
            translator = translator.with(DictionaryApi::default());
        }

        let announcer = if config.speech {
            let speaker: Box<dyn Speaker> = match &config.speech_command {
                Some(cmd) => match CommandSpeaker::from_command(cmd) {
                    Ok(speaker) => Box::new(speaker),
                    Err(e) => {
                        warn!("unusable speech command {cmd:?}: {e}");
                        Box::new(NoSpeech)
                    }
                },
                None => match CommandSpeaker::discover() {
                    Some(speaker) => {
                        info!("speaking with {}", speaker.program());
                        Box::new(speaker)
                    }
                    None => Box::new(NoSpeech),
                },
            };
            Announcer::new(speaker, config.speak_delay())
        } else {
            Announcer::muted()
        };

        let listener: Box<dyn Listener> = match &config.dictation_command {
            Some(cmd) => Box::new(CommandListener::new(cmd.clone())),
            None => Box::new(UnsupportedListener),
        };

        Self {
            translator: Box::new(translator),
            announcer,
            listener,
            store,
            ocr: Box::new(TesseractEngine::new(
                config.ocr_command.clone(),
                config.ocr_language.clone(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitType {
    Continue,
    Quit,
}

pub struct App {
    pub config: Config,
    pub state: AppState,
    pub words: WordList,
    pub manager: ManagerState,
    pub session: Option<SessionState>,
    pub summary: Option<Summary>,
    pub ink: InkSurface,
    pub history_selected: Option<usize>,
    pub status: Option<String>,
    ink_clear_at: Option<Instant>,
    // bumped whenever the prompted word changes; results carry the value they were submitted with
    ink_ticket: u64,
    // the pad belongs to a word that is no longer prompted
    ink_stale: bool,
    translator: Box<dyn Translator>,
    announcer: Announcer,
    listener: Box<dyn Listener>,
    store: Box<dyn WordStore>,
    recognizer: RecognitionWorker,
    replay: Sender<ReplayRequest>,
    dictation: Sender<DictationUpdate>,
}

impl App {
    /// `events` is the queue the runner reads; background work reports there.
    pub fn new(config: Config, words: WordList, services: Services, events: Sender<AppEvent>) -> Self {
        let (replay, _) = runtime::bridge::<ReplayRequest>(events.clone());
        let (dictation, _) = runtime::bridge::<DictationUpdate>(events.clone());
        let (results, _) = runtime::bridge::<Recognized>(events);

        let recognizer = RecognitionWorker::spawn(
            InkRecognizer::new(services.ocr, config.canvas(), config.raster()),
            results,
        );
        let ink = InkSurface::new(config.canvas(), ui::quiz::initial_display());

        Self {
            config,
            state: AppState::WordManager,
            words,
            manager: ManagerState::default(),
            session: None,
            summary: None,
            ink,
            history_selected: None,
            status: None,
            ink_clear_at: None,
            ink_ticket: 0,
            ink_stale: false,
            translator: services.translator,
            announcer: services.announcer,
            listener: services.listener,
            store: services.store,
            recognizer,
            replay,
            dictation,
        }
    }

    pub fn is_recognizing(&self) -> bool {
        self.recognizer.is_pending()
    }

    pub fn dispatch(&mut self, event: AppEvent) -> ExitType {
        match event {
            AppEvent::Key(key) => return self.on_key(key),
            AppEvent::Mouse(mouse) => self.on_mouse(mouse),
            AppEvent::Resize => {}
            AppEvent::Tick => self.on_tick(Instant::now()),
            AppEvent::Recognized(done) => self.on_recognized(done),
            AppEvent::Dictation(update) => self.on_dictation(update),
            AppEvent::Replay(request) => self.on_replay(request),
        }
        ExitType::Continue
    }

    pub fn start_quiz(&mut self) {
        let mut words = self.words.clone();
        if self.config.shuffle {
            words.shuffle(&mut rand::thread_rng());
        }

        match SessionState::start(words.words().to_vec()) {
            Ok(transition) => {
                self.history_selected = None;
                self.commit(transition);
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    pub fn shutdown(&mut self) {
        self.listener.stop();
        self.recognizer.shutdown();
    }

    fn send(&mut self, event: Event) {
        let Some(session) = &self.session else {
            return;
        };
        match session.apply(event, self.translator.as_ref()) {
            Ok(transition) => self.commit(transition),
            Err(e) => {
                debug!("quiz rejected event: {e}");
                self.status = Some(e.to_string());
            }
        }
    }

    fn commit(&mut self, transition: Transition) {
        let Transition { next, effects } = transition;

        for effect in effects {
            match effect {
                Effect::Prompt(word) => {
                    self.ink_ticket += 1;
                    if self.is_recognizing() {
                        // the pad is locked until the pending result comes back
                        self.ink_stale = true;
                    } else {
                        self.ink.clear();
                    }
                    self.ink_clear_at = None;
                    self.status = None;
                    self.announcer.prompt(&word);
                }
                Effect::Say(text) => {
                    self.announcer.say(&text);
                }
                Effect::Graded { word, correct } => {
                    self.status = None;
                    debug!("graded {word:?}: {correct}");
                }
                Effect::ReplaceWordList(words) => {
                    self.words.replace(words);
                    self.manager.selected = 0;
                    self.persist();
                }
            }
        }

        // restart and retry build a buffer with dictation off; the listener follows it
        let dictating = !next.is_complete() && next.answer().is_dictating();
        if !dictating && self.listener.is_listening() {
            self.listener.stop();
        }

        if next.is_complete() {
            self.summary = Some(Summary::from_session(&next));
            self.state = AppState::Summary;
        } else {
            self.summary = None;
            self.state = AppState::Quiz;
        }
        self.session = Some(next);
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(self.words.words()) {
            warn!("could not save word list: {e}");
            self.status = Some(e.to_string());
        }
    }

    fn leave_quiz(&mut self) {
        if self.listener.is_listening() {
            self.listener.stop();
        }
        self.session = None;
        self.summary = None;
        self.ink_ticket += 1;
        if self.is_recognizing() {
            self.ink_stale = true;
        } else {
            self.ink.clear();
        }
        self.ink_clear_at = None;
        self.state = AppState::WordManager;
    }

    pub fn on_key(&mut self, key: KeyEvent) -> ExitType {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return ExitType::Quit;
        }

        match self.state {
            AppState::WordManager => return self.on_manager_key(key),
            AppState::Quiz => self.on_quiz_key(key),
            AppState::Summary => return self.on_summary_key(key),
        }
        ExitType::Continue
    }

    fn on_manager_key(&mut self, key: KeyEvent) -> ExitType {
        if self.manager.mode != ManagerMode::Browse {
            self.on_manager_input(key);
            return ExitType::Continue;
        }

        let last = self.words.len().saturating_sub(1);
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return ExitType::Quit,
            KeyCode::Up | KeyCode::Char('k') => {
                self.manager.selected = self.manager.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.manager.selected = (self.manager.selected + 1).min(last);
            }
            KeyCode::Char('a') => self.enter_mode(ManagerMode::AddWord),
            KeyCode::Char('b') => self.enter_mode(ManagerMode::BulkAdd),
            KeyCode::Char('i') => self.enter_mode(ManagerMode::ImportPath),
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(word) = self.words.words().get(self.manager.selected).cloned() {
                    self.words.remove(&word);
                    self.manager.selected = self.manager.selected.min(self.words.len().saturating_sub(1));
                    self.persist();
                    self.status = Some(format!("Removed \"{word}\""));
                }
            }
            KeyCode::Char('x') => {
                self.words.clear();
                self.manager.selected = 0;
                self.status = Some(match self.store.clear() {
                    Ok(()) => "Cleared all words".to_string(),
                    Err(e) => e.to_string(),
                });
            }
            KeyCode::Char('e') => {
                self.status = Some(match self.words.export(&AppDirs::export_dir()) {
                    Ok(path) => format!("Saved {}", path.display()),
                    Err(e) => e.to_string(),
                });
            }
            KeyCode::Char('p') => {
                if let Some(word) = self.words.words().get(self.manager.selected) {
                    self.announcer.say(word);
                }
            }
            KeyCode::Enter | KeyCode::Char('s') => self.start_quiz(),
            _ => {}
        }
        ExitType::Continue
    }

    fn enter_mode(&mut self, mode: ManagerMode) {
        self.manager.mode = mode;
        self.manager.input.clear();
        self.status = None;
    }

    fn on_manager_input(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.enter_mode(ManagerMode::Browse),
            KeyCode::Backspace => {
                self.manager.input.pop();
            }
            KeyCode::Enter if self.manager.mode == ManagerMode::BulkAdd => {
                self.manager.input.push('\n');
            }
            KeyCode::Enter => self.submit_manager_input(),
            KeyCode::Char('s') if ctrl && self.manager.mode == ManagerMode::BulkAdd => {
                self.submit_manager_input()
            }
            KeyCode::Char(c) if !ctrl => self.manager.input.push(c),
            _ => {}
        }
    }

    fn submit_manager_input(&mut self) {
        let input = self.manager.input.clone();
        let outcome = match self.manager.mode {
            ManagerMode::AddWord => self
                .words
                .add(&input)
                .map(|()| format!("Added \"{}\"", input.trim())),
            ManagerMode::BulkAdd => self
                .words
                .add_bulk(&input)
                .map(|n| format!("Added {n} words")),
            ManagerMode::ImportPath => self
                .words
                .import(&PathBuf::from(input.trim()))
                .map(|n| format!("Loaded {n} words")),
            ManagerMode::Browse => return,
        };

        match outcome {
            Ok(message) => {
                self.persist();
                self.enter_mode(ManagerMode::Browse);
                self.status = Some(message);
            }
            // keep the input so it can be corrected
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn on_quiz_key(&mut self, key: KeyEvent) {
        let answer = self
            .session
            .as_ref()
            .map(|s| s.answer().value().to_string())
            .unwrap_or_default();
        let answered = self.session.as_ref().is_some_and(|s| s.is_answered());

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => self.send(Event::Repeat),
                KeyCode::Char('d') => self.toggle_dictation(),
                KeyCode::Char('w') => self.recognize_ink(),
                KeyCode::Char('l') => self.clear_ink(),
                KeyCode::Char('u') => self.send(Event::Input(AnswerUpdate::Clear)),
                KeyCode::Char('r') => self.send(Event::Restart),
                KeyCode::Char('o') => self.open_illustration(),
                KeyCode::Char('p') => self.say_history_word(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => self.leave_quiz(),
            KeyCode::Enter if answered => self.send(Event::Advance),
            KeyCode::Enter => self.send(Event::Check),
            KeyCode::Backspace => {
                let mut value = answer;
                value.pop();
                self.send(Event::Input(AnswerUpdate::Typed(value)));
            }
            KeyCode::Char(c) => {
                let mut value = answer;
                value.push(c);
                self.send(Event::Input(AnswerUpdate::Typed(value)));
            }
            KeyCode::Up => self.move_history_selection(-1),
            KeyCode::Down => self.move_history_selection(1),
            _ => {}
        }
    }

    fn on_summary_key(&mut self, key: KeyEvent) -> ExitType {
        match key.code {
            KeyCode::Char('q') => return ExitType::Quit,
            KeyCode::Char('r') => self.send(Event::Restart),
            KeyCode::Char('i') => {
                let sent = self
                    .summary
                    .as_ref()
                    .is_some_and(|summary| summary.request_retry(&self.replay));
                if !sent {
                    self.status = Some("No incorrect words to practise".to_string());
                }
            }
            KeyCode::Esc | KeyCode::Char('b') => self.leave_quiz(),
            _ => {}
        }
        ExitType::Continue
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        if self.state != AppState::Quiz {
            return;
        }
        // cell centres, so a click maps inside the cell it hit
        let (x, y) = (mouse.column as f64 + 0.5, mouse.row as f64 + 0.5);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if self.ink.display().contains(x, y) => {
                if std::mem::take(&mut self.ink_stale) {
                    self.ink.clear();
                }
                self.ink_clear_at = None;
                self.ink.begin(x, y);
            }
            MouseEventKind::Drag(MouseButton::Left) => self.ink.extend(x, y),
            MouseEventKind::Up(MouseButton::Left) => self.ink.end(),
            _ => {}
        }
    }

    fn on_tick(&mut self, now: Instant) {
        if self.ink_clear_at.is_some_and(|at| now >= at) {
            self.ink.clear();
            self.ink_clear_at = None;
        }
        if let Some(notice) = self.announcer.take_notice() {
            self.status = Some(notice);
        }
    }

    fn recognize_ink(&mut self) {
        if self.is_recognizing() {
            return;
        }
        self.ink.end();
        if self.ink.is_empty() {
            self.status = Some("Write the word on the pad first".to_string());
            return;
        }
        if self.recognizer.submit(self.ink.take_snapshot(), self.ink_ticket) {
            self.status = Some("Recognizing...".to_string());
        }
    }

    fn clear_ink(&mut self) {
        if self.is_recognizing() {
            return;
        }
        self.ink.clear();
        self.ink_clear_at = None;
    }

    fn on_recognized(&mut self, done: Recognized) {
        self.recognizer.complete();
        if done.ticket != self.ink_ticket {
            debug!("dropping ink result for an earlier word: {:?}", done.result.text);
            if std::mem::take(&mut self.ink_stale) {
                self.ink.clear();
            }
            return;
        }

        let result = done.result;
        if result.text.is_empty() {
            self.status = Some("Nothing recognized, try writing larger".to_string());
            return;
        }
        if self.session.as_ref().is_some_and(|s| s.is_answered()) {
            self.status = Some("Answer already checked".to_string());
            return;
        }

        self.status = Some(format!("Recognized \"{}\"", result.text));
        self.send(Event::Input(AnswerUpdate::Ink(result.text)));
        self.ink_clear_at = Some(Instant::now() + self.config.ink_grace());
    }

    fn toggle_dictation(&mut self) {
        let dictating = self
            .session
            .as_ref()
            .is_some_and(|s| s.answer().is_dictating());

        if dictating {
            self.listener.stop();
            self.send(Event::Input(AnswerUpdate::DictationStopped));
            return;
        }

        match self.listener.start(self.dictation.clone()) {
            Ok(()) => self.send(Event::Input(AnswerUpdate::DictationStarted)),
            Err(e) => {
                warn!("dictation unavailable: {e}");
                self.status = Some(e.to_string());
            }
        }
    }

    fn on_dictation(&mut self, update: DictationUpdate) {
        match update {
            DictationUpdate::Transcript(text) => {
                self.send(Event::Input(AnswerUpdate::Transcript(text)))
            }
            DictationUpdate::Ended => {
                self.listener.stop();
                self.send(Event::Input(AnswerUpdate::DictationStopped));
            }
        }
    }

    fn on_replay(&mut self, request: ReplayRequest) {
        let complete = self.session.as_ref().is_some_and(|s| s.is_complete());
        if complete {
            self.send(Event::RetryIncorrect);
        } else {
            self.words.replace(request.words);
            self.persist();
            self.start_quiz();
        }
    }

    fn move_history_selection(&mut self, delta: isize) {
        let len = self.session.as_ref().map_or(0, |s| s.history().len());
        if len == 0 {
            return;
        }
        let current = self.history_selected.unwrap_or(len) as isize;
        self.history_selected = Some((current + delta).clamp(0, len as isize - 1) as usize);
    }

    fn say_history_word(&mut self) {
        let word = self.session.as_ref().and_then(|s| {
            self.history_selected
                .and_then(|i| s.history().get(i))
                .or_else(|| s.last_result())
                .map(|r| r.word.clone())
        });
        if let Some(word) = word {
            self.send(Event::Say(word));
        }
    }

    fn open_illustration(&mut self) {
        let url = self
            .session
            .as_ref()
            .and_then(|s| s.translation())
            .and_then(|t| t.image_url.clone());

        if let Some(url) = url {
            if Browser::is_available() {
                webbrowser::open(&url).unwrap_or_default();
            }
        }
    }
}

fn init_logging() {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    // the terminal belongs to the UI, so logs go to a file
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "spelldrill=info".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
}

fn open_store() -> Result<Box<dyn WordStore>, StoreError> {
    if let Some(path) = AppDirs::db_path() {
        match SqliteWordStore::open(&path) {
            Ok(store) => return Ok(Box::new(store)),
            Err(e) => warn!("could not open {}: {e}; words will not be saved", path.display()),
        }
    }
    Ok(Box::new(SqliteWordStore::in_memory()?))
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging();

    let config_store = FileConfigStore::new();
    let mut config = config_store.load();
    if cli.apply_to(&mut config) {
        if let Err(e) = config_store.save(&config) {
            warn!("could not save config: {e}");
        }
    }

    let store = open_store()?;
    let words = match cli.initial_words(store.as_ref()) {
        Ok((words, changed)) => {
            if changed {
                store.save(words.words())?;
            }
            words
        }
        Err(e) => Cli::command().error(ErrorKind::Io, e).exit(),
    };

    if let Some(dir) = &cli.export {
        match words.export(dir) {
            Ok(path) => {
                println!("{}", path.display());
                return Ok(());
            }
            Err(e) => Cli::command().error(ErrorKind::Io, e).exit(),
        }
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = CrosstermEventSource::new();
    let sender = events.sender();
    let runner = Runner::new(events, FixedTicker::new(Duration::from_millis(TICK_RATE_MS)));

    let services = Services::from_config(&config, store);
    let mut app = App::new(config, words, services, sender);
    let result = start_tui(&mut terminal, &mut app, &runner);
    app.shutdown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, E: AppEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(app, f))?;

        if app.dispatch(runner.step()) == ExitType::Quit {
            break;
        }
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    ui::screen::current_screen(&app.state).render(app, f);
}
