use thiserror::Error;

/// Validation failures raised by quiz transitions. The session is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("the word list is empty; add some words before starting")]
    EmptyWordList,
    #[error("type, say or write an answer first")]
    EmptyAnswer,
    #[error("cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },
    #[error("there are no incorrect words to practise again")]
    NothingToRetry,
}

#[derive(Debug, Error)]
pub enum WordListError {
    #[error("enter a word to add")]
    EmptyWord,
    #[error("\"{0}\" is already in the list")]
    Duplicate(String),
    #[error("no new words found in the input")]
    NoNewWords,
    #[error("there are no words to export")]
    NothingToExport,
    #[error("{0} contains no words")]
    EmptyImport(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid stored word list: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Raised by optional runtime capabilities (speech synthesis and dictation).
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("{0} is not supported in this environment")]
    Unsupported(&'static str),
    #[error("failed to launch {command}: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Internal to the ink recognizer; never surfaces to its callers.
#[derive(Debug, Error)]
pub enum RecognizeError {
    #[error("recognition engine unavailable: {0}")]
    Unavailable(String),
    #[error("recognition engine failed: {0}")]
    Engine(String),
    #[error("failed to encode ink image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("i/o error talking to recognition engine: {0}")]
    Io(#[from] std::io::Error),
}
