use serde::{Deserialize, Serialize};

use crate::reconciler::AnswerBuffer;
use crate::translation::Translation;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub correct: usize,
    pub incorrect: usize,
    pub total: usize,
}

impl GameStats {
    pub fn record(&mut self, is_correct: bool) {
        if is_correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
        self.total += 1;
    }

    /// Percentage of correct answers; 0 before anything was answered.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordResult {
    pub word: String,
    pub user_answer: String,
    pub is_correct: bool,
    pub translation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress(usize),
    /// Result visible, waiting for advance.
    Answered(usize),
    Complete,
}

impl Phase {
    pub fn describe(&self) -> &'static str {
        match self {
            Phase::InProgress(_) => "waiting for an answer",
            Phase::Answered(_) => "the answer is already checked",
            Phase::Complete => "the session is complete",
        }
    }
}

/// Everything one run through a word list owns. Values are replaced, not
/// mutated, by the transitions in [`crate::quiz`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub(crate) words: Vec<String>,
    pub(crate) phase: Phase,
    pub(crate) answer: AnswerBuffer,
    pub(crate) translation: Option<Translation>,
    pub(crate) stats: GameStats,
    pub(crate) history: Vec<WordResult>,
}

impl SessionState {
    pub(crate) fn fresh(words: Vec<String>) -> Self {
        Self {
            words,
            phase: Phase::InProgress(0),
            answer: AnswerBuffer::default(),
            translation: None,
            stats: GameStats::default(),
            history: Vec::new(),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the word on screen; `None` once complete.
    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            Phase::InProgress(i) | Phase::Answered(i) => Some(i),
            Phase::Complete => None,
        }
    }

    pub fn current_word(&self) -> Option<&str> {
        self.current_index()
            .and_then(|i| self.words.get(i))
            .map(String::as_str)
    }

    pub fn answer(&self) -> &AnswerBuffer {
        &self.answer
    }

    pub fn is_answered(&self) -> bool {
        matches!(self.phase, Phase::Answered(_))
    }

    pub fn show_result(&self) -> bool {
        self.is_answered()
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn translation(&self) -> Option<&Translation> {
        self.translation.as_ref()
    }

    pub fn stats(&self) -> GameStats {
        self.stats
    }

    pub fn history(&self) -> &[WordResult] {
        &self.history
    }

    pub fn last_result(&self) -> Option<&WordResult> {
        self.history.last()
    }

    /// Incorrect words in the order they were first attempted.
    pub fn incorrect_words(&self) -> Vec<String> {
        self.history
            .iter()
            .filter(|r| !r.is_correct)
            .map(|r| r.word.clone())
            .collect()
    }

    /// Fraction of the list done, counting the current word once checked.
    pub fn progress(&self) -> f64 {
        if self.words.is_empty() {
            return 0.0;
        }
        let done = match self.phase {
            Phase::InProgress(i) => i,
            Phase::Answered(i) => i + 1,
            Phase::Complete => self.words.len(),
        };
        done as f64 / self.words.len() as f64
    }
}
