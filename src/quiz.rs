//! Quiz state machine. Every operation maps the current [`SessionState`] to
//! a new one plus the side effects the host should carry out; an error
//! means the event was rejected and the caller's state stands.

use tracing::{debug, info};

use crate::error::QuizError;
use crate::reconciler::AnswerUpdate;
use crate::session::{Phase, SessionState, WordResult};
use crate::translation::Translator;

pub const PRAISE: &str = "Good job";
pub const ENCOURAGEMENT: &str = "Try again";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Input(AnswerUpdate),
    Check,
    Advance,
    Restart,
    RetryIncorrect,
    /// Read the current word again.
    Repeat,
    /// Read any word aloud, e.g. one picked from the history list.
    Say(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A new word is on screen; read it after the prompt delay.
    Prompt(String),
    /// Speak right away.
    Say(String),
    Graded { word: String, correct: bool },
    /// The owner of the word list should adopt this list.
    ReplaceWordList(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: SessionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn quiet(next: SessionState) -> Self {
        Self {
            next,
            effects: Vec::new(),
        }
    }
}

/// Case-insensitive exact match after trimming the answer.
pub fn is_correct(answer: &str, word: &str) -> bool {
    answer.trim().to_lowercase() == word.to_lowercase()
}

impl SessionState {
    pub fn start(words: Vec<String>) -> Result<Transition, QuizError> {
        let first = words.first().cloned().ok_or(QuizError::EmptyWordList)?;
        info!("starting session with {} words", words.len());

        Ok(Transition {
            next: SessionState::fresh(words),
            effects: vec![Effect::Prompt(first)],
        })
    }

    pub fn apply(
        &self,
        event: Event,
        translator: &dyn Translator,
    ) -> Result<Transition, QuizError> {
        match event {
            Event::Input(update) => Ok(self.input(update)),
            Event::Check => self.check(translator),
            Event::Advance => self.advance(),
            Event::Restart => Self::start(self.words.clone()),
            Event::RetryIncorrect => self.retry_incorrect(),
            Event::Repeat => match self.current_word() {
                Some(word) => Ok(Transition {
                    next: self.clone(),
                    effects: vec![Effect::Say(word.to_string())],
                }),
                None => Err(self.rejected("repeat the word")),
            },
            Event::Say(word) => Ok(Transition {
                next: self.clone(),
                effects: vec![Effect::Say(word)],
            }),
        }
    }

    fn input(&self, update: AnswerUpdate) -> Transition {
        let mut next = self.clone();
        let applied = next.answer.apply(update, self.show_result());
        debug!("answer update {:?}", applied);
        Transition::quiet(next)
    }

    fn check(&self, translator: &dyn Translator) -> Result<Transition, QuizError> {
        let Phase::InProgress(index) = self.phase else {
            return Err(self.rejected("check the answer"));
        };

        let answer = self.answer.value().trim();
        if answer.is_empty() {
            return Err(QuizError::EmptyAnswer);
        }

        let word = self.words[index].clone();
        let correct = is_correct(answer, &word);
        // translations are only revealed for correct answers
        let translation = if correct {
            translator.lookup(&word)
        } else {
            None
        };

        let mut next = self.clone();
        next.stats.record(correct);
        next.history.push(WordResult {
            word: word.clone(),
            user_answer: answer.to_string(),
            is_correct: correct,
            translation: translation.as_ref().map(|t| t.translation.clone()),
        });
        next.translation = translation;
        next.phase = Phase::Answered(index);

        info!("checked {:?} against {:?}: correct={}", answer, word, correct);

        let feedback = if correct { PRAISE } else { ENCOURAGEMENT };
        Ok(Transition {
            next,
            effects: vec![
                Effect::Graded { word, correct },
                Effect::Say(feedback.to_string()),
            ],
        })
    }

    fn advance(&self) -> Result<Transition, QuizError> {
        let Phase::Answered(index) = self.phase else {
            return Err(self.rejected("move to the next word"));
        };

        let mut next = self.clone();
        next.translation = None;

        if index + 1 < self.words.len() {
            next.phase = Phase::InProgress(index + 1);
            next.answer.reset();
            let word = next.words[index + 1].clone();
            Ok(Transition {
                next,
                effects: vec![Effect::Prompt(word)],
            })
        } else {
            next.phase = Phase::Complete;
            info!(
                "session complete: {}/{} correct",
                next.stats.correct, next.stats.total
            );
            Ok(Transition::quiet(next))
        }
    }

    fn retry_incorrect(&self) -> Result<Transition, QuizError> {
        if !self.is_complete() {
            return Err(self.rejected("retry incorrect words"));
        }

        let words = self.incorrect_words();
        if words.is_empty() {
            return Err(QuizError::NothingToRetry);
        }

        let mut transition = Self::start(words.clone())?;
        transition.effects.push(Effect::ReplaceWordList(words));
        Ok(transition)
    }

    fn rejected(&self, action: &'static str) -> QuizError {
        QuizError::InvalidTransition {
            action,
            phase: self.phase.describe(),
        }
    }
}
