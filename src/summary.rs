use std::sync::mpsc::Sender;

use tracing::{info, warn};

use crate::session::{GameStats, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum GradeTier {
    Excellent,
    Great,
    VeryGood,
    Good,
    KeepTrying,
}

impl GradeTier {
    /// Thresholds are inclusive lower bounds on the accuracy percentage.
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy >= 90.0 {
            GradeTier::Excellent
        } else if accuracy >= 80.0 {
            GradeTier::Great
        } else if accuracy >= 70.0 {
            GradeTier::VeryGood
        } else if accuracy >= 60.0 {
            GradeTier::Good
        } else {
            GradeTier::KeepTrying
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GradeTier::Excellent => "Excellent!",
            GradeTier::Great => "Great!",
            GradeTier::VeryGood => "Very Good!",
            GradeTier::Good => "Good!",
            GradeTier::KeepTrying => "Keep Trying!",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            GradeTier::Excellent => "🏆",
            GradeTier::Great => "🌟",
            GradeTier::VeryGood => "👏",
            GradeTier::Good => "👍",
            GradeTier::KeepTrying => "💪",
        }
    }
}

/// Asks whoever owns the word list to run these words again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayRequest {
    pub words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    stats: GameStats,
    incorrect_words: Vec<String>,
}

impl Summary {
    pub fn new(stats: GameStats, incorrect_words: Vec<String>) -> Self {
        Self {
            stats,
            incorrect_words,
        }
    }

    pub fn from_session(session: &SessionState) -> Self {
        Self::new(session.stats(), session.incorrect_words())
    }

    pub fn stats(&self) -> GameStats {
        self.stats
    }

    pub fn accuracy(&self) -> f64 {
        self.stats.accuracy()
    }

    /// Accuracy rounded to a whole percent for display.
    pub fn rounded_accuracy(&self) -> u32 {
        self.accuracy().round() as u32
    }

    pub fn tier(&self) -> GradeTier {
        GradeTier::from_accuracy(self.accuracy())
    }

    pub fn incorrect_words(&self) -> &[String] {
        &self.incorrect_words
    }

    pub fn incorrect_count(&self) -> usize {
        self.incorrect_words.len()
    }

    pub fn can_retry(&self) -> bool {
        !self.incorrect_words.is_empty()
    }

    /// Returns `false` when there is nothing to replay or nobody is listening.
    pub fn request_retry(&self, owner: &Sender<ReplayRequest>) -> bool {
        if !self.can_retry() {
            return false;
        }

        let request = ReplayRequest {
            words: self.incorrect_words.clone(),
        };
        match owner.send(request) {
            Ok(()) => {
                info!("requested replay of {} words", self.incorrect_count());
                true
            }
            Err(_) => {
                warn!("replay request dropped, word list owner is gone");
                false
            }
        }
    }
}
