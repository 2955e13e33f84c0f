//! Arbitrates the three answer sources (keyboard, dictation, handwriting)
//! writing into the single answer buffer. Last writer wins, but nothing
//! is accepted once the current word has been graded.

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Modality {
    Typed,
    Dictation,
    Ink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerUpdate {
    /// Full value of the text field after an edit.
    Typed(String),
    /// Latest partial transcript; replaces the buffer.
    Transcript(String),
    DictationStarted,
    DictationStopped,
    /// Recognized handwriting; replaces the buffer.
    Ink(String),
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Accepted,
    /// The word is already graded.
    Locked,
    /// A transcript arrived while dictation was not running.
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerBuffer {
    value: String,
    dictating: bool,
    last_writer: Option<Modality>,
}

impl AnswerBuffer {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_dictating(&self) -> bool {
        self.dictating
    }

    pub fn last_writer(&self) -> Option<Modality> {
        self.last_writer
    }

    /// `answered` is the session's show-result flag.
    pub fn apply(&mut self, update: AnswerUpdate, answered: bool) -> Applied {
        // dictation on/off is bookkeeping, not a write, and stopping never clears
        match update {
            AnswerUpdate::DictationStarted => {
                self.dictating = true;
                return Applied::Accepted;
            }
            AnswerUpdate::DictationStopped => {
                self.dictating = false;
                return Applied::Accepted;
            }
            _ => {}
        }

        if answered {
            return Applied::Locked;
        }

        match update {
            AnswerUpdate::Typed(text) => self.write(text, Modality::Typed),
            AnswerUpdate::Transcript(text) => {
                if !self.dictating {
                    return Applied::Ignored;
                }
                self.write(text, Modality::Dictation)
            }
            AnswerUpdate::Ink(text) => self.write(text, Modality::Ink),
            AnswerUpdate::Clear => {
                self.value.clear();
                self.last_writer = None;
            }
            AnswerUpdate::DictationStarted | AnswerUpdate::DictationStopped => {}
        }
        Applied::Accepted
    }

    /// Word transition: the only automatic clear.
    pub(crate) fn reset(&mut self) {
        self.value.clear();
        self.last_writer = None;
    }

    fn write(&mut self, text: String, modality: Modality) {
        self.value = text;
        self.last_writer = Some(modality);
    }
}
