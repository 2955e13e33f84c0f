use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::WordListError;

/// Newline-delimited words: accepts `\n` and `\r\n`, trims each line and
/// drops blank ones.
pub fn parse_word_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn export_file_name(unix_millis: i64) -> String {
    format!("vocabulary_{unix_millis}.txt")
}

/// The learner's vocabulary. Words are kept as entered (trimmed), unique by
/// exact match, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    pub fn new(words: Vec<String>) -> Self {
        let mut list = Self::default();
        for word in words {
            let word = word.trim();
            if !word.is_empty() && !list.contains(word) {
                list.words.push(word.to_string());
            }
        }
        list
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn add(&mut self, word: &str) -> Result<(), WordListError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(WordListError::EmptyWord);
        }
        if self.contains(word) {
            return Err(WordListError::Duplicate(word.to_string()));
        }
        self.words.push(word.to_string());
        Ok(())
    }

    /// Adds every line not already present; returns how many were added.
    pub fn add_bulk(&mut self, text: &str) -> Result<usize, WordListError> {
        if text.trim().is_empty() {
            return Err(WordListError::EmptyWord);
        }

        let before = self.words.len();
        for word in parse_word_list(text) {
            if !self.contains(&word) {
                self.words.push(word);
            }
        }

        match self.words.len() - before {
            0 => Err(WordListError::NoNewWords),
            added => Ok(added),
        }
    }

    /// Returns whether the word was present.
    pub fn remove(&mut self, word: &str) -> bool {
        let before = self.words.len();
        self.words.retain(|w| w != word);
        self.words.len() != before
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    pub fn replace(&mut self, words: Vec<String>) {
        *self = Self::new(words);
    }

    pub fn shuffle<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        use rand::seq::SliceRandom;
        self.words.shuffle(rng);
    }

    pub fn to_text(&self) -> String {
        self.words.join("\n")
    }

    /// Replaces the list with the words in `path`; an empty file is refused
    /// and leaves the list alone.
    pub fn import(&mut self, path: &Path) -> Result<usize, WordListError> {
        let content = fs::read_to_string(path)?;
        let words = parse_word_list(&content);
        if words.is_empty() {
            return Err(WordListError::EmptyImport(path.display().to_string()));
        }

        self.replace(words);
        info!("imported {} words from {}", self.len(), path.display());
        Ok(self.len())
    }

    /// Writes `vocabulary_<unix-millis>.txt` into `dir`.
    pub fn export(&self, dir: &Path) -> Result<PathBuf, WordListError> {
        if self.is_empty() {
            return Err(WordListError::NothingToExport);
        }

        fs::create_dir_all(dir)?;
        let path = dir.join(export_file_name(chrono::Utc::now().timestamp_millis()));
        fs::write(&path, self.to_text())?;
        info!("exported {} words to {}", self.len(), path.display());
        Ok(path)
    }
}
