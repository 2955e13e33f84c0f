use std::collections::HashMap;
use std::time::Duration;

use include_dir::{include_dir, Dir};
use serde::Deserialize;
use tracing::{debug, warn};

static DATA_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/data");

pub const DICTIONARY_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Translation {
    pub translation: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

pub trait Translator: Send + Sync {
    fn lookup(&self, word: &str) -> Option<Translation>;
}

fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

#[derive(Debug, Deserialize)]
struct TranslationTable {
    entries: HashMap<String, Translation>,
}

/// Word table shipped inside the binary.
#[derive(Debug, Clone, Default)]
pub struct StaticTranslations {
    entries: HashMap<String, Translation>,
}

impl StaticTranslations {
    pub fn embedded() -> Self {
        let table = DATA_DIR
            .get_file("translations.json")
            .and_then(|f| f.contents_utf8())
            .map(serde_json::from_str::<TranslationTable>);

        match table {
            Some(Ok(table)) => Self::from_entries(table.entries),
            Some(Err(e)) => {
                warn!("embedded translation table is invalid: {e}");
                Self::default()
            }
            None => {
                warn!("embedded translation table is missing");
                Self::default()
            }
        }
    }

    pub fn from_entries(entries: HashMap<String, Translation>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(word, t)| (normalize(&word), t))
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(&normalize(word))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for StaticTranslations {
    fn lookup(&self, word: &str) -> Option<Translation> {
        self.entries.get(&normalize(word)).cloned()
    }
}

#[derive(Debug, Deserialize)]
struct DictionaryEntry {
    #[serde(default)]
    meanings: Vec<Meaning>,
}

#[derive(Debug, Deserialize)]
struct Meaning {
    #[serde(default)]
    definitions: Vec<Definition>,
}

#[derive(Debug, Deserialize)]
struct Definition {
    definition: String,
}

/// English definitions from the free dictionary API. Any failure is a miss.
pub struct DictionaryApi {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl DictionaryApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn fetch(&self, word: &str) -> Result<Option<String>, reqwest::Error> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), word);
        let entries: Vec<DictionaryEntry> =
            self.client.get(url).send()?.error_for_status()?.json()?;

        Ok(first_definition(&entries))
    }
}

impl Default for DictionaryApi {
    fn default() -> Self {
        Self::new(DICTIONARY_API_URL)
    }
}

fn first_definition(entries: &[DictionaryEntry]) -> Option<String> {
    entries
        .first()?
        .meanings
        .first()?
        .definitions
        .first()
        .map(|d| d.definition.clone())
}

impl Translator for DictionaryApi {
    fn lookup(&self, word: &str) -> Option<Translation> {
        let word = normalize(word);
        if word.is_empty() {
            return None;
        }
        match self.fetch(&word) {
            Ok(Some(definition)) => Some(Translation {
                translation: definition,
                image_url: None,
            }),
            Ok(None) => None,
            Err(e) => {
                debug!("dictionary lookup for {word:?} failed: {e}");
                None
            }
        }
    }
}

/// Asks each translator in turn; the first hit wins.
#[derive(Default)]
pub struct ChainTranslator {
    sources: Vec<Box<dyn Translator>>,
}

impl ChainTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source: impl Translator + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

impl Translator for ChainTranslator {
    fn lookup(&self, word: &str) -> Option<Translation> {
        self.sources.iter().find_map(|s| s.lookup(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    impl Translator for Fixed {
        fn lookup(&self, _word: &str) -> Option<Translation> {
            Some(Translation {
                translation: self.0.to_string(),
                image_url: None,
            })
        }
    }

    #[test]
    fn test_embedded_table_loads() {
        let table = StaticTranslations::embedded();
        assert!(!table.is_empty());
        assert!(table.contains("cat"));
        assert!(table.contains("monkey"));
    }

    #[test]
    fn test_table_metadata_keys_are_ignored() {
        let json = r#"{"language":"th","entries":{"sun":{"translation":"ดวงอาทิตย์"}}}"#;
        let table: TranslationTable = serde_json::from_str(json).unwrap();
        let table = StaticTranslations::from_entries(table.entries);
        assert_eq!(table.lookup("sun").unwrap().translation, "ดวงอาทิตย์");
    }

    #[test]
    fn test_lookup_is_case_and_space_insensitive() {
        let table = StaticTranslations::embedded();
        let monkey = table.lookup("  Monkey ").unwrap();
        assert_eq!(monkey.translation, "ลิง");
        assert!(monkey.image_url.is_some());
    }

    #[test]
    fn test_unknown_word_is_none() {
        let table = StaticTranslations::embedded();
        assert_eq!(table.lookup("qwertyuiop"), None);
    }

    #[test]
    fn test_first_definition_walks_nested_lists() {
        let json = r#"[{"word":"cat","meanings":[{"definitions":[{"definition":"A small feline."},{"definition":"other"}]}]}]"#;
        let entries: Vec<DictionaryEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(first_definition(&entries), Some("A small feline.".to_string()));

        let entries: Vec<DictionaryEntry> = serde_json::from_str(r#"[{"meanings":[]}]"#).unwrap();
        assert_eq!(first_definition(&entries), None);
    }

    #[test]
    fn test_unreachable_dictionary_is_a_miss() {
        let api = DictionaryApi::new("http://127.0.0.1:9/api");
        assert_eq!(api.lookup("cat"), None);
    }

    #[test]
    fn test_chain_prefers_first_hit() {
        let chain = ChainTranslator::new()
            .with(StaticTranslations::default())
            .with(Fixed("first"))
            .with(Fixed("second"));
        assert_eq!(chain.lookup("cat").unwrap().translation, "first");
        assert_eq!(ChainTranslator::new().lookup("cat"), None);
    }
}
