//! Word acquisition: remote lookup first, curated offline pool on any failure.
//!
//! The remote side is split in two services so either can be stubbed:
//! - `RandomWordService`: a random word within a length range
//! - `DefinitionService`: meaning and example usage for a word
//!
//! `WordProvider` composes both with a `WordBank` and never fails; callers only
//! see a `FetchStatus` telling them whether the offline pool was used.

use crate::config::ServiceConfig;
use crate::difficulty::Difficulty;
use crate::error::FetchError;
use crate::wordbank::WordBank;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;

pub const OFFLINE_NOTICE: &str = "Using offline words - connect to internet for full definitions";
const OFFLINE_MEANING: &str = "Definition will be available when online";
const UNDEFINED_MEANING: &str = "A word in the English language";
const MISSING_DEFINITION: &str = "Definition not available";

/// The word of a round with its meaning and an example sentence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub meaning: String,
    pub usage: String,
}

/// Advisory reported alongside every fetched word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchStatus {
    Online,
    Offline(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedWord {
    pub entry: WordEntry,
    pub status: FetchStatus,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    pub meaning: String,
    pub usage: Option<String>,
}

pub trait RandomWordService {
    fn random_word(&self, min_length: usize, max_length: usize) -> Result<String, FetchError>;
}

pub trait DefinitionService {
    /// `Ok(None)` when the service has no usable entry for `word`.
    fn define(&self, word: &str) -> Result<Option<Definition>, FetchError>;
}

/// Anything that can hand a game session the word for its next round.
pub trait WordSource {
    fn fetch_word(&mut self, tier: Difficulty) -> FetchedWord;
}

/// Validate a remote word against the tier range and uppercase it.
pub fn normalize_word(raw: &str, min_length: usize, max_length: usize) -> Result<String, FetchError> {
    let word = raw.trim().to_uppercase();
    if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(FetchError::BadResponse(format!("'{raw}' is not a plain word")));
    }
    if !(min_length..=max_length).contains(&word.len()) {
        return Err(FetchError::BadResponse(format!(
            "'{raw}' is outside {min_length}..={max_length} letters"
        )));
    }
    Ok(word)
}

pub fn build_client(config: &ServiceConfig) -> Result<Client, FetchError> {
    let client = Client::builder()
        .timeout(config.timeout)
        .user_agent(concat!("hangman/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

#[derive(Debug, Deserialize)]
struct RandomWordResponse {
    word: String,
}

/// Wordnik-compatible random word endpoint.
pub struct HttpWordService {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl HttpWordService {
    #[must_use]
    pub fn new(client: Client, config: &ServiceConfig) -> Self {
        Self {
            client,
            url: config.word_api_url.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

impl RandomWordService for HttpWordService {
    fn random_word(&self, min_length: usize, max_length: usize) -> Result<String, FetchError> {
        let mut query = vec![
            ("hasDictionaryDef", "true".to_string()),
            ("minCorpusCount", "1000".to_string()),
            ("maxCorpusCount", "-1".to_string()),
            ("minDictionaryCount", "1".to_string()),
            ("maxDictionaryCount", "-1".to_string()),
            ("minLength", min_length.to_string()),
            ("maxLength", max_length.to_string()),
        ];
        if let Some(key) = &self.api_key {
            query.push(("api_key", key.clone()));
        }

        let response = self.client.get(&self.url).query(&query).send()?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }
        let body: RandomWordResponse = response
            .json()
            .map_err(|e| FetchError::BadResponse(e.to_string()))?;
        Ok(body.word)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DictionaryEntry {
    #[serde(default)]
    meanings: Vec<DictionaryMeaning>,
}

#[derive(Debug, Default, Deserialize)]
struct DictionaryMeaning {
    #[serde(default)]
    definitions: Vec<DictionaryDefinition>,
}

#[derive(Debug, Default, Deserialize)]
struct DictionaryDefinition {
    #[serde(default)]
    definition: String,
    example: Option<String>,
}

/// First meaning of the first entry, if the dictionary returned one.
pub fn definition_from_entries(entries: &[DictionaryEntry]) -> Option<Definition> {
    let meaning = entries.first()?.meanings.first()?;
    let first = meaning.definitions.first();
    let text = first
        .map(|d| d.definition.trim())
        .filter(|d| !d.is_empty())
        .unwrap_or(MISSING_DEFINITION);
    let usage = first
        .and_then(|d| d.example.as_deref())
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string);
    Some(Definition {
        meaning: text.to_string(),
        usage,
    })
}

/// dictionaryapi.dev-compatible definition endpoint.
pub struct HttpDefinitionService {
    client: Client,
    base_url: String,
}

impl HttpDefinitionService {
    #[must_use]
    pub fn new(client: Client, config: &ServiceConfig) -> Self {
        Self {
            client,
            base_url: config.definition_api_url.trim_end_matches('/').to_string(),
        }
    }
}

impl DefinitionService for HttpDefinitionService {
    fn define(&self, word: &str) -> Result<Option<Definition>, FetchError> {
        let url = format!("{}/{}", self.base_url, word.to_lowercase());
        let response = self.client.get(url).send()?;
        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            status if !status.is_success() => return Err(FetchError::Status(status.as_u16())),
            _ => {}
        }
        let entries: Vec<DictionaryEntry> = response
            .json()
            .map_err(|e| FetchError::BadResponse(e.to_string()))?;
        Ok(definition_from_entries(&entries))
    }
}

/// Remote-first word source with an offline fallback pool.
pub struct WordProvider {
    words: Option<Box<dyn RandomWordService>>,
    definitions: Option<Box<dyn DefinitionService>>,
    bank: WordBank,
    rng: StdRng,
}

impl WordProvider {
    pub fn new(
        words: Box<dyn RandomWordService>,
        definitions: Box<dyn DefinitionService>,
        bank: WordBank,
    ) -> Self {
        Self {
            words: Some(words),
            definitions: Some(definitions),
            bank,
            rng: StdRng::from_entropy(),
        }
    }

    /// Provider that never touches the network.
    #[must_use]
    pub fn offline(bank: WordBank) -> Self {
        Self {
            words: None,
            definitions: None,
            bank,
            rng: StdRng::from_entropy(),
        }
    }

    /// Provider backed by the HTTP services described by `config`.
    pub fn from_config(config: &ServiceConfig, bank: WordBank) -> Result<Self, FetchError> {
        let client = build_client(config)?;
        Ok(Self::new(
            Box::new(HttpWordService::new(client.clone(), config)),
            Box::new(HttpDefinitionService::new(client, config)),
            bank,
        ))
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    fn fetch_remote(&self, tier: Difficulty) -> Result<WordEntry, FetchError> {
        let service = self.words.as_ref().ok_or(FetchError::Disabled)?;
        let word = normalize_word(
            &service.random_word(tier.min_length(), tier.max_length())?,
            tier.min_length(),
            tier.max_length(),
        )?;
        let lower = word.to_lowercase();

        let definition = match self.definitions.as_ref().map(|d| d.define(&word)) {
            Some(Ok(found)) => found,
            Some(Err(e)) => {
                warn!("Definition lookup for {word} failed: {e}");
                None
            }
            None => None,
        };

        let (meaning, usage) = match definition {
            Some(def) => (
                def.meaning,
                def.usage.unwrap_or_else(|| {
                    format!("The word \"{lower}\" can be used in various contexts.")
                }),
            ),
            None => (
                UNDEFINED_MEANING.to_string(),
                format!("Example usage of \"{lower}\" in a sentence."),
            ),
        };

        Ok(WordEntry {
            word,
            meaning,
            usage,
        })
    }

    fn fallback(&mut self, tier: Difficulty) -> FetchedWord {
        let word = self.bank.pick(tier, &mut self.rng).to_uppercase();
        let usage = format!(
            "The word \"{}\" is commonly used in English.",
            word.to_lowercase()
        );
        FetchedWord {
            entry: WordEntry {
                word,
                meaning: OFFLINE_MEANING.to_string(),
                usage,
            },
            status: FetchStatus::Offline(OFFLINE_NOTICE.to_string()),
        }
    }
}

impl WordSource for WordProvider {
    fn fetch_word(&mut self, tier: Difficulty) -> FetchedWord {
        match self.fetch_remote(tier) {
            Ok(entry) => {
                info!("Fetched {} word of {} letters", tier, entry.word.len());
                FetchedWord {
                    entry,
                    status: FetchStatus::Online,
                }
            }
            Err(FetchError::Disabled) => self.fallback(tier),
            Err(e) => {
                warn!("Word lookup failed, using offline words: {e}");
                self.fallback(tier)
            }
        }
    }
}
