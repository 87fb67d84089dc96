use std::time::Duration;

use dictionary_api::get_definition;
use reqwest::blocking::{Client, ClientBuilder};
use url::Url;

mod dictionary;
mod dictionary_api;

pub use dictionary::{DefinitionEntry, LookupOutcome, PartOfSpeechGroup, WordRecord};

const DICTIONARY_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("network error: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("HTTP error {0}")]
    Status(reqwest::StatusCode),
    #[error("could not decode response: {0}")]
    Deserialize(#[source] serde_json::Error),
    #[error("invalid dictionary url: {0}")]
    Url(#[source] url::ParseError),
    #[error("'{0}' is not a word that can be looked up")]
    InvalidWord(String),
    #[error("found no definition for '{0}'")]
    NotFound(String),
    #[error("unexpected data format")]
    Empty,
}

/// Blocking client for the free dictionary API. Every lookup is a single
/// request with no retries.
pub struct Dictionary {
    client: Client,
    base_url: Url,
}

impl Dictionary {
    pub fn new() -> Result<Self, DictionaryError> {
        Self::with_base_url(DICTIONARY_API_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, DictionaryError> {
        Self::from_builder(base_url, Client::builder(), REQUEST_TIMEOUT)
    }

    fn from_builder(
        base_url: &str,
        builder: ClientBuilder,
        timeout: Duration,
    ) -> Result<Self, DictionaryError> {
        let base_url = Url::parse(base_url).map_err(DictionaryError::Url)?;
        let client = builder
            .timeout(timeout)
            .build()
            .map_err(DictionaryError::Fetch)?;
        Ok(Self { client, base_url })
    }

    pub fn get_definition(&self, word: &str) -> Result<WordRecord, DictionaryError> {
        get_definition(&self.client, self.word_url(word)?, word)
    }

    /// Like [`Dictionary::get_definition`], but a 404 becomes
    /// [`LookupOutcome::NotFound`] and every other failure is collapsed into a
    /// printable cause.
    pub fn lookup(&self, word: &str) -> LookupOutcome {
        match self.get_definition(word) {
            Ok(record) => LookupOutcome::Found(record),
            Err(DictionaryError::NotFound(_)) => {
                tracing::info!("no definition for {word:?}");
                LookupOutcome::NotFound
            }
            Err(error) => {
                tracing::debug!("lookup of {word:?} failed: {error:?}");
                LookupOutcome::TransportError(error.to_string())
            }
        }
    }

    fn word_url(&self, word: &str) -> Result<Url, DictionaryError> {
        // URL parsing drops "." and ".." segments even when percent-encoded,
        // which would leave the collection endpoint without a word
        if word.trim().is_empty() || matches!(word, "." | "..") {
            return Err(DictionaryError::InvalidWord(word.to_owned()));
        }
        let mut url = self.base_url.clone();
        // the word is one path segment, so '/' and '?' get escaped
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(word);
        }
        Ok(url)
    }
}
