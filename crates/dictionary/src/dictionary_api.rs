use std::collections::HashMap;

use reqwest::{blocking::Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::{DefinitionEntry, DictionaryError, PartOfSpeechGroup, WordRecord};

const UNKNOWN_PART_OF_SPEECH: &str = "unknown";
const MISSING_DEFINITION: &str = "No definition available.";

#[derive(Debug, Deserialize)]
pub(crate) struct RawEntry {
    #[serde(default)]
    phonetic: Option<String>,
    #[serde(default)]
    meanings: Vec<RawMeaning>,
}

#[derive(Debug, Deserialize)]
struct RawMeaning {
    #[serde(rename = "partOfSpeech", default)]
    part_of_speech: Option<String>,
    #[serde(default)]
    definitions: Vec<RawDefinition>,
}

#[derive(Debug, Deserialize)]
struct RawDefinition {
    #[serde(default)]
    definition: Option<String>,
    #[serde(default)]
    example: Option<String>,
}

pub(crate) fn get_definition(
    client: &Client,
    url: Url,
    word: &str,
) -> Result<WordRecord, DictionaryError> {
    tracing::debug!(%url, "requesting definition");
    let res = client.get(url).send().map_err(DictionaryError::Fetch)?;
    let status = res.status();
    tracing::debug!(%status, "dictionary responded");
    match status {
        StatusCode::OK => {}
        StatusCode::NOT_FOUND => return Err(DictionaryError::NotFound(word.to_owned())),
        other => return Err(DictionaryError::Status(other)),
    }
    let body = res.bytes().map_err(DictionaryError::Fetch)?;
    let entries: Vec<RawEntry> =
        serde_json::from_slice(&body).map_err(DictionaryError::Deserialize)?;
    let record = merge_entries(word, entries).ok_or(DictionaryError::Empty)?;
    tracing::info!(
        groups = record.parts_of_speech.len(),
        "parsed definition of {word:?}"
    );
    Ok(record)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Flattens the raw entries into one record, grouping definitions by part of
/// speech in first-seen order. Returns `None` when there is nothing to show.
pub(crate) fn merge_entries(word: &str, entries: Vec<RawEntry>) -> Option<WordRecord> {
    let mut groups: Vec<PartOfSpeechGroup> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();
    let mut phonetic = None;

    for entry in entries {
        if phonetic.is_none() {
            phonetic = non_empty(entry.phonetic);
        }
        for meaning in entry.meanings {
            let label = non_empty(meaning.part_of_speech)
                .unwrap_or_else(|| UNKNOWN_PART_OF_SPEECH.to_owned());
            for definition in meaning.definitions {
                let slot = *group_index.entry(label.clone()).or_insert_with(|| {
                    groups.push(PartOfSpeechGroup {
                        part_of_speech: label.clone(),
                        definitions: Vec::new(),
                    });
                    groups.len() - 1
                });
                groups[slot].definitions.push(DefinitionEntry {
                    definition: non_empty(definition.definition)
                        .unwrap_or_else(|| MISSING_DEFINITION.to_owned()),
                    example: non_empty(definition.example),
                });
            }
        }
    }

    if groups.is_empty() {
        return None;
    }
    Some(WordRecord {
        word: word.to_owned(),
        phonetic,
        parts_of_speech: groups,
    })
}
