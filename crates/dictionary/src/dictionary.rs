/// The merged result of a single lookup.
///
/// `parts_of_speech` keeps the order in which each label was first seen in the
/// response and is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRecord {
    pub word: String,
    pub phonetic: Option<String>,
    pub parts_of_speech: Vec<PartOfSpeechGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartOfSpeechGroup {
    pub part_of_speech: String,
    pub definitions: Vec<DefinitionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionEntry {
    pub definition: String,
    pub example: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(WordRecord),
    NotFound,
    /// Any failure other than a 404, with a short cause meant for the user.
    TransportError(String),
}

impl LookupOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }
}
