use serde::{Deserialize, Serialize};

/// One word pair. Field names on the wire match the `itens` array the
/// browser version wrote, so existing data loads unchanged.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct WordEntry {
    #[serde(rename = "ID")]
    pub id: u32,

    #[serde(rename = "English_word", default)]
    pub source_term: String,

    #[serde(rename = "Portuguese_word", default)]
    pub translated_term: String,
}

impl WordEntry {
    pub fn new(id: u32, source_term: impl Into<String>, translated_term: impl Into<String>) -> Self {
        WordEntry {
            id,
            source_term: source_term.into(),
            translated_term: translated_term.into(),
        }
    }
}

/// Which of the two text fields a validation failure refers to.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Source,
    Translation,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Source => "English word",
            Field::Translation => "Portuguese word",
        }
    }
}
