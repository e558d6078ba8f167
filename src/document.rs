//! Input document model
//!
//! Mirrors the `jmdict-simplified` JSON layout. The whole document is
//! deserialized up front; required fields that are missing (a written form
//! without text, a gloss without language, ...) are reported here with the
//! JSON line and column, before any row is written.

use crate::encoded::EncodedList;
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

/// A complete dictionary snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryDocument {
    /// Format version of the snapshot
    #[serde(default)]
    pub version: Option<String>,
    /// Gloss languages covered by the snapshot
    #[serde(default)]
    pub languages: EncodedList<String>,
    /// Whether the snapshot only contains common entries
    #[serde(default)]
    pub common_only: bool,
    #[serde(default)]
    pub dict_date: Option<String>,
    #[serde(default)]
    pub dict_revisions: EncodedList<String>,
    /// Tag code -> human-readable description (null in some snapshots)
    #[serde(default)]
    pub tags: BTreeMap<String, Option<String>>,
    #[serde(default)]
    pub words: Vec<Word>,
}

impl DictionaryDocument {
    /// Read and parse a document from a file
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Parse a document from any reader
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

impl FromStr for DictionaryDocument {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// One dictionary entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Word {
    /// External entry identifier (JMdict `ent_seq`)
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub kanji: Vec<Kanji>,
    #[serde(default)]
    pub kana: Vec<Kana>,
    #[serde(default)]
    pub sense: Vec<Sense>,
}

/// A written (kanji) form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kanji {
    #[serde(default)]
    pub common: bool,
    pub text: String,
    #[serde(default)]
    pub tags: EncodedList<String>,
}

/// A reading (kana) form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kana {
    #[serde(default)]
    pub common: bool,
    pub text: String,
    #[serde(default)]
    pub tags: EncodedList<String>,
    /// Written forms this reading belongs to; `["*"]` or empty means all of them
    #[serde(default)]
    pub applies_to_kanji: EncodedList<String>,
}

/// One meaning of a word with its descriptive tags and glosses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sense {
    #[serde(default)]
    pub part_of_speech: EncodedList<String>,
    #[serde(default)]
    pub applies_to_kanji: EncodedList<String>,
    #[serde(default)]
    pub applies_to_kana: EncodedList<String>,
    #[serde(default)]
    pub related: EncodedList<Xref>,
    #[serde(default)]
    pub antonym: EncodedList<Xref>,
    #[serde(default)]
    pub field: EncodedList<String>,
    #[serde(default)]
    pub dialect: EncodedList<String>,
    #[serde(default)]
    pub misc: EncodedList<String>,
    #[serde(default)]
    pub info: EncodedList<String>,
    #[serde(default)]
    pub language_source: EncodedList<LanguageSource>,
    #[serde(default)]
    pub gloss: Vec<Gloss>,
}

/// A translation of a sense into one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gloss {
    pub lang: String,
    #[serde(default)]
    pub gender: Option<String>,
    /// literal, figurative, explanation or trademark
    #[serde(default, rename = "type")]
    pub gloss_type: Option<String>,
    pub text: String,
}

/// Cross reference to another entry: written form and/or reading, optionally
/// followed by a 1-based sense index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Xref(Vec<XrefPart>);

impl Xref {
    pub fn new(parts: Vec<XrefPart>) -> Self {
        Self(parts)
    }

    pub fn parts(&self) -> &[XrefPart] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XrefPart {
    Text(String),
    Index(u32),
}

/// Source-language annotation of a loanword sense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSource {
    pub lang: String,
    #[serde(default)]
    pub full: bool,
    #[serde(default)]
    pub wasei: bool,
    #[serde(default)]
    pub text: Option<String>,
}

// Entry ids are strings in current snapshots but plain integers in some older ones.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
