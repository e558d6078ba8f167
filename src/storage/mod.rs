//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - dictionary_info(id, version, languages, common_only, dict_date, dict_revisions)
//! - tags(key, description)
//! - words(id)
//! - kanji(kanji_id, word_id, common, text, tags)
//! - kana(kana_id, word_id, common, text, tags, applies_to_kanji)
//! - sense(sense_id, word_id, part_of_speech, ..., language_source)
//! - gloss(gloss_id, sense_id, lang, gender, type, text)

pub mod schema;
pub mod sqlite;

pub use sqlite::{DbStats, DictionaryStore, WriteBatch};
