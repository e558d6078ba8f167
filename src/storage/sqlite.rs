//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, ErrorCode, Transaction, params};
use crate::{Result, Error};
use crate::document::{DictionaryDocument, Gloss, Kana, Kanji, Sense};
use super::schema;

/// SQLite-backed storage for the converted dictionary
///
/// Owns the single connection for the lifetime of a run; dropping the store
/// closes it.
pub struct DictionaryStore {
    conn: Connection,
}

impl DictionaryStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch(schema::ENABLE_FOREIGN_KEYS)?;
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        tracing::debug!("Schema ready ({} tables)", schema::TABLES.len());
        Ok(())
    }

    /// Underlying connection, for callers that inspect rows directly
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Whether cascading deletes are enforced on this connection
    pub fn foreign_keys_enabled(&self) -> Result<bool> {
        let enabled: bool = self.conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))?;
        Ok(enabled)
    }

    /// Start the single write transaction of a conversion run
    ///
    /// The returned batch rolls back when dropped without [`WriteBatch::commit`].
    pub fn begin_write(&mut self) -> Result<WriteBatch<'_>> {
        let tx = self.conn.transaction()?;
        Ok(WriteBatch { tx })
    }

    /// Delete a word together with all of its forms, senses and glosses
    ///
    /// Returns false when no word with that id exists.
    pub fn delete_word(&self, id: &str) -> Result<bool> {
        let deleted = self.conn.execute("DELETE FROM words WHERE id = ?1", [id])?;
        Ok(deleted > 0)
    }

    fn count_rows(&self, table: &str) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            dictionary_info: self.count_rows("dictionary_info")?,
            tags: self.count_rows("tags")?,
            words: self.count_rows("words")?,
            kanji: self.count_rows("kanji")?,
            kana: self.count_rows("kana")?,
            senses: self.count_rows("sense")?,
            glosses: self.count_rows("gloss")?,
        })
    }
}

/// An open write transaction over a [`DictionaryStore`]
pub struct WriteBatch<'a> {
    tx: Transaction<'a>,
}

impl WriteBatch<'_> {
    // ========== Metadata ==========

    /// Insert or replace the single dictionary_info row
    pub fn upsert_dictionary_info(&self, doc: &DictionaryDocument) -> Result<()> {
        self.tx.execute(
            r#"
            INSERT OR REPLACE INTO dictionary_info (id, version, languages, common_only, dict_date, dict_revisions)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                schema::DICTIONARY_INFO_ID,
                doc.version,
                doc.languages,
                doc.common_only,
                doc.dict_date,
                doc.dict_revisions,
            ],
        )?;
        Ok(())
    }

    /// Insert or replace a tag description
    pub fn upsert_tag(&self, key: &str, description: Option<&str>) -> Result<()> {
        self.tx
            .prepare_cached("INSERT OR REPLACE INTO tags (key, description) VALUES (?1, ?2)")?
            .execute(params![key, description])?;
        Ok(())
    }

    // ========== Words ==========

    /// Insert a word row; a second insert of the same id is an integrity error
    pub fn insert_word(&self, id: &str) -> Result<()> {
        let result = self
            .tx
            .prepare_cached("INSERT INTO words (id) VALUES (?1)")?
            .execute([id]);

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(Error::DuplicateWord(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Insert a written form owned by `word_id`
    pub fn insert_kanji(&self, word_id: &str, kanji: &Kanji) -> Result<i64> {
        self.tx
            .prepare_cached(
                "INSERT INTO kanji (word_id, common, text, tags) VALUES (?1, ?2, ?3, ?4)",
            )?
            .execute(params![word_id, kanji.common, kanji.text, kanji.tags])?;
        Ok(self.tx.last_insert_rowid())
    }

    /// Insert a reading owned by `word_id`
    pub fn insert_kana(&self, word_id: &str, kana: &Kana) -> Result<i64> {
        self.tx
            .prepare_cached(
                r#"
                INSERT INTO kana (word_id, common, text, tags, applies_to_kanji)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )?
            .execute(params![
                word_id,
                kana.common,
                kana.text,
                kana.tags,
                kana.applies_to_kanji,
            ])?;
        Ok(self.tx.last_insert_rowid())
    }

    /// Insert a sense owned by `word_id` and return its generated id
    ///
    /// Glosses are not written here; they reference the returned id.
    pub fn insert_sense(&self, word_id: &str, sense: &Sense) -> Result<i64> {
        self.tx
            .prepare_cached(
                r#"
                INSERT INTO sense (
                    word_id, part_of_speech, applies_to_kanji, applies_to_kana,
                    related, antonym, field, dialect, misc, info, language_source
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                "#,
            )?
            .execute(params![
                word_id,
                sense.part_of_speech,
                sense.applies_to_kanji,
                sense.applies_to_kana,
                sense.related,
                sense.antonym,
                sense.field,
                sense.dialect,
                sense.misc,
                sense.info,
                sense.language_source,
            ])?;
        Ok(self.tx.last_insert_rowid())
    }

    /// Insert a gloss owned by the sense row `sense_id`
    pub fn insert_gloss(&self, sense_id: i64, gloss: &Gloss) -> Result<i64> {
        self.tx
            .prepare_cached(
                "INSERT INTO gloss (sense_id, lang, gender, type, text) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?
            .execute(params![
                sense_id,
                gloss.lang,
                gloss.gender,
                gloss.gloss_type,
                gloss.text,
            ])?;
        Ok(self.tx.last_insert_rowid())
    }

    /// Delete every word; owned rows go with them by cascade
    pub fn clear_words(&self) -> Result<usize> {
        Ok(self.tx.execute("DELETE FROM words", [])?)
    }

    /// Make every row written through this batch durable
    pub fn commit(self) -> Result<()> {
        self.tx.commit()?;
        Ok(())
    }
}

/// Database statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DbStats {
    pub dictionary_info: usize,
    pub tags: usize,
    pub words: usize,
    pub kanji: usize,
    pub kana: usize,
    pub senses: usize,
    pub glosses: usize,
}

impl DbStats {
    /// (table, row count) pairs in schema order
    pub fn rows(&self) -> [(&'static str, usize); 7] {
        [
            ("dictionary_info", self.dictionary_info),
            ("tags", self.tags),
            ("words", self.words),
            ("kanji", self.kanji),
            ("kana", self.kana),
            ("sense", self.senses),
            ("gloss", self.glosses),
        ]
    }
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        for (table, count) in self.rows() {
            writeln!(f, "  {}: {}", table, count)?;
        }
        Ok(())
    }
}
