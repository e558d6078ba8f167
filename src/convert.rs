//! Document Mapper
//!
//! Walks a parsed [`DictionaryDocument`] and writes one row per entity inside
//! a single transaction:
//! 1. dictionary_info (upsert by fixed id)
//! 2. tags (upsert by key)
//! 3. words in document order, each followed by its kanji, kana, senses and
//!    the glosses of every sense
//!
//! Nothing is visible until the final commit. Any failure drops the batch,
//! which rolls back every row written during the run.

use crate::Result;
use crate::document::{DictionaryDocument, Word};
use crate::storage::{DictionaryStore, WriteBatch};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};

/// Behavior switches for a conversion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Delete all existing words (and, by cascade, their rows) before the word pass
    pub fresh: bool,
}

/// Row counts written by a successful run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConvertSummary {
    pub words: usize,
    pub kanji: usize,
    pub kana: usize,
    pub senses: usize,
    pub glosses: usize,
    pub tags: usize,
    /// Words removed up front when running with `fresh`
    pub cleared: usize,
}

/// Maps a dictionary document onto the relational schema
pub struct Converter {
    options: ConvertOptions,
    progress: Option<ProgressBar>,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            progress: None,
        }
    }

    /// Advance `bar` once per written word
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }

    /// Write the whole document and commit once
    ///
    /// Returns the counts of written rows; `words` equals the number of word
    /// entries in the document.
    pub fn convert(
        &self,
        store: &mut DictionaryStore,
        doc: &DictionaryDocument,
    ) -> Result<ConvertSummary> {
        let batch = store.begin_write()?;

        match self.write_document(&batch, doc) {
            Ok(summary) => {
                batch.commit()?;
                if let Some(bar) = &self.progress {
                    bar.finish_with_message("Done");
                }
                tracing::info!(
                    "Committed {} words ({} kanji, {} kana, {} senses, {} glosses)",
                    summary.words,
                    summary.kanji,
                    summary.kana,
                    summary.senses,
                    summary.glosses
                );
                Ok(summary)
            }
            Err(e) => {
                if let Some(bar) = &self.progress {
                    bar.abandon_with_message("Failed");
                }
                tracing::warn!("Rolling back conversion: {}", e);
                Err(e)
            }
        }
    }

    fn write_document(&self, batch: &WriteBatch<'_>, doc: &DictionaryDocument) -> Result<ConvertSummary> {
        let mut summary = ConvertSummary::default();

        tracing::info!(
            "Writing dictionary info (version {}, date {})",
            doc.version.as_deref().unwrap_or("-"),
            doc.dict_date.as_deref().unwrap_or("-")
        );
        batch.upsert_dictionary_info(doc)?;

        for (key, description) in &doc.tags {
            batch.upsert_tag(key, description.as_deref())?;
        }
        summary.tags = doc.tags.len();
        tracing::info!("Wrote {} tags", summary.tags);

        if self.options.fresh {
            summary.cleared = batch.clear_words()?;
            tracing::info!("Cleared {} existing words", summary.cleared);
        }

        if let Some(bar) = &self.progress {
            bar.set_length(doc.words.len() as u64);
        }

        tracing::info!("Writing {} words", doc.words.len());
        for word in &doc.words {
            write_word(batch, word, &mut summary)?;
            if let Some(bar) = &self.progress {
                bar.inc(1);
            }
        }

        Ok(summary)
    }
}

fn write_word(batch: &WriteBatch<'_>, word: &Word, summary: &mut ConvertSummary) -> Result<()> {
    tracing::debug!("Word {}", word.id);
    batch.insert_word(&word.id)?;

    for kanji in &word.kanji {
        batch.insert_kanji(&word.id, kanji)?;
    }
    for kana in &word.kana {
        batch.insert_kana(&word.id, kana)?;
    }
    for sense in &word.sense {
        let sense_id = batch.insert_sense(&word.id, sense)?;
        for gloss in &sense.gloss {
            batch.insert_gloss(sense_id, gloss)?;
        }
        summary.glosses += sense.gloss.len();
    }

    summary.words += 1;
    summary.kanji += word.kanji.len();
    summary.kana += word.kana.len();
    summary.senses += word.sense.len();
    Ok(())
}
