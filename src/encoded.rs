//! Encoded lists - ordered sequences stored in a single TEXT column
//!
//! List-valued fields (tags, part of speech, cross references, ...) are never
//! filtered relationally, so they are kept whole as a compact JSON array
//! instead of being split into join tables. An empty list encodes as `[]`,
//! never NULL.

use crate::Result;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// An ordered list that crosses the storage boundary as one encoded value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedList<T>(Vec<T>);

impl<T> EncodedList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self(items)
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T: Serialize> EncodedList<T> {
    /// Encode into the canonical column text
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }
}

impl<T: DeserializeOwned> EncodedList<T> {
    /// Decode column text produced by [`EncodedList::encode`]
    pub fn decode(text: &str) -> Result<Self> {
        Ok(Self(serde_json::from_str(text)?))
    }
}

impl<T> Default for EncodedList<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> From<Vec<T>> for EncodedList<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items)
    }
}

impl<T> Deref for EncodedList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T: Serialize> ToSql for EncodedList<T> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let text = serde_json::to_string(&self.0)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        Ok(ToSqlOutput::from(text))
    }
}

impl<T: DeserializeOwned> FromSql for EncodedList<T> {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        serde_json::from_str(text)
            .map(Self)
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
