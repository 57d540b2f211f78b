use crate::application::replay::ScriptedChange;
use crate::domain::field::Field;
use crate::error::{CheckoutError, Result};
use serde::Deserialize;
use std::io::Read;
use std::time::Duration;

/// One row of a recorded edit script: `at_ms,field,text`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct ScriptRow {
    pub at_ms: u64,
    pub field: Field,
    pub text: Option<String>,
}

impl From<ScriptRow> for ScriptedChange {
    fn from(row: ScriptRow) -> Self {
        Self {
            at: Duration::from_millis(row.at_ms),
            field: row.field,
            text: row.text.unwrap_or_default(),
        }
    }
}

/// Reads recorded edits from a CSV source.
///
/// Only header names are trimmed. Values are taken as typed, so a `text`
/// column with stray spaces reaches the pipeline unchanged; an empty `text`
/// column is an edit that cleared the field.
pub struct ScriptReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ScriptReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes edits; a malformed row yields an error and the
    /// rows after it are still read.
    pub fn changes(self) -> impl Iterator<Item = Result<ScriptedChange>> {
        self.reader
            .into_deserialize::<ScriptRow>()
            .map(|result| result.map(ScriptedChange::from).map_err(CheckoutError::from))
    }
}
