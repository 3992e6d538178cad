//! Mapping table loaded from the candidate-mappings CSV
//!
//! Expected header:
//!
//! ```text
//! AYUSH_Code,AYUSH_Term,Target_System,WHO_Code_Candidate,WHO_Term_Candidate,Similarity_Score,Suggested_Relationship
//! ```
//!
//! A blank or unparseable `Similarity_Score` reads as 0.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use core_kernel::AyushCode;
use crate::error::TerminologyError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingRow {
    #[serde(rename = "AYUSH_Code")]
    pub ayush_code: AyushCode,
    #[serde(rename = "AYUSH_Term")]
    pub ayush_term: String,
    #[serde(rename = "Target_System", default)]
    pub target_system: String,
    #[serde(rename = "WHO_Code_Candidate", default)]
    pub who_code: String,
    #[serde(rename = "WHO_Term_Candidate", default)]
    pub who_term: String,
    /// Precomputed semantic similarity in [0, 1]
    #[serde(rename = "Similarity_Score", default, deserialize_with = "lenient_score")]
    pub similarity: f64,
    #[serde(rename = "Suggested_Relationship", default)]
    pub relationship: String,
}

fn lenient_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0))
}

/// A row plus its lower-cased search keys
#[derive(Debug, Clone)]
pub(crate) struct IndexedRow {
    pub row: MappingRow,
    pub ayush_lower: String,
    pub who_lower: String,
}

/// The in-memory mapping table. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    rows: Vec<IndexedRow>,
}

impl MappingTable {
    pub fn from_rows(rows: impl IntoIterator<Item = MappingRow>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| IndexedRow {
                ayush_lower: row.ayush_term.to_lowercase(),
                who_lower: row.who_term.to_lowercase(),
                row,
            })
            .collect();
        Self { rows }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TerminologyError> {
        let mut csv = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let rows = csv
            .deserialize::<MappingRow>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_rows(rows))
    }

    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self, TerminologyError> {
        let path = path.as_ref();
        let table = Self::from_reader(std::fs::File::open(path).map_err(csv::Error::from)?)?;
        info!(rows = table.len(), path = %path.display(), "Loaded terminology mappings");
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &MappingRow> {
        self.rows.iter().map(|r| &r.row)
    }

    pub(crate) fn indexed(&self) -> &[IndexedRow] {
        &self.rows
    }
}
