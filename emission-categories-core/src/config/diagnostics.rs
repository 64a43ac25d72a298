//! Reader for `HEMCO_Diagn.rc` diagnostic definitions.
//!
//! ```text
//! # Name          Spec ExtNr Cat Hier Dim OutUnit  LongName
//! EmisCO_Total    CO   -1    -1  -1   3   kg/m2/s  CO_emission_flux_from_all_sectors
//! EmisCO_Anthro   CO   0     1   -1   3   kg/m2/s  CO_emission_flux_from_anthropogenic
//! ```
//!
//! A `Cat` of `-1` selects every category.

use super::{
    is_blank_or_comment, parse_category_column, parse_int_column, CategoryField,
    CategoryReference,
};
use crate::errors::{CategoryError, CategoryResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Columns up to and including `OutUnit`; `LongName` is optional and may span
/// several words.
const N_REQUIRED_COLUMNS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticEntry {
    /// 1-based line number within the file
    pub line: usize,
    pub name: String,
    pub species: String,
    /// Extension number, -1 for all extensions
    pub ext_nr: i32,
    pub categories: CategoryField,
    /// Hierarchy, -1 for all hierarchies
    pub hierarchy: i32,
    /// Spatial dimension of the output (2 or 3)
    pub dimension: u8,
    pub unit: String,
    pub long_name: Option<String>,
}

impl DiagnosticEntry {
    fn parse(text: &str, line: usize) -> CategoryResult<Self> {
        let columns: Vec<&str> = text.split_whitespace().collect();
        if columns.len() < N_REQUIRED_COLUMNS {
            return Err(CategoryError::Parse {
                line,
                message: format!(
                    "expected at least {} columns in diagnostic entry, found {}",
                    N_REQUIRED_COLUMNS,
                    columns.len()
                ),
            });
        }

        let long_name = columns[N_REQUIRED_COLUMNS..].join(" ");

        Ok(Self {
            line,
            name: columns[0].to_string(),
            species: columns[1].to_string(),
            ext_nr: parse_int_column(columns[2], "ExtNr", line)?,
            categories: parse_category_column(columns[3], line)?,
            hierarchy: parse_int_column(columns[4], "Hier", line)?,
            dimension: parse_int_column(columns[5], "Dim", line)?,
            unit: columns[6].to_string(),
            long_name: (!long_name.is_empty()).then_some(long_name),
        })
    }
}

/// Diagnostic definitions read from a `HEMCO_Diagn.rc` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsFile {
    pub source: String,
    pub entries: Vec<DiagnosticEntry>,
}

impl DiagnosticsFile {
    pub fn parse_str(source: impl Into<String>, content: &str) -> CategoryResult<Self> {
        let source = source.into();
        let entries = content
            .lines()
            .enumerate()
            .filter(|(_, text)| !is_blank_or_comment(text))
            .map(|(index, text)| DiagnosticEntry::parse(text.trim(), index + 1))
            .collect::<CategoryResult<Vec<_>>>()?;

        log::debug!("{}: read {} diagnostic entries", source, entries.len());
        Ok(Self { source, entries })
    }

    pub fn from_file(path: impl AsRef<Path>) -> CategoryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::parse_str(path.display().to_string(), &content)
    }

    /// Entries as references for validation.
    pub fn references(&self) -> Vec<CategoryReference> {
        self.entries
            .iter()
            .map(|entry| CategoryReference {
                source: self.source.clone(),
                line: entry.line,
                entry: entry.name.clone(),
                field: entry.categories.clone(),
            })
            .collect()
    }
}
