//! Readers for the category columns of the HEMCO configuration files.
//!
//! Only the information needed to relate entries back to the category table is kept:
//! entry names, species, extension numbers, hierarchies and the `Cat` column.
//!
//! - [`hemco_config`]: `BASE EMISSIONS` section of `HEMCO_Config.rc`
//! - [`diagnostics`]: `HEMCO_Diagn.rc` diagnostic definitions

pub mod diagnostics;
pub mod hemco_config;

use crate::category::{CategoryCode, EmissionCategory};
use crate::errors::{CategoryError, CategoryResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use diagnostics::{DiagnosticEntry, DiagnosticsFile};
pub use hemco_config::{BaseEmission, HemcoConfig};

/// Token used for an empty `Cat` column.
const UNSPECIFIED_TOKEN: &str = "-";

/// Token selecting every category in a diagnostic definition.
const ANY_TOKEN: &str = "-1";

/// Separator between multiple codes in one `Cat` column (`1/2`).
const CODE_SEPARATOR: char = '/';

/// Parsed content of a `Cat` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryField {
    /// `-`: no category given.
    Unspecified,
    /// `-1`: all categories.
    Any,
    /// One or more codes, in the order written.
    Codes(Vec<CategoryCode>),
}

impl CategoryField {
    /// Codes listed in this field. Empty for [`CategoryField::Unspecified`] and
    /// [`CategoryField::Any`].
    pub fn codes(&self) -> &[CategoryCode] {
        match self {
            CategoryField::Codes(codes) => codes,
            _ => &[],
        }
    }

    /// Table categories listed in this field, skipping codes that are not in the table.
    pub fn categories(&self) -> impl Iterator<Item = EmissionCategory> + '_ {
        self.codes()
            .iter()
            .filter_map(|code| EmissionCategory::from_code(*code))
    }
}

impl FromStr for CategoryField {
    type Err = CategoryError;

    fn from_str(s: &str) -> CategoryResult<Self> {
        let token = s.trim();
        match token {
            UNSPECIFIED_TOKEN => Ok(CategoryField::Unspecified),
            ANY_TOKEN => Ok(CategoryField::Any),
            _ => token
                .split(CODE_SEPARATOR)
                .map(|part| {
                    part.parse::<CategoryCode>()
                        .map_err(|_| CategoryError::InvalidCode(token.to_string()))
                })
                .collect::<CategoryResult<Vec<_>>>()
                .map(CategoryField::Codes),
        }
    }
}

impl fmt::Display for CategoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryField::Unspecified => write!(f, "{}", UNSPECIFIED_TOKEN),
            CategoryField::Any => write!(f, "{}", ANY_TOKEN),
            CategoryField::Codes(codes) => {
                let joined: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
                write!(f, "{}", joined.join(&CODE_SEPARATOR.to_string()))
            }
        }
    }
}

/// A configuration entry that refers to the category table.
///
/// Common view over [`BaseEmission`] and [`DiagnosticEntry`] used by
/// [`crate::validation::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReference {
    /// File (or other origin) the entry was read from
    pub source: String,
    /// 1-based line number
    pub line: usize,
    /// Entry name (e.g. "CEDS_CO_ENE" or "EmisCO_Anthro")
    pub entry: String,
    /// Parsed `Cat` column
    pub field: CategoryField,
}

impl fmt::Display for CategoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({})", self.source, self.line, self.entry)
    }
}

/// Parse an integer column, reporting the column name on failure.
fn parse_int_column<T: FromStr>(token: &str, column: &str, line: usize) -> CategoryResult<T> {
    token.parse::<T>().map_err(|_| CategoryError::Parse {
        line,
        message: format!("column {} is not an integer: '{}'", column, token),
    })
}

/// Parse a `Cat` column, attaching the line number to invalid codes.
fn parse_category_column(token: &str, line: usize) -> CategoryResult<CategoryField> {
    token.parse::<CategoryField>().map_err(|e| CategoryError::Parse {
        line,
        message: e.to_string(),
    })
}

/// Whether a line carries no entry.
fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}
