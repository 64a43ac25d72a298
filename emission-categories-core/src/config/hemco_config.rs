//! Reader for the `BASE EMISSIONS` section of `HEMCO_Config.rc`.
//!
//! Each base emission line has twelve whitespace separated columns:
//!
//! ```text
//! # ExtNr Name         srcFile        srcVar srcTime       CRE Dim Unit    Species ScalIDs Cat Hier
//! 0       CEDS_CO_ENE  $ROOT/CEDS.nc  CO_ene 1750-2019/1-12/1/0 C xy kg/m2/s CO   26/37   1   5
//! ```
//!
//! Extension brackets such as `(((CEDS` / `)))CEDS` only toggle entries on and off in
//! HEMCO and are skipped here, so every entry in the section is returned.

use super::{
    is_blank_or_comment, parse_category_column, parse_int_column, CategoryField,
    CategoryReference,
};
use crate::errors::{CategoryError, CategoryResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

const SECTION_BEGIN: &str = "BEGIN SECTION BASE EMISSIONS";
const SECTION_END: &str = "END SECTION BASE EMISSIONS";

/// Prefixes of the conditional and include markers.
const CONTROL_PREFIXES: [&str; 6] = ["(((", ")))", "[[[", "]]]", ">>>", "<<<"];

const N_COLUMNS: usize = 12;

/// A single entry of the `BASE EMISSIONS` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseEmission {
    /// 1-based line number within the file
    pub line: usize,
    /// Extension number (0 for base emissions)
    pub ext_nr: i32,
    /// Container name
    pub name: String,
    /// Emitted species
    pub species: String,
    /// `Cat` column
    pub categories: CategoryField,
    /// Hierarchy within the category
    pub hierarchy: i32,
}

impl BaseEmission {
    fn parse(text: &str, line: usize) -> CategoryResult<Self> {
        let columns: Vec<&str> = text.split_whitespace().collect();
        if columns.len() != N_COLUMNS {
            return Err(CategoryError::Parse {
                line,
                message: format!(
                    "expected {} columns in base emission entry, found {}",
                    N_COLUMNS,
                    columns.len()
                ),
            });
        }

        // `-1` only selects all categories in diagnostics; an emission needs its own
        let categories = parse_category_column(columns[10], line)?;
        if categories == CategoryField::Any {
            return Err(CategoryError::Parse {
                line,
                message: format!(
                    "category '{}' is not allowed in a base emission entry",
                    columns[10]
                ),
            });
        }

        Ok(Self {
            line,
            ext_nr: parse_int_column(columns[0], "ExtNr", line)?,
            name: columns[1].to_string(),
            species: columns[8].to_string(),
            categories,
            hierarchy: parse_int_column(columns[11], "Hier", line)?,
        })
    }
}

/// Base emission entries read from a `HEMCO_Config.rc` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HemcoConfig {
    /// Where the entries were read from
    pub source: String,
    pub entries: Vec<BaseEmission>,
}

impl HemcoConfig {
    /// Parse the content of a configuration file.
    ///
    /// `source` is only used to label the entries in reports.
    pub fn parse_str(source: impl Into<String>, content: &str) -> CategoryResult<Self> {
        let source = source.into();
        let mut entries = Vec::new();
        let mut in_section = false;
        let mut found_section = false;

        for (index, raw) in content.lines().enumerate() {
            let line = index + 1;
            let text = raw.trim();

            if text == SECTION_BEGIN {
                in_section = true;
                found_section = true;
                continue;
            }
            if text == SECTION_END {
                in_section = false;
                continue;
            }
            if !in_section || is_blank_or_comment(text) || is_control_line(text) {
                continue;
            }

            entries.push(BaseEmission::parse(text, line)?);
        }

        if in_section {
            return Err(CategoryError::Parse {
                line: content.lines().count(),
                message: format!("'{}' is never closed", SECTION_BEGIN),
            });
        }
        if !found_section {
            log::warn!("{}: no '{}' section found", source, SECTION_BEGIN);
        }

        log::debug!("{}: read {} base emission entries", source, entries.len());
        Ok(Self { source, entries })
    }

    /// Read and parse a configuration file.
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

fn is_control_line(text: &str) -> bool {
    CONTROL_PREFIXES.iter().any(|prefix| text.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = "\
###############################################################################
BEGIN SECTION SETTINGS
###############################################################################
ROOT:                        /data/HEMCO
END SECTION SETTINGS

###############################################################################
BEGIN SECTION BASE EMISSIONS
###############################################################################
# ExtNr Name srcFile srcVar srcTime CRE Dim Unit Species ScalIDs Cat Hier
(((CEDS
0 CEDS_CO_ENE  $ROOT/CEDS/CO.nc CO_ene 1750-2019/1-12/1/0 C xy kg/m2/s CO 26/37 1/2 5
)))CEDS

0 GFED_CO      -                -      -                  - -  -       CO -     5   2
END SECTION BASE EMISSIONS

BEGIN SECTION SCALE FACTORS
1 TOTFUEL_THISYR 1.0 - - - xy 1 1
END SECTION SCALE FACTORS
";

    #[test]
    fn test_parse_base_emissions() {
        let config = HemcoConfig::parse_str("HEMCO_Config.rc", CONFIG).unwrap();
        assert_eq!(config.entries.len(), 2);

        let ceds = &config.entries[0];
        assert_eq!(ceds.line, 12);
        assert_eq!(ceds.ext_nr, 0);
        assert_eq!(ceds.name, "CEDS_CO_ENE");
        assert_eq!(ceds.species, "CO");
        assert_eq!(ceds.categories, CategoryField::Codes(vec![1, 2]));
        assert_eq!(ceds.hierarchy, 5);

        let gfed = &config.entries[1];
        assert_eq!(gfed.name, "GFED_CO");
        assert_eq!(gfed.categories, CategoryField::Codes(vec![5]));
        assert_eq!(gfed.hierarchy, 2);
    }

    #[test]
    fn test_references() {
        let config = HemcoConfig::parse_str("HEMCO_Config.rc", CONFIG).unwrap();
        let references = config.references();
        assert_eq!(references.len(), 2);
        assert_eq!(references[0].source, "HEMCO_Config.rc");
        assert_eq!(references[0].to_string(), "HEMCO_Config.rc:12 (CEDS_CO_ENE)");
    }

    #[test]
    fn test_short_line_is_error() {
        let content = "BEGIN SECTION BASE EMISSIONS\n0 CEDS_CO file.nc CO\nEND SECTION BASE EMISSIONS\n";
        let err = HemcoConfig::parse_str("test", content).unwrap_err();
        assert!(matches!(err, CategoryError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_long_line_is_error() {
        let content = "BEGIN SECTION BASE EMISSIONS\n\
            0 X f.nc v 2000/1/1/0 C xy kg/m2/s CO - 1 1 extra\n\
            END SECTION BASE EMISSIONS\n";
        let err = HemcoConfig::parse_str("test", content).unwrap_err();
        assert!(matches!(err, CategoryError::Parse { line: 2, .. }));
        assert!(err.to_string().contains("found 13"));
    }

    #[test]
    fn test_all_categories_is_error() {
        let content = "BEGIN SECTION BASE EMISSIONS\n\
            0 X f.nc v 2000/1/1/0 C xy kg/m2/s CO - -1 1\n\
            END SECTION BASE EMISSIONS\n";
        let err = HemcoConfig::parse_str("test", content).unwrap_err();
        assert!(matches!(err, CategoryError::Parse { line: 2, .. }));
        assert!(err.to_string().contains("'-1'"));
    }

    #[test]
    fn test_unspecified_category_is_kept() {
        let content = "BEGIN SECTION BASE EMISSIONS\n\
            0 X f.nc v 2000/1/1/0 C xy kg/m2/s CO - - 1\n\
            END SECTION BASE EMISSIONS\n";
        let config = HemcoConfig::parse_str("test", content).unwrap();
        assert_eq!(config.entries[0].categories, CategoryField::Unspecified);
    }

    #[test]
    fn test_invalid_category_is_error() {
        let content = "BEGIN SECTION BASE EMISSIONS\n\
            0 X f.nc v 2000/1/1/0 C xy kg/m2/s CO - anthro 1\n\
            END SECTION BASE EMISSIONS\n";
        let err = HemcoConfig::parse_str("test", content).unwrap_err();
        assert!(matches!(err, CategoryError::Parse { line: 2, .. }));
        assert!(err.to_string().contains("anthro"));
    }

    #[test]
    fn test_unclosed_section_is_error() {
        let content = "BEGIN SECTION BASE EMISSIONS\n0 X f.nc v 2000/1/1/0 C xy kg/m2/s CO - 1 1\n";
        let err = HemcoConfig::parse_str("test", content).unwrap_err();
        assert!(matches!(err, CategoryError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_missing_section_is_empty() {
        let config = HemcoConfig::parse_str("test", "ROOT: /data\n").unwrap();
        assert!(config.entries.is_empty());
    }
}
