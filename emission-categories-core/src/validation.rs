//! Consistency check between configuration files and the category table.
//!
//! The category table and the HEMCO configuration files are maintained separately.
//! Nothing keeps them in sync automatically, so this check is opt-in: call
//! [`validate`] (or one of the file helpers) when a configuration is loaded.
//!
//! # Example
//!
//! ```rust
//! use emission_categories_core::config::HemcoConfig;
//! use emission_categories_core::validation::{validate, ValidationOptions};
//!
//! let config = HemcoConfig::parse_str(
//!     "HEMCO_Config.rc",
//!     "BEGIN SECTION BASE EMISSIONS\n\
//!      0 EDGAR_CO f.nc CO 2000/1/1/0 C xy kg/m2/s CO - 1 1\n\
//!      0 OTHER_CO f.nc CO 2000/1/1/0 C xy kg/m2/s CO - 7 1\n\
//!      END SECTION BASE EMISSIONS\n",
//! )
//! .unwrap();
//!
//! let report = validate(&config.references(), &ValidationOptions::default());
//! assert_eq!(report.checked, 2);
//! assert!(!report.is_consistent()); // 7 is a reserved code
//! ```

use crate::category::{is_reserved_code, CategoryCode, EmissionCategory};
use crate::config::{CategoryField, CategoryReference, DiagnosticsFile, HemcoConfig};
use crate::errors::{CategoryError, CategoryResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// Options controlling how strict the check is.
///
/// Can be read from TOML; missing keys take their default.
///
/// ```toml
/// allow_reserved = false
/// allow_unspecified = true
/// extra_codes = [60, 61]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Report reserved codes as warnings instead of errors
    /// default: false
    pub allow_reserved: bool,

    /// Accept `-` in a `Cat` column
    /// default: true
    pub allow_unspecified: bool,

    /// Codes defined by the host configuration on top of the table.
    /// They are accepted but never mapped to a table category.
    /// default: empty
    pub extra_codes: Vec<CategoryCode>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            allow_reserved: false,
            allow_unspecified: true,
            extra_codes: Vec::new(),
        }
    }
}

impl ValidationOptions {
    pub fn from_toml_str(content: &str) -> CategoryResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> CategoryResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

/// What is wrong with a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    /// Code in a reserved gap of the table
    Reserved(CategoryCode),
    /// Code outside the range of the table
    Unknown(CategoryCode),
    /// `-` given where a category is required
    Unspecified,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::Reserved(code) => write!(f, "category {} is reserved", code),
            IssueKind::Unknown(code) => write!(f, "category {} is not defined", code),
            IssueKind::Unspecified => write!(f, "no category given"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub reference: CategoryReference,
    pub kind: IssueKind,
    pub severity: Severity,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}: {}: {}", self.reference, level, self.kind)
    }
}

/// Outcome of a consistency check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Number of references checked
    pub checked: usize,
    pub issues: Vec<ValidationIssue>,
    used: BTreeSet<EmissionCategory>,
}

impl ValidationReport {
    /// True when no issue is an error.
    pub fn is_consistent(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Warning)
    }

    /// Table categories referenced at least once, in code order.
    pub fn used_categories(&self) -> Vec<EmissionCategory> {
        self.used.iter().copied().collect()
    }

    /// Convert into an error if any issue is an error.
    pub fn into_result(self) -> CategoryResult<Self> {
        let count = self.errors().count();
        if count > 0 {
            Err(CategoryError::Inconsistent { count })
        } else {
            Ok(self)
        }
    }

    fn push(&mut self, reference: &CategoryReference, kind: IssueKind, severity: Severity) {
        let issue = ValidationIssue {
            reference: reference.clone(),
            kind,
            severity,
        };
        log::warn!("{}", issue);
        self.issues.push(issue);
    }
}

/// Check every reference against the category table.
pub fn validate(references: &[CategoryReference], options: &ValidationOptions) -> ValidationReport {
    let mut report = ValidationReport::default();

    for reference in references {
        report.checked += 1;
        match &reference.field {
            CategoryField::Any => {}
            CategoryField::Unspecified => {
                if !options.allow_unspecified {
                    report.push(reference, IssueKind::Unspecified, Severity::Error);
                }
            }
            CategoryField::Codes(codes) => {
                for &code in codes {
                    check_code(&mut report, reference, code, options);
                }
            }
        }
    }

    log::info!(
        "Checked {} category references: {} error(s), {} warning(s)",
        report.checked,
        report.errors().count(),
        report.warnings().count()
    );
    report
}

fn check_code(
    report: &mut ValidationReport,
    reference: &CategoryReference,
    code: CategoryCode,
    options: &ValidationOptions,
) {
    if let Some(category) = EmissionCategory::from_code(code) {
        report.used.insert(category);
    } else if options.extra_codes.contains(&code) {
        log::debug!("{}: category {} accepted as an extra code", reference, code);
    } else if is_reserved_code(code) {
        let severity = if options.allow_reserved {
            Severity::Warning
        } else {
            Severity::Error
        };
        report.push(reference, IssueKind::Reserved(code), severity);
    } else {
        report.push(reference, IssueKind::Unknown(code), Severity::Error);
    }
}

/// Read a `HEMCO_Config.rc` file and check its base emissions.
pub fn validate_config_file(
    path: impl AsRef<Path>,
    options: &ValidationOptions,
) -> CategoryResult<ValidationReport> {
    let config = HemcoConfig::from_file(path)?;
    Ok(validate(&config.references(), options))
}

/// Read a `HEMCO_Diagn.rc` file and check its diagnostics.
pub fn validate_diagnostics_file(
    path: impl AsRef<Path>,
    options: &ValidationOptions,
) -> CategoryResult<ValidationReport> {
    let diagnostics = DiagnosticsFile::from_file(path)?;
    Ok(validate(&diagnostics.references(), options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(entry: &str, field: CategoryField) -> CategoryReference {
        CategoryReference {
            source: "test".to_string(),
            line: 1,
            entry: entry.to_string(),
            field,
        }
    }

    #[test]
    fn test_assigned_codes_are_consistent() {
        let references = vec![
            reference("A", CategoryField::Codes(vec![1, 3])),
            reference("B", CategoryField::Codes(vec![51])),
            reference("C", CategoryField::Any),
        ];
        let report = validate(&references, &ValidationOptions::default());

        assert_eq!(report.checked, 3);
        assert!(report.is_consistent());
        assert!(report.issues.is_empty());
        assert_eq!(
            report.used_categories(),
            vec![
                EmissionCategory::Anthro,
                EmissionCategory::Natural,
                EmissionCategory::VolcanoErupt
            ]
        );
    }

    #[test]
    fn test_reserved_and_unknown_codes() {
        let references = vec![
            reference("A", CategoryField::Codes(vec![2])),
            reference("B", CategoryField::Codes(vec![99])),
        ];
        let report = validate(&references, &ValidationOptions::default());

        assert!(!report.is_consistent());
        assert_eq!(report.errors().count(), 2);
        assert_eq!(report.issues[0].kind, IssueKind::Reserved(2));
        assert_eq!(report.issues[1].kind, IssueKind::Unknown(99));
        assert_eq!(
            report.issues[0].to_string(),
            "test:1 (A): error: category 2 is reserved"
        );
    }

    #[test]
    fn test_allow_reserved_downgrades_to_warning() {
        let options = ValidationOptions {
            allow_reserved: true,
            ..Default::default()
        };
        let references = vec![
            reference("A", CategoryField::Codes(vec![11])),
            reference("B", CategoryField::Codes(vec![0])),
        ];
        let report = validate(&references, &options);

        assert_eq!(report.warnings().count(), 1);
        // 0 is below the table range, not reserved
        assert_eq!(report.errors().count(), 1);
        assert_eq!(report.errors().next().unwrap().kind, IssueKind::Unknown(0));
    }

    #[test]
    fn test_extra_codes() {
        let options = ValidationOptions {
            extra_codes: vec![7, 60],
            ..Default::default()
        };
        let references = vec![reference("A", CategoryField::Codes(vec![7, 60, 10]))];
        let report = validate(&references, &options);

        assert!(report.is_consistent());
        assert_eq!(report.used_categories(), vec![EmissionCategory::Ship]);
    }

    #[test]
    fn test_unspecified() {
        let references = vec![reference("A", CategoryField::Unspecified)];

        let report = validate(&references, &ValidationOptions::default());
        assert!(report.is_consistent());

        let strict = ValidationOptions {
            allow_unspecified: false,
            ..Default::default()
        };
        let report = validate(&references, &strict);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].kind, IssueKind::Unspecified);
    }

    #[test]
    fn test_into_result() {
        let references = vec![
            reference("A", CategoryField::Codes(vec![2])),
            reference("B", CategoryField::Codes(vec![13, 14])),
        ];
        let err = validate(&references, &ValidationOptions::default())
            .into_result()
            .unwrap_err();
        assert!(matches!(err, CategoryError::Inconsistent { count: 3 }));

        let ok = validate(&[], &ValidationOptions::default()).into_result();
        assert!(ok.is_ok());
    }

    #[test]
    fn test_options_from_toml() {
        let options = ValidationOptions::from_toml_str("allow_reserved = true\nextra_codes = [60]\n")
            .unwrap();
        assert!(options.allow_reserved);
        assert!(options.allow_unspecified);
        assert_eq!(options.extra_codes, vec![60]);

        let defaults = ValidationOptions::from_toml_str("").unwrap();
        assert_eq!(defaults, ValidationOptions::default());

        let err = ValidationOptions::from_toml_str("allow_reserved = \"yes\"").unwrap_err();
        assert!(matches!(err, CategoryError::Config(_)));
    }
}
