//! Python bindings for the category table and the consistency check.

use crate::category::{self, CategoryCode, EmissionCategory};
use crate::errors::CategoryError;
use crate::validation::{self, ValidationOptions, ValidationReport};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn to_py_err(e: CategoryError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Python wrapper for EmissionCategory.
///
/// A category of emissions as used in the `Cat` column of the HEMCO configuration files.
#[pyclass(name = "EmissionCategory", module = "emission_categories.core")]
#[derive(Clone)]
pub struct PyEmissionCategory(pub EmissionCategory);

#[pymethods]
impl PyEmissionCategory {
    /// Look up a category by its symbolic name (e.g. "BIOMASS" or "CATEGORY_BIOMASS").
    #[staticmethod]
    pub fn from_name(name: &str) -> PyResult<Self> {
        name.parse::<EmissionCategory>()
            .map(PyEmissionCategory)
            .map_err(to_py_err)
    }

    /// Look up a category by its code.
    #[staticmethod]
    pub fn from_code(code: CategoryCode) -> PyResult<Self> {
        EmissionCategory::try_from(code)
            .map(PyEmissionCategory)
            .map_err(to_py_err)
    }

    /// All categories in ascending code order.
    #[staticmethod]
    pub fn all() -> Vec<Self> {
        EmissionCategory::iter().map(PyEmissionCategory).collect()
    }

    #[getter]
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    #[getter]
    pub fn code(&self) -> CategoryCode {
        self.0.code()
    }

    #[getter]
    pub fn label(&self) -> &'static str {
        self.0.label()
    }

    #[getter]
    pub fn description(&self) -> &'static str {
        self.0.definition().description
    }

    /// The aggregate category this one belongs to, if any.
    #[getter]
    pub fn parent(&self) -> Option<Self> {
        self.0.parent().map(PyEmissionCategory)
    }

    #[getter]
    pub fn is_volcanic(&self) -> bool {
        self.0.is_volcanic()
    }

    fn __repr__(&self) -> String {
        format!("EmissionCategory.{}({})", self.0.name(), self.0.code())
    }

    fn __eq__(&self, other: &PyEmissionCategory) -> bool {
        self.0 == other.0
    }

    fn __hash__(&self) -> u64 {
        u64::from(self.0.code())
    }

    fn __int__(&self) -> CategoryCode {
        self.0.code()
    }
}

/// Get the code of a category by name.
///
/// # Example
///
/// ```python
/// from emission_categories.core import category_code
///
/// assert category_code("VOLCANO_ERUPT") == 51
/// ```
#[pyfunction]
pub fn category_code(name: &str) -> PyResult<CategoryCode> {
    name.parse::<EmissionCategory>()
        .map(|c| c.code())
        .map_err(to_py_err)
}

/// Check if a code is an unassigned value inside the range of the table.
#[pyfunction]
pub fn is_reserved_code(code: CategoryCode) -> bool {
    category::is_reserved_code(code)
}

/// Outcome of a consistency check.
#[pyclass(name = "ValidationReport", module = "emission_categories.core")]
#[derive(Clone)]
pub struct PyValidationReport {
    /// True when no issue is an error
    #[pyo3(get)]
    pub consistent: bool,
    /// Number of category references checked
    #[pyo3(get)]
    pub checked: usize,
    #[pyo3(get)]
    pub errors: Vec<String>,
    #[pyo3(get)]
    pub warnings: Vec<String>,
}

impl From<&ValidationReport> for PyValidationReport {
    fn from(report: &ValidationReport) -> Self {
        Self {
            consistent: report.is_consistent(),
            checked: report.checked,
            errors: report.errors().map(|issue| issue.to_string()).collect(),
            warnings: report.warnings().map(|issue| issue.to_string()).collect(),
        }
    }
}

#[pymethods]
impl PyValidationReport {
    fn __bool__(&self) -> bool {
        self.consistent
    }

    fn __repr__(&self) -> String {
        format!(
            "ValidationReport(consistent={}, checked={}, errors={}, warnings={})",
            self.consistent,
            self.checked,
            self.errors.len(),
            self.warnings.len()
        )
    }
}

/// Check the base emissions of a `HEMCO_Config.rc` file against the category table.
///
/// # Arguments
///
/// * `path` - Path to the configuration file
/// * `options_toml` - Optional validation options as a TOML document
///
/// # Example
///
/// ```python
/// from emission_categories.core import validate_config_file
///
/// report = validate_config_file("HEMCO_Config.rc", "allow_reserved = true")
/// if not report.consistent:
///     print("\n".join(report.errors))
/// ```
#[pyfunction]
#[pyo3(signature = (path, options_toml=None))]
pub fn validate_config_file(
    path: &str,
    options_toml: Option<&str>,
) -> PyResult<PyValidationReport> {
    let options = match options_toml {
        Some(content) => ValidationOptions::from_toml_str(content).map_err(to_py_err)?,
        None => ValidationOptions::default(),
    };
    let report = validation::validate_config_file(path, &options).map_err(to_py_err)?;
    Ok(PyValidationReport::from(&report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CategoryField, CategoryReference};
    use crate::validation::validate;

    fn reference(entry: &str, codes: Vec<CategoryCode>) -> CategoryReference {
        CategoryReference {
            source: "test".to_string(),
            line: 1,
            entry: entry.to_string(),
            field: CategoryField::Codes(codes),
        }
    }

    #[test]
    fn test_report_separates_errors_and_warnings() {
        let options = ValidationOptions {
            allow_reserved: true,
            ..Default::default()
        };
        let references = vec![reference("A", vec![2]), reference("B", vec![99, 5])];
        let report = PyValidationReport::from(&validate(&references, &options));

        assert!(!report.consistent);
        assert_eq!(report.checked, 2);
        assert_eq!(report.errors, vec!["test:1 (B): error: category 99 is not defined"]);
        assert_eq!(report.warnings, vec!["test:1 (A): warning: category 2 is reserved"]);
    }

    #[test]
    fn test_report_consistent() {
        let references = vec![reference("A", vec![1, 51])];
        let report =
            PyValidationReport::from(&validate(&references, &ValidationOptions::default()));

        assert!(report.consistent);
        assert!(report.__bool__());
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_is_volcanic() {
        assert!(PyEmissionCategory(EmissionCategory::VolcanoDegas).is_volcanic());
        assert!(!PyEmissionCategory(EmissionCategory::Ship).is_volcanic());
    }
}
