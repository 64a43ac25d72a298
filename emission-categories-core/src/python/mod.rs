use crate::category::EmissionCategory;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

mod category;

pub use category::{PyEmissionCategory, PyValidationReport};

#[pymodule]
pub fn core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyEmissionCategory>()?;
    m.add_class::<PyValidationReport>()?;

    // Named constants, mirroring the Rust `CATEGORY_*` constants
    for category in EmissionCategory::iter() {
        let definition = category.definition();
        m.add(definition.constant_name().as_str(), definition.code)?;
    }

    m.add_function(wrap_pyfunction!(category::category_code, m)?)?;
    m.add_function(wrap_pyfunction!(category::is_reserved_code, m)?)?;
    m.add_function(wrap_pyfunction!(category::validate_config_file, m)?)?;
    Ok(())
}
