use emission_categories_core::python::core;
use pyo3::prelude::*;
use pyo3::wrap_pymodule;

#[pymodule]
#[pyo3(name = "_lib")]
fn emission_categories(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_wrapped(wrap_pymodule!(core))?;

    // Make `import emission_categories._lib.core` resolve to the submodule
    let sys = PyModule::import_bound(m.py(), "sys")?;
    let modules = sys.getattr("modules")?;
    modules.set_item("emission_categories._lib.core", m.getattr("core")?)?;

    log::debug!("Initialised emission_categories._lib");
    Ok(())
}
