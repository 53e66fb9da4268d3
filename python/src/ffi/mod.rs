//! Python surface: the `Lz4` class, its exception type and logging setup.

use pyo3::prelude::*;

mod callback;
mod errors;
mod logging;
mod module;

pub use errors::Lz4Error;
pub use module::PyLz4;

/// The crate version, set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn register(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyLz4>()?;
    m.add("Lz4Error", py.get_type_bound::<Lz4Error>())?;
    m.add("__version__", VERSION)?;
    m.add_function(wrap_pyfunction!(logging::enable_logging, m)?)?;

    // Default instance, bound to the importing thread.
    m.add("lz4", Bound::new(py, PyLz4::attach_default()?)?)?;
    Ok(())
}
