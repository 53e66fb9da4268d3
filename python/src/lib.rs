//! lz4-bridge-python
//!
//! Python bindings for lz4-bridge-core (PyO3).

use pyo3::prelude::*;

pub mod ffi;

/// Python module entry point
#[pymodule]
fn lz4_bridge(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    ffi::register(py, m)?;
    Ok(())
}
