use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyString};

use lz4_bridge_core::completion::{JobOutcome, ResultHandle};

/// A Python callable invoked as `callback(result, error)`.
pub struct PyCallback(Py<PyAny>);

impl PyCallback {
    pub fn new(callable: Bound<'_, PyAny>) -> Self {
        Self(callable.unbind())
    }
}

impl ResultHandle for PyCallback {
    fn deliver(self, outcome: JobOutcome) {
        Python::with_gil(|py| {
            let args: (PyObject, PyObject) = match outcome {
                Ok(bytes) => (PyBytes::new_bound(py, &bytes).into_py(py), py.None()),
                Err(e) => (py.None(), PyString::new_bound(py, &e.to_string()).into_py(py)),
            };
            // An exception in the callback must not abort the rest of the tick.
            if let Err(err) = self.0.call1(py, args) {
                err.print(py);
            }
        });
    }
}
