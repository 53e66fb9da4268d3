use pyo3::create_exception;
use pyo3::exceptions::{PyException, PyRuntimeError, PyValueError};
use pyo3::PyErr;

use lz4_bridge_core::types::BridgeError;

create_exception!(lz4_bridge, Lz4Error, PyException, "LZ4 frame encode/decode failure.");

/// Codec failures raise `Lz4Error`; misuse of the bridge raises built-ins.
pub fn to_py_err(err: BridgeError) -> PyErr {
    let message = err.to_string();
    match err {
        BridgeError::Codec(_) => Lz4Error::new_err(message),
        BridgeError::Config(_) => PyValueError::new_err(message),
        BridgeError::Launch(_) | BridgeError::WrongThread(_) => PyRuntimeError::new_err(message),
    }
}
