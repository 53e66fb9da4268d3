use pyo3::exceptions::PyTypeError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use lz4_bridge_core::bridge::Bridge;
use lz4_bridge_core::compression::Direction;
use lz4_bridge_core::config::BridgeConfig;

use crate::ffi::callback::PyCallback;
use crate::ffi::errors::{to_py_err, Lz4Error};

/// Name under which `think` is registered with a host hook table.
const HOOK_EVENT: &str = "Think";
const HOOK_NAME: &str = "lz4_bridge";

/// LZ4 frame codec bound to the thread that created it.
///
/// `think()` must be called periodically from that thread; it is where async
/// callbacks run.
#[pyclass(name = "Lz4", module = "lz4_bridge", frozen)]
pub struct PyLz4 {
    bridge: Bridge,
}

impl PyLz4 {
    pub fn attach_default() -> PyResult<Self> {
        Self::attach(BridgeConfig::default())
    }

    fn attach(config: BridgeConfig) -> PyResult<Self> {
        let bridge = Bridge::attach(config).map_err(to_py_err)?;
        Ok(Self { bridge })
    }

    fn run<'py>(&self, py: Python<'py>, direction: Direction, data: &[u8]) -> PyResult<Bound<'py, PyBytes>> {
        let out = py
            .allow_threads(|| match direction {
                Direction::Encode => self.bridge.encode(data),
                Direction::Decode => self.bridge.decode(data),
            })
            .map_err(to_py_err)?;
        Ok(PyBytes::new_bound(py, &out))
    }

    fn launch(&self, direction: Direction, data: &[u8], callback: Bound<'_, PyAny>) -> PyResult<u64> {
        if !callback.is_callable() {
            return Err(PyTypeError::new_err("callback must be callable"));
        }
        let id = self
            .bridge
            .submit(direction, data.to_vec(), PyCallback::new(callback))
            .map_err(to_py_err)?;
        Ok(id.0)
    }
}

#[pymethods]
impl PyLz4 {
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(text) => BridgeConfig::from_json(text).map_err(|e| to_py_err(e.into()))?,
            None => BridgeConfig::default(),
        };
        Self::attach(config)
    }

    fn compress<'py>(&self, py: Python<'py>, data: &[u8]) -> PyResult<Bound<'py, PyBytes>> {
        self.run(py, Direction::Encode, data)
    }

    fn decompress<'py>(&self, py: Python<'py>, data: &[u8]) -> PyResult<Bound<'py, PyBytes>> {
        self.run(py, Direction::Decode, data)
    }

    /// Returns the job id; `callback(result, error)` runs during a later `think()`.
    fn compress_async(&self, data: &[u8], callback: Bound<'_, PyAny>) -> PyResult<u64> {
        self.launch(Direction::Encode, data, callback)
    }

    fn decompress_async(&self, data: &[u8], callback: Bound<'_, PyAny>) -> PyResult<u64> {
        self.launch(Direction::Decode, data, callback)
    }

    /// Deliver finished async results. Returns how many callbacks ran.
    fn think(&self) -> PyResult<usize> {
        self.bridge.pump().map_err(to_py_err)
    }

    /// Register `think` with a hook table exposing `add(event, name, fn)`.
    fn attach_hooks(slf: &Bound<'_, Self>, hooks: &Bound<'_, PyAny>) -> PyResult<()> {
        let think = slf.getattr("think")?;
        hooks.call_method1("add", (HOOK_EVENT, HOOK_NAME, think))?;
        Ok(())
    }

    fn detach_hooks(&self, hooks: &Bound<'_, PyAny>) -> PyResult<()> {
        hooks.call_method1("remove", (HOOK_EVENT, HOOK_NAME))?;
        Ok(())
    }

    /// Join outstanding workers and deliver their results. Idempotent.
    fn close(&self, py: Python<'_>) -> usize {
        // Workers never take the GIL, so joining them does not need it.
        py.allow_threads(|| self.bridge.shutdown());
        self.bridge.detach()
    }

    #[getter]
    fn closed(&self) -> bool {
        self.bridge.is_detached()
    }

    fn stats(&self) -> PyResult<String> {
        self.bridge
            .snapshot()
            .to_json()
            .map_err(|e| Lz4Error::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        let snap = self.bridge.snapshot();
        format!(
            "Lz4(level={}, in_flight={}, pending={}, closed={})",
            self.bridge.config().frame.compression_level,
            snap.jobs_in_flight,
            snap.completions_pending,
            self.bridge.is_detached(),
        )
    }
}
