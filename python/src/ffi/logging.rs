use std::fs::OpenOptions;
use std::sync::Once;

use log::LevelFilter;
use pyo3::exceptions::{PyOSError, PyValueError};
use pyo3::prelude::*;

static INIT_LOGGER: Once = Once::new();

/// Route the core's `log` output to stderr, or append it to `log_file`.
///
/// `RUST_LOG` still overrides `level`. Only the first call installs a logger;
/// later calls return `False`.
#[pyfunction]
#[pyo3(signature = (level=None, log_file=None))]
pub fn enable_logging(level: Option<&str>, log_file: Option<String>) -> PyResult<bool> {
    if INIT_LOGGER.is_completed() {
        return Ok(false);
    }

    let filter = match level {
        Some(l) => l
            .parse::<LevelFilter>()
            .map_err(|_| PyValueError::new_err(format!("unknown log level '{l}'")))?,
        None => LevelFilter::Info,
    };
    let file = match log_file {
        Some(path) => Some(
            OpenOptions::new()
                .append(true)
                .create(true)
                .open(&path)
                .map_err(|e| PyOSError::new_err(format!("cannot open log file '{path}': {e}")))?,
        ),
        None => None,
    };

    let mut installed = false;
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.is_test(false);
        builder.filter_level(filter);
        builder.parse_default_env();

        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
        });

        if let Some(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        installed = builder.try_init().is_ok();
    });
    Ok(installed)
}
