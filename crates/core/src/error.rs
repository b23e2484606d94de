use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("config error: {0}")]
    Config(String),

    #[error("system error: {0}")]
    System(String),

    /// A platform lookup (CPU name, GPU name, frequency) produced nothing usable.
    #[error("probe failed: {0}")]
    Probe(String),

    /// An optional capability does not exist on this host.
    #[error("not supported: {0}")]
    Unsupported(String),

    /// The process exited between enumeration and the detail read.
    #[error("process {pid} vanished during sampling")]
    ProcessVanished { pid: u32 },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = MonitorError> = std::result::Result<T, E>;
