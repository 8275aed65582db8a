#![warn(clippy::pedantic)]

pub mod api;
pub mod cli;
pub mod http_server;
pub mod kubernetes;
pub mod manila;
pub mod manila_scheduler;
pub mod metrics;
pub mod otel;

/*
 * ============================================================================
 * Error
 * ============================================================================
 */
#[derive(Debug)]
pub enum Error {
    Kube(kube::Error),
    MissingObjectKey(&'static str),
    Serialize(serde_json::Error),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Kube(e) => write!(f, "kube error: {e}"),
            Error::MissingObjectKey(key) => write!(f, "missing object key: {key}"),
            Error::Serialize(e) => write!(f, "serialize error: {e}"),
        }
    }
}

/*
 * ============================================================================
 * Result
 * ============================================================================
 */
pub type Result<T, E = Error> = std::result::Result<T, E>;
