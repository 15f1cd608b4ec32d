use thiserror::Error;

use crate::types::IpFamily;

/// Errors that abort a whole probe or traceroute call.
///
/// Timeouts and malformed replies never appear here: the engine folds them
/// into per-attempt loss entries so a run always returns the full result
/// list it was asked for.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Failed to create raw socket: {0}")]
    SocketCreation(#[source] std::io::Error),

    #[error("Failed to set socket option: {0}")]
    SocketOption(#[source] std::io::Error),

    #[error("Failed to send echo request: {0}")]
    SendFailed(#[source] std::io::Error),

    #[error("Failed to read from socket: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to resolve hostname {hostname}: {source}")]
    ResolutionFailed {
        hostname: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("No {family} address found for {hostname}")]
    NoAddressForFamily { hostname: String, family: IpFamily },

    #[error("Invalid probe count: {0}")]
    InvalidCount(usize),

    #[error("Invalid TTL: {0}")]
    InvalidTtl(u8),

    #[error("Invalid hop limit: {0}")]
    InvalidMaxHops(u8),
}
