use thiserror::Error;

/// Structural decoding failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PacketError {
    #[error("Packet too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    #[error("Unexpected IP version: expected {expected}, got {actual}")]
    BadVersion { expected: u8, actual: u8 },

    #[error("Invalid IPv4 header length: {0} bytes")]
    InvalidHeaderLength(usize),
}
