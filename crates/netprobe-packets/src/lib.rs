//! Wire codecs for the IP and ICMP headers the probe engine sends and
//! receives.
//!
//! Everything here is pure: decoding reads fixed big-endian offsets out of a
//! byte buffer and encoding produces a fresh buffer. Nothing performs I/O.
//! Validation is structural only (lengths and version nibbles); addresses and
//! protocol numbers are taken as-is.

pub mod checksum;
pub mod error;
pub mod icmp;
pub mod ipv4;
pub mod ipv6;

pub use checksum::internet_checksum;
pub use error::PacketError;
pub use icmp::{
    IcmpHeader, ICMPV4_ECHO_REPLY, ICMPV4_ECHO_REQUEST, ICMPV4_TIME_EXCEEDED, ICMPV6_ECHO_REPLY,
    ICMPV6_ECHO_REQUEST,
};
pub use ipv4::Ipv4Header;
pub use ipv6::Ipv6Header;
