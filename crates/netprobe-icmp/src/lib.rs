//! Raw-socket plumbing and the public probe operations.
//!
//! `ping`, `pingv6`, and `tracert` return JSON-shaped record lists and fold
//! fatal failures into a single error record; `probe` and `trace` are their
//! fallible counterparts. Raw ICMP sockets require root or CAP_NET_RAW.

pub mod probe;
pub mod resolve;
pub mod socket;

pub use probe::{ping, pingv6, probe, trace, tracert};
pub use resolve::resolve;
pub use socket::IcmpSocket;
