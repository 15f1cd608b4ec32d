//! Probe engine: sequential ICMP echo series and the TTL sweep over them.
//!
//! The policies here are transport-agnostic: `run_ping` and `run_trace`
//! drive the `ProbeTransport` and `HopProber` traits, and the raw-socket
//! implementations live in a separate crate, so everything in this one is
//! testable with scripted mocks.

pub mod engine;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use engine::{run_ping, run_trace};
pub use error::ProbeError;
pub use result::{
    ping_report, to_json, trace_report, HopRecord, PingRecord, Status, TIMEOUT_ADDRESS,
    TIMEOUT_MESSAGE,
};
pub use traits::{HopProber, ProbeTransport};
pub use types::{
    HopResult, IpFamily, PingParams, ProbeResult, TraceParams, DEFAULT_TTL, ECHO_PAYLOAD,
};
