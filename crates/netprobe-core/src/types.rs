//! Parameter objects and result values shared across the workspace.

use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use netprobe_packets::{IcmpHeader, Ipv4Header, ICMPV4_ECHO_REQUEST, ICMPV6_ECHO_REQUEST};

use crate::error::ProbeError;

/// TTL the platform applies when none is set on the socket.
pub const DEFAULT_TTL: u8 = 64;

/// Fixed payload carried by every echo request.
pub const ECHO_PAYLOAD: &[u8] = b"\"Hello!\" from netprobe.";

/// Address family of one probe run, selecting the header codec and the ICMP
/// type constants at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpFamily {
    V4,
    V6,
}

impl IpFamily {
    /// ICMP echo-request type for this family.
    pub fn echo_request_type(&self) -> u8 {
        match self {
            IpFamily::V4 => ICMPV4_ECHO_REQUEST,
            IpFamily::V6 => ICMPV6_ECHO_REQUEST,
        }
    }
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpFamily::V4 => write!(f, "IPv4"),
            IpFamily::V6 => write!(f, "IPv6"),
        }
    }
}

/// Parameters for one echo-request series.
#[derive(Debug, Clone)]
pub struct PingParams {
    pub count: usize,
    pub ttl: u8,
    pub timeout: Duration,
}

impl Default for PingParams {
    fn default() -> Self {
        Self {
            count: 4,
            ttl: DEFAULT_TTL,
            timeout: Duration::from_millis(1000),
        }
    }
}

impl PingParams {
    /// Validates parameter ranges. Sequence numbers are 16-bit, which bounds
    /// `count`.
    pub fn validate(&self) -> Result<(), ProbeError> {
        if self.count == 0 || self.count > u16::MAX as usize + 1 {
            return Err(ProbeError::InvalidCount(self.count));
        }
        if self.ttl == 0 {
            return Err(ProbeError::InvalidTtl(self.ttl));
        }
        Ok(())
    }
}

/// Parameters for one traceroute sweep.
#[derive(Debug, Clone)]
pub struct TraceParams {
    pub max_hops: u8,
    pub probes_per_hop: usize,
    pub timeout: Duration,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            max_hops: 30,
            probes_per_hop: 3,
            timeout: Duration::from_millis(1000),
        }
    }
}

impl TraceParams {
    pub fn validate(&self) -> Result<(), ProbeError> {
        if self.max_hops == 0 {
            return Err(ProbeError::InvalidMaxHops(self.max_hops));
        }
        if self.probes_per_hop == 0 || self.probes_per_hop > u16::MAX as usize + 1 {
            return Err(ProbeError::InvalidCount(self.probes_per_hop));
        }
        Ok(())
    }
}

/// Outcome of a single echo attempt.
///
/// `length == 0` marks a loss: either the timer won the race or the reply
/// failed to decode. IPv4 runs carry the decoded IP header; for IPv6 the
/// kernel strips it before delivery, so `ipv4_header` stays `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub sequence: u16,
    pub ipv4_header: Option<Ipv4Header>,
    pub icmp_header: IcmpHeader,
    pub length: usize,
    pub elapsed: Duration,
}

impl ProbeResult {
    /// Loss entry for `sequence`: zero length, zero elapsed, no headers.
    pub fn lost(sequence: u16) -> Self {
        Self {
            sequence,
            ipv4_header: None,
            icmp_header: IcmpHeader::default(),
            length: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// True when this attempt produced no decodable reply.
    pub fn is_lost(&self) -> bool {
        self.length == 0
    }
}

/// Outcome of one TTL step in a traceroute sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HopResult {
    pub ttl: u8,
    pub responder: Option<IpAddr>,
    pub delays: Vec<i64>,
}

impl HopResult {
    /// True when some router or the destination answered at this TTL.
    pub fn responded(&self) -> bool {
        self.responder.is_some()
    }
}
