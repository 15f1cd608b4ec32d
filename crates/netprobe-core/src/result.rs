//! JSON-facing records for the public ping and traceroute operations.

use serde::{Deserialize, Serialize};

use crate::types::{HopResult, IpFamily, ProbeResult};

/// Responder placeholder for a hop that never answered.
pub const TIMEOUT_ADDRESS: &str = "timeout";

/// Message attached to a lost attempt.
pub const TIMEOUT_MESSAGE: &str = "timeout";

const PING_SUCCESS_MESSAGE: &str = "echo reply received";
const HOP_MESSAGE: &str = "hop probed";

/// Outcome tag carried by every record.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// One record per echo attempt.
///
/// Lost attempts and fatal failures carry only `status` and `message`; the
/// remaining fields are omitted from the serialized form.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PingRecord {
    pub status: Status,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icmp_seq: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_ms: Option<u64>,
}

impl PingRecord {
    /// Record for a fatal, whole-call failure.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            bytes: None,
            address: None,
            icmp_seq: None,
            ttl: None,
            time_ms: None,
        }
    }

    fn timeout() -> Self {
        Self::error(TIMEOUT_MESSAGE)
    }
}

/// One record per TTL visited by a traceroute sweep.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HopRecord {
    pub status: Status,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub delay: Vec<i64>,
}

impl HopRecord {
    /// Record for a fatal, whole-call failure.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            ttl: None,
            address: None,
            delay: Vec::new(),
        }
    }
}

/// Shapes engine results into the per-attempt record list.
///
/// IPv4 reports the payload size past the IP header plus the reply's source
/// address and TTL. IPv6 has no visible IP header, so `bytes` covers the
/// whole datagram, `address` echoes the requested destination, and `ttl` is
/// omitted.
pub fn ping_report(
    results: &[ProbeResult],
    family: IpFamily,
    destination: &str,
) -> Vec<PingRecord> {
    results
        .iter()
        .map(|result| {
            if result.is_lost() {
                return PingRecord::timeout();
            }
            let (bytes, address, ttl) = match (family, &result.ipv4_header) {
                (IpFamily::V4, Some(header)) => (
                    result.length - header.header_length(),
                    header.source.to_string(),
                    Some(header.time_to_live),
                ),
                _ => (result.length, destination.to_string(), None),
            };
            PingRecord {
                status: Status::Success,
                message: PING_SUCCESS_MESSAGE.to_string(),
                bytes: Some(bytes),
                address: Some(address),
                icmp_seq: Some(result.icmp_header.sequence_number),
                ttl,
                time_ms: Some(result.elapsed.as_millis() as u64),
            }
        })
        .collect()
}

/// Shapes sweep results into the per-hop record list.
pub fn trace_report(hops: &[HopResult]) -> Vec<HopRecord> {
    hops.iter()
        .map(|hop| HopRecord {
            status: Status::Success,
            message: HOP_MESSAGE.to_string(),
            ttl: Some(hop.ttl),
            address: Some(
                hop.responder
                    .map(|addr| addr.to_string())
                    .unwrap_or_else(|| TIMEOUT_ADDRESS.to_string()),
            ),
            delay: hop.delays.clone(),
        })
        .collect()
}

/// Pretty-prints a record list as JSON.
pub fn to_json<T: Serialize>(records: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::net::IpAddr;
    use std::time::Duration;

    use netprobe_packets::{IcmpHeader, Ipv4Header, ICMPV4_ECHO_REPLY, ICMPV6_ECHO_REPLY};

    use crate::types::ProbeResult;

    fn v4_result(source: [u8; 4], ttl: u8, seq: u16, millis: u64) -> ProbeResult {
        let mut bytes = vec![0u8; 20];
        bytes[0] = 0x45;
        bytes[8] = ttl;
        bytes[9] = 1;
        bytes[12..16].copy_from_slice(&source);
        ProbeResult {
            sequence: seq,
            ipv4_header: Some(Ipv4Header::decode(&bytes).unwrap()),
            icmp_header: IcmpHeader {
                icmp_type: ICMPV4_ECHO_REPLY,
                code: 0,
                checksum: 0x1234,
                identifier: 99,
                sequence_number: seq,
            },
            length: 51,
            elapsed: Duration::from_millis(millis),
        }
    }

    #[test]
    fn lost_attempt_serializes_bare() {
        let records = ping_report(&[ProbeResult::lost(0)], IpFamily::V4, "example.com");
        let json = serde_json::to_string(&records).unwrap();
        assert_eq!(json, r#"[{"status":"error","message":"timeout"}]"#);
    }

    #[test]
    fn v4_success_record_fields() {
        let records = ping_report(&[v4_result([8, 8, 8, 8], 113, 2, 23)], IpFamily::V4, "dns.google");
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.status, Status::Success);
        assert_eq!(record.bytes, Some(31));
        assert_eq!(record.address.as_deref(), Some("8.8.8.8"));
        assert_eq!(record.icmp_seq, Some(2));
        assert_eq!(record.ttl, Some(113));
        assert_eq!(record.time_ms, Some(23));
    }

    #[test]
    fn v6_record_omits_ttl_and_echoes_destination() {
        let result = ProbeResult {
            sequence: 0,
            ipv4_header: None,
            icmp_header: IcmpHeader {
                icmp_type: ICMPV6_ECHO_REPLY,
                code: 0,
                checksum: 0,
                identifier: 7,
                sequence_number: 0,
            },
            length: 31,
            elapsed: Duration::from_millis(9),
        };
        let records = ping_report(&[result], IpFamily::V6, "2001:4860:4860::8888");

        assert_eq!(records[0].bytes, Some(31));
        assert_eq!(records[0].address.as_deref(), Some("2001:4860:4860::8888"));

        let json = serde_json::to_string(&records).unwrap();
        assert!(!json.contains("\"ttl\""));
        assert!(json.contains("\"time_ms\":9"));
    }

    #[test]
    fn hop_records_use_timeout_sentinel() {
        let hops = vec![
            HopResult {
                ttl: 1,
                responder: Some(IpAddr::from([192, 168, 0, 1])),
                delays: vec![1, 2, 1],
            },
            HopResult {
                ttl: 2,
                responder: None,
                delays: vec![-1, -1, -1],
            },
        ];
        let records = trace_report(&hops);

        assert_eq!(records[0].address.as_deref(), Some("192.168.0.1"));
        assert_eq!(records[1].address.as_deref(), Some(TIMEOUT_ADDRESS));
        assert_eq!(records[1].delay, vec![-1, -1, -1]);

        let json = to_json(&records).unwrap();
        assert!(json.contains("\"timeout\""));
        assert!(json.contains("-1"));
    }

    #[test]
    fn error_record_round_trips() {
        let records = vec![PingRecord::error("Failed to resolve hostname nope.invalid")];
        let json = to_json(&records).unwrap();
        let parsed: Vec<PingRecord> = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].status, Status::Error);
        assert!(parsed[0].message.contains("nope.invalid"));
        assert!(parsed[0].bytes.is_none());
    }

    #[test]
    fn hop_error_record_omits_delay() {
        let json = serde_json::to_string(&vec![HopRecord::error("boom")]).unwrap();
        assert_eq!(json, r#"[{"status":"error","message":"boom"}]"#);

        let parsed: Vec<HopRecord> = serde_json::from_str(&json).unwrap();
        assert!(parsed[0].delay.is_empty());
    }
}
