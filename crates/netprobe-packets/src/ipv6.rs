//! IPv6 header decoding.

use std::net::Ipv6Addr;

use crate::error::PacketError;

/// A decoded IPv6 base header, always 40 bytes on the wire.
///
/// Extension headers are not parsed; `next_header` reports whatever comes
/// after the base header. Raw ICMPv6 sockets strip this header before
/// delivery, so in practice it is only decoded from captured or synthetic
/// buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv6Header {
    pub version: u8,
    pub traffic_class: u8,
    pub flow_label: u32,
    pub payload_length: u16,
    pub next_header: u8,
    pub hop_limit: u8,
    pub source: Ipv6Addr,
    pub destination: Ipv6Addr,
}

impl Ipv6Header {
    /// Fixed length of the base header.
    pub const LENGTH: usize = 40;

    /// Decodes a header from the front of `bytes`. Payload bytes after the
    /// base header are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self, PacketError> {
        if bytes.len() < Self::LENGTH {
            return Err(PacketError::TooShort {
                expected: Self::LENGTH,
                actual: bytes.len(),
            });
        }
        let version = bytes[0] >> 4;
        if version != 6 {
            return Err(PacketError::BadVersion {
                expected: 6,
                actual: version,
            });
        }
        Ok(Self {
            version,
            traffic_class: ((bytes[0] & 0x0f) << 4) | (bytes[1] >> 4),
            flow_label: ((bytes[1] & 0x0f) as u32) << 16
                | (bytes[2] as u32) << 8
                | bytes[3] as u32,
            payload_length: u16::from_be_bytes([bytes[4], bytes[5]]),
            next_header: bytes[6],
            hop_limit: bytes[7],
            source: Ipv6Addr::from(address_bytes(&bytes[8..24])),
            destination: Ipv6Addr::from(address_bytes(&bytes[24..40])),
        })
    }
}

fn address_bytes(slice: &[u8]) -> [u8; 16] {
    let mut out = [0u8; 16];
    out.copy_from_slice(slice);
    out
}
