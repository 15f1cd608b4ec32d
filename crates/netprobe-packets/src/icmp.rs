//! ICMP header encoding and decoding.

use crate::checksum::internet_checksum;
use crate::error::PacketError;

/// ICMPv4 echo request type.
pub const ICMPV4_ECHO_REQUEST: u8 = 8;
/// ICMPv4 echo reply type.
pub const ICMPV4_ECHO_REPLY: u8 = 0;
/// ICMPv4 time exceeded type, sent by a router that dropped an expired probe.
pub const ICMPV4_TIME_EXCEEDED: u8 = 11;
/// ICMPv6 echo request type.
pub const ICMPV6_ECHO_REQUEST: u8 = 128;
/// ICMPv6 echo reply type.
pub const ICMPV6_ECHO_REPLY: u8 = 129;

/// An ICMP message header in the echo-message layout: type, code, checksum,
/// identifier, sequence number.
///
/// The same eight-byte prefix is read out of any incoming ICMP message, echo
/// or not; for non-echo messages the identifier and sequence fields carry
/// whatever those bytes happen to hold. The zero value (via `Default`) stands
/// for "no header decoded".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IcmpHeader {
    pub icmp_type: u8,
    pub code: u8,
    pub checksum: u16,
    pub identifier: u16,
    pub sequence_number: u16,
}

impl IcmpHeader {
    /// Wire length of the header.
    pub const LENGTH: usize = 8;

    /// Builds an echo-request header with a zero checksum; `encode` fills the
    /// checksum in.
    pub fn echo_request(icmp_type: u8, identifier: u16, sequence_number: u16) -> Self {
        Self {
            icmp_type,
            code: 0,
            checksum: 0,
            identifier,
            sequence_number,
        }
    }

    /// Serializes the header followed by `payload`, then computes the Internet
    /// checksum over the whole buffer and writes it into bytes 2..4.
    ///
    /// For ICMPv6 the kernel replaces this checksum on send with one covering
    /// the pseudo-header, so the value written here only has to be
    /// self-consistent, not final.
    pub fn encode(&self, payload: &[u8]) -> Vec<u8> {
        let mut packet = vec![0u8; Self::LENGTH + payload.len()];
        packet[0] = self.icmp_type;
        packet[1] = self.code;
        packet[4..6].copy_from_slice(&self.identifier.to_be_bytes());
        packet[6..8].copy_from_slice(&self.sequence_number.to_be_bytes());
        packet[Self::LENGTH..].copy_from_slice(payload);
        let checksum = internet_checksum(&packet);
        packet[2..4].copy_from_slice(&checksum.to_be_bytes());
        packet
    }

    /// Decodes the eight-byte header from the front of `bytes`; payload bytes
    /// after it are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self, PacketError> {
        if bytes.len() < Self::LENGTH {
            return Err(PacketError::TooShort {
                expected: Self::LENGTH,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            icmp_type: bytes[0],
            code: bytes[1],
            checksum: u16::from_be_bytes([bytes[2], bytes[3]]),
            identifier: u16::from_be_bytes([bytes[4], bytes[5]]),
            sequence_number: u16::from_be_bytes([bytes[6], bytes[7]]),
        })
    }
}
