//! IPv4 header decoding.

use std::net::Ipv4Addr;

use crate::error::PacketError;

/// A decoded IPv4 header, 20 to 60 bytes on the wire.
///
/// Raw ICMPv4 sockets deliver the IP header in front of every datagram, so
/// the receive path decodes one of these before the ICMP message. Options are
/// kept as opaque bytes, not interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv4Header {
    pub version: u8,
    pub type_of_service: u8,
    pub total_length: u16,
    pub identification: u16,
    pub dont_fragment: bool,
    pub more_fragments: bool,
    pub fragment_offset: u16,
    pub time_to_live: u8,
    pub protocol: u8,
    pub header_checksum: u16,
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
    pub options: Vec<u8>,
}

impl Ipv4Header {
    /// Base header length without options.
    pub const MIN_LENGTH: usize = 20;
    /// Options may occupy at most this many bytes.
    pub const MAX_OPTIONS_LENGTH: usize = 40;

    /// Decodes a header from the front of `bytes`. Payload bytes after the
    /// declared header length are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self, PacketError> {
        if bytes.len() < Self::MIN_LENGTH {
            return Err(PacketError::TooShort {
                expected: Self::MIN_LENGTH,
                actual: bytes.len(),
            });
        }
        let version = bytes[0] >> 4;
        if version != 4 {
            return Err(PacketError::BadVersion {
                expected: 4,
                actual: version,
            });
        }
        let header_length = ((bytes[0] & 0x0f) as usize) * 4;
        if header_length < Self::MIN_LENGTH
            || header_length - Self::MIN_LENGTH > Self::MAX_OPTIONS_LENGTH
        {
            return Err(PacketError::InvalidHeaderLength(header_length));
        }
        if bytes.len() < header_length {
            return Err(PacketError::TooShort {
                expected: header_length,
                actual: bytes.len(),
            });
        }
        let flags = bytes[6];
        Ok(Self {
            version,
            type_of_service: bytes[1],
            total_length: u16::from_be_bytes([bytes[2], bytes[3]]),
            identification: u16::from_be_bytes([bytes[4], bytes[5]]),
            dont_fragment: flags & 0x40 != 0,
            more_fragments: flags & 0x20 != 0,
            fragment_offset: u16::from_be_bytes([bytes[6], bytes[7]]) & 0x1fff,
            time_to_live: bytes[8],
            protocol: bytes[9],
            header_checksum: u16::from_be_bytes([bytes[10], bytes[11]]),
            source: Ipv4Addr::new(bytes[12], bytes[13], bytes[14], bytes[15]),
            destination: Ipv4Addr::new(bytes[16], bytes[17], bytes[18], bytes[19]),
            options: bytes[Self::MIN_LENGTH..header_length].to_vec(),
        })
    }

    /// Length of the header on the wire, including options.
    pub fn header_length(&self) -> usize {
        Self::MIN_LENGTH + self.options.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> Vec<u8> {
        let mut bytes = vec![0u8; 20];
        bytes[0] = 0x45;
        bytes[2..4].copy_from_slice(&84u16.to_be_bytes());
        bytes[4..6].copy_from_slice(&0xbeefu16.to_be_bytes());
        bytes[6] = 0x40;
        bytes[8] = 57;
        bytes[9] = 1;
        bytes[10..12].copy_from_slice(&0x1c46u16.to_be_bytes());
        bytes[12..16].copy_from_slice(&[192, 168, 0, 1]);
        bytes[16..20].copy_from_slice(&[10, 0, 0, 2]);
        bytes
    }

    #[test]
    fn decodes_base_header() {
        let header = Ipv4Header::decode(&sample_header()).unwrap();
        assert_eq!(header.version, 4);
        assert_eq!(header.header_length(), 20);
        assert_eq!(header.total_length, 84);
        assert_eq!(header.identification, 0xbeef);
        assert!(header.dont_fragment);
        assert!(!header.more_fragments);
        assert_eq!(header.fragment_offset, 0);
        assert_eq!(header.time_to_live, 57);
        assert_eq!(header.protocol, 1);
        assert_eq!(header.header_checksum, 0x1c46);
        assert_eq!(header.source, Ipv4Addr::new(192, 168, 0, 1));
        assert_eq!(header.destination, Ipv4Addr::new(10, 0, 0, 2));
        assert!(header.options.is_empty());
    }

    #[test]
    fn decodes_options_and_fragment_fields() {
        let mut bytes = sample_header();
        bytes[0] = 0x46;
        bytes[6] = 0x21;
        bytes[7] = 0x5c;
        bytes.extend_from_slice(&[0x94, 0x04, 0x00, 0x00]);
        let header = Ipv4Header::decode(&bytes).unwrap();
        assert_eq!(header.header_length(), 24);
        assert_eq!(header.options, vec![0x94, 0x04, 0x00, 0x00]);
        assert!(!header.dont_fragment);
        assert!(header.more_fragments);
        assert_eq!(header.fragment_offset, 0x015c);
    }

    #[test]
    fn ignores_trailing_payload() {
        let mut bytes = sample_header();
        bytes.extend_from_slice(&[0xff; 64]);
        let header = Ipv4Header::decode(&bytes).unwrap();
        assert_eq!(header.header_length(), 20);
    }

    #[test]
    fn rejects_wrong_version() {
        let mut bytes = sample_header();
        bytes[0] = 0x65;
        assert!(matches!(
            Ipv4Header::decode(&bytes),
            Err(PacketError::BadVersion {
                expected: 4,
                actual: 6
            })
        ));
    }

    #[test]
    fn rejects_header_length_below_minimum() {
        let mut bytes = sample_header();
        bytes[0] = 0x44;
        assert!(matches!(
            Ipv4Header::decode(&bytes),
            Err(PacketError::InvalidHeaderLength(16))
        ));
    }

    #[test]
    fn rejects_truncated_input() {
        assert!(matches!(
            Ipv4Header::decode(&[0x45, 0x00]),
            Err(PacketError::TooShort {
                expected: 20,
                actual: 2
            })
        ));
    }

    #[test]
    fn rejects_declared_length_past_buffer() {
        let mut bytes = sample_header();
        bytes[0] = 0x4f;
        assert!(matches!(
            Ipv4Header::decode(&bytes),
            Err(PacketError::TooShort {
                expected: 60,
                actual: 20
            })
        ));
    }
}
