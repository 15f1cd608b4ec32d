//! RFC 1071 Internet checksum.

/// Computes the Internet checksum over `data`.
///
/// Sums the buffer as big-endian 16-bit words (a trailing odd byte is padded
/// with zero on the right), folds the carries back into the low 16 bits until
/// none remain, and returns the one's complement. Shared by the ICMP and IPv4
/// header checksums.
pub fn internet_checksum(data: &[u8]) -> u16 {
    let mut sum: u32 = 0;
    let mut chunks = data.chunks_exact(2);
    for chunk in &mut chunks {
        sum += u16::from_be_bytes([chunk[0], chunk[1]]) as u32;
    }
    if let Some(&tail) = chunks.remainder().first() {
        sum += (tail as u32) << 8;
    }
    while (sum >> 16) != 0 {
        sum = (sum & 0xffff) + (sum >> 16);
    }
    !(sum as u16)
}
