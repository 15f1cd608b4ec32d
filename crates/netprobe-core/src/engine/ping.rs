//! The sequential echo-request series.

use tokio::time::{timeout, Instant};
use tracing::{debug, trace};

use netprobe_packets::{IcmpHeader, Ipv4Header, PacketError};

use crate::error::ProbeError;
use crate::traits::ProbeTransport;
use crate::types::{IpFamily, PingParams, ProbeResult, DEFAULT_TTL, ECHO_PAYLOAD};

/// Receive buffer size, larger than any reply a probe can trigger.
const RECV_BUFFER_SIZE: usize = 65536;

/// Runs one echo-request series over `transport`, one attempt per sequence
/// number, strictly in order.
///
/// Each attempt sends an echo request and races the next incoming datagram
/// against `params.timeout`; a timeout or an undecodable reply records a
/// loss entry, so the returned list always holds exactly `params.count`
/// results. A reply that decodes is accepted as-is: the ICMP type,
/// identifier, and sequence number are not checked against the request, so
/// unrelated ICMP traffic can satisfy an attempt.
pub async fn run_ping<T: ProbeTransport + ?Sized>(
    transport: &mut T,
    family: IpFamily,
    params: &PingParams,
) -> Result<Vec<ProbeResult>, ProbeError> {
    params.validate()?;

    if family == IpFamily::V4 && params.ttl != DEFAULT_TTL {
        transport.set_ttl(params.ttl as u32)?;
    }

    let identifier = std::process::id() as u16;
    let mut buf = vec![0u8; RECV_BUFFER_SIZE];
    let mut results = Vec::with_capacity(params.count);

    for sequence in 0..params.count {
        let sequence = sequence as u16;
        let packet = IcmpHeader::echo_request(family.echo_request_type(), identifier, sequence)
            .encode(ECHO_PAYLOAD);

        debug!(seq = sequence, "Sending echo request");
        transport.send(&packet).await?;
        let sent_at = Instant::now();

        match timeout(params.timeout, transport.recv(&mut buf)).await {
            Err(_) => {
                debug!(seq = sequence, "Timed out waiting for reply");
                results.push(ProbeResult::lost(sequence));
            }
            Ok(Err(err)) => return Err(err),
            Ok(Ok(length)) => {
                let elapsed = sent_at.elapsed();
                match decode_reply(family, &buf[..length]) {
                    Ok((ipv4_header, icmp_header)) => {
                        trace!(seq = sequence, length = length, "Received reply");
                        results.push(ProbeResult {
                            sequence,
                            ipv4_header,
                            icmp_header,
                            length,
                            elapsed,
                        });
                    }
                    Err(err) => {
                        debug!(seq = sequence, error = %err, "Discarding malformed reply");
                        results.push(ProbeResult::lost(sequence));
                    }
                }
            }
        }
    }

    Ok(results)
}

/// Splits a received datagram into its headers. IPv4 sockets deliver the IP
/// header in front of the ICMP message; IPv6 sockets deliver the ICMP
/// message alone.
fn decode_reply(
    family: IpFamily,
    bytes: &[u8],
) -> Result<(Option<Ipv4Header>, IcmpHeader), PacketError> {
    match family {
        IpFamily::V4 => {
            let ip = Ipv4Header::decode(bytes)?;
            let icmp = IcmpHeader::decode(&bytes[ip.header_length()..])?;
            Ok((Some(ip), icmp))
        }
        IpFamily::V6 => Ok((None, IcmpHeader::decode(bytes)?)),
    }
}
