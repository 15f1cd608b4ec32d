//! Async seams between the probe policies and the socket layer.

use async_trait::async_trait;

use crate::error::ProbeError;
use crate::types::ProbeResult;

/// One raw ICMP socket aimed at a single destination.
///
/// The engine drives a transport strictly sequentially: at most one
/// in-flight send or receive at a time.
#[async_trait]
pub trait ProbeTransport: Send + Sync {
    /// Sets the outgoing TTL / hop limit on the socket.
    fn set_ttl(&mut self, ttl: u32) -> Result<(), ProbeError>;

    /// Sends one datagram to the destination, returning the bytes written.
    async fn send(&mut self, packet: &[u8]) -> Result<usize, ProbeError>;

    /// Receives one datagram into `buf`, returning the bytes read. For IPv4
    /// sockets the buffer starts with the IP header; for IPv6 it starts with
    /// the ICMP header.
    async fn recv(&mut self, buf: &mut [u8]) -> Result<usize, ProbeError>;
}

/// One echo series at a fixed TTL, as the traceroute sweep consumes it.
#[async_trait]
pub trait HopProber: Send + Sync {
    async fn probe_hop(&mut self, ttl: u8) -> Result<Vec<ProbeResult>, ProbeError>;
}
