//! Raw ICMP sockets as the engine's transport.

use std::net::{IpAddr, SocketAddr};

use async_trait::async_trait;
use socket2::{Domain, Protocol, SockRef, Socket, Type};
use tokio::net::UdpSocket;

use netprobe_core::{ProbeError, ProbeTransport};

/// A raw ICMP socket aimed at one destination.
///
/// The socket is deliberately left unconnected so replies from intermediate
/// routers reach it, not just datagrams from the destination. Dropping the
/// value closes the descriptor.
pub struct IcmpSocket {
    socket: UdpSocket,
    destination: SocketAddr,
}

impl IcmpSocket {
    /// Opens a raw ICMP or ICMPv6 socket matching the destination's family
    /// and registers it with the tokio reactor.
    pub fn new(destination: IpAddr) -> Result<Self, ProbeError> {
        let (domain, protocol) = match destination {
            IpAddr::V4(_) => (Domain::IPV4, Protocol::ICMPV4),
            IpAddr::V6(_) => (Domain::IPV6, Protocol::ICMPV6),
        };
        let socket =
            Socket::new(domain, Type::RAW, Some(protocol)).map_err(ProbeError::SocketCreation)?;
        socket
            .set_nonblocking(true)
            .map_err(ProbeError::SocketCreation)?;
        let socket = UdpSocket::from_std(socket.into()).map_err(ProbeError::SocketCreation)?;
        Ok(Self {
            socket,
            destination: SocketAddr::new(destination, 0),
        })
    }
}

#[async_trait]
impl ProbeTransport for IcmpSocket {
    fn set_ttl(&mut self, ttl: u32) -> Result<(), ProbeError> {
        match self.destination.ip() {
            IpAddr::V4(_) => self.socket.set_ttl(ttl).map_err(ProbeError::SocketOption),
            IpAddr::V6(_) => SockRef::from(&self.socket)
                .set_unicast_hops_v6(ttl)
                .map_err(ProbeError::SocketOption),
        }
    }

    async fn send(&mut self, packet: &[u8]) -> Result<usize, ProbeError> {
        self.socket
            .send_to(packet, self.destination)
            .await
            .map_err(ProbeError::SendFailed)
    }

    async fn recv(&mut self, buf: &mut [u8]) -> Result<usize, ProbeError> {
        let (length, _source) = self
            .socket
            .recv_from(buf)
            .await
            .map_err(ProbeError::ReadFailed)?;
        Ok(length)
    }
}
