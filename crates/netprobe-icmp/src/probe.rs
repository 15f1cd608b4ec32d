//! The public probe operations: `ping`, `pingv6`, and `tracert`.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use netprobe_core::{
    ping_report, run_ping, run_trace, trace_report, HopProber, HopRecord, HopResult, IpFamily,
    PingParams, PingRecord, ProbeError, ProbeResult, TraceParams, DEFAULT_TTL,
};

use crate::resolve::resolve;
use crate::socket::IcmpSocket;

/// Echo requests used to size up a destination before a sweep.
const REACHABILITY_PROBES: usize = 3;

/// Resolves `destination` and runs one echo series against it.
///
/// One raw socket serves the whole series and is closed when it ends.
pub async fn probe(
    destination: &str,
    family: IpFamily,
    params: &PingParams,
) -> Result<Vec<ProbeResult>, ProbeError> {
    params.validate()?;
    let addr = resolve(destination, family).await?;
    let mut socket = IcmpSocket::new(addr)?;
    run_ping(&mut socket, family, params).await
}

/// Resolves `destination` and sweeps TTLs toward it over IPv4.
///
/// The canonical address is resolved once up front, both for the stopping
/// comparison and so every hop probes the same endpoint.
pub async fn trace(destination: &str, params: &TraceParams) -> Result<Vec<HopResult>, ProbeError> {
    params.validate()?;
    let addr = resolve(destination, IpFamily::V4).await?;
    let reachable = can_ping(addr, params.timeout).await;
    debug!(destination = %addr, reachable = reachable, "Starting sweep");
    let mut prober = SocketProber {
        destination: addr,
        probes_per_hop: params.probes_per_hop,
        timeout: params.timeout,
    };
    run_trace(&mut prober, addr, reachable, params).await
}

/// IPv4 ping returning the per-attempt record list; a fatal failure
/// collapses to a single error record.
pub async fn ping(destination: &str, params: &PingParams) -> Vec<PingRecord> {
    match probe(destination, IpFamily::V4, params).await {
        Ok(results) => ping_report(&results, IpFamily::V4, destination),
        Err(err) => vec![PingRecord::error(err.to_string())],
    }
}

/// IPv6 ping returning the per-attempt record list; a fatal failure
/// collapses to a single error record.
pub async fn pingv6(destination: &str, params: &PingParams) -> Vec<PingRecord> {
    match probe(destination, IpFamily::V6, params).await {
        Ok(results) => ping_report(&results, IpFamily::V6, destination),
        Err(err) => vec![PingRecord::error(err.to_string())],
    }
}

/// IPv4 traceroute returning the per-hop record list; a fatal failure
/// collapses to a single error record.
pub async fn tracert(destination: &str, params: &TraceParams) -> Vec<HopRecord> {
    match trace(destination, params).await {
        Ok(hops) => trace_report(&hops),
        Err(err) => vec![HopRecord::error(err.to_string())],
    }
}

/// Checks whether the destination answers a short default-TTL series.
/// Failures count as unreachable, which only widens the sweep's silence
/// limit.
async fn can_ping(destination: IpAddr, timeout: Duration) -> bool {
    let params = PingParams {
        count: REACHABILITY_PROBES,
        ttl: DEFAULT_TTL,
        timeout,
    };
    let mut socket = match IcmpSocket::new(destination) {
        Ok(socket) => socket,
        Err(_) => return false,
    };
    match run_ping(&mut socket, IpFamily::V4, &params).await {
        Ok(results) => results.iter().any(|result| !result.is_lost()),
        Err(_) => false,
    }
}

/// Runs each hop's echo series on a fresh raw socket.
struct SocketProber {
    destination: IpAddr,
    probes_per_hop: usize,
    timeout: Duration,
}

#[async_trait]
impl HopProber for SocketProber {
    async fn probe_hop(&mut self, ttl: u8) -> Result<Vec<ProbeResult>, ProbeError> {
        let params = PingParams {
            count: self.probes_per_hop,
            ttl,
            timeout: self.timeout,
        };
        let mut socket = IcmpSocket::new(self.destination)?;
        run_ping(&mut socket, IpFamily::V4, &params).await
    }
}
