//! The TTL sweep built on repeated echo series.

use std::net::IpAddr;

use tracing::debug;

use crate::error::ProbeError;
use crate::traits::HopProber;
use crate::types::{HopResult, ProbeResult, TraceParams};

/// Consecutive silent hops tolerated once the destination is known to answer
/// pings.
const MAX_SILENT_GAP_REACHABLE: u8 = 3;
/// Consecutive silent hops tolerated when the destination never answered a
/// direct probe.
const MAX_SILENT_GAP_UNREACHABLE: u8 = 8;

/// Sweeps TTL `1..=params.max_hops`, one echo series per TTL, and shapes one
/// `HopResult` per TTL visited.
///
/// The sweep stops after emitting the hop whose responder equals
/// `destination`, or once the gap since the last responding hop exceeds the
/// silence threshold selected by `reachable`.
pub async fn run_trace<P: HopProber + ?Sized>(
    prober: &mut P,
    destination: IpAddr,
    reachable: bool,
    params: &TraceParams,
) -> Result<Vec<HopResult>, ProbeError> {
    params.validate()?;

    let gap_limit = if reachable {
        MAX_SILENT_GAP_REACHABLE
    } else {
        MAX_SILENT_GAP_UNREACHABLE
    };
    let mut hops = Vec::new();
    let mut last_valid_idx: u8 = 0;

    for ttl in 1..=params.max_hops {
        debug!(ttl = ttl, "Probing hop");
        let results = prober.probe_hop(ttl).await?;

        let responder = first_responder(&results);
        let delays = results
            .iter()
            .map(|result| {
                if result.is_lost() {
                    -1
                } else {
                    result.elapsed.as_millis() as i64
                }
            })
            .collect();

        match responder {
            Some(addr) => {
                debug!(ttl = ttl, responder = %addr, "Hop responded");
                last_valid_idx = ttl - 1;
            }
            None => debug!(ttl = ttl, "Hop silent"),
        }
        hops.push(HopResult {
            ttl,
            responder,
            delays,
        });

        if responder == Some(destination) {
            debug!(ttl = ttl, "Reached destination");
            break;
        }
        let gap = ttl - last_valid_idx;
        if gap > gap_limit {
            debug!(ttl = ttl, gap = gap, "Giving up after consecutive silent hops");
            break;
        }
    }

    Ok(hops)
}

/// First non-unspecified source address among the sub-results.
fn first_responder(results: &[ProbeResult]) -> Option<IpAddr> {
    results.iter().find_map(|result| {
        result
            .ipv4_header
            .as_ref()
            .map(|header| header.source)
            .filter(|source| !source.is_unspecified())
            .map(IpAddr::V4)
    })
}
