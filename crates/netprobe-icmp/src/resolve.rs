//! Hostname resolution for probe targets.

use std::net::IpAddr;

use hickory_resolver::TokioAsyncResolver;
use tracing::debug;

use netprobe_core::{IpFamily, ProbeError};

/// Resolves `destination` to one address of the requested family.
///
/// IP literals short-circuit DNS entirely but still have to match the
/// requested family. Lookups use the system resolver configuration; the
/// first address of the right family wins.
pub async fn resolve(destination: &str, family: IpFamily) -> Result<IpAddr, ProbeError> {
    if let Ok(addr) = destination.parse::<IpAddr>() {
        return if family_matches(addr, family) {
            Ok(addr)
        } else {
            Err(ProbeError::NoAddressForFamily {
                hostname: destination.to_string(),
                family,
            })
        };
    }

    let resolver =
        TokioAsyncResolver::tokio_from_system_conf().map_err(|err| ProbeError::ResolutionFailed {
            hostname: destination.to_string(),
            source: Box::new(err),
        })?;
    let response = resolver
        .lookup_ip(destination)
        .await
        .map_err(|err| ProbeError::ResolutionFailed {
            hostname: destination.to_string(),
            source: Box::new(err),
        })?;

    let addr = response
        .iter()
        .find(|addr| family_matches(*addr, family))
        .ok_or_else(|| ProbeError::NoAddressForFamily {
            hostname: destination.to_string(),
            family,
        })?;
    debug!(destination = destination, address = %addr, "Resolved destination");
    Ok(addr)
}

fn family_matches(addr: IpAddr, family: IpFamily) -> bool {
    match family {
        IpFamily::V4 => addr.is_ipv4(),
        IpFamily::V6 => addr.is_ipv6(),
    }
}
