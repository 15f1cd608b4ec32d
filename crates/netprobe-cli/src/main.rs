//! JSON-emitting CLI over the probe operations.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;

use netprobe_core::{
    ping_report, to_json, trace_report, HopRecord, IpFamily, PingParams, PingRecord, TraceParams,
};
use netprobe_icmp::{probe, trace};

#[derive(Parser)]
#[command(
    name = "netprobe",
    version,
    about = "ICMP echo probing and traceroute with JSON output"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Send ICMP echo requests to a destination.
    Ping {
        /// Hostname or IP literal to probe.
        destination: String,

        /// Number of echo requests to send.
        #[arg(short, long, default_value_t = 4)]
        count: usize,

        /// Outgoing TTL (IPv4 only).
        #[arg(short = 'i', long, default_value_t = 64)]
        ttl: u8,

        /// Per-attempt timeout in milliseconds.
        #[arg(short = 'w', long, default_value_t = 1000)]
        timeout: u64,

        /// Probe over IPv6 instead of IPv4.
        #[arg(short = '6', long)]
        ipv6: bool,
    },
    /// Discover the IPv4 hops toward a destination.
    Trace {
        /// Hostname or IP literal to trace.
        destination: String,

        /// Largest TTL to try.
        #[arg(short = 'm', long, default_value_t = 30)]
        max_hops: u8,

        /// Per-attempt timeout in milliseconds.
        #[arg(short = 'w', long, default_value_t = 1000)]
        timeout: u64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt().with_env_filter("debug").init();
    } else {
        tracing_subscriber::fmt().with_env_filter("info").init();
    }

    match args.command {
        Command::Ping {
            destination,
            count,
            ttl,
            timeout,
            ipv6,
        } => {
            let family = if ipv6 { IpFamily::V6 } else { IpFamily::V4 };
            let params = PingParams {
                count,
                ttl,
                timeout: Duration::from_millis(timeout),
            };
            tracing::info!(
                destination = destination,
                family = %family,
                count = count,
                "Starting ping"
            );
            match probe(&destination, family, &params).await {
                Ok(results) => emit(&ping_report(&results, family, &destination), false),
                Err(err) => {
                    tracing::error!(error = %err, "Ping failed");
                    emit(&[PingRecord::error(err.to_string())], true)
                }
            }
        }
        Command::Trace {
            destination,
            max_hops,
            timeout,
        } => {
            let params = TraceParams {
                max_hops,
                probes_per_hop: 3,
                timeout: Duration::from_millis(timeout),
            };
            tracing::info!(
                destination = destination,
                max_hops = max_hops,
                "Starting traceroute"
            );
            match trace(&destination, &params).await {
                Ok(hops) => emit(&trace_report(&hops), false),
                Err(err) => {
                    tracing::error!(error = %err, "Traceroute failed");
                    emit(&[HopRecord::error(err.to_string())], true)
                }
            }
        }
    }
}

/// Prints the record list as pretty JSON and maps the outcome to an exit
/// code. Fatal failures still print their single-element error list.
fn emit<T: Serialize>(records: &[T], failed: bool) -> ExitCode {
    match to_json(records) {
        Ok(json) => {
            println!("{}", json);
            if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("Failed to serialize results: {}", err);
            ExitCode::FAILURE
        }
    }
}
