//! Probe execution: the sequential echo series and the TTL sweep over it.

pub mod ping;
pub mod trace;

pub use ping::run_ping;
pub use trace::run_trace;
