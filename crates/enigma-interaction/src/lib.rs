//! Outbound interaction with LLM servers.
//!
//! Currently limited to health probing of OpenAI compatible endpoints.

pub mod connection_prober;
pub mod probe_context;

pub use connection_prober::ConnectionProber;
pub use probe_context::{ProbeContext, ProbeInterrupt};
