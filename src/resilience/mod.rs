//! Resilience subsystem.
//!
//! # Design Decisions
//! - Every upstream fetch has a deadline
//! - No retries: a failed or late fetch is reported to the client as-is

pub mod timeouts;
