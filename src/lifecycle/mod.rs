//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Locate config → Apply env overrides → Validate → Bind listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight requests → Exit 0
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fail fast: a config or bind error exits non-zero before serving
//! - No background tasks, so shutdown only has to drain the HTTP server

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
