//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! news client / handlers / tower-http TraceLayer
//!     → tracing events (request ID attached as a field)
//!     → logging.rs subscriber (EnvFilter + fmt)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Structured fields over interpolated strings
//! - Logging is best-effort and never blocks a response
//! - The API key never appears in log output

pub mod logging;
