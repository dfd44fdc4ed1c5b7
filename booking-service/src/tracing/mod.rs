//! Tracing and observability module.
//!
//! Installs structured logging and span export for the booking service.

/// Tracer configuration and initialization.
pub mod tracer;
