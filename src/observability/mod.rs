//! Observability for the pre-flight checker
//!
//! Structured logging setup. The probe's progress lines and the final
//! report all flow through `tracing`; console echo is a separate,
//! additional output controlled by configuration.

pub mod logging;

// Re-export for convenience
pub use logging::{init_default_logging, init_logging, LogFormat};
