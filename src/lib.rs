//! Broker Pre-Flight - Rust Implementation
//!
//! A pre-flight connectivity checker for AMQP messaging brokers.
//!
//! # Overview
//!
//! Before a production workflow starts, this crate validates that a broker
//! endpoint is reachable, that the supplied credentials authenticate, and
//! that a channel with delivery confirmation can be opened. It is not a
//! messaging client: no application message is ever published or consumed.
//!
//! The core is a host-failover loop:
//! - candidates are tried one at a time, preferred endpoint first, then the
//!   fallback list in last-listed-first order
//! - every failure is classified (authentication, connection closed,
//!   connection indeterminate, channel) and recorded as one diagnostic line
//! - the first working candidate stops the loop; exhausting all candidates
//!   produces a consolidated diagnostic report
//!
//! The broker client sits behind the [`transport::BrokerTransport`] trait,
//! with a lapin-backed AMQP implementation and a scripted mock for tests.
//!
//! # Quick Start
//!
//! ```rust
//! use broker_preflight::config::Credentials;
//! use broker_preflight::error::CredentialDisclosure;
//! use broker_preflight::probe::{ConnectivityProbe, ProbeSettings};
//! use broker_preflight::testing::mocks::{MockBroker, ScriptedOutcome};
//!
//! # tokio_test::block_on(async {
//! let transport = MockBroker::new()
//!     .script("amqp://mq1.example.org", ScriptedOutcome::FailConnectionClosed)
//!     .script("amqp://mq2.example.org", ScriptedOutcome::Succeed);
//!
//! let settings = ProbeSettings {
//!     credentials: Credentials::new("svc", "pw"),
//!     preferred_url: Some("amqp://mq1.example.org".to_string()),
//!     fallback_urls: vec!["amqp://mq2.example.org".to_string()],
//!     print_to_console: false,
//!     disclosure: CredentialDisclosure::Redacted,
//!     support_contact: None,
//! };
//!
//! let probe = ConnectivityProbe::new(transport, settings);
//! let result = probe.run().await?;
//! assert!(result.success);
//! assert_eq!(result.last_attempted_host, "amqp://mq2.example.org");
//! # Ok::<(), broker_preflight::config::ConfigError>(())
//! # });
//! ```

pub mod config;
pub mod error;
pub mod observability;
pub mod probe;
pub mod testing;
pub mod transport;

// Re-export the caller-facing surface
pub use config::{ConfigError, Credentials, PreflightConfig};
pub use error::{AttemptError, CredentialDisclosure};
pub use probe::{
    CandidateQueue, ConnectivityProbe, DiagnosticReporter, ProbeReport, ProbeResult,
    ProbeSettings,
};
pub use transport::{amqp::AmqpTransport, BrokerTransport};
