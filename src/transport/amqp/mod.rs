//! AMQP implementation of the broker transport
//!
//! The module is split into two focused sub-modules:
//!
//! - [`connection`] - Pure endpoint parsing, URI construction, and failure
//!   classification
//! - [`client`] - Impure I/O against the broker via lapin
//!
//! # Usage
//!
//! ```rust,no_run
//! use broker_preflight::config::{Credentials, TransportSection};
//! use broker_preflight::transport::{amqp::AmqpTransport, BrokerTransport};
//!
//! # tokio_test::block_on(async {
//! let transport = AmqpTransport::new(&TransportSection::default());
//! let credentials = Credentials::new("guest", "guest");
//!
//! let conn = transport.connect("amqp://localhost:5672", &credentials).await?;
//! let _channel = transport.open_confirm_channel(&conn).await?;
//! transport.close(conn).await;
//! # Ok::<(), broker_preflight::error::AttemptError>(())
//! # });
//! ```

pub mod client;
pub mod connection;

// Re-export public types for convenience
pub use client::AmqpTransport;
pub use connection::{broker_uri, parse_endpoint};
