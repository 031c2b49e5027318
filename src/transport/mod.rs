//! Transport layer for broker probing
//!
//! This module provides the transport abstraction the probe runs against and
//! its AMQP implementation.

use crate::config::Credentials;
use crate::error::AttemptError;

pub mod amqp;

/// Transport trait for broker connectivity probing
///
/// This trait is the sole collaborator boundary of the probe. It abstracts
/// the broker client library so the failover loop can be driven by mocks in
/// tests, and it is where any timeout or connection-parameter policy lives;
/// the probe itself has none.
///
/// Every failure mode of an attempt must surface as one of the classified
/// [`AttemptError`] kinds; implementations never panic and never return
/// unclassified errors.
#[async_trait::async_trait]
pub trait BrokerTransport: Send + Sync {
    /// An established, authenticated connection to one broker host
    type Connection: Send;

    /// A channel opened on a connection with delivery confirmation enabled
    type Channel: Send;

    /// Connect to `host` and authenticate with `credentials`
    async fn connect(
        &self,
        host: &str,
        credentials: &Credentials,
    ) -> Result<Self::Connection, AttemptError>;

    /// Open a channel on the connection with delivery-confirmation mode
    /// enabled
    ///
    /// The channel is only probed for successful setup; it is never used to
    /// send data.
    async fn open_confirm_channel(
        &self,
        conn: &Self::Connection,
    ) -> Result<Self::Channel, AttemptError>;

    /// Close the connection. Idempotent; failures are swallowed and logged.
    async fn close(&self, conn: Self::Connection);
}

/// Type alias for the AMQP transport
pub type AmqpBrokerTransport = amqp::AmqpTransport;
