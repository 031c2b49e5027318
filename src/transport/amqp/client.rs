//! Impure I/O operations for the AMQP transport
//!
//! Drives lapin against a real broker. All timeout policy for a single
//! attempt lives here; the failover loop above never waits on its own.

use super::connection::{broker_uri, classify_channel_error, classify_connect_error};
use crate::config::{Credentials, TransportSection};
use crate::error::AttemptError;
use crate::transport::BrokerTransport;
use lapin::options::ConfirmSelectOptions;
use lapin::{Connection, ConnectionProperties};
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// AMQP broker transport backed by lapin
pub struct AmqpTransport {
    connect_timeout: Duration,
}

impl AmqpTransport {
    pub fn new(config: &TransportSection) -> Self {
        Self {
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
        }
    }
}

#[async_trait::async_trait]
impl BrokerTransport for AmqpTransport {
    type Connection = Connection;
    type Channel = lapin::Channel;

    async fn connect(
        &self,
        host: &str,
        credentials: &Credentials,
    ) -> Result<Self::Connection, AttemptError> {
        // The URI embeds the cleartext password; keep it out of the logs.
        let uri = broker_uri(host, credentials)?;

        let attempt = Connection::connect(&uri, ConnectionProperties::default());
        let conn = match timeout(self.connect_timeout, attempt).await {
            Ok(Ok(conn)) => conn,
            Ok(Err(err)) => {
                debug!(host, error = %err, "broker connect failed");
                return Err(classify_connect_error(&err));
            }
            Err(_) => {
                debug!(host, timeout_secs = self.connect_timeout.as_secs(), "broker connect timed out");
                return Err(AttemptError::connection_unknown(format!(
                    "no connection after {}s",
                    self.connect_timeout.as_secs()
                )));
            }
        };

        // lapin handed back a handle; make sure it actually reached the open
        // state before reporting success.
        if !conn.status().connected() {
            debug!(host, state = ?conn.status().state(), "connection handle not open");
            return Err(AttemptError::connection_unknown(format!(
                "connection state {:?}",
                conn.status().state()
            )));
        }

        Ok(conn)
    }

    async fn open_confirm_channel(
        &self,
        conn: &Self::Connection,
    ) -> Result<Self::Channel, AttemptError> {
        let channel = conn
            .create_channel()
            .await
            .map_err(|err| classify_channel_error(&err))?;

        channel
            .confirm_select(ConfirmSelectOptions::default())
            .await
            .map_err(|err| classify_channel_error(&err))?;

        Ok(channel)
    }

    async fn close(&self, conn: Self::Connection) {
        if let Err(err) = conn.close(200, "pre-flight check complete").await {
            debug!(error = %err, "closing probe connection failed");
        }
    }
}
