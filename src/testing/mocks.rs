//! Mock implementations for testing
//!
//! Provides a mock [`BrokerTransport`] with scripted per-host outcomes and
//! recorded call histories, to enable comprehensive testing without a real
//! broker.

use crate::config::Credentials;
use crate::error::AttemptError;
use crate::transport::BrokerTransport;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Scripted outcome for one candidate host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedOutcome {
    /// Connection, authentication, and channel all succeed
    Succeed,
    /// Authentication is rejected
    FailAuth,
    /// The peer closes or refuses the connection
    FailConnectionClosed,
    /// The connection cannot be brought into an open state
    FailConnectionUnknown,
    /// Connection succeeds but the channel is rejected
    FailChannel,
}

/// Connection handle issued by the mock broker
#[derive(Debug, Clone)]
pub struct MockConnection {
    pub host: String,
}

/// Mock broker transport with scripted per-host outcomes
///
/// Records every connect, channel-open, and close call so tests can assert
/// the probing order and the resource discipline of the loop. Hosts without
/// a script behave as unreachable. Clones share the recorded histories, so
/// a test can keep one clone while handing the other to the probe.
#[derive(Default, Clone)]
pub struct MockBroker {
    outcomes: HashMap<String, ScriptedOutcome>,
    connect_history: Arc<Mutex<Vec<String>>>,
    channel_history: Arc<Mutex<Vec<String>>>,
    close_history: Arc<Mutex<Vec<String>>>,
}

impl MockBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the outcome for one host (builder style)
    pub fn script(mut self, host: &str, outcome: ScriptedOutcome) -> Self {
        self.outcomes.insert(host.to_string(), outcome);
        self
    }

    /// Hosts passed to `connect`, in call order
    pub async fn get_connect_attempts(&self) -> Vec<String> {
        self.connect_history.lock().await.clone()
    }

    /// Hosts whose connection had a channel opened on it, in call order
    pub async fn get_channel_opens(&self) -> Vec<String> {
        self.channel_history.lock().await.clone()
    }

    /// Hosts whose connection was closed, in call order
    pub async fn get_closed_connections(&self) -> Vec<String> {
        self.close_history.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl BrokerTransport for MockBroker {
    type Connection = MockConnection;
    type Channel = ();

    async fn connect(
        &self,
        host: &str,
        _credentials: &Credentials,
    ) -> Result<Self::Connection, AttemptError> {
        self.connect_history.lock().await.push(host.to_string());

        let outcome = self
            .outcomes
            .get(host)
            .copied()
            .unwrap_or(ScriptedOutcome::FailConnectionUnknown);
        match outcome {
            ScriptedOutcome::FailAuth => {
                Err(AttemptError::auth("scripted authentication failure"))
            }
            ScriptedOutcome::FailConnectionClosed => Err(AttemptError::connection_closed(
                "scripted connection failure",
            )),
            ScriptedOutcome::FailConnectionUnknown => Err(AttemptError::connection_unknown(
                "scripted unknown connection failure",
            )),
            ScriptedOutcome::Succeed | ScriptedOutcome::FailChannel => Ok(MockConnection {
                host: host.to_string(),
            }),
        }
    }

    async fn open_confirm_channel(
        &self,
        conn: &Self::Connection,
    ) -> Result<Self::Channel, AttemptError> {
        self.channel_history.lock().await.push(conn.host.clone());

        match self.outcomes.get(&conn.host) {
            Some(ScriptedOutcome::FailChannel) => {
                Err(AttemptError::channel("scripted channel failure"))
            }
            _ => Ok(()),
        }
    }

    async fn close(&self, conn: Self::Connection) {
        self.close_history.lock().await.push(conn.host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unscripted_host_is_unreachable() {
        let broker = MockBroker::new();
        let credentials = Credentials::new("svc", "pw");

        let result = broker.connect("nowhere", &credentials).await;
        assert!(matches!(
            result,
            Err(AttemptError::ConnectionUnknown { .. })
        ));
        assert_eq!(broker.get_connect_attempts().await, vec!["nowhere"]);
    }

    #[tokio::test]
    async fn test_channel_failure_still_yields_a_connection() {
        let broker = MockBroker::new().script("h", ScriptedOutcome::FailChannel);
        let credentials = Credentials::new("svc", "pw");

        let conn = broker.connect("h", &credentials).await.unwrap();
        let result = broker.open_confirm_channel(&conn).await;
        assert!(matches!(result, Err(AttemptError::Channel { .. })));

        broker.close(conn).await;
        assert_eq!(broker.get_closed_connections().await, vec!["h"]);
    }
}
