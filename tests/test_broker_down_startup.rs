//! Integration tests for probing when no broker is reachable
//!
//! Exercises the real AMQP transport against endpoints that cannot work:
//! closed ports and malformed endpoints. No broker needs to be running;
//! every attempt here is expected to fail with a classified error, never a
//! panic or an unclassified one.

use broker_preflight::config::{Credentials, TransportSection};
use broker_preflight::error::{AttemptError, CredentialDisclosure};
use broker_preflight::probe::{ConnectivityProbe, ProbeSettings};
use broker_preflight::transport::{amqp::AmqpTransport, BrokerTransport};

fn short_timeout_transport() -> AmqpTransport {
    AmqpTransport::new(&TransportSection {
        connect_timeout_secs: 2,
    })
}

fn is_connection_failure(err: &AttemptError) -> bool {
    matches!(
        err,
        AttemptError::ConnectionClosed { .. } | AttemptError::ConnectionUnknown { .. }
    )
}

#[tokio::test]
async fn test_connect_to_closed_port_is_a_connection_failure() {
    let transport = short_timeout_transport();
    let credentials = Credentials::new("guest", "guest");

    let err = transport
        .connect("amqp://127.0.0.1:1", &credentials)
        .await
        .err()
        .expect("connect to a closed port must fail");

    assert!(is_connection_failure(&err), "unexpected kind: {err}");
}

#[tokio::test]
async fn test_unsupported_scheme_fails_without_touching_the_network() {
    let transport = short_timeout_transport();
    let credentials = Credentials::new("guest", "guest");

    let err = transport
        .connect("http://mq.example.org", &credentials)
        .await
        .err()
        .expect("non-AMQP scheme must fail");

    assert!(matches!(err, AttemptError::ConnectionUnknown { .. }));
}

#[tokio::test]
async fn test_probe_over_unreachable_candidates_fails_definitively() {
    let transport = short_timeout_transport();
    let settings = ProbeSettings {
        credentials: Credentials::new("guest", "guest"),
        preferred_url: Some("amqp://127.0.0.1:1".to_string()),
        fallback_urls: vec!["amqp://127.0.0.1:2".to_string()],
        print_to_console: false,
        disclosure: CredentialDisclosure::Redacted,
        support_contact: None,
    };

    let probe = ConnectivityProbe::new(transport, settings);
    let report = probe.run_with_diagnostics().await.unwrap();

    assert!(!report.result.success);
    assert_eq!(report.result.last_attempted_host, "amqp://127.0.0.1:2");
    assert_eq!(report.diagnostics.len(), 2);
    for line in &report.diagnostics {
        assert!(
            line.ends_with("Connection failure.") || line.ends_with("Unknown connection failure."),
            "unexpected diagnostic: {line}"
        );
    }
}
