//! Pure endpoint handling for the AMQP transport
//!
//! This module contains pure functions for endpoint normalization, URI
//! construction, and classification of lapin failures into the probe's
//! attempt-error taxonomy.

use crate::config::Credentials;
use crate::error::AttemptError;
use lapin::protocol::{AMQPErrorKind, AMQPSoftError};
use url::Url;

const AMQP_DEFAULT_PORT: u16 = 5672;
const AMQPS_DEFAULT_PORT: u16 = 5671;

/// Normalize a candidate host identifier into an AMQP endpoint URL
///
/// Accepts bare host names (`mq.example.org`), host:port pairs, and full
/// `amqp://` / `amqps://` URLs. The returned URL always carries an explicit
/// port. Anything unparseable, or any other scheme, is an indeterminate
/// connection failure for this candidate; other candidates may still work.
pub fn parse_endpoint(host: &str) -> Result<Url, AttemptError> {
    let candidate = if host.contains("://") {
        host.to_string()
    } else {
        format!("amqp://{host}")
    };

    let mut url = Url::parse(&candidate)
        .map_err(|e| AttemptError::connection_unknown(format!("invalid endpoint: {e}")))?;

    match url.scheme() {
        "amqp" | "amqps" => {}
        other => {
            return Err(AttemptError::connection_unknown(format!(
                "unsupported scheme: {other}"
            )));
        }
    }

    if url.host_str().is_none() {
        return Err(AttemptError::connection_unknown(
            "endpoint has no host".to_string(),
        ));
    }

    if url.port().is_none() {
        let default_port = if url.scheme() == "amqps" {
            AMQPS_DEFAULT_PORT
        } else {
            AMQP_DEFAULT_PORT
        };
        url.set_port(Some(default_port))
            .map_err(|_| AttemptError::connection_unknown("endpoint rejects a port".to_string()))?;
    }

    Ok(url)
}

/// Build the full connection URI for one candidate host
///
/// Credentials are injected into the URL authority with percent-encoding.
/// The result contains the cleartext password and must never be logged.
pub fn broker_uri(host: &str, credentials: &Credentials) -> Result<String, AttemptError> {
    let mut url = parse_endpoint(host)?;

    url.set_username(credentials.username())
        .map_err(|_| AttemptError::connection_unknown("endpoint rejects credentials".to_string()))?;
    url.set_password(Some(credentials.password()))
        .map_err(|_| AttemptError::connection_unknown("endpoint rejects credentials".to_string()))?;

    Ok(url.to_string())
}

/// Classify a lapin connect failure into the attempt-error taxonomy
///
/// ACCESS_REFUSED from the broker is an authentication failure. An I/O error
/// means the peer closed or refused the socket. Everything else is
/// indeterminate: the handle could not be brought into an open state.
pub fn classify_connect_error(err: &lapin::Error) -> AttemptError {
    match err {
        lapin::Error::ProtocolError(e) if is_access_refused(e) => {
            AttemptError::auth(err.to_string())
        }
        lapin::Error::IOError(_) => AttemptError::connection_closed(err.to_string()),
        other => AttemptError::connection_unknown(other.to_string()),
    }
}

fn is_access_refused(err: &lapin::protocol::AMQPError) -> bool {
    matches!(
        err.kind(),
        AMQPErrorKind::Soft(AMQPSoftError::ACCESSREFUSED)
    )
}

/// Classify a lapin channel-setup failure
///
/// Any failure while creating the channel or enabling confirm mode counts as
/// a channel failure for this candidate.
pub fn classify_channel_error(err: &lapin::Error) -> AttemptError {
    AttemptError::channel(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_hostname_gets_scheme_and_port() {
        let url = parse_endpoint("mq.example.org").unwrap();
        assert_eq!(url.scheme(), "amqp");
        assert_eq!(url.host_str(), Some("mq.example.org"));
        assert_eq!(url.port(), Some(5672));
    }

    #[test]
    fn test_parse_host_with_explicit_port() {
        let url = parse_endpoint("mq.example.org:5673").unwrap();
        assert_eq!(url.port(), Some(5673));
    }

    #[test]
    fn test_parse_amqps_default_port() {
        let url = parse_endpoint("amqps://mq.example.org").unwrap();
        assert_eq!(url.scheme(), "amqps");
        assert_eq!(url.port(), Some(5671));
    }

    #[test]
    fn test_parse_full_url_preserved() {
        let url = parse_endpoint("amqp://mq.example.org:5672/vhost").unwrap();
        assert_eq!(url.path(), "/vhost");
    }

    #[test]
    fn test_unsupported_scheme_rejected() {
        let result = parse_endpoint("http://mq.example.org");
        assert!(matches!(
            result,
            Err(AttemptError::ConnectionUnknown { .. })
        ));
    }

    #[test]
    fn test_broker_uri_injects_credentials() {
        let credentials = Credentials::new("svc", "pw");
        let uri = broker_uri("mq.example.org", &credentials).unwrap();
        assert_eq!(uri, "amqp://svc:pw@mq.example.org:5672");
    }

    #[test]
    fn test_broker_uri_percent_encodes_credentials() {
        let credentials = Credentials::new("svc", "p@ss/word");
        let uri = broker_uri("mq.example.org", &credentials).unwrap();
        assert!(uri.contains("p%40ss%2Fword"));
        assert!(!uri.contains("p@ss/word"));
    }

    #[test]
    fn test_classify_io_error_as_connection_closed() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let err = lapin::Error::IOError(std::sync::Arc::new(io));
        assert!(matches!(
            classify_connect_error(&err),
            AttemptError::ConnectionClosed { .. }
        ));
    }

    #[test]
    fn test_classify_other_error_as_unknown() {
        let err = lapin::Error::ChannelsLimitReached;
        assert!(matches!(
            classify_connect_error(&err),
            AttemptError::ConnectionUnknown { .. }
        ));
    }

    #[test]
    fn test_classify_channel_error() {
        let err = lapin::Error::ChannelsLimitReached;
        assert!(matches!(
            classify_channel_error(&err),
            AttemptError::Channel { .. }
        ));
    }
}
