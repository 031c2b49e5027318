//! Error taxonomy for broker pre-flight probing
//!
//! A probe attempt against a single host fails in exactly one of four
//! classified ways. The failover loop matches on the classification and
//! absorbs it into the diagnostic log; these errors never propagate to the
//! caller. Only configuration problems (see [`crate::config::ConfigError`])
//! are surfaced as hard errors, and those are raised before probing starts.

use thiserror::Error;

/// Classified failure of a single connect/authenticate/channel attempt
///
/// The `detail` on each variant carries the transport's own description for
/// debug logging. Diagnostic report text is fixed per variant and never
/// includes it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttemptError {
    #[error("Authentication rejected by broker: {detail}")]
    Auth { detail: String },

    #[error("Connection closed by peer: {detail}")]
    ConnectionClosed { detail: String },

    #[error("Connection could not be opened: {detail}")]
    ConnectionUnknown { detail: String },

    #[error("Channel rejected by broker: {detail}")]
    Channel { detail: String },
}

impl AttemptError {
    pub fn auth<S: Into<String>>(detail: S) -> Self {
        Self::Auth {
            detail: detail.into(),
        }
    }

    pub fn connection_closed<S: Into<String>>(detail: S) -> Self {
        Self::ConnectionClosed {
            detail: detail.into(),
        }
    }

    pub fn connection_unknown<S: Into<String>>(detail: S) -> Self {
        Self::ConnectionUnknown {
            detail: detail.into(),
        }
    }

    pub fn channel<S: Into<String>>(detail: S) -> Self {
        Self::Channel {
            detail: detail.into(),
        }
    }
}

/// Policy for rendering the password inside diagnostic text
///
/// The report names the credentials that failed authentication. Disclosing
/// the password verbatim is useful on an operator's terminal and a liability
/// in an aggregated log, so the caller picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialDisclosure {
    /// Render the password as `***` (default)
    #[default]
    Redacted,
    /// Render the password verbatim
    Cleartext,
}

impl CredentialDisclosure {
    /// Apply the policy to a password for inclusion in diagnostic text
    pub fn render<'a>(&self, password: &'a str) -> &'a str {
        match self {
            CredentialDisclosure::Redacted => "***",
            CredentialDisclosure::Cleartext => password,
        }
    }
}
