//! Diagnostic text for failed probe attempts
//!
//! One line per failed host goes into the diagnostic log as it happens; the
//! consolidated report is assembled only when every candidate has failed.

use crate::config::Credentials;
use crate::error::{AttemptError, CredentialDisclosure};

/// Render the per-host diagnostic line for a classified failure
///
/// The text is fixed per failure kind. Only the authentication line names
/// the credentials, with the password subject to the disclosure policy.
pub fn diagnostic_line(
    host: &str,
    error: &AttemptError,
    credentials: &Credentials,
    disclosure: CredentialDisclosure,
) -> String {
    match error {
        AttemptError::Auth { .. } => format!(
            "host \"{host}\": Authentication failure (user {}, password {}).",
            credentials.username(),
            disclosure.render(credentials.password())
        ),
        AttemptError::ConnectionClosed { .. } => format!("host \"{host}\": Connection failure."),
        AttemptError::ConnectionUnknown { .. } => {
            format!("host \"{host}\": Unknown connection failure.")
        }
        AttemptError::Channel { .. } => format!("host \"{host}\": Channel failure."),
    }
}

/// Assembles the consolidated report on total failure
pub struct DiagnosticReporter;

impl DiagnosticReporter {
    /// Build the full failure report from the per-host diagnostic log
    ///
    /// Pure function of its inputs; the caller decides where the text goes.
    /// Per-host lines keep their probing order.
    pub fn assemble(log: &[String], support_contact: Option<&str>) -> String {
        let mut lines = Vec::with_capacity(log.len() + 4);
        lines.push("PROBLEM IN SETTING UP".to_string());
        lines.push("THE MESSAGING QUEUE (BROKER PRE-FLIGHT)".to_string());
        lines.push("CONNECTION TO THE MESSAGING QUEUE FAILED DEFINITIVELY:".to_string());
        for entry in log {
            lines.push(format!(" - {entry}"));
        }
        let trailer = match support_contact {
            Some(contact) => {
                format!("PLEASE NOTIFY {contact} AND INCLUDE THIS ERROR MESSAGE.")
            }
            None => "PLEASE NOTIFY YOUR BROKER OPERATOR AND INCLUDE THIS ERROR MESSAGE.".to_string(),
        };
        lines.push(trailer);
        lines.join("\n")
    }
}
