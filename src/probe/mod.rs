//! The host-failover probing loop
//!
//! This is the core of the crate: given an ordered set of candidate hosts,
//! attempt connect → authenticate → open-confirm-channel against one
//! candidate at a time, classify each failure, move on while candidates
//! remain, stop on the first success, and assemble a consolidated diagnostic
//! report when every candidate has failed.
//!
//! The loop is strictly sequential. Each attempt is awaited to completion
//! before the next candidate is considered; there is no parallel probing, no
//! retry of a failed host, and no backoff. Whatever timeout bounds a single
//! attempt lives inside the transport.

pub mod candidates;
pub mod report;

// Re-export public types for convenience
pub use candidates::CandidateQueue;
pub use report::DiagnosticReporter;

use crate::config::{ConfigError, Credentials, PreflightConfig};
use crate::error::{AttemptError, CredentialDisclosure};
use crate::transport::BrokerTransport;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Immutable settings for one probe invocation
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub credentials: Credentials,
    /// Endpoint tried first, if given
    pub preferred_url: Option<String>,
    /// Remaining endpoints, tried last-listed-first
    pub fallback_urls: Vec<String>,
    /// Echo the final outcome to stdout in addition to the log sink
    pub print_to_console: bool,
    /// Password rendering policy for diagnostic text
    pub disclosure: CredentialDisclosure,
    /// Contact named in the failure report trailer
    pub support_contact: Option<String>,
}

impl ProbeSettings {
    /// Build probe settings from a loaded configuration
    ///
    /// Resolves credentials from the environment; missing or empty variables
    /// fail here, before any connection attempt.
    pub fn from_config(config: &PreflightConfig) -> Result<Self, ConfigError> {
        let credentials = config.resolve_credentials()?;
        let disclosure = if config.probe.redact_credentials {
            CredentialDisclosure::Redacted
        } else {
            CredentialDisclosure::Cleartext
        };
        Ok(Self {
            credentials,
            preferred_url: config.broker.preferred_url.clone(),
            fallback_urls: config.broker.fallback_urls.clone(),
            print_to_console: config.probe.print_to_console,
            disclosure,
            support_contact: config.probe.support_contact.clone(),
        })
    }
}

/// Terminal verdict of a probe run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub success: bool,
    pub last_attempted_host: String,
}

/// Verdict plus the per-host diagnostic log
///
/// The diagnostics are meaningful only when `result.success` is false; a
/// successful run may still carry lines for the candidates that failed
/// before the working one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub result: ProbeResult,
    /// One line per failed host, in probing order
    pub diagnostics: Vec<String>,
}

/// Runs the failover loop against a broker transport
pub struct ConnectivityProbe<T: BrokerTransport> {
    transport: T,
    settings: ProbeSettings,
}

impl<T: BrokerTransport> ConnectivityProbe<T> {
    pub fn new(transport: T, settings: ProbeSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Run the failover loop, emit the outcome, and return the verdict
    ///
    /// On success an informational line names the working host; on total
    /// failure the consolidated report goes to the log sink, and to stdout
    /// as well when `print_to_console` is set. The only hard error is a
    /// configuration problem, raised before the first connection attempt.
    pub async fn run(&self) -> Result<ProbeResult, ConfigError> {
        let probe_report = self.run_with_diagnostics().await?;
        self.emit(&probe_report);
        Ok(probe_report.result)
    }

    /// Run the failover loop and return the verdict with its diagnostics,
    /// without emitting anything
    ///
    /// The queue and the log are rebuilt on every call; two runs with the
    /// same settings and a deterministic transport produce identical
    /// reports.
    pub async fn run_with_diagnostics(&self) -> Result<ProbeReport, ConfigError> {
        let mut queue = CandidateQueue::new(
            self.settings.preferred_url.clone(),
            self.settings.fallback_urls.clone(),
        )?;
        let mut diagnostics: Vec<String> = Vec::new();

        info!("Checking messaging queue configuration");
        loop {
            let host = queue.current().to_string();
            info!(host = %host, "checking authentication and connection");

            match self.attempt(&host).await {
                Ok(()) => {
                    return Ok(ProbeReport {
                        result: ProbeResult {
                            success: true,
                            last_attempted_host: host,
                        },
                        diagnostics,
                    });
                }
                Err(error) => {
                    warn!(host = %host, %error, "candidate FAILED");
                    diagnostics.push(report::diagnostic_line(
                        &host,
                        &error,
                        &self.settings.credentials,
                        self.settings.disclosure,
                    ));
                    if !queue.advance() {
                        return Ok(ProbeReport {
                            result: ProbeResult {
                                success: false,
                                last_attempted_host: host,
                            },
                            diagnostics,
                        });
                    }
                    debug!(
                        next = queue.current(),
                        remaining = queue.remaining(),
                        "trying next candidate"
                    );
                }
            }
        }
    }

    /// One complete attempt against a single candidate
    ///
    /// connect → open channel with delivery confirmation → close. The
    /// connection is closed on the way out of both the success path and the
    /// channel-failure path.
    async fn attempt(&self, host: &str) -> Result<(), AttemptError> {
        let conn = self
            .transport
            .connect(host, &self.settings.credentials)
            .await?;
        info!(host, "authentication and connection ok, checking channel");

        match self.transport.open_confirm_channel(&conn).await {
            Ok(_channel) => {
                info!(host, "channel with delivery confirmation ok");
                self.transport.close(conn).await;
                Ok(())
            }
            Err(error) => {
                // The connection did open; close it rather than leak it.
                self.transport.close(conn).await;
                Err(error)
            }
        }
    }

    fn emit(&self, probe_report: &ProbeReport) {
        if probe_report.result.success {
            let host = &probe_report.result.last_attempted_host;
            info!(host = %host, "successful connection to messaging queue");
            if self.settings.print_to_console {
                println!("Successful connection to messaging queue at \"{host}\".");
            }
        } else {
            let message = DiagnosticReporter::assemble(
                &probe_report.diagnostics,
                self.settings.support_contact.as_deref(),
            );
            warn!("{message}");
            if self.settings.print_to_console {
                println!("{message}");
            }
        }
    }
}
