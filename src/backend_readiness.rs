use std::{future::Future, time::Duration};

use reqwest::{redirect::Policy, StatusCode};
use tokio::time::Instant;
use url::Url;

use crate::BACKEND_READY_LOG_EVERY_ATTEMPTS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ProbeOutcome {
    Ready,
    NotReady { status: u16 },
    Unreachable { reason: String },
}

impl ProbeOutcome {
    fn describe(&self) -> String {
        match self {
            Self::Ready => "ready".to_string(),
            Self::NotReady { status } => format!("status {status}"),
            Self::Unreachable { reason } => reason.clone(),
        }
    }
}

pub(crate) trait ReadinessProbe: Send + Sync {
    fn target(&self) -> &str;

    fn probe(&self) -> impl Future<Output = ProbeOutcome> + Send;
}

/// `GET`s the health endpoint; only an exact 200 counts as ready.
#[derive(Debug, Clone)]
pub(crate) struct HttpStatusProbe {
    client: reqwest::Client,
    url: Url,
}

impl HttpStatusProbe {
    pub(crate) fn new(url: Url, timeout: Duration) -> Result<Self, String> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .no_proxy()
            .build()
            .map_err(|error| format!("Failed to build health probe client: {error}"))?;
        Ok(Self { client, url })
    }
}

impl ReadinessProbe for HttpStatusProbe {
    fn target(&self) -> &str {
        self.url.as_str()
    }

    async fn probe(&self) -> ProbeOutcome {
        match self.client.get(self.url.clone()).send().await {
            Ok(response) if response.status() == StatusCode::OK => ProbeOutcome::Ready,
            Ok(response) => ProbeOutcome::NotReady {
                status: response.status().as_u16(),
            },
            Err(error) => ProbeOutcome::Unreachable {
                reason: if error.is_timeout() {
                    "request timed out".to_string()
                } else if error.is_connect() {
                    "connection refused".to_string()
                } else {
                    error.to_string()
                },
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReadinessReport {
    pub(crate) attempts: u32,
    pub(crate) waited: Duration,
}

fn should_log_failure(attempt: u32, reason_changed: bool) -> bool {
    attempt == 1 || reason_changed || attempt % BACKEND_READY_LOG_EVERY_ATTEMPTS == 0
}

/// Polls until the first `Ready`. There is no attempt cap and no overall timeout:
/// the daemon may be down for a while and restarted by its supervisor.
pub(crate) async fn wait_for_backend_ready<P, F>(
    probe: &P,
    poll_interval: Duration,
    log: F,
) -> ReadinessReport
where
    P: ReadinessProbe,
    F: Fn(&str),
{
    let started = Instant::now();
    let mut attempts = 0_u32;
    let mut last_failure: Option<String> = None;

    loop {
        attempts = attempts.saturating_add(1);
        let outcome = probe.probe().await;
        if outcome == ProbeOutcome::Ready {
            let report = ReadinessReport {
                attempts,
                waited: started.elapsed(),
            };
            log(&format!(
                "backend is ready at {} after {} attempt(s), waited {}ms",
                probe.target(),
                report.attempts,
                report.waited.as_millis()
            ));
            return report;
        }

        let description = outcome.describe();
        let reason_changed = last_failure.as_deref() != Some(description.as_str());
        if should_log_failure(attempts, reason_changed) {
            log(&format!(
                "waiting for backend at {} (attempt {}): {}; retrying in {}ms",
                probe.target(),
                attempts,
                description,
                poll_interval.as_millis()
            ));
        }
        last_failure = Some(description);

        tokio::time::sleep(poll_interval).await;
    }
}
