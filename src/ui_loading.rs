use std::time::Duration;

use crate::{main_window::MainWindow, startup_mode::UiLocator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LoadRetryPolicy {
    pub(crate) budget: u32,
    pub(crate) delay: Duration,
}

impl Default for LoadRetryPolicy {
    fn default() -> Self {
        Self {
            budget: crate::UI_LOAD_RETRY_BUDGET,
            delay: crate::UI_LOAD_RETRY_DELAY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LoadOutcome {
    Loaded { attempts: u32 },
    Exhausted { attempts: u32, last_error: String },
}

impl LoadOutcome {
    pub(crate) fn attempts(&self) -> u32 {
        match self {
            Self::Loaded { attempts } | Self::Exhausted { attempts, .. } => *attempts,
        }
    }
}

/// Tries the same locator at most `budget + 1` times. `on_attempt` sees the
/// 1-based attempt number before each try.
pub(crate) async fn load_with_retries<W, A, F>(
    window: &W,
    locator: &UiLocator,
    policy: LoadRetryPolicy,
    on_attempt: A,
    log: F,
) -> LoadOutcome
where
    W: MainWindow,
    A: Fn(u32),
    F: Fn(&str),
{
    let mut attempts = 0_u32;
    let mut retries_left = policy.budget;

    loop {
        attempts += 1;
        on_attempt(attempts);
        match window.load(locator).await {
            Ok(()) => {
                log(&format!("UI loaded from {locator} (attempt {attempts})"));
                return LoadOutcome::Loaded { attempts };
            }
            Err(error) if retries_left > 0 => {
                log(&format!(
                    "failed to load UI from {locator}: {error}; retrying in {}ms ({} retries left)",
                    policy.delay.as_millis(),
                    retries_left
                ));
                retries_left -= 1;
                tokio::time::sleep(policy.delay).await;
            }
            Err(error) => {
                log(&format!(
                    "failed to load UI from {locator} after {attempts} attempt(s): {error}"
                ));
                return LoadOutcome::Exhausted {
                    attempts,
                    last_error: error,
                };
            }
        }
    }
}
