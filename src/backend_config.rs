use std::{env, time::Duration};

use url::Url;

use crate::{
    DEFAULT_HEALTH_PROBE_TIMEOUT_MS, HEALTH_PROBE_TIMEOUT_ENV, HEALTH_PROBE_TIMEOUT_MAX_MS,
    HEALTH_PROBE_TIMEOUT_MIN_MS, HEALTH_URL_ENV,
};

/// Parses `raw` as a plain-http health endpoint, returning `None` for anything
/// the probe could not target. The probe client is built without TLS, so
/// `https` is rejected here instead of failing on every poll.
pub(crate) fn parse_health_url(raw: &str) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = Url::parse(trimmed).ok()?;
    match parsed.scheme() {
        "http" => {}
        _ => return None,
    }
    parsed.host_str()?;
    Some(parsed)
}

pub(crate) fn normalize_health_url(raw: &str, default_url: &str) -> Url {
    parse_health_url(raw)
        .or_else(|| parse_health_url(default_url))
        .unwrap_or_else(|| {
            Url::parse(crate::DEFAULT_HEALTH_URL).expect("default health url must be valid")
        })
}

/// Env override first, then the daemon manifest, then the built-in endpoint.
pub(crate) fn resolve_health_url<F>(
    env_value: Option<&str>,
    manifest_url: Option<&str>,
    log: F,
) -> Url
where
    F: Fn(&str),
{
    if let Some(raw) = env_value {
        if let Some(url) = parse_health_url(raw) {
            return url;
        }
        log(&format!(
            "ignoring invalid {HEALTH_URL_ENV}='{raw}', falling back to defaults"
        ));
    }

    if let Some(raw) = manifest_url {
        if let Some(url) = parse_health_url(raw) {
            return url;
        }
        log(&format!("ignoring invalid manifest health url '{raw}'"));
    }

    normalize_health_url(crate::DEFAULT_HEALTH_URL, crate::DEFAULT_HEALTH_URL)
}

pub(crate) fn resolve_health_url_from_env<F>(manifest_url: Option<&str>, log: F) -> Url
where
    F: Fn(&str),
{
    resolve_health_url(env::var(HEALTH_URL_ENV).ok().as_deref(), manifest_url, log)
}

pub(crate) fn parse_clamped_timeout_ms(
    raw: Option<&str>,
    default_ms: u64,
    min_ms: u64,
    max_ms: u64,
) -> Duration {
    let parsed = raw
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(default_ms);
    Duration::from_millis(parsed.clamp(min_ms, max_ms))
}

pub(crate) fn resolve_health_probe_timeout() -> Duration {
    parse_clamped_timeout_ms(
        env::var(HEALTH_PROBE_TIMEOUT_ENV).ok().as_deref(),
        DEFAULT_HEALTH_PROBE_TIMEOUT_MS,
        HEALTH_PROBE_TIMEOUT_MIN_MS,
        HEALTH_PROBE_TIMEOUT_MAX_MS,
    )
}
