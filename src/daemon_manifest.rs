//! Read-only view of the process-supervisor manifest. The shell never starts or
//! stops these daemons; it only uses the manifest to find the health endpoint
//! and to point at the daemon logs while waiting.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{runtime_paths, DAEMON_MANIFEST_ENV};

const EMBEDDED_MANIFEST: &str = include_str!("../daemons.json");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DaemonSpec {
    pub(crate) name: String,
    pub(crate) script: String,
    pub(crate) interpreter: Option<String>,
    #[serde(default = "default_autorestart")]
    pub(crate) autorestart: bool,
    pub(crate) max_memory_restart: Option<String>,
    pub(crate) log_file: Option<String>,
    pub(crate) health_url: Option<String>,
}

fn default_autorestart() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct DaemonManifest {
    pub(crate) daemons: Vec<DaemonSpec>,
}

impl DaemonManifest {
    /// The daemon the shell waits on: the first one that declares a health URL.
    pub(crate) fn health_daemon(&self) -> Option<&DaemonSpec> {
        self.daemons.iter().find(|daemon| {
            daemon
                .health_url
                .as_deref()
                .is_some_and(|url| !url.trim().is_empty())
        })
    }
}

impl DaemonSpec {
    pub(crate) fn log_path(&self, home_dir: Option<&Path>) -> Option<PathBuf> {
        self.log_file
            .as_deref()
            .map(|raw| runtime_paths::expand_home_path(raw, home_dir))
    }

    pub(crate) fn memory_restart_bytes(&self) -> Result<Option<u64>, String> {
        self.max_memory_restart
            .as_deref()
            .map(parse_memory_threshold)
            .transpose()
    }

    pub(crate) fn describe(&self, home_dir: Option<&Path>) -> String {
        let command = match self.interpreter.as_deref() {
            Some(interpreter) => format!("{interpreter} {}", self.script),
            None => self.script.clone(),
        };
        let mut parts = vec![format!("daemon {} ({command})", self.name)];
        if let Some(path) = self.log_path(home_dir) {
            parts.push(format!("log {}", path.display()));
        }
        match self.memory_restart_bytes() {
            Ok(Some(bytes)) => parts.push(format!("restarts above {bytes} bytes")),
            Ok(None) => {}
            Err(error) => parts.push(error),
        }
        if !self.autorestart {
            parts.push("autorestart disabled".to_string());
        }
        parts.join(", ")
    }
}

/// Parses supervisor-style thresholds: `1G`, `500M`, `512K` or plain bytes.
pub(crate) fn parse_memory_threshold(raw: &str) -> Result<u64, String> {
    let trimmed = raw.trim();
    let invalid = || format!("Invalid memory threshold '{raw}'");
    let (digits, multiplier) = match trimmed.chars().last() {
        Some(unit) if unit.is_ascii_alphabetic() => {
            let multiplier = match unit.to_ascii_uppercase() {
                'K' => 1024_u64,
                'M' => 1024 * 1024,
                'G' => 1024 * 1024 * 1024,
                _ => return Err(invalid()),
            };
            (&trimmed[..trimmed.len() - 1], multiplier)
        }
        Some(_) => (trimmed, 1),
        None => return Err(invalid()),
    };

    digits
        .trim()
        .parse::<u64>()
        .ok()
        .and_then(|value| value.checked_mul(multiplier))
        .ok_or_else(invalid)
}

pub(crate) fn parse_manifest(raw: &str) -> Result<DaemonManifest, String> {
    serde_json::from_str(raw).map_err(|error| format!("Failed to parse daemon manifest: {error}"))
}

pub(crate) fn load_daemon_manifest(override_path: Option<&Path>) -> Result<DaemonManifest, String> {
    let Some(path) = override_path else {
        return parse_manifest(EMBEDDED_MANIFEST);
    };

    let raw = fs::read_to_string(path).map_err(|error| {
        format!(
            "Failed to read daemon manifest {}: {}",
            path.display(),
            error
        )
    })?;
    parse_manifest(&raw)
}

pub(crate) fn load_daemon_manifest_from_env<F>(log: F) -> Option<DaemonManifest>
where
    F: Fn(&str),
{
    let override_path = env::var(DAEMON_MANIFEST_ENV)
        .ok()
        .map(|value| PathBuf::from(value.trim()))
        .filter(|path| !path.as_os_str().is_empty());
    match load_daemon_manifest(override_path.as_deref()) {
        Ok(manifest) => Some(manifest),
        Err(error) => {
            log(&format!("{error}; using built-in backend defaults"));
            None
        }
    }
}
