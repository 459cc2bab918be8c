use std::{env, fmt};

use url::Url;

use crate::{
    DEFAULT_DEV_SERVER_URL, DEV_SERVER_URL_ENV, LEGACY_RUN_MODE_ENV, PACKAGED_UI_ENTRY,
    RUN_MODE_ENV,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum RunMode {
    Development,
    Production,
}

impl RunMode {
    pub(crate) fn build_default() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }

    /// Anything other than `production` means development, matching the
    /// `NODE_ENV` convention the UI toolchain uses.
    pub(crate) fn from_env_value(raw: Option<&str>, default_mode: Self) -> Self {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) if value.eq_ignore_ascii_case("production") => Self::Production,
            Some(_) => Self::Development,
            None => default_mode,
        }
    }

    pub(crate) fn resolve() -> Self {
        let raw = env::var(RUN_MODE_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| env::var(LEGACY_RUN_MODE_ENV).ok());
        Self::from_env_value(raw.as_deref(), Self::build_default())
    }

    pub(crate) fn opens_devtools(self) -> bool {
        self == Self::Development
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UiLocator {
    DevServer(Url),
    PackagedEntry(String),
}

impl fmt::Display for UiLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DevServer(url) => write!(f, "dev server {url}"),
            Self::PackagedEntry(entry) => write!(f, "packaged entry {entry}"),
        }
    }
}

pub(crate) fn resolve_ui_locator(
    mode: RunMode,
    dev_server_override: Option<&str>,
) -> Result<UiLocator, String> {
    match mode {
        RunMode::Production => Ok(UiLocator::PackagedEntry(PACKAGED_UI_ENTRY.to_string())),
        RunMode::Development => {
            let raw = dev_server_override
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .unwrap_or(DEFAULT_DEV_SERVER_URL);
            let url = Url::parse(raw)
                .map_err(|error| format!("Invalid dev server URL '{raw}': {error}"))?;
            match url.scheme() {
                "http" => Ok(UiLocator::DevServer(url)),
                scheme => Err(format!(
                    "Unsupported dev server URL scheme '{scheme}', only http is allowed."
                )),
            }
        }
    }
}

pub(crate) fn resolve_ui_locator_from_env<F>(mode: RunMode, log: F) -> UiLocator
where
    F: Fn(&str),
{
    let override_url = env::var(DEV_SERVER_URL_ENV).ok();
    match resolve_ui_locator(mode, override_url.as_deref()) {
        Ok(locator) => locator,
        Err(error) => {
            log(&format!("{error}; using {DEFAULT_DEV_SERVER_URL}"));
            resolve_ui_locator(mode, None).unwrap_or_else(|_| {
                UiLocator::PackagedEntry(PACKAGED_UI_ENTRY.to_string())
            })
        }
    }
}
