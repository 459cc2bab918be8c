use std::{
    env,
    path::{Path, PathBuf},
};

use crate::AEGIS_ROOT_ENV;

pub(crate) fn default_packaged_root_dir() -> Option<PathBuf> {
    if let Ok(root) = env::var(AEGIS_ROOT_ENV) {
        let path = PathBuf::from(root.trim());
        if !path.as_os_str().is_empty() {
            return Some(path);
        }
    }

    home::home_dir().map(|home| home.join(".aegis"))
}

/// Expands a leading `~` against `home_dir`. Paths without one are returned as-is.
pub(crate) fn expand_home_path(raw: &str, home_dir: Option<&Path>) -> PathBuf {
    let trimmed = raw.trim();
    let Some(home) = home_dir else {
        return PathBuf::from(trimmed);
    };

    if trimmed == "~" {
        return home.to_path_buf();
    }
    match trimmed
        .strip_prefix("~/")
        .or_else(|| trimmed.strip_prefix("~\\"))
    {
        Some(rest) => home.join(rest),
        None => PathBuf::from(trimmed),
    }
}
