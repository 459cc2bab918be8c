use std::{
    env, fs,
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, OnceLock},
};

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DesktopLogCategory {
    Startup,
    Runtime,
    Shutdown,
}

impl DesktopLogCategory {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Runtime => "runtime",
            Self::Shutdown => "shutdown",
        }
    }
}

pub(crate) fn resolve_desktop_log_path(root_dir: Option<PathBuf>, file_name: &str) -> PathBuf {
    match root_dir {
        Some(root) => root.join("logs").join(file_name),
        None => env::temp_dir().join("aegis-desktop").join(file_name),
    }
}

pub(crate) fn format_log_line(
    category: DesktopLogCategory,
    message: &str,
    now: DateTime<Local>,
) -> String {
    format!(
        "[{}] [{}] {}\n",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        category.as_str(),
        message.trim_end()
    )
}

fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut raw = path.as_os_str().to_os_string();
    raw.push(format!(".{index}"));
    PathBuf::from(raw)
}

/// Shifts `desktop.log` to `desktop.log.1`, `.1` to `.2` and so on, dropping the
/// oldest backup once `backup_count` is reached.
pub(crate) fn rotate_log_if_needed(
    path: &Path,
    max_bytes: u64,
    backup_count: usize,
) -> Result<bool, String> {
    let size = match fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(_) => return Ok(false),
    };
    if max_bytes == 0 || size < max_bytes {
        return Ok(false);
    }

    if backup_count == 0 {
        fs::remove_file(path)
            .map_err(|error| format!("Failed to truncate log {}: {}", path.display(), error))?;
        return Ok(true);
    }

    let oldest = backup_path(path, backup_count);
    if oldest.exists() {
        fs::remove_file(&oldest).map_err(|error| {
            format!(
                "Failed to remove oldest log backup {}: {}",
                oldest.display(),
                error
            )
        })?;
    }
    for index in (1..backup_count).rev() {
        let source = backup_path(path, index);
        if source.exists() {
            let target = backup_path(path, index + 1);
            fs::rename(&source, &target).map_err(|error| {
                format!(
                    "Failed to rotate log backup {} -> {}: {}",
                    source.display(),
                    target.display(),
                    error
                )
            })?;
        }
    }
    let first_backup = backup_path(path, 1);
    fs::rename(path, &first_backup).map_err(|error| {
        format!(
            "Failed to rotate log {} -> {}: {}",
            path.display(),
            first_backup.display(),
            error
        )
    })?;
    Ok(true)
}

fn write_log_line(
    path: &Path,
    line: &str,
    max_bytes: u64,
    backup_count: usize,
) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|error| {
            format!(
                "Failed to create log directory {}: {}",
                parent.display(),
                error
            )
        })?;
    }
    rotate_log_if_needed(path, max_bytes, backup_count)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| format!("Failed to open log {}: {}", path.display(), error))?;
    file.write_all(line.as_bytes())
        .map_err(|error| format!("Failed to write log {}: {}", path.display(), error))
}

pub(crate) fn append_desktop_log(
    category: DesktopLogCategory,
    message: &str,
    root_dir: Option<PathBuf>,
    file_name: &str,
    max_bytes: u64,
    backup_count: usize,
    write_lock: &OnceLock<Mutex<()>>,
) {
    let line = format_log_line(category, message, Local::now());
    if cfg!(debug_assertions) {
        eprint!("{line}");
    }

    let path = resolve_desktop_log_path(root_dir, file_name);
    let lock = write_lock.get_or_init(|| Mutex::new(()));
    let _guard = match lock.lock() {
        Ok(guard) => guard,
        Err(error) => error.into_inner(),
    };
    if let Err(error) = write_log_line(&path, &line, max_bytes, backup_count) {
        eprintln!("aegis desktop log unavailable: {error}");
    }
}
