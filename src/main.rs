#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_runtime;
mod app_types;
mod backend_config;
mod backend_readiness;
mod daemon_manifest;
mod desktop_bridge_commands;
mod exit_events;
mod logging;
mod main_window;
mod runtime_paths;
mod shutdown_policy;
mod startup_coordinator;
mod startup_mode;
mod startup_task;
#[cfg(test)]
mod test_support;
mod ui_loading;
mod window_control;

use std::sync::{Mutex, OnceLock};

pub(crate) use app_constants::*;
pub(crate) use app_types::{AtomicFlagGuard, ShellState, ShellStateSnapshot};

static DESKTOP_LOG_WRITE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn main() {
    app_runtime::run();
}

pub(crate) fn append_desktop_log(message: &str) {
    append_desktop_log_with_category(logging::DesktopLogCategory::Runtime, message);
}

pub(crate) fn append_startup_log(message: &str) {
    append_desktop_log_with_category(logging::DesktopLogCategory::Startup, message);
}

pub(crate) fn append_shutdown_log(message: &str) {
    append_desktop_log_with_category(logging::DesktopLogCategory::Shutdown, message);
}

fn append_desktop_log_with_category(category: logging::DesktopLogCategory, message: &str) {
    logging::append_desktop_log(
        category,
        message,
        runtime_paths::default_packaged_root_dir(),
        DESKTOP_LOG_FILE,
        DESKTOP_LOG_MAX_BYTES,
        LOG_BACKUP_COUNT,
        &DESKTOP_LOG_WRITE_LOCK,
    )
}
