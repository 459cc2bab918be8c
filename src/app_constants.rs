use std::time::Duration;

pub(crate) const DEFAULT_HEALTH_URL: &str = "http://127.0.0.1:8000/status";
pub(crate) const HEALTH_URL_ENV: &str = "AEGIS_HEALTH_URL";
pub(crate) const BACKEND_READY_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub(crate) const BACKEND_READY_LOG_EVERY_ATTEMPTS: u32 = 30;
pub(crate) const HEALTH_PROBE_TIMEOUT_ENV: &str = "AEGIS_HEALTH_PROBE_TIMEOUT_MS";
pub(crate) const DEFAULT_HEALTH_PROBE_TIMEOUT_MS: u64 = 5_000;
pub(crate) const HEALTH_PROBE_TIMEOUT_MIN_MS: u64 = 100;
pub(crate) const HEALTH_PROBE_TIMEOUT_MAX_MS: u64 = 30_000;

pub(crate) const UI_LOAD_RETRY_BUDGET: u32 = 3;
pub(crate) const UI_LOAD_RETRY_DELAY: Duration = Duration::from_secs(1);
pub(crate) const DEV_SERVER_PREFLIGHT_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) const RUN_MODE_ENV: &str = "AEGIS_ENV";
pub(crate) const LEGACY_RUN_MODE_ENV: &str = "NODE_ENV";
pub(crate) const DEFAULT_DEV_SERVER_URL: &str = "http://localhost:5173/";
pub(crate) const DEV_SERVER_URL_ENV: &str = "AEGIS_DEV_SERVER_URL";
pub(crate) const PACKAGED_UI_ENTRY: &str = "index.html";

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const MAIN_WINDOW_TITLE: &str = "Aegis";
pub(crate) const MAIN_WINDOW_WIDTH: f64 = 1920.0;
pub(crate) const MAIN_WINDOW_HEIGHT: f64 = 1080.0;
pub(crate) const MAIN_WINDOW_BACKGROUND_RGBA: [u8; 4] = [0, 0, 0, 255];

pub(crate) const WINDOW_MINIMIZE_EVENT: &str = "window-minimize";
pub(crate) const WINDOW_MAXIMIZE_EVENT: &str = "window-maximize";
pub(crate) const WINDOW_CLOSE_EVENT: &str = "window-close";

pub(crate) const AEGIS_ROOT_ENV: &str = "AEGIS_ROOT";
pub(crate) const DAEMON_MANIFEST_ENV: &str = "AEGIS_DAEMON_MANIFEST";
pub(crate) const DESKTOP_LOG_FILE: &str = "desktop.log";
pub(crate) const DESKTOP_LOG_MAX_BYTES: u64 = 5 * 1024 * 1024;
pub(crate) const LOG_BACKUP_COUNT: usize = 5;
