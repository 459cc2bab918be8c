use tauri::{AppHandle, Manager};

use crate::{ShellState, ShellStateSnapshot};

#[tauri::command]
pub(crate) fn desktop_bridge_is_desktop_runtime() -> bool {
    true
}

#[tauri::command]
pub(crate) fn desktop_shell_state(app_handle: AppHandle) -> ShellStateSnapshot {
    let state = app_handle.state::<ShellState>();
    state.snapshot()
}
