use tauri::{Listener, Manager, RunEvent, WindowEvent};

use crate::{
    append_desktop_log, append_startup_log, exit_events, shutdown_policy::ShutdownPolicy,
    startup_coordinator::StartupPlan, startup_mode, startup_task,
    window_control::WindowControlSignal, ShellState, DESKTOP_LOG_FILE, MAIN_WINDOW_LABEL,
};

fn register_window_control_listeners(app_handle: &tauri::AppHandle) {
    for signal in WindowControlSignal::ALL {
        let listener_handle = app_handle.clone();
        app_handle.listen_any(signal.event_name(), move |_event| {
            let state = listener_handle.state::<ShellState>();
            state.coordinator.handle_signal(signal, append_desktop_log);
        });
    }
}

pub(crate) fn run() {
    append_startup_log("desktop process starting");
    append_startup_log(&format!(
        "desktop log path: {}",
        crate::logging::resolve_desktop_log_path(
            crate::runtime_paths::default_packaged_root_dir(),
            DESKTOP_LOG_FILE,
        )
        .display()
    ));

    let run_mode = startup_mode::RunMode::resolve();
    let locator = startup_mode::resolve_ui_locator_from_env(run_mode, append_startup_log);
    let plan = StartupPlan::new(locator, run_mode);

    tauri::Builder::default()
        .manage(ShellState::new(plan, ShutdownPolicy::for_current_platform()))
        .invoke_handler(tauri::generate_handler![
            crate::desktop_bridge_commands::desktop_bridge_is_desktop_runtime,
            crate::desktop_bridge_commands::desktop_shell_state,
        ])
        .on_window_event(|window, event| {
            if window.label() != MAIN_WINDOW_LABEL {
                return;
            }

            if let WindowEvent::Destroyed = event {
                append_desktop_log("main window destroyed");
                let state = window.app_handle().state::<ShellState>();
                state.coordinator.release_window();
            }
        })
        .setup(|app| {
            let app_handle = app.handle().clone();
            register_window_control_listeners(&app_handle);
            startup_task::spawn_startup_task(app_handle, append_startup_log);
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::ExitRequested { api, code, .. } => {
                exit_events::handle_exit_requested(app_handle, &api, code);
            }
            RunEvent::Exit => {
                exit_events::handle_exit_event(app_handle);
            }
            #[cfg(target_os = "macos")]
            RunEvent::Reopen {
                has_visible_windows: false,
                ..
            } => {
                startup_task::spawn_reopen_task(app_handle.clone(), append_desktop_log);
            }
            _ => {}
        });
}
