use tauri::{AppHandle, Manager};

use crate::{
    backend_config, backend_readiness::HttpStatusProbe, daemon_manifest,
    main_window::TauriWindowFactory, startup_coordinator::PresentOutcome, ShellState,
};

pub(crate) fn spawn_startup_task(app_handle: AppHandle, log: fn(&str)) {
    let manifest = daemon_manifest::load_daemon_manifest_from_env(log);
    let health_daemon = manifest
        .as_ref()
        .and_then(|manifest| manifest.health_daemon().cloned());
    let health_url = backend_config::resolve_health_url_from_env(
        health_daemon
            .as_ref()
            .and_then(|daemon| daemon.health_url.as_deref()),
        log,
    );
    let probe_timeout = backend_config::resolve_health_probe_timeout();

    match &health_daemon {
        Some(daemon) => log(&format!(
            "waiting for {} at {health_url} ({})",
            daemon.name,
            daemon.describe(home::home_dir().as_deref())
        )),
        None => log(&format!("waiting for backend daemon at {health_url}")),
    }

    let probe = match HttpStatusProbe::new(health_url, probe_timeout) {
        Ok(probe) => probe,
        Err(error) => {
            log(&error);
            return;
        }
    };
    let factory = match TauriWindowFactory::new(app_handle.clone()) {
        Ok(factory) => factory,
        Err(error) => {
            log(&error);
            return;
        }
    };

    let state = app_handle.state::<ShellState>();
    let coordinator = state.coordinator.clone();
    let plan = state.plan.clone();
    log(&format!(
        "startup plan: mode={} ui={} load_retries={}",
        plan.mode.as_str(),
        plan.locator,
        plan.load_retry.budget
    ));

    tauri::async_runtime::spawn(async move {
        match coordinator.run(&probe, &factory, &plan, log).await {
            Ok(PresentOutcome::Revealed { loaded, attempts }) => log(&format!(
                "startup finished: loaded={loaded} attempts={attempts}"
            )),
            Ok(outcome) => log(&format!("startup finished without presenting: {outcome:?}")),
            Err(error) => log(&format!("startup failed: {error}")),
        }
    });
}

/// Brings the window back when the app is reactivated with no window open.
pub(crate) fn spawn_reopen_task(app_handle: AppHandle, log: fn(&str)) {
    let state = app_handle.state::<ShellState>();
    if !state.coordinator.is_backend_ready() {
        log("reopen ignored: backend is not ready yet");
        return;
    }
    if state.coordinator.has_window() {
        return;
    }

    let factory = match TauriWindowFactory::new(app_handle.clone()) {
        Ok(factory) => factory,
        Err(error) => {
            log(&error);
            return;
        }
    };
    let coordinator = state.coordinator.clone();
    let plan = state.plan.clone();
    tauri::async_runtime::spawn(async move {
        if let Err(error) = coordinator.present_window(&factory, &plan, log).await {
            log(&format!("failed to reopen main window: {error}"));
        }
    });
}
