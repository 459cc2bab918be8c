use tauri::{AppHandle, ExitRequestApi, Manager};

use crate::{append_shutdown_log, shutdown_policy::ShutdownDecision, ShellState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitRequestAction {
    AllowExit,
    PreventExit,
}

/// `code` is `Some` for explicit exits (`AppHandle::exit`), which always go through.
fn decide_exit_request(code: Option<i32>, decision: ShutdownDecision) -> ExitRequestAction {
    if code.is_some() {
        return ExitRequestAction::AllowExit;
    }
    match decision {
        ShutdownDecision::Quit => ExitRequestAction::AllowExit,
        ShutdownDecision::StayResident | ShutdownDecision::KeepAliveNeverShown => {
            ExitRequestAction::PreventExit
        }
    }
}

pub(crate) fn handle_exit_requested(
    app_handle: &AppHandle,
    api: &ExitRequestApi,
    code: Option<i32>,
) {
    if let Some(code) = code {
        append_shutdown_log(&format!("exit requested with code {code}"));
        return;
    }

    let state = app_handle.state::<ShellState>();
    let decision = state.coordinator.on_last_window_closed();
    match decision {
        ShutdownDecision::Quit => {
            append_shutdown_log("last window closed after being shown, quitting")
        }
        ShutdownDecision::StayResident => {
            append_shutdown_log("last window closed, staying resident without a window")
        }
        ShutdownDecision::KeepAliveNeverShown => append_shutdown_log(
            "window was never shown, keeping the app alive so startup can finish",
        ),
    }

    if decide_exit_request(code, decision) == ExitRequestAction::PreventExit {
        api.prevent_exit();
    }
}

pub(crate) fn handle_exit_event(_app_handle: &AppHandle) {
    append_shutdown_log("desktop shell exiting; backend daemons remain under their supervisor");
}

#[cfg(test)]
mod tests {
    use super::{decide_exit_request, ExitRequestAction};
    use crate::shutdown_policy::ShutdownDecision;

    #[test]
    fn explicit_exit_codes_always_exit() {
        for decision in [
            ShutdownDecision::Quit,
            ShutdownDecision::StayResident,
            ShutdownDecision::KeepAliveNeverShown,
        ] {
            assert_eq!(
                decide_exit_request(Some(0), decision),
                ExitRequestAction::AllowExit
            );
        }
    }

    #[test]
    fn last_window_close_follows_shutdown_decision() {
        assert_eq!(
            decide_exit_request(None, ShutdownDecision::Quit),
            ExitRequestAction::AllowExit
        );
        assert_eq!(
            decide_exit_request(None, ShutdownDecision::StayResident),
            ExitRequestAction::PreventExit
        );
        assert_eq!(
            decide_exit_request(None, ShutdownDecision::KeepAliveNeverShown),
            ExitRequestAction::PreventExit
        );
    }
}
