#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShutdownPolicy {
    QuitOnLastWindowClose,
    /// macOS convention: the app stays in the dock with no window.
    StayResident,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShutdownDecision {
    Quit,
    StayResident,
    KeepAliveNeverShown,
}

impl ShutdownPolicy {
    pub(crate) fn for_current_platform() -> Self {
        if cfg!(target_os = "macos") {
            Self::StayResident
        } else {
            Self::QuitOnLastWindowClose
        }
    }
}

pub(crate) fn decide_on_last_window_closed(
    policy: ShutdownPolicy,
    window_was_shown: bool,
) -> ShutdownDecision {
    if !window_was_shown {
        return ShutdownDecision::KeepAliveNeverShown;
    }

    match policy {
        ShutdownPolicy::QuitOnLastWindowClose => ShutdownDecision::Quit,
        ShutdownPolicy::StayResident => ShutdownDecision::StayResident,
    }
}
