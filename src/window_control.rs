use crate::{
    main_window::MainWindow, WINDOW_CLOSE_EVENT, WINDOW_MAXIMIZE_EVENT, WINDOW_MINIMIZE_EVENT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WindowControlSignal {
    Minimize,
    MaximizeToggle,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SignalDispatch {
    Applied,
    IgnoredNoWindow,
}

impl WindowControlSignal {
    pub(crate) const ALL: [Self; 3] = [Self::Minimize, Self::MaximizeToggle, Self::Close];

    pub(crate) fn event_name(self) -> &'static str {
        match self {
            Self::Minimize => WINDOW_MINIMIZE_EVENT,
            Self::MaximizeToggle => WINDOW_MAXIMIZE_EVENT,
            Self::Close => WINDOW_CLOSE_EVENT,
        }
    }
}

fn toggle_maximized<W: MainWindow>(window: &W) -> Result<(), String> {
    if window.is_maximized()? {
        window.unmaximize()
    } else {
        window.maximize()
    }
}

/// Native failures are logged, never returned: the UI fires these and forgets.
pub(crate) fn apply_signal<W, F>(
    window: Option<&W>,
    signal: WindowControlSignal,
    log: F,
) -> SignalDispatch
where
    W: MainWindow,
    F: Fn(&str),
{
    let Some(window) = window else {
        return SignalDispatch::IgnoredNoWindow;
    };

    let result = match signal {
        WindowControlSignal::Minimize => window.minimize(),
        WindowControlSignal::MaximizeToggle => toggle_maximized(window),
        WindowControlSignal::Close => window.close(),
    };
    if let Err(error) = result {
        log(&format!(
            "window control '{}' failed: {error}",
            signal.event_name()
        ));
    }
    SignalDispatch::Applied
}
