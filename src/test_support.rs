use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc, Mutex,
};

use tokio::time::Instant;

use crate::{
    backend_readiness::{ProbeOutcome, ReadinessProbe},
    main_window::{MainWindow, WindowFactory},
    startup_mode::UiLocator,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeWindowState {
    pub(crate) load_attempts: u32,
    pub(crate) failing_loads: u32,
    pub(crate) loaded_locators: Vec<UiLocator>,
    pub(crate) native_error: Option<String>,
    pub(crate) visible: bool,
    pub(crate) show_calls: u32,
    pub(crate) devtools_open: bool,
    pub(crate) minimized: bool,
    pub(crate) maximized: bool,
    pub(crate) closed: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeWindow {
    state: Arc<Mutex<FakeWindowState>>,
}

impl FakeWindow {
    pub(crate) fn snapshot(&self) -> FakeWindowState {
        self.state.lock().unwrap().clone()
    }

    pub(crate) fn fail_next_loads(&self, count: u32) {
        self.state.lock().unwrap().failing_loads = count;
    }

    pub(crate) fn fail_native_calls(&self, message: &str) {
        self.state.lock().unwrap().native_error = Some(message.to_string());
    }

    fn native<F>(&self, apply: F) -> Result<(), String>
    where
        F: FnOnce(&mut FakeWindowState),
    {
        let mut state = self.state.lock().unwrap();
        if let Some(error) = state.native_error.clone() {
            return Err(error);
        }
        apply(&mut state);
        Ok(())
    }
}

impl MainWindow for FakeWindow {
    async fn load(&self, locator: &UiLocator) -> Result<(), String> {
        let mut state = self.state.lock().unwrap();
        state.load_attempts += 1;
        state.loaded_locators.push(locator.clone());
        if state.failing_loads > 0 {
            state.failing_loads -= 1;
            return Err(format!("Failed to load {locator}: connection refused"));
        }
        Ok(())
    }

    fn show(&self) -> Result<(), String> {
        self.native(|state| {
            state.visible = true;
            state.show_calls += 1;
        })
    }

    fn open_devtools(&self) {
        self.state.lock().unwrap().devtools_open = true;
    }

    fn minimize(&self) -> Result<(), String> {
        self.native(|state| state.minimized = true)
    }

    fn is_maximized(&self) -> Result<bool, String> {
        let state = self.state.lock().unwrap();
        match &state.native_error {
            Some(error) => Err(error.clone()),
            None => Ok(state.maximized),
        }
    }

    fn maximize(&self) -> Result<(), String> {
        self.native(|state| state.maximized = true)
    }

    fn unmaximize(&self) -> Result<(), String> {
        self.native(|state| state.maximized = false)
    }

    fn close(&self) -> Result<(), String> {
        self.native(|state| {
            state.closed = true;
            state.visible = false;
        })
    }
}

/// Records when (and after how many probe attempts) each window was created.
#[derive(Debug, Default)]
pub(crate) struct FakeWindowFactory {
    probe_calls: Option<Arc<AtomicU32>>,
    fail_with: Option<String>,
    created: Mutex<Vec<(Instant, u32, FakeWindow)>>,
    failing_loads: u32,
}

impl FakeWindowFactory {
    pub(crate) fn observing(probe_calls: Arc<AtomicU32>) -> Self {
        Self {
            probe_calls: Some(probe_calls),
            ..Self::default()
        }
    }

    pub(crate) fn failing_creation(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn with_failing_loads(mut self, count: u32) -> Self {
        self.failing_loads = count;
        self
    }

    pub(crate) fn created(&self) -> Vec<(Instant, u32, FakeWindow)> {
        self.created.lock().unwrap().clone()
    }
}

impl WindowFactory for FakeWindowFactory {
    type Window = FakeWindow;

    fn create_main_window(&self) -> Result<FakeWindow, String> {
        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }
        let window = FakeWindow::default();
        window.fail_next_loads(self.failing_loads);
        let probes = self
            .probe_calls
            .as_ref()
            .map(|calls| calls.load(Ordering::SeqCst))
            .unwrap_or_default();
        self.created
            .lock()
            .unwrap()
            .push((Instant::now(), probes, window.clone()));
        Ok(window)
    }
}

/// Fails `failures` times with "connection refused", then answers ready.
#[derive(Debug)]
pub(crate) struct CountingProbe {
    pub(crate) calls: Arc<AtomicU32>,
    failures: u32,
}

impl CountingProbe {
    pub(crate) fn failing(failures: u32) -> Self {
        Self {
            calls: Arc::new(AtomicU32::new(0)),
            failures,
        }
    }
}

impl ReadinessProbe for CountingProbe {
    fn target(&self) -> &str {
        "http://127.0.0.1:8000/status"
    }

    async fn probe(&self) -> ProbeOutcome {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.failures {
            ProbeOutcome::Unreachable {
                reason: "connection refused".to_string(),
            }
        } else {
            ProbeOutcome::Ready
        }
    }
}
