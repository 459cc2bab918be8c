use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex, MutexGuard,
    },
    time::Duration,
};

use crate::{
    backend_readiness::{self, ReadinessProbe, ReadinessReport},
    main_window::{MainWindow, WindowFactory},
    shutdown_policy::{self, ShutdownDecision, ShutdownPolicy},
    startup_mode::{RunMode, UiLocator},
    ui_loading::{self, LoadOutcome, LoadRetryPolicy},
    window_control::{self, SignalDispatch, WindowControlSignal},
    AtomicFlagGuard,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub(crate) enum StartupPhase {
    WaitingForBackend,
    WindowCreated,
    Loading { attempt: u32 },
    Shown,
    Closed,
    Resident,
}

#[derive(Debug, Clone)]
pub(crate) struct StartupPlan {
    pub(crate) locator: UiLocator,
    pub(crate) mode: RunMode,
    pub(crate) poll_interval: Duration,
    pub(crate) load_retry: LoadRetryPolicy,
}

impl StartupPlan {
    pub(crate) fn new(locator: UiLocator, mode: RunMode) -> Self {
        Self {
            locator,
            mode,
            poll_interval: crate::BACKEND_READY_POLL_INTERVAL,
            load_retry: LoadRetryPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PresentOutcome {
    Revealed { loaded: bool, attempts: u32 },
    ClosedDuringLoad { attempts: u32 },
    AlreadyPresenting,
    WindowExists,
}

/// Owns the single main window and the startup flags. Shared by the startup
/// task, the window-control listeners and the run-event handlers.
#[derive(Debug)]
pub(crate) struct StartupCoordinator<W> {
    window: Mutex<Option<W>>,
    phase: Mutex<StartupPhase>,
    backend_ready: AtomicBool,
    window_was_shown: AtomicBool,
    is_presenting: AtomicBool,
    policy: ShutdownPolicy,
}

fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(error) => error.into_inner(),
    }
}

impl<W: MainWindow> StartupCoordinator<W> {
    pub(crate) fn new(policy: ShutdownPolicy) -> Self {
        Self {
            window: Mutex::new(None),
            phase: Mutex::new(StartupPhase::WaitingForBackend),
            backend_ready: AtomicBool::new(false),
            window_was_shown: AtomicBool::new(false),
            is_presenting: AtomicBool::new(false),
            policy,
        }
    }

    pub(crate) fn phase(&self) -> StartupPhase {
        *lock_or_recover(&self.phase)
    }

    fn set_phase(&self, phase: StartupPhase) {
        *lock_or_recover(&self.phase) = phase;
    }

    pub(crate) fn is_backend_ready(&self) -> bool {
        self.backend_ready.load(Ordering::Acquire)
    }

    pub(crate) fn window_was_shown(&self) -> bool {
        self.window_was_shown.load(Ordering::Acquire)
    }

    pub(crate) fn has_window(&self) -> bool {
        lock_or_recover(&self.window).is_some()
    }

    pub(crate) fn current_window(&self) -> Option<W> {
        lock_or_recover(&self.window).clone()
    }

    /// Full startup: wait for the backend, then create, load and reveal the window.
    pub(crate) async fn run<P, Fa, F>(
        &self,
        probe: &P,
        factory: &Fa,
        plan: &StartupPlan,
        log: F,
    ) -> Result<PresentOutcome, String>
    where
        P: ReadinessProbe,
        Fa: WindowFactory<Window = W>,
        F: Fn(&str) + Sync,
    {
        self.await_backend_ready(probe, plan.poll_interval, &log).await;
        self.present_window(factory, plan, &log).await
    }

    /// Returns `None` when readiness was already observed earlier in this process.
    pub(crate) async fn await_backend_ready<P, F>(
        &self,
        probe: &P,
        poll_interval: Duration,
        log: F,
    ) -> Option<ReadinessReport>
    where
        P: ReadinessProbe,
        F: Fn(&str),
    {
        if self.is_backend_ready() {
            return None;
        }

        self.set_phase(StartupPhase::WaitingForBackend);
        let report = backend_readiness::wait_for_backend_ready(probe, poll_interval, &log).await;
        self.backend_ready.store(true, Ordering::Release);
        Some(report)
    }

    pub(crate) async fn present_window<Fa, F>(
        &self,
        factory: &Fa,
        plan: &StartupPlan,
        log: F,
    ) -> Result<PresentOutcome, String>
    where
        Fa: WindowFactory<Window = W>,
        F: Fn(&str) + Sync,
    {
        if !self.is_backend_ready() {
            return Err(
                "Refusing to create the main window before the backend is ready.".to_string(),
            );
        }
        let Some(_presenting) = AtomicFlagGuard::try_set(&self.is_presenting) else {
            log("main window presentation already in progress, skipping");
            return Ok(PresentOutcome::AlreadyPresenting);
        };
        if self.has_window() {
            return Ok(PresentOutcome::WindowExists);
        }

        let window = factory.create_main_window()?;
        *lock_or_recover(&self.window) = Some(window.clone());
        self.set_phase(StartupPhase::WindowCreated);
        log(&format!("main window created, loading UI from {}", plan.locator));

        let outcome = ui_loading::load_with_retries(
            &window,
            &plan.locator,
            plan.load_retry,
            |attempt| {
                if self.has_window() {
                    self.set_phase(StartupPhase::Loading { attempt });
                }
            },
            &log,
        )
        .await;
        Ok(self.reveal(&window, &outcome, plan.mode, &log))
    }

    fn reveal<F>(&self, window: &W, outcome: &LoadOutcome, mode: RunMode, log: F) -> PresentOutcome
    where
        F: Fn(&str),
    {
        // Destroyed while loading: the slot is empty and the phase is already `Closed`.
        if !self.has_window() {
            log("main window was closed while the UI was loading, not revealing it");
            return PresentOutcome::ClosedDuringLoad {
                attempts: outcome.attempts(),
            };
        }

        let loaded = matches!(outcome, LoadOutcome::Loaded { .. });
        if let LoadOutcome::Exhausted { last_error, .. } = outcome {
            log(&format!(
                "UI failed to load after all retries ({last_error}), showing the window anyway"
            ));
        }

        if !self.window_was_shown.swap(true, Ordering::AcqRel) {
            log("main window shown for the first time");
        }
        if let Err(error) = window.show() {
            log(&error);
        }
        if loaded && mode.opens_devtools() {
            window.open_devtools();
        }
        self.set_phase(StartupPhase::Shown);

        PresentOutcome::Revealed {
            loaded,
            attempts: outcome.attempts(),
        }
    }

    pub(crate) fn handle_signal<F>(&self, signal: WindowControlSignal, log: F) -> SignalDispatch
    where
        F: Fn(&str),
    {
        let window = self.current_window();
        window_control::apply_signal(window.as_ref(), signal, log)
    }

    pub(crate) fn release_window(&self) {
        if lock_or_recover(&self.window).take().is_some() {
            self.set_phase(StartupPhase::Closed);
        }
    }

    pub(crate) fn on_last_window_closed(&self) -> ShutdownDecision {
        let decision =
            shutdown_policy::decide_on_last_window_closed(self.policy, self.window_was_shown());
        if decision == ShutdownDecision::StayResident {
            self.set_phase(StartupPhase::Resident);
        }
        decision
    }
}
