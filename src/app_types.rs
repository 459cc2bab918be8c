use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{
    main_window::TauriMainWindow,
    shutdown_policy::ShutdownPolicy,
    startup_coordinator::{StartupCoordinator, StartupPhase, StartupPlan},
    startup_mode::RunMode,
};

/// Managed Tauri state: one coordinator per process plus the plan it was
/// started with, kept around so a reopen can present the window again.
pub(crate) struct ShellState {
    pub(crate) coordinator: Arc<StartupCoordinator<TauriMainWindow>>,
    pub(crate) plan: StartupPlan,
}

impl ShellState {
    pub(crate) fn new(plan: StartupPlan, policy: ShutdownPolicy) -> Self {
        Self {
            coordinator: Arc::new(StartupCoordinator::new(policy)),
            plan,
        }
    }

    pub(crate) fn snapshot(&self) -> ShellStateSnapshot {
        ShellStateSnapshot {
            phase: self.coordinator.phase(),
            window_was_shown: self.coordinator.window_was_shown(),
            backend_ready: self.coordinator.is_backend_ready(),
            run_mode: self.plan.mode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ShellStateSnapshot {
    pub(crate) phase: StartupPhase,
    pub(crate) window_was_shown: bool,
    pub(crate) backend_ready: bool,
    pub(crate) run_mode: RunMode,
}

pub(crate) struct AtomicFlagGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> AtomicFlagGuard<'a> {
    pub(crate) fn try_set(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(Self { flag })
    }
}

impl Drop for AtomicFlagGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
