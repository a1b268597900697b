//! Per-instance auto-advance timer.
//!
//! A fresh sleep is armed only after each tick returns, so two firings never
//! overlap; a slow tick delays the next period by its own duration.

use std::time::Duration;

use tokio::select;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Paused,
}

/// Cancellable repeating timer. Dropping the handle cancels the task.
#[derive(Debug)]
struct TimerHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

fn arm<F>(period: Duration, tick: F) -> TimerHandle
where
    F: Fn() + Send + 'static,
{
    let cancel = CancellationToken::new();
    let guard = cancel.clone();
    let task = tokio::spawn(async move {
        loop {
            select! {
                _ = guard.cancelled() => break,
                _ = sleep(period) => tick(),
            }
        }
    });
    TimerHandle { cancel, task }
}

/// Auto-advance state machine. `was_active` is sticky: pausing never clears
/// it, so `resume` knows whether the show ever ran.
#[derive(Debug)]
pub(crate) struct AutoAdvance {
    phase: Phase,
    was_active: bool,
    timer: Option<TimerHandle>,
}

impl AutoAdvance {
    pub(crate) fn new() -> Self {
        Self {
            phase: Phase::Idle,
            was_active: false,
            timer: None,
        }
    }

    /// `Idle | Paused -> Running`. Starting while already running cancels
    /// the pending timer and arms a fresh full period.
    pub(crate) fn start<F>(&mut self, period: Duration, tick: F)
    where
        F: Fn() + Send + 'static,
    {
        self.timer = None;
        self.timer = Some(arm(period, tick));
        self.was_active = true;
        self.phase = Phase::Running;
        debug!(?period, "auto-advance running");
    }

    /// `Running -> Paused`; no-op in any other phase.
    pub(crate) fn pause(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.timer = None;
        self.phase = Phase::Paused;
        debug!("auto-advance paused");
    }

    /// `Paused -> Running`, only if the show was ever started. Re-arms a
    /// full period rather than resuming a partially-elapsed one.
    pub(crate) fn resume<F>(&mut self, period: Duration, tick: F)
    where
        F: Fn() + Send + 'static,
    {
        if self.phase == Phase::Running || !self.was_active {
            return;
        }
        self.start(period, tick);
    }

    /// Push the next firing out to a full period from now. Used when manual
    /// navigation lands mid-period.
    pub(crate) fn restart_if_running<F>(&mut self, period: Duration, tick: F)
    where
        F: Fn() + Send + 'static,
    {
        if self.phase == Phase::Running {
            self.start(period, tick);
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }
}
