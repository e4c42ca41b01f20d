// ── Notification service ──
//
// Queue-of-one transient messages. A new request replaces whatever is on
// screen and cancels its pending timers; every timer also carries the
// generation of the message it belongs to, so a stale dismissal can never
// erase a newer message even if it somehow fires.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::debug;

use crate::config::Timings;
use crate::timer::{TimerHandle, TimerQueue};

/// Severity tag of a notification.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Success,
    Error,
    Info,
}

/// Presentation phase of the visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    /// Fully shown.
    Visible,
    /// Sliding out; removed once the exit transition ends.
    Leaving,
}

/// The message currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub phase: NotificationPhase,
    generation: u64,
}

impl Notification {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Deferred notification work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyTimer {
    BeginExit { generation: u64 },
    Remove { generation: u64 },
}

/// Owns the single notification surface.
#[derive(Debug)]
pub struct NotificationService {
    current: Option<Notification>,
    generation: u64,
    pending: Option<TimerHandle>,
    display: Duration,
    exit: Duration,
}

impl NotificationService {
    pub fn new(timings: &Timings) -> Self {
        Self {
            current: None,
            generation: 0,
            pending: None,
            display: timings.notification_display(),
            exit: timings.notification_exit(),
        }
    }

    /// Show `message` now, replacing any visible notification.
    pub fn notify<T: From<NotifyTimer>>(
        &mut self,
        timers: &mut TimerQueue<T>,
        message: impl Into<String>,
        severity: Severity,
    ) {
        self.cancel_pending(timers);
        self.generation += 1;
        let generation = self.generation;
        let message = message.into();
        debug!(%severity, generation, message = %message, "notification shown");

        self.current = Some(Notification {
            message,
            severity,
            phase: NotificationPhase::Visible,
            generation,
        });
        self.pending = Some(timers.schedule(self.display, NotifyTimer::BeginExit { generation }.into()));
    }

    /// Remove the visible notification immediately.
    pub fn dismiss<T>(&mut self, timers: &mut TimerQueue<T>) -> bool {
        self.cancel_pending(timers);
        self.current.take().is_some()
    }

    /// Apply a fired timer. Timers for a superseded message are ignored.
    pub fn on_timer<T: From<NotifyTimer>>(&mut self, timers: &mut TimerQueue<T>, timer: NotifyTimer) {
        match timer {
            NotifyTimer::BeginExit { generation } => {
                let Some(current) = self.current.as_mut() else {
                    return;
                };
                if current.generation != generation || current.phase != NotificationPhase::Visible {
                    return;
                }
                current.phase = NotificationPhase::Leaving;
                self.pending = Some(timers.schedule(self.exit, NotifyTimer::Remove { generation }.into()));
            }
            NotifyTimer::Remove { generation } => {
                if self.current.as_ref().is_some_and(|n| n.generation == generation) {
                    debug!(generation, "notification removed");
                    self.current = None;
                    self.pending = None;
                }
            }
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    fn cancel_pending<T>(&mut self, timers: &mut TimerQueue<T>) {
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
    }
}
