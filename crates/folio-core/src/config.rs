// ── Showcase timing configuration ──
//
// Every deferred continuation in the core is driven by one of these
// delays. They never touch disk; `folio-config` embeds this struct in the
// TOML file and hands it in.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Transition and display durations, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// How long a notification stays fully visible.
    pub notification_display_ms: u64,
    /// Slide-out time before a notification is removed.
    pub notification_exit_ms: u64,
    /// Exit transition of the detail overlay before teardown.
    pub overlay_close_ms: u64,
    /// Delay between link feedback and the navigation itself.
    pub link_delay_ms: u64,
    /// Gap between a card entering layout and its fade-in.
    pub card_reveal_ms: u64,
    /// Fade-out time before a filtered card leaves layout.
    pub card_exit_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            notification_display_ms: 3_000,
            notification_exit_ms: 300,
            overlay_close_ms: 250,
            link_delay_ms: 500,
            card_reveal_ms: 10,
            card_exit_ms: 300,
        }
    }
}

impl Timings {
    pub fn notification_display(&self) -> Duration {
        Duration::from_millis(self.notification_display_ms)
    }

    pub fn notification_exit(&self) -> Duration {
        Duration::from_millis(self.notification_exit_ms)
    }

    pub fn overlay_close(&self) -> Duration {
        Duration::from_millis(self.overlay_close_ms)
    }

    pub fn link_delay(&self) -> Duration {
        Duration::from_millis(self.link_delay_ms)
    }

    pub fn card_reveal(&self) -> Duration {
        Duration::from_millis(self.card_reveal_ms)
    }

    pub fn card_exit(&self) -> Duration {
        Duration::from_millis(self.card_exit_ms)
    }
}
