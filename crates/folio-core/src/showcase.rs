// ── Showcase facade ──
//
// Owns the catalog, the three controllers, the host and the shared timer
// queue. Every public operation runs to completion synchronously; timed
// follow-ups land in the queue and are applied by `tick`.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::catalog::CatalogStore;
use crate::config::Timings;
use crate::error::FilterError;
use crate::filter::{FilterController, FilterTimer};
use crate::host::Host;
use crate::model::{EntryId, LinkKind, SocialLink};
use crate::notify::{Notification, NotificationService, NotifyTimer, Severity};
use crate::overlay::{DismissTrigger, OpenOutcome, OverlayController, OverlayTimer};
use crate::timer::TimerQueue;

/// Any deferred continuation the showcase can schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    Notification(NotifyTimer),
    Filter(FilterTimer),
    Overlay(OverlayTimer),
    /// Open an outbound profile link.
    Navigate(String),
}

impl From<NotifyTimer> for Deferred {
    fn from(t: NotifyTimer) -> Self {
        Self::Notification(t)
    }
}

impl From<FilterTimer> for Deferred {
    fn from(t: FilterTimer) -> Self {
        Self::Filter(t)
    }
}

impl From<OverlayTimer> for Deferred {
    fn from(t: OverlayTimer) -> Self {
        Self::Overlay(t)
    }
}

#[derive(Debug)]
pub struct Showcase<H> {
    catalog: Arc<CatalogStore>,
    filter: FilterController,
    overlay: OverlayController,
    notifications: NotificationService,
    timers: TimerQueue<Deferred>,
    host: H,
    link_delay: Duration,
}

impl<H: Host> Showcase<H> {
    pub fn new(catalog: Arc<CatalogStore>, timings: Timings, host: H) -> Self {
        Self {
            filter: FilterController::new(&catalog, &timings),
            overlay: OverlayController::new(&timings),
            notifications: NotificationService::new(&timings),
            timers: TimerQueue::new(),
            catalog,
            host,
            link_delay: timings.link_delay(),
        }
    }

    /// Advance the virtual clock to `now`, running every continuation that
    /// came due in deadline order. Returns how many ran.
    pub fn tick(&mut self, now: Duration) -> usize {
        let mut fired = 0;
        while let Some(task) = self.timers.pop_due(now) {
            fired += 1;
            match task {
                Deferred::Notification(t) => self.notifications.on_timer(&mut self.timers, t),
                Deferred::Filter(t) => self.filter.on_timer(t),
                Deferred::Overlay(t) => self.overlay.on_timer(&mut self.host, t),
                Deferred::Navigate(url) => {
                    info!(%url, "navigating");
                    self.host.open_url(&url);
                }
            }
        }
        fired
    }

    /// Advance the clock by `delta`.
    pub fn advance(&mut self, delta: Duration) -> usize {
        let now = self.timers.now().saturating_add(delta);
        self.tick(now)
    }

    // ── Filtering ──

    pub fn select_category(&mut self, token: &str) -> Result<(), FilterError> {
        self.filter.select_category(&mut self.timers, token)
    }

    pub fn select_filter(&mut self, index: usize) -> Result<(), FilterError> {
        self.filter.select_button(&mut self.timers, index)
    }

    // ── Overlay ──

    pub fn open(&mut self, id: &EntryId) -> OpenOutcome {
        self.overlay.open(&self.catalog, &mut self.host, id)
    }

    pub fn close(&mut self) -> bool {
        self.overlay.close(&mut self.timers)
    }

    pub fn dismiss(&mut self, trigger: DismissTrigger) -> bool {
        self.overlay.dismiss(&mut self.timers, trigger)
    }

    pub fn escape(&mut self) -> bool {
        self.dismiss(DismissTrigger::Escape)
    }

    pub fn activate_link(&mut self, kind: LinkKind) -> bool {
        self.overlay
            .activate_link(&mut self.notifications, &mut self.timers, kind)
    }

    // ── Social links ──

    /// Announce a profile link, then open it after the link delay.
    /// Links without a target are ignored.
    pub fn open_social(&mut self, link: &SocialLink) -> bool {
        if link.url.trim().is_empty() {
            return false;
        }
        self.notifications
            .notify(&mut self.timers, link.opening_message(), Severity::Info);
        self.timers
            .schedule(self.link_delay, Deferred::Navigate(link.url.clone()));
        true
    }

    // ── Notifications ──

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.notifications.notify(&mut self.timers, message, severity);
    }

    pub fn dismiss_notification(&mut self) -> bool {
        self.notifications.dismiss(&mut self.timers)
    }

    // ── Accessors ──

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn filter(&self) -> &FilterController {
        &self.filter
    }

    pub fn overlay(&self) -> &OverlayController {
        &self.overlay
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Whether any continuation is still waiting to run.
    pub fn is_settled(&self) -> bool {
        self.timers.is_empty()
    }
}
