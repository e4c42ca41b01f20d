// ── Detail overlay controller ──
//
// At most one overlay exists. `open` is synchronous: it captures and locks
// the scroll position, builds the surface and arms the Escape listener.
// `close` only starts the exit transition; the structural teardown
// (surface removal, scroll unlock and restore, listener disarm) runs when
// the close timer fires. Every trigger that arrives while the overlay is
// closing is a no-op, so a second Escape or double click can never restore
// the scroll position twice.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::catalog::CatalogStore;
use crate::config::Timings;
use crate::host::Host;
use crate::model::{CatalogEntry, EntryId, LinkKind};
use crate::notify::{NotificationService, NotifyTimer, Severity};
use crate::timer::TimerQueue;

/// Lifecycle of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayPhase {
    #[default]
    Closed,
    Open,
    /// Exit transition playing; teardown pending.
    Closing,
}

/// Where a pointer interaction landed while the overlay was up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The dimmed backdrop itself.
    Backdrop,
    /// Anything inside the overlay panel.
    Content,
}

/// Ways a visitor can ask the overlay to go away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissTrigger {
    CloseControl,
    Pointer(PointerTarget),
    Escape,
}

/// Result of an `open` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    /// The id is not in the catalog; nothing was shown.
    NotFound,
    /// An overlay is already open or closing.
    Busy,
}

/// Deferred overlay work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayTimer {
    FinishClose { session: u64 },
    Navigate { url: String },
}

/// The rendered detail view for one entry.
#[derive(Debug, Clone)]
pub struct OverlaySurface {
    entry: Arc<CatalogEntry>,
}

impl OverlaySurface {
    pub fn entry(&self) -> &CatalogEntry {
        &self.entry
    }

    pub fn title(&self) -> &str {
        &self.entry.title
    }

    pub fn category(&self) -> &str {
        &self.entry.category
    }

    pub fn description(&self) -> &str {
        &self.entry.description
    }

    pub fn details(&self) -> &[String] {
        &self.entry.details
    }

    pub fn technologies(&self) -> &[String] {
        &self.entry.technologies
    }

    pub fn link(&self, kind: LinkKind) -> Option<&str> {
        self.entry.link(kind)
    }
}

/// Snapshot of the overlay's externally visible state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverlayState {
    pub is_open: bool,
    pub active_entry_id: Option<EntryId>,
    pub saved_scroll_offset: Option<u32>,
}

#[derive(Debug)]
pub struct OverlayController {
    phase: OverlayPhase,
    surface: Option<OverlaySurface>,
    saved_scroll: Option<u32>,
    escape_armed: bool,
    session: u64,
    close_delay: Duration,
    link_delay: Duration,
}

impl OverlayController {
    pub fn new(timings: &Timings) -> Self {
        Self {
            phase: OverlayPhase::Closed,
            surface: None,
            saved_scroll: None,
            escape_armed: false,
            session: 0,
            close_delay: timings.overlay_close(),
            link_delay: timings.link_delay(),
        }
    }

    /// Open the overlay for `id`.
    pub fn open<H: Host>(&mut self, catalog: &CatalogStore, host: &mut H, id: &EntryId) -> OpenOutcome {
        if self.phase != OverlayPhase::Closed {
            debug!(%id, phase = ?self.phase, "open ignored: overlay busy");
            return OpenOutcome::Busy;
        }
        let Some(entry) = catalog.get(id) else {
            debug!(%id, "open ignored: no such entry");
            return OpenOutcome::NotFound;
        };

        let offset = host.scroll_offset();
        host.lock_scroll(offset);
        self.saved_scroll = Some(offset);

        info!(%id, title = %entry.title, "overlay opened");
        self.surface = Some(OverlaySurface { entry });
        self.session += 1;
        self.escape_armed = true;
        self.phase = OverlayPhase::Open;
        OpenOutcome::Opened
    }

    /// Route a dismissal trigger. Pointer interactions on the content never
    /// dismiss; Escape only acts while its listener is armed.
    pub fn dismiss<T: From<OverlayTimer>>(&mut self, timers: &mut TimerQueue<T>, trigger: DismissTrigger) -> bool {
        match trigger {
            DismissTrigger::Pointer(PointerTarget::Content) => false,
            DismissTrigger::Escape if !self.escape_armed => false,
            DismissTrigger::CloseControl
            | DismissTrigger::Escape
            | DismissTrigger::Pointer(PointerTarget::Backdrop) => self.close(timers),
        }
    }

    /// Begin closing. Only meaningful while open.
    pub fn close<T: From<OverlayTimer>>(&mut self, timers: &mut TimerQueue<T>) -> bool {
        if self.phase != OverlayPhase::Open {
            return false;
        }
        debug!(session = self.session, "overlay closing");
        self.phase = OverlayPhase::Closing;
        let session = self.session;
        timers.schedule(self.close_delay, OverlayTimer::FinishClose { session }.into());
        true
    }

    /// Notify, then navigate to the entry's link after a short delay.
    ///
    /// Returns `false` when the overlay is not open or the entry has no
    /// such link; the latter still tells the visitor why nothing happened.
    pub fn activate_link<T>(
        &mut self,
        notifications: &mut NotificationService,
        timers: &mut TimerQueue<T>,
        kind: LinkKind,
    ) -> bool
    where
        T: From<OverlayTimer> + From<NotifyTimer>,
    {
        if self.phase != OverlayPhase::Open {
            return false;
        }
        let Some(surface) = self.surface.as_ref() else {
            return false;
        };
        match surface.link(kind) {
            Some(url) => {
                let url = url.to_owned();
                notifications.notify(timers, kind.opening_message(), Severity::Success);
                timers.schedule(self.link_delay, OverlayTimer::Navigate { url }.into());
                true
            }
            None => {
                notifications.notify(
                    timers,
                    format!("No {} available for this project", kind.label()),
                    Severity::Info,
                );
                false
            }
        }
    }

    /// Apply a fired overlay timer.
    pub fn on_timer<H: Host>(&mut self, host: &mut H, timer: OverlayTimer) {
        match timer {
            OverlayTimer::FinishClose { session } => {
                if self.phase == OverlayPhase::Closing && session == self.session {
                    self.teardown(host);
                }
            }
            OverlayTimer::Navigate { url } => {
                info!(%url, "navigating");
                host.open_url(&url);
            }
        }
    }

    fn teardown<H: Host>(&mut self, host: &mut H) {
        self.surface = None;
        host.unlock_scroll();
        if let Some(offset) = self.saved_scroll.take() {
            host.scroll_to(offset);
        }
        self.escape_armed = false;
        self.phase = OverlayPhase::Closed;
        debug!(session = self.session, "overlay closed");
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// True from `open` until teardown completes.
    pub fn is_open(&self) -> bool {
        self.phase != OverlayPhase::Closed
    }

    pub fn surface(&self) -> Option<&OverlaySurface> {
        self.surface.as_ref()
    }

    pub fn escape_listener_armed(&self) -> bool {
        self.escape_armed
    }

    pub fn state(&self) -> OverlayState {
        OverlayState {
            is_open: self.is_open(),
            active_entry_id: self.surface.as_ref().map(|s| s.entry.id.clone()),
            saved_scroll_offset: self.saved_scroll,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::host::{Navigator, ScrollState, Viewport};
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct TestHost {
        scroll: ScrollState,
        opened: Vec<String>,
    }

    impl Viewport for TestHost {
        fn scroll_offset(&self) -> u32 {
            self.scroll.scroll_offset()
        }
        fn lock_scroll(&mut self, offset: u32) {
            self.scroll.lock_scroll(offset);
        }
        fn unlock_scroll(&mut self) {
            self.scroll.unlock_scroll();
        }
        fn scroll_to(&mut self, offset: u32) {
            self.scroll.scroll_to(offset);
        }
    }

    impl Navigator for TestHost {
        fn open_url(&mut self, url: &str) {
            self.opened.push(url.to_owned());
        }
    }

    #[derive(Debug)]
    enum Task {
        Overlay(OverlayTimer),
        Notify(NotifyTimer),
    }

    impl From<OverlayTimer> for Task {
        fn from(t: OverlayTimer) -> Self {
            Self::Overlay(t)
        }
    }

    impl From<NotifyTimer> for Task {
        fn from(t: NotifyTimer) -> Self {
            Self::Notify(t)
        }
    }

    struct Fixture {
        catalog: CatalogStore,
        host: TestHost,
        overlay: OverlayController,
        notifications: NotificationService,
        timers: TimerQueue<Task>,
    }

    impl Fixture {
        fn new() -> Self {
            let timings = Timings::default();
            let mut host = TestHost {
                scroll: ScrollState::new(100),
                opened: Vec::new(),
            };
            host.scroll.scroll_by(42);
            Self {
                catalog: CatalogStore::builtin(),
                host,
                overlay: OverlayController::new(&timings),
                notifications: NotificationService::new(&timings),
                timers: TimerQueue::new(),
            }
        }

        fn open(&mut self, id: &str) -> OpenOutcome {
            self.overlay.open(&self.catalog, &mut self.host, &EntryId::from(id))
        }

        fn advance(&mut self, ms: u64) {
            let until = self.timers.now() + Duration::from_millis(ms);
            while let Some(task) = self.timers.pop_due(until) {
                match task {
                    Task::Overlay(t) => self.overlay.on_timer(&mut self.host, t),
                    Task::Notify(t) => self.notifications.on_timer(&mut self.timers, t),
                }
            }
        }
    }

    #[test]
    fn open_locks_scroll_and_builds_surface() {
        let mut fx = Fixture::new();
        assert_eq!(fx.open("2"), OpenOutcome::Opened);

        let surface = fx.overlay.surface().unwrap();
        assert_eq!(surface.title(), "Inventory Management System");
        assert_eq!(surface.category(), "Web Development");
        assert_eq!(surface.details().len(), 5);
        assert_eq!(surface.technologies().len(), 5);
        assert!(fx.host.scroll.is_locked());
        assert!(fx.overlay.escape_listener_armed());
        assert_eq!(
            fx.overlay.state(),
            OverlayState {
                is_open: true,
                active_entry_id: Some(EntryId::Numeric(2)),
                saved_scroll_offset: Some(42),
            }
        );
    }

    #[test]
    fn second_open_is_busy() {
        let mut fx = Fixture::new();
        fx.open("1");
        assert_eq!(fx.open("3"), OpenOutcome::Busy);
        assert_eq!(fx.overlay.surface().unwrap().title(), "Campus Network Infrastructure");
    }

    #[test]
    fn unknown_id_is_a_silent_no_op() {
        let mut fx = Fixture::new();
        assert_eq!(fx.open("nonexistent"), OpenOutcome::NotFound);
        assert!(!fx.overlay.is_open());
        assert!(!fx.host.scroll.is_locked());
        assert!(fx.notifications.current().is_none());
    }

    #[test]
    fn close_tears_down_after_transition() {
        let mut fx = Fixture::new();
        fx.open("2");
        assert!(fx.overlay.close(&mut fx.timers));
        assert_eq!(fx.overlay.phase(), OverlayPhase::Closing);
        assert!(fx.overlay.surface().is_some());

        fx.advance(249);
        assert!(fx.overlay.is_open());

        fx.advance(1);
        assert_eq!(fx.overlay.state(), OverlayState::default());
        assert!(!fx.host.scroll.is_locked());
        assert_eq!(fx.host.scroll.scroll_offset(), 42);
        assert!(!fx.overlay.escape_listener_armed());
    }

    #[test]
    fn triggers_during_closing_are_ignored() {
        let mut fx = Fixture::new();
        fx.open("1");
        assert!(fx.overlay.dismiss(&mut fx.timers, DismissTrigger::Escape));
        assert!(!fx.overlay.dismiss(&mut fx.timers, DismissTrigger::Escape));
        assert!(!fx.overlay.dismiss(&mut fx.timers, DismissTrigger::CloseControl));
        assert!(!fx.overlay.dismiss(&mut fx.timers, DismissTrigger::Pointer(PointerTarget::Backdrop)));
        assert_eq!(fx.open("3"), OpenOutcome::Busy);
        assert_eq!(fx.timers.len(), 1);
    }

    #[test]
    fn content_clicks_do_not_dismiss() {
        let mut fx = Fixture::new();
        fx.open("1");
        assert!(!fx.overlay.dismiss(&mut fx.timers, DismissTrigger::Pointer(PointerTarget::Content)));
        assert_eq!(fx.overlay.phase(), OverlayPhase::Open);
        assert!(fx.overlay.dismiss(&mut fx.timers, DismissTrigger::Pointer(PointerTarget::Backdrop)));
    }

    #[test]
    fn escape_does_nothing_when_closed() {
        let mut fx = Fixture::new();
        assert!(!fx.overlay.dismiss(&mut fx.timers, DismissTrigger::Escape));
        fx.open("1");
        fx.overlay.close(&mut fx.timers);
        fx.advance(250);
        assert!(!fx.overlay.dismiss(&mut fx.timers, DismissTrigger::Escape));
        assert!(fx.timers.is_empty());
    }

    #[test]
    fn link_notifies_before_navigating() {
        let mut fx = Fixture::new();
        fx.open("4");
        assert!(fx.overlay.activate_link(&mut fx.notifications, &mut fx.timers, LinkKind::Demo));
        assert_eq!(
            fx.notifications.current().unwrap().message,
            "Opening live demo in new tab..."
        );
        assert!(fx.host.opened.is_empty());

        fx.advance(500);
        assert_eq!(fx.host.opened, vec!["https://demo.yourportfolio.com/wifi-setup"]);
    }

    #[test]
    fn missing_link_explains_and_does_not_navigate() {
        let mut catalog_entry = (*CatalogStore::builtin().get(&EntryId::Numeric(1)).unwrap()).clone();
        catalog_entry.links.repository = None;
        let mut fx = Fixture::new();
        fx.catalog = CatalogStore::new([catalog_entry]).unwrap();
        fx.open("1");

        assert!(!fx.overlay.activate_link(&mut fx.notifications, &mut fx.timers, LinkKind::Repository));
        let current = fx.notifications.current().unwrap();
        assert_eq!(current.message, "No GitHub repository available for this project");
        assert_eq!(current.severity, Severity::Info);
        fx.advance(1_000);
        assert!(fx.host.opened.is_empty());
    }

    #[test]
    fn reopen_after_close_captures_fresh_offset() {
        let mut fx = Fixture::new();
        fx.open("1");
        fx.overlay.close(&mut fx.timers);
        fx.advance(250);

        fx.host.scroll.scroll_by(8);
        assert_eq!(fx.open("3"), OpenOutcome::Opened);
        assert_eq!(fx.overlay.state().saved_scroll_offset, Some(50));
    }

    #[test]
    fn sparse_entry_opens_with_empty_sections() {
        let bare = CatalogEntry {
            id: EntryId::from("bare"),
            title: "Bare Project".into(),
            category: "Misc".into(),
            description: String::new(),
            details: Vec::new(),
            technologies: Vec::new(),
            image: None,
            links: crate::model::ExternalLinks::default(),
        };
        let mut fx = Fixture::new();
        fx.catalog = CatalogStore::new([bare]).unwrap();

        assert_eq!(fx.open("bare"), OpenOutcome::Opened);
        let surface = fx.overlay.surface().unwrap();
        assert_eq!(surface.title(), "Bare Project");
        assert!(surface.description().is_empty());
        assert!(surface.details().is_empty());
        assert!(surface.technologies().is_empty());
        assert!(surface.link(LinkKind::Repository).is_none());

        assert!(fx.overlay.close(&mut fx.timers));
        fx.advance(250);
        assert!(!fx.overlay.is_open());
        assert_eq!(fx.host.scroll.scroll_offset(), 42);
    }
}
