//! Application core: event loop, screen management, action dispatch.
//!
//! The app owns the [`Showcase`] and is its only caller. Screens request
//! changes with actions; after each change the app publishes a fresh
//! [`ShowcaseView`] to every screen. The detail overlay and the toast are
//! drawn here, on top of the active screen.

use std::cell::Cell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Datelike;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs, Wrap},
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use folio_config::{Config, ThemeMode};
use folio_core::{
    CatalogStore, DismissTrigger, LinkKind, Notification, OpenOutcome, OverlayPhase,
    OverlaySurface, PointerTarget, Severity, Showcase, TimerQueue, Viewport,
};

use crate::action::{Action, CardView, ShowcaseView};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::host::TerminalHost;
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme::{self, Palette};
use crate::tui::Tui;
use crate::widgets::chips;

/// Simulated CV download time.
const CV_DOWNLOAD_DELAY: Duration = Duration::from_millis(1_000);
const CV_FILE_NAME: &str = "cv.pdf";

/// Deferred work owned by the app rather than the showcase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageTimer {
    CvReady,
}

/// Overlay geometry from the last render, for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default)]
struct OverlayRects {
    panel: Rect,
    close: Rect,
    repository: Rect,
    demo: Rect,
}

/// Top-level application state and event loop.
pub struct App {
    active_screen: ScreenId,
    previous_screen: Option<ScreenId>,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    showcase: Showcase<TerminalHost>,
    /// Origin of the showcase clock.
    started: Instant,
    page_timers: TimerQueue<PageTimer>,
    config: Config,
    /// File the theme preference is written to. `None` keeps it in memory,
    /// as when the file could not be loaded.
    config_path: Option<PathBuf>,
    palette: &'static Palette,
    overlay_rects: Cell<Option<OverlayRects>>,
    toast_rect: Cell<Option<Rect>>,
}

impl App {
    pub fn new(catalog: Arc<CatalogStore>, config: Config, config_path: Option<PathBuf>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens = create_screens(config.theme, &config.social)
            .into_iter()
            .collect();
        let showcase = Showcase::new(catalog, config.timings, TerminalHost::default());

        let mut app = Self {
            active_screen: ScreenId::default(),
            previous_screen: None,
            screens,
            running: true,
            help_visible: false,
            action_tx,
            action_rx,
            showcase,
            started: Instant::now(),
            page_timers: TimerQueue::new(),
            palette: theme::palette(config.theme),
            config,
            config_path,
            overlay_rects: Cell::new(None),
            toast_rect: Cell::new(None),
        };
        app.sync_scroll_extent();
        app
    }

    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        let (w, h) = tui.size().unwrap_or((80, 24));
        debug!(w, h, "terminal size");
        self.init_screens()?;
        self.publish()?;

        let mut events = EventReader::new(
            Duration::from_millis(20), // showcase clock
            Duration::from_millis(33), // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = self.handle_mouse_event(mouse)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    // ── Input mapping ────────────────────────────────────────────────

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        // The overlay captures all input while it is up, including while
        // it closes; the showcase ignores what arrives during the close.
        if self.showcase.overlay().is_open() {
            return Ok(match key.code {
                KeyCode::Esc => Some(Action::Dismiss(DismissTrigger::Escape)),
                KeyCode::Char('x' | 'q') => Some(Action::Dismiss(DismissTrigger::CloseControl)),
                KeyCode::Char('g') => Some(Action::OpenLink(LinkKind::Repository)),
                KeyCode::Char('d') => Some(Action::OpenLink(LinkKind::Demo)),
                _ => None,
            });
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        if self.active_screen.captures_input() {
            if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                return screen.handle_key_event(key);
            }
            return Ok(None);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('?')) => {
                return Ok(Some(Action::ToggleHelp));
            }
            (KeyModifiers::NONE, KeyCode::Char('t')) => return Ok(Some(Action::ToggleTheme)),
            (KeyModifiers::NONE, KeyCode::Char('c')) => return Ok(Some(Action::DownloadCv)),
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
                let n = u8::try_from(c).map_or(0, |b| b - b'0');
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::NONE, KeyCode::Esc) => {
                return Ok(Some(if self.showcase.notification().is_some() {
                    Action::DismissNotification
                } else {
                    Action::GoBack
                }));
            }
            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let pos = Position::new(mouse.column, mouse.row);
        let clicked = matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left));

        if clicked && self.toast_rect.get().is_some_and(|r| r.contains(pos)) {
            return Ok(Some(Action::DismissNotification));
        }

        if self.showcase.overlay().is_open() {
            if !clicked {
                return Ok(None);
            }
            let Some(rects) = self.overlay_rects.get() else {
                return Ok(None);
            };
            let action = if rects.close.contains(pos) {
                Action::Dismiss(DismissTrigger::CloseControl)
            } else if rects.repository.contains(pos) {
                Action::OpenLink(LinkKind::Repository)
            } else if rects.demo.contains(pos) {
                Action::OpenLink(LinkKind::Demo)
            } else if rects.panel.contains(pos) {
                Action::Dismiss(DismissTrigger::Pointer(PointerTarget::Content))
            } else {
                Action::Dismiss(DismissTrigger::Pointer(PointerTarget::Backdrop))
            };
            return Ok(Some(action));
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_mouse_event(mouse);
        }
        Ok(None)
    }

    // ── Action processing ────────────────────────────────────────────

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Resize(w, h) => debug!(w, h, "terminal resized"),

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.previous_screen = Some(self.active_screen);
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::GoBack => {
                if let Some(prev) = self.previous_screen.take() {
                    self.action_tx.send(Action::SwitchScreen(prev))?;
                }
            }

            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::Render => {}

            Action::Tick => self.on_tick(self.started.elapsed())?,

            // ── Showcase ─────────────────────────────────────────────
            Action::SelectFilter(index) => match self.showcase.select_filter(*index) {
                Ok(()) => self.publish()?,
                Err(e) => warn!(error = %e, "filter selection rejected"),
            },

            Action::OpenEntry(id) => match self.showcase.open(id) {
                OpenOutcome::Opened => {
                    info!(%id, "project opened");
                    self.publish()?;
                }
                OpenOutcome::NotFound | OpenOutcome::Busy => {}
            },

            Action::Dismiss(trigger) => {
                self.showcase.dismiss(*trigger);
            }

            Action::OpenLink(kind) => {
                self.showcase.activate_link(*kind);
            }

            Action::Scroll(delta) => {
                if self.showcase.host_mut().scroll.scroll_by(*delta) {
                    self.publish()?;
                }
            }

            // ── Page actions ─────────────────────────────────────────
            Action::ToggleTheme => {
                let mode = self.config.theme.toggled();
                self.set_theme(mode);
                self.action_tx.send(Action::ThemeChanged(mode))?;
                self.showcase
                    .notify(format!("Switched to {mode} mode"), Severity::Success);
            }

            Action::DownloadCv => {
                self.showcase.notify("Downloading CV...", Severity::Info);
                self.page_timers
                    .schedule(CV_DOWNLOAD_DELAY, PageTimer::CvReady);
            }

            Action::SubmitContact(message) => {
                info!(
                    name = %message.name,
                    email = %message.email,
                    subject = %message.subject,
                    "contact message received"
                );
                self.showcase
                    .notify(message.acknowledgement(), Severity::Success);
            }

            Action::Subscribe(email) => {
                info!(%email, "newsletter signup");
                self.showcase
                    .notify("Thanks for subscribing!", Severity::Success);
            }

            Action::OpenSocial(link) => {
                if !self.showcase.open_social(link) {
                    warn!(platform = %link.platform, "social link has no target");
                }
            }

            // ── Notifications ────────────────────────────────────────
            Action::Notify(message, severity) => {
                self.showcase.notify(message.clone(), *severity);
            }

            Action::DismissNotification => {
                self.showcase.dismiss_notification();
            }

            // Snapshots and theme changes go to ALL screens
            Action::ShowcaseChanged(_) | Action::ThemeChanged(_) => {
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Run everything that came due by `now`.
    fn on_tick(&mut self, now: Duration) -> Result<()> {
        let fired = self.showcase.tick(now);
        while let Some(timer) = self.page_timers.pop_due(now) {
            match timer {
                PageTimer::CvReady => info!(file = CV_FILE_NAME, "CV download ready"),
            }
        }
        if fired > 0 {
            self.publish()?;
        }
        Ok(())
    }

    fn set_theme(&mut self, mode: ThemeMode) {
        self.config.theme = mode;
        self.palette = theme::palette(mode);
        if let Some(path) = &self.config_path {
            if let Err(e) = folio_config::save_theme_to(path, mode) {
                warn!(error = %e, "failed to persist theme");
            }
        }
    }

    // ── Showcase snapshot ────────────────────────────────────────────

    fn snapshot(&self) -> ShowcaseView {
        let filter = self.showcase.filter();
        let catalog = self.showcase.catalog();
        let cards = filter
            .cards()
            .iter()
            .filter(|card| card.in_layout())
            .filter_map(|card| {
                catalog.get(&card.entry_id).map(|entry| CardView {
                    entry,
                    phase: card.phase,
                })
            })
            .collect();
        let scroll = &self.showcase.host().scroll;
        ShowcaseView {
            filters: filter.buttons().to_vec(),
            cards,
            scroll_offset: scroll.scroll_offset(),
            scroll_locked: scroll.is_locked(),
        }
    }

    /// Keep the scrollable extent equal to the cards in layout.
    fn sync_scroll_extent(&mut self) {
        let in_layout = self
            .showcase
            .filter()
            .cards()
            .iter()
            .filter(|card| card.in_layout())
            .count();
        let max = u32::try_from(in_layout.saturating_sub(1)).unwrap_or(u32::MAX);
        self.showcase.host_mut().scroll.set_max(max);
    }

    fn publish(&mut self) -> Result<()> {
        self.sync_scroll_extent();
        let view = self.snapshot();
        self.action_tx
            .send(Action::ShowcaseChanged(Arc::new(view)))?;
        Ok(())
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(self.palette.base()), area);

        let [content_area, tab_area, status_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area);
        }
        self.render_tab_bar(frame, tab_area);
        self.render_status_bar(frame, status_area);

        // Overlays on top (last = topmost)
        let overlay = self.showcase.overlay();
        match overlay.surface() {
            Some(surface) => {
                let closing = overlay.phase() == OverlayPhase::Closing;
                let rects = self.render_overlay(frame, area, surface, closing);
                self.overlay_rects.set(Some(rects));
            }
            None => self.overlay_rects.set(None),
        }

        self.toast_rect.set(
            self.showcase
                .notification()
                .map(|n| self.render_notification(frame, area, n)),
        );

        if self.help_visible {
            self.render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let p = self.palette;
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    p.tab_active()
                } else {
                    p.tab_inactive()
                };
                Line::from(Span::styled(format!(" {} {} ", id.number(), id.label()), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", p.key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );
        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let p = self.palette;
        let mode = match self.config.theme {
            ThemeMode::Light => "☀ light",
            ThemeMode::Dark => "☾ dark",
        };
        let left = Line::from(vec![
            Span::raw(" "),
            Span::styled(mode, p.tag()),
            Span::styled(" │ ? help  t theme  c cv  q quit", p.key_hint()),
        ]);
        let year = chrono::Local::now().year();
        let right = Line::from(Span::styled(format!("© {year} folio "), p.key_hint())).right_aligned();

        frame.render_widget(Paragraph::new(left), area);
        frame.render_widget(Paragraph::new(right), area);
    }

    /// Draw the detail overlay and return its hit-test geometry.
    fn render_overlay(
        &self,
        frame: &mut Frame,
        area: Rect,
        surface: &OverlaySurface,
        closing: bool,
    ) -> OverlayRects {
        let p = self.palette;

        // Backdrop
        frame
            .buffer_mut()
            .set_style(area, Style::default().add_modifier(Modifier::DIM));

        let width = 76u16.min(area.width.saturating_sub(4));
        let height = 26u16.min(area.height.saturating_sub(2));
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let panel = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(Clear, panel);

        let modifier = if closing {
            Modifier::DIM
        } else {
            Modifier::empty()
        };
        let block = Block::default()
            .title(Span::styled(format!(" {} ", surface.title()), p.title()))
            .title(Line::from(Span::styled(" ✕ ", p.key_hint_key())).right_aligned())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(p.border_focused())
            .style(
                Style::default()
                    .fg(p.text)
                    .bg(p.bg_panel)
                    .add_modifier(modifier),
            );
        let inner = block.inner(panel);
        frame.render_widget(block, panel);
        let close = Rect::new(panel.right().saturating_sub(4), panel.y, 3, 1);

        let mut lines = vec![
            Line::from(Span::styled(surface.category(), p.tag())),
            Line::from(""),
            Line::from(Span::styled(surface.description(), p.body())),
            Line::from(""),
            Line::from(Span::styled("Key Features", p.title())),
        ];
        lines.extend(
            surface
                .details()
                .iter()
                .map(|d| Line::from(vec![Span::styled("  • ", p.tag()), Span::styled(d.as_str(), p.body())])),
        );
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Technologies", p.title())));
        lines.push(chips::tech_chips(surface.technologies(), p));

        let [body, _, buttons] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), body);

        let button = |label: &'static str, kind: LinkKind| {
            let style = if surface.link(kind).is_some() {
                p.key_hint_key()
            } else {
                p.key_hint()
            };
            Span::styled(label, style)
        };
        let repo_label = " [g] GitHub Repository ";
        let demo_label = " [d] Live Demo ";
        let repo_w = span_width(repo_label);
        let demo_w = span_width(demo_label);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                button(repo_label, LinkKind::Repository),
                Span::raw("  "),
                button(demo_label, LinkKind::Demo),
                Span::styled("   Esc close", p.key_hint()),
            ])),
            buttons,
        );

        OverlayRects {
            panel,
            close,
            repository: Rect::new(buttons.x, buttons.y, repo_w.min(buttons.width), 1),
            demo: Rect::new(
                buttons.x.saturating_add(repo_w + 2),
                buttons.y,
                demo_w.min(buttons.width.saturating_sub(repo_w + 2)),
                1,
            ),
        }
    }

    /// Draw the toast in the bottom-right corner and return its area.
    fn render_notification(&self, frame: &mut Frame, area: Rect, notif: &Notification) -> Rect {
        let p = self.palette;
        let width = (span_width(&notif.message) + 6).clamp(20, 60).min(area.width);
        let height = 3u16.min(area.height);

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2); // above status bar
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        let color = p.severity(notif.severity);
        let modifier = theme::toast_modifier(notif.phase);

        frame.render_widget(Clear, toast_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color).add_modifier(modifier))
            .style(Style::default().bg(p.bg_panel).add_modifier(modifier));
        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", theme::severity_icon(notif.severity)),
                Style::default().fg(color),
            ),
            Span::styled(notif.message.as_str(), p.body()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
        toast_area
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let p = self.palette;
        let width = 56u16.min(area.width.saturating_sub(4));
        let height = 21u16.min(area.height.saturating_sub(4));
        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(Clear, help_area);
        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(p.title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(p.border_focused())
            .style(Style::default().bg(p.bg_panel));
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let row = |key: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), p.key_hint_key()),
                Span::styled(what, p.body()),
            ])
        };
        let heading = |text: &'static str| Line::from(Span::styled(format!("  {text}"), p.title()));

        let help_text = vec![
            Line::from(""),
            heading("Projects"),
            row("h/l ←/→", "Previous / next category"),
            row("j/k ↑/↓", "Move between projects"),
            row("Enter", "Open project details"),
            row("PgUp/PgDn", "Scroll"),
            Line::from(""),
            heading("Project details"),
            row("g / d", "GitHub repository / live demo"),
            row("Esc / x", "Close"),
            Line::from(""),
            heading("Global"),
            row("1-2 Tab", "Switch screen"),
            row("t", "Toggle light / dark theme"),
            row("c", "Download CV"),
            row("2", "Contact, newsletter and social links"),
            row("q", "Quit"),
            Line::from(""),
            Line::from(Span::styled("  Esc or ? to close", p.key_hint())),
        ];
        frame.render_widget(Paragraph::new(help_text), inner);
    }
}

fn span_width(s: &str) -> u16 {
    u16::try_from(s.chars().count()).unwrap_or(u16::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use folio_core::{CatalogEntry, EntryId, ExternalLinks, NotificationPhase};
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};

    fn app() -> App {
        App::new(Arc::new(CatalogStore::builtin()), Config::default(), None)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    /// Map a key and apply whatever it produced.
    fn press(app: &mut App, code: KeyCode) {
        if let Some(action) = app.handle_key_event(key(code)).unwrap() {
            app.process_action(&action).unwrap();
        }
    }

    #[test]
    fn escape_closes_overlay_and_restores_scroll() {
        let mut app = app();
        app.process_action(&Action::Scroll(2)).unwrap();
        app.process_action(&Action::OpenEntry(EntryId::Numeric(2)))
            .unwrap();
        assert!(app.showcase.host().scroll.is_locked());

        // Scrolling is refused while the overlay is up.
        app.process_action(&Action::Scroll(1)).unwrap();
        assert_eq!(app.showcase.host().scroll.scroll_offset(), 2);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.showcase.overlay().phase(), OverlayPhase::Closing);

        app.on_tick(Duration::from_millis(250)).unwrap();
        assert!(!app.showcase.overlay().is_open());
        assert!(!app.showcase.host().scroll.is_locked());
        assert_eq!(app.showcase.host().scroll.scroll_offset(), 2);
    }

    #[test]
    fn overlay_renders_entry_details() {
        let mut app = app();
        app.process_action(&Action::OpenEntry(EntryId::Numeric(2)))
            .unwrap();
        let text = draw(&app);
        assert!(text.contains("Inventory Management System"));
        assert!(text.contains("Key Features"));
        assert!(text.contains("QR code generation and scanning"));
        assert!(text.contains("[g] GitHub Repository"));
    }

    #[test]
    fn clicks_inside_panel_keep_overlay_open() {
        let mut app = app();
        app.process_action(&Action::OpenEntry(EntryId::Numeric(1)))
            .unwrap();
        draw(&app);
        let rects = app.overlay_rects.get().unwrap();

        let inside = app
            .handle_mouse_event(click(rects.panel.x + 2, rects.panel.y + 2))
            .unwrap()
            .unwrap();
        assert!(matches!(
            inside,
            Action::Dismiss(DismissTrigger::Pointer(PointerTarget::Content))
        ));
        app.process_action(&inside).unwrap();
        assert_eq!(app.showcase.overlay().phase(), OverlayPhase::Open);

        let outside = app.handle_mouse_event(click(0, 0)).unwrap().unwrap();
        app.process_action(&outside).unwrap();
        assert_eq!(app.showcase.overlay().phase(), OverlayPhase::Closing);
    }

    #[test]
    fn overlay_swallows_global_keys() {
        let mut app = app();
        app.process_action(&Action::OpenEntry(EntryId::Numeric(3)))
            .unwrap();
        assert!(app.handle_key_event(key(KeyCode::Char('t'))).unwrap().is_none());
        assert!(matches!(
            app.handle_key_event(key(KeyCode::Char('d'))).unwrap(),
            Some(Action::OpenLink(LinkKind::Demo))
        ));
    }

    #[test]
    fn theme_toggle_announces_new_mode() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.config.theme, ThemeMode::Dark);
        assert_eq!(app.palette, &theme::DARK);
        assert_eq!(
            app.showcase.notification().unwrap().message,
            "Switched to dark mode"
        );
    }

    #[test]
    fn cv_download_notifies_then_completes() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        let notification = app.showcase.notification().unwrap();
        assert_eq!(notification.message, "Downloading CV...");
        assert_eq!(notification.severity, Severity::Info);
        assert!(!app.page_timers.is_empty());

        app.on_tick(Duration::from_millis(1_000)).unwrap();
        assert!(app.page_timers.is_empty());
    }

    #[test]
    fn toast_leaves_after_display_and_exit() {
        let mut app = app();
        app.process_action(&Action::Notify("Saved".into(), Severity::Success))
            .unwrap();
        app.on_tick(Duration::from_millis(3_000)).unwrap();
        assert_eq!(
            app.showcase.notification().unwrap().phase,
            NotificationPhase::Leaving
        );
        app.on_tick(Duration::from_millis(3_300)).unwrap();
        assert!(app.showcase.notification().is_none());
    }

    #[test]
    fn filter_selection_publishes_snapshot() {
        let mut app = app();
        app.process_action(&Action::SelectFilter(3)).unwrap();
        app.on_tick(Duration::from_millis(300)).unwrap();

        let mut latest = None;
        while let Ok(action) = app.action_rx.try_recv() {
            if let Action::ShowcaseChanged(view) = action {
                latest = Some(view);
            }
        }
        let view = latest.unwrap();
        let ids: Vec<String> = view.cards.iter().map(|c| c.entry.id.to_string()).collect();
        assert_eq!(ids, vec!["3"]);
        assert!(view.filters[3].active);
    }

    #[test]
    fn bare_entry_renders_without_sections() {
        let bare = CatalogEntry {
            id: EntryId::from("bare"),
            title: "Bare Project".into(),
            category: "Misc".into(),
            description: String::new(),
            details: Vec::new(),
            technologies: Vec::new(),
            image: None,
            links: ExternalLinks::default(),
        };
        let catalog = CatalogStore::new([bare]).unwrap();
        let mut app = App::new(Arc::new(catalog), Config::default(), None);
        app.process_action(&Action::OpenEntry(EntryId::from("bare")))
            .unwrap();
        assert!(app.showcase.overlay().is_open());

        let text = draw(&app);
        assert!(text.contains("Bare Project"));
        assert!(text.contains("Key Features"));
        assert!(text.contains("Technologies"));
        assert!(app.overlay_rects.get().is_some());
    }

    #[test]
    fn theme_toggle_after_unusable_config_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let original = "catalog = \"/home/me/projects.toml\"\n\n[timings]\ncard_exit_ms = 600000\n";
        std::fs::write(&path, original).unwrap();

        let (config, write_back) = folio_config::load_config_or_default(&path);
        assert!(write_back.is_none());
        let mut app = App::new(Arc::new(CatalogStore::builtin()), config, write_back);
        press(&mut app, KeyCode::Char('t'));

        assert_eq!(app.config.theme, ThemeMode::Dark);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn theme_toggle_rewrites_only_the_theme() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "catalog = \"/home/me/projects.toml\"\n\n[timings]\ncard_exit_ms = 400\n",
        )
        .unwrap();

        let (config, write_back) = folio_config::load_config_or_default(&path);
        assert_eq!(write_back.as_deref(), Some(path.as_path()));
        let mut app = App::new(Arc::new(CatalogStore::builtin()), config, write_back);
        press(&mut app, KeyCode::Char('t'));

        let after = std::fs::read_to_string(&path).unwrap();
        assert!(after.contains("projects.toml"));
        assert!(after.contains("card_exit_ms = 400"));
        assert!(after.contains("theme = \"dark\""));
        // Defaults stay out of the file.
        assert!(!after.contains("overlay_close_ms"));
        assert!(!after.contains("[[social]]"));
    }

    #[test]
    fn newsletter_signup_is_acknowledged() {
        let mut app = app();
        app.process_action(&Action::Subscribe("ada@example.com".into()))
            .unwrap();
        let notification = app.showcase.notification().unwrap();
        assert_eq!(notification.message, "Thanks for subscribing!");
        assert_eq!(notification.severity, Severity::Success);
    }

    #[test]
    fn social_link_announces_platform() {
        let mut app = app();
        let link = app.config.social[0].clone();
        app.process_action(&Action::OpenSocial(link)).unwrap();
        let notification = app.showcase.notification().unwrap();
        assert_eq!(notification.message, "Opening GitHub...");
        assert_eq!(notification.severity, Severity::Info);
        assert!(!app.showcase.is_settled());
    }
}
