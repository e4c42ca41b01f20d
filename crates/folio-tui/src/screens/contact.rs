//! Contact screen: a four-field message form, a newsletter signup and the
//! owner's social links.
//!
//! Captures every key except Ctrl+C. Esc returns to the previous screen,
//! Tab/Shift+Tab and Up/Down move between stops, Enter acts on the current
//! stop. Nothing is sent anywhere; the app only acknowledges.

use std::cell::{Cell, RefCell};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use folio_config::ThemeMode;
use folio_core::{Severity, SocialLink};

use crate::action::{Action, ContactMessage};
use crate::component::Component;
use crate::theme::{self, Palette};

// ── Types ────────────────────────────────────────────────────────────

/// Focus stops, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Name,
    Email,
    Subject,
    Message,
    Newsletter,
    Social,
}

impl Stop {
    const ALL: [Stop; 6] = [
        Self::Name,
        Self::Email,
        Self::Subject,
        Self::Message,
        Self::Newsletter,
        Self::Social,
    ];

    /// Stops drawn as text inputs.
    const INPUTS: [Stop; 5] = [
        Self::Name,
        Self::Email,
        Self::Subject,
        Self::Message,
        Self::Newsletter,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Name => "Your Name",
            Self::Email => "Your Email",
            Self::Subject => "Subject",
            Self::Message => "Your Message",
            Self::Newsletter => "Newsletter: your email",
            Self::Social => "Connect",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl ContactMessage {
    pub const INCOMPLETE: &'static str = "Please fill in all fields";

    /// Every field must hold something other than whitespace.
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.subject, &self.message]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    pub fn acknowledgement(&self) -> String {
        format!(
            "Thank you {}! Your message has been sent. I'll get back to you soon.",
            self.name.trim()
        )
    }
}

// ── Component ────────────────────────────────────────────────────────

pub struct ContactScreen {
    focused: bool,
    palette: &'static Palette,
    active: Stop,
    name_input: String,
    email_input: String,
    subject_input: String,
    message_input: String,
    newsletter_input: String,
    social: Vec<SocialLink>,
    selected_social: usize,
    // Geometry from the last render, for mouse hit-testing
    input_rects: Cell<[Rect; 5]>,
    social_rect: Cell<Rect>,
    social_chips: RefCell<Vec<Rect>>,
}

impl ContactScreen {
    pub fn new(mode: ThemeMode, social: Vec<SocialLink>) -> Self {
        Self {
            focused: false,
            palette: theme::palette(mode),
            active: Stop::Name,
            name_input: String::new(),
            email_input: String::new(),
            subject_input: String::new(),
            message_input: String::new(),
            newsletter_input: String::new(),
            social,
            selected_social: 0,
            input_rects: Cell::new([Rect::default(); 5]),
            social_rect: Cell::new(Rect::default()),
            social_chips: RefCell::new(Vec::new()),
        }
    }

    fn input(&self, stop: Stop) -> &str {
        match stop {
            Stop::Name => &self.name_input,
            Stop::Email => &self.email_input,
            Stop::Subject => &self.subject_input,
            Stop::Message => &self.message_input,
            Stop::Newsletter => &self.newsletter_input,
            Stop::Social => "",
        }
    }

    fn active_input_mut(&mut self) -> Option<&mut String> {
        match self.active {
            Stop::Name => Some(&mut self.name_input),
            Stop::Email => Some(&mut self.email_input),
            Stop::Subject => Some(&mut self.subject_input),
            Stop::Message => Some(&mut self.message_input),
            Stop::Newsletter => Some(&mut self.newsletter_input),
            Stop::Social => None,
        }
    }

    fn message(&self) -> ContactMessage {
        ContactMessage {
            name: self.name_input.clone(),
            email: self.email_input.clone(),
            subject: self.subject_input.clone(),
            message: self.message_input.clone(),
        }
    }

    fn reset_message(&mut self) {
        self.name_input.clear();
        self.email_input.clear();
        self.subject_input.clear();
        self.message_input.clear();
        self.active = Stop::Name;
    }

    /// Validate and, when complete, hand the message off and clear the form.
    fn submit(&mut self) -> Action {
        let message = self.message();
        if !message.is_complete() {
            return Action::Notify(ContactMessage::INCOMPLETE.into(), Severity::Error);
        }
        self.reset_message();
        Action::SubmitContact(message)
    }

    /// An empty signup does nothing at all.
    fn subscribe(&mut self) -> Option<Action> {
        let email = self.newsletter_input.trim().to_owned();
        if email.is_empty() {
            return None;
        }
        self.newsletter_input.clear();
        Some(Action::Subscribe(email))
    }

    fn open_social(&mut self, index: usize) -> Option<Action> {
        let link = self.social.get(index)?;
        self.selected_social = index;
        Some(Action::OpenSocial(link.clone()))
    }

    fn step_social(&mut self, delta: isize) {
        if let Some(last) = self.social.len().checked_sub(1) {
            self.selected_social = self.selected_social.saturating_add_signed(delta).min(last);
        }
    }

    fn render_social(&self, frame: &mut Frame, area: Rect) {
        let p = self.palette;
        let active = self.active == Stop::Social;
        let block = Block::default()
            .title(format!(" {} ", Stop::Social.label()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if active {
                p.border_focused()
            } else {
                p.border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.social_rect.set(area);

        let mut chips = self.social_chips.borrow_mut();
        chips.clear();
        let mut spans = Vec::with_capacity(self.social.len() * 2);
        let mut x = inner.x;
        for (i, link) in self.social.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
                x = x.saturating_add(2);
            }
            let label = format!(" {} ", link.platform);
            let width = u16::try_from(label.chars().count()).unwrap_or(u16::MAX);
            chips.push(Rect::new(x, inner.y, width, 1).intersection(inner));
            x = x.saturating_add(width);
            let style = if active && i == self.selected_social {
                p.tab_active()
            } else {
                p.chip()
            };
            spans.push(Span::styled(label, style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }
}

impl Component for ContactScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => Some(Action::GoBack),
            (_, KeyCode::Enter) => match self.active {
                Stop::Newsletter => self.subscribe(),
                Stop::Social => self.open_social(self.selected_social),
                _ => Some(self.submit()),
            },
            (_, KeyCode::Tab | KeyCode::Down) => {
                self.active = self.active.next();
                None
            }
            (_, KeyCode::BackTab | KeyCode::Up) => {
                self.active = self.active.prev();
                None
            }
            (_, KeyCode::Left) if self.active == Stop::Social => {
                self.step_social(-1);
                None
            }
            (_, KeyCode::Right) if self.active == Stop::Social => {
                self.step_social(1);
                None
            }
            (_, KeyCode::Backspace) => {
                if let Some(input) = self.active_input_mut() {
                    input.pop();
                }
                None
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                if let Some(input) = self.active_input_mut() {
                    input.push(c);
                }
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
            return Ok(None);
        };
        let pos = Position::new(mouse.column, mouse.row);
        if let Some(i) = self.input_rects.get().iter().position(|r| r.contains(pos)) {
            self.active = Stop::INPUTS[i];
            return Ok(None);
        }
        if self.social_rect.get().contains(pos) {
            self.active = Stop::Social;
            let hit = self.social_chips.borrow().iter().position(|r| r.contains(pos));
            return Ok(hit.and_then(|i| self.open_social(i)));
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ThemeChanged(mode) = action {
            self.palette = theme::palette(*mode);
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let p = self.palette;

        let block = Block::default()
            .title(" Get In Touch ")
            .title_style(p.title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                p.border_focused()
            } else {
                p.border_default()
            })
            .style(p.base());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [name, email, subject, message, _, newsletter, social, _, hints] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);
        let rects = [name, email, subject, message, newsletter];
        self.input_rects.set(rects);

        for (stop, rect) in Stop::INPUTS.into_iter().zip(rects) {
            let active = stop == self.active;
            let field_block = Block::default()
                .title(format!(" {} ", stop.label()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if active {
                    p.border_focused()
                } else {
                    p.border_default()
                });
            let mut spans = vec![Span::styled(self.input(stop), p.body())];
            if active {
                spans.push(Span::styled("█", p.key_hint_key()));
            }
            frame.render_widget(Paragraph::new(Line::from(spans)).block(field_block), rect);
        }

        self.render_social(frame, social);

        let hint = Line::from(vec![
            Span::styled(" Tab ", p.key_hint_key()),
            Span::styled("next  ", p.key_hint()),
            Span::styled("Enter ", p.key_hint_key()),
            Span::styled("send / subscribe / open  ", p.key_hint()),
            Span::styled("←/→ ", p.key_hint_key()),
            Span::styled("pick link  ", p.key_hint()),
            Span::styled("Esc ", p.key_hint_key()),
            Span::styled("back", p.key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hint), hints);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "contact"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(screen: &mut ContactScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn screen() -> ContactScreen {
        ContactScreen::new(ThemeMode::Light, SocialLink::defaults())
    }

    fn focus(screen: &mut ContactScreen, stop: Stop) {
        while screen.active != stop {
            screen.handle_key_event(key(KeyCode::Tab)).unwrap();
        }
    }

    #[test]
    fn incomplete_form_is_rejected_and_kept() {
        let mut screen = screen();
        type_str(&mut screen, "Ada");
        match screen.handle_key_event(key(KeyCode::Enter)).unwrap() {
            Some(Action::Notify(msg, Severity::Error)) => assert_eq!(msg, "Please fill in all fields"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(screen.name_input, "Ada");
    }

    #[test]
    fn complete_form_submits_and_resets() {
        let mut screen = screen();
        for text in ["Ada", "ada@example.com", "Hello", "Nice portfolio"] {
            type_str(&mut screen, text);
            screen.handle_key_event(key(KeyCode::Tab)).unwrap();
        }
        screen.handle_key_event(key(KeyCode::BackTab)).unwrap();
        let Some(Action::SubmitContact(message)) = screen.handle_key_event(key(KeyCode::Enter)).unwrap()
        else {
            panic!("expected submission");
        };
        assert_eq!(message.subject, "Hello");
        assert_eq!(
            message.acknowledgement(),
            "Thank you Ada! Your message has been sent. I'll get back to you soon."
        );
        assert!(screen.name_input.is_empty());
        assert_eq!(screen.active, Stop::Name);
    }

    #[test]
    fn whitespace_only_field_counts_as_empty() {
        let message = ContactMessage {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "   ".into(),
            message: "Hi".into(),
        };
        assert!(!message.is_complete());
    }

    #[test]
    fn backspace_edits_active_field_only() {
        let mut screen = ContactScreen::new(ThemeMode::Dark, Vec::new());
        type_str(&mut screen, "Ad");
        screen.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_str(&mut screen, "x");
        screen.handle_key_event(key(KeyCode::Backspace)).unwrap();
        assert_eq!(screen.name_input, "Ad");
        assert!(screen.email_input.is_empty());
    }

    #[test]
    fn escape_goes_back() {
        let mut screen = screen();
        assert!(matches!(
            screen.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::GoBack)
        ));
    }

    #[test]
    fn newsletter_subscribes_and_resets() {
        let mut screen = screen();
        type_str(&mut screen, "Ada");
        focus(&mut screen, Stop::Newsletter);

        // Nothing typed yet: no feedback at all.
        assert!(screen.handle_key_event(key(KeyCode::Enter)).unwrap().is_none());

        type_str(&mut screen, "ada@example.com");
        match screen.handle_key_event(key(KeyCode::Enter)).unwrap() {
            Some(Action::Subscribe(email)) => assert_eq!(email, "ada@example.com"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(screen.newsletter_input.is_empty());
        // The message form is left alone.
        assert_eq!(screen.name_input, "Ada");
    }

    #[test]
    fn social_stop_picks_and_opens_links() {
        let mut screen = screen();
        focus(&mut screen, Stop::Social);
        type_str(&mut screen, "zz");
        screen.handle_key_event(key(KeyCode::Right)).unwrap();
        screen.handle_key_event(key(KeyCode::Right)).unwrap();
        screen.handle_key_event(key(KeyCode::Right)).unwrap();
        match screen.handle_key_event(key(KeyCode::Enter)).unwrap() {
            Some(Action::OpenSocial(link)) => assert_eq!(link.platform, "Twitter"),
            other => panic!("unexpected {other:?}"),
        }
        screen.handle_key_event(key(KeyCode::Left)).unwrap();
        assert_eq!(screen.selected_social, 1);
    }

    #[test]
    fn clicking_a_social_chip_opens_it() {
        let mut screen = screen();
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                screen.render(f, area);
            })
            .unwrap();

        let chip = screen.social_chips.borrow()[1];
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: chip.x + 1,
            row: chip.y,
            modifiers: KeyModifiers::NONE,
        };
        match screen.handle_mouse_event(click).unwrap() {
            Some(Action::OpenSocial(link)) => assert_eq!(link.platform, "LinkedIn"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(screen.active, Stop::Social);
    }
}
