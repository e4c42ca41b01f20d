//! Light and dark palettes with semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

use folio_config::ThemeMode;
use folio_core::{CardPhase, NotificationPhase, Severity};

/// One color scheme. Screens hold a `&'static Palette` and swap it when the
/// theme toggles.
#[derive(Debug, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub highlight: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub bg: Color,
    pub bg_panel: Color,
    pub success: Color,
    pub error: Color,
    pub info: Color,
}

// ── Palettes ──────────────────────────────────────────────────────────

pub const DARK: Palette = Palette {
    accent: Color::Rgb(129, 140, 248),   // #818cf8
    highlight: Color::Rgb(56, 189, 248), // #38bdf8
    text: Color::Rgb(226, 232, 240),     // #e2e8f0
    muted: Color::Rgb(148, 163, 184),    // #94a3b8
    border: Color::Rgb(71, 85, 105),     // #475569
    bg: Color::Rgb(15, 23, 42),          // #0f172a
    bg_panel: Color::Rgb(30, 41, 59),    // #1e293b
    success: Color::Rgb(74, 222, 128),   // #4ade80
    error: Color::Rgb(248, 113, 113),    // #f87171
    info: Color::Rgb(96, 165, 250),      // #60a5fa
};

pub const LIGHT: Palette = Palette {
    accent: Color::Rgb(79, 70, 229),     // #4f46e5
    highlight: Color::Rgb(2, 132, 199),  // #0284c7
    text: Color::Rgb(30, 41, 59),        // #1e293b
    muted: Color::Rgb(100, 116, 139),    // #64748b
    border: Color::Rgb(203, 213, 225),   // #cbd5e1
    bg: Color::Rgb(248, 250, 252),       // #f8fafc
    bg_panel: Color::Rgb(255, 255, 255), // #ffffff
    success: Color::Rgb(22, 163, 74),    // #16a34a
    error: Color::Rgb(220, 38, 38),      // #dc2626
    info: Color::Rgb(37, 99, 235),       // #2563eb
};

pub fn palette(mode: ThemeMode) -> &'static Palette {
    match mode {
        ThemeMode::Light => &LIGHT,
        ThemeMode::Dark => &DARK,
    }
}

// ── Semantic Styles ───────────────────────────────────────────────────

impl Palette {
    /// Base style for the whole frame.
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.bg)
    }

    /// Title text for blocks/panels.
    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn border_default(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn body(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn tab_active(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Category label on cards and in the overlay.
    pub fn tag(&self) -> Style {
        Style::default().fg(self.highlight)
    }

    /// Technology chips.
    pub fn chip(&self) -> Style {
        Style::default().fg(self.accent).bg(self.bg_panel)
    }

    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn key_hint_key(&self) -> Style {
        Style::default().fg(self.highlight).add_modifier(Modifier::BOLD)
    }

    pub fn severity(&self, severity: Severity) -> Color {
        match severity {
            Severity::Success => self.success,
            Severity::Error => self.error,
            Severity::Info => self.info,
        }
    }
}

/// Cards between layout and full opacity render dimmed.
pub fn card_modifier(phase: CardPhase) -> Modifier {
    match phase {
        CardPhase::Shown => Modifier::empty(),
        CardPhase::Entering | CardPhase::Leaving | CardPhase::Hidden => Modifier::DIM,
    }
}

pub fn toast_modifier(phase: NotificationPhase) -> Modifier {
    match phase {
        NotificationPhase::Visible => Modifier::empty(),
        NotificationPhase::Leaving => Modifier::DIM,
    }
}

/// Glyph shown next to a notification.
pub fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "✓",
        Severity::Error => "✗",
        Severity::Info => "i",
    }
}
