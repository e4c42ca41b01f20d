//! Inline technology chips.

use ratatui::text::{Line, Span};

use crate::theme::Palette;

pub fn tech_chips<'a>(technologies: &'a [String], palette: &Palette) -> Line<'a> {
    let mut spans = Vec::with_capacity(technologies.len() * 2);
    for (i, tech) in technologies.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!(" {tech} "), palette.chip()));
    }
    Line::from(spans)
}
