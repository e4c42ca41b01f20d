//! Horizontal filter bar for the projects screen.

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::theme::Palette;

const GAP: &str = "  ";

/// Renders the filter labels on one line with the active one highlighted.
pub fn render_sub_tabs<'a>(labels: &[&'a str], active_index: usize, palette: &Palette) -> Line<'a> {
    let mut spans = Vec::with_capacity(labels.len() * 2);

    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(GAP, palette.key_hint()));
        }

        if i == active_index {
            spans.push(Span::styled(
                format!("[{label}]"),
                palette.tab_active().add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(format!(" {label} "), palette.tab_inactive()));
        }
    }

    Line::from(spans)
}

/// Column ranges `(start, end)` occupied by each label when the bar is drawn
/// at column `x`. Used for mouse hit-testing.
pub fn tab_columns(labels: &[&str], x: u16) -> Vec<(u16, u16)> {
    let mut ranges = Vec::with_capacity(labels.len());
    let mut col = x;
    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            col = col.saturating_add(width(GAP));
        }
        // Active and inactive labels both take two extra columns.
        let w = width(label).saturating_add(2);
        ranges.push((col, col.saturating_add(w)));
        col = col.saturating_add(w);
    }
    ranges
}

/// Index of the label under column `col`.
pub fn tab_at(labels: &[&str], x: u16, col: u16) -> Option<usize> {
    tab_columns(labels, x)
        .iter()
        .position(|&(start, end)| col >= start && col < end)
}

fn width(s: &str) -> u16 {
    u16::try_from(s.chars().count()).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::DARK;

    const LABELS: [&str; 3] = ["All", "Networking", "Security"];

    #[test]
    fn line_width_matches_hit_ranges() {
        let line = render_sub_tabs(&LABELS, 1, &DARK);
        let ranges = tab_columns(&LABELS, 0);
        assert_eq!(usize::from(ranges[2].1), line.width());
    }

    #[test]
    fn clicks_map_to_labels() {
        assert_eq!(tab_at(&LABELS, 2, 2), Some(0));
        assert_eq!(tab_at(&LABELS, 2, 7), None);
        assert_eq!(tab_at(&LABELS, 2, 9), Some(1));
        assert_eq!(tab_at(&LABELS, 2, 100), None);
    }
}
