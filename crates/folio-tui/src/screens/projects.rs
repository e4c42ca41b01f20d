//! Projects screen: category filter bar above a scrollable list of cards.
//!
//! The screen only draws the latest [`ShowcaseView`]; filtering, opening
//! and scrolling are requested through actions and applied by the app.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use folio_config::ThemeMode;

use crate::action::{Action, CardView, ShowcaseView};
use crate::component::Component;
use crate::theme::{self, Palette};
use crate::widgets::{chips, sub_tabs};

/// Rows taken by one card, borders included.
const CARD_HEIGHT: u16 = 5;

pub struct ProjectsScreen {
    focused: bool,
    palette: &'static Palette,
    view: Arc<ShowcaseView>,
    selected: usize,
    // Geometry from the last render, for mouse hit-testing
    filter_area: Cell<Rect>,
    card_rects: RefCell<Vec<(Rect, usize)>>,
    rows_in_view: Cell<u16>,
}

impl ProjectsScreen {
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            focused: false,
            palette: theme::palette(mode),
            view: Arc::new(ShowcaseView::default()),
            selected: 0,
            filter_area: Cell::new(Rect::default()),
            card_rects: RefCell::new(Vec::new()),
            rows_in_view: Cell::new(1),
        }
    }

    fn labels(&self) -> Vec<&str> {
        self.view.filters.iter().map(|b| b.label.as_str()).collect()
    }

    fn active_filter(&self) -> usize {
        self.view.filters.iter().position(|b| b.active).unwrap_or(0)
    }

    fn step_filter(&self, delta: isize) -> Option<Action> {
        let len = self.view.filters.len();
        if len == 0 {
            return None;
        }
        let next = self.active_filter().checked_add_signed(delta)?;
        (next < len).then_some(Action::SelectFilter(next))
    }

    fn selected_card(&self) -> Option<&CardView> {
        self.view.cards.get(self.selected)
    }

    fn move_selection(&mut self, delta: isize) -> Option<Action> {
        if self.view.cards.is_empty() {
            return None;
        }
        let last = self.view.cards.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
        self.follow_selection()
    }

    /// Scroll just enough to bring the selected card into view.
    fn follow_selection(&self) -> Option<Action> {
        let offset = usize::try_from(self.view.scroll_offset).unwrap_or(usize::MAX);
        let rows = usize::from(self.rows_in_view.get().max(1));
        let delta = if self.selected < offset {
            -to_i32(offset - self.selected)
        } else if self.selected >= offset + rows {
            to_i32(self.selected + 1 - (offset + rows))
        } else {
            return None;
        };
        Some(Action::Scroll(delta))
    }

    fn open_selected(&self) -> Option<Action> {
        self.selected_card()
            .map(|card| Action::OpenEntry(card.entry.id.clone()))
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, card: &CardView, selected: bool) {
        let p = self.palette;
        let modifier = theme::card_modifier(card.phase);
        let border = if selected && self.focused {
            p.border_focused()
        } else {
            p.border_default()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border.add_modifier(modifier))
            .title(Span::styled(
                format!(" {} ", card.entry.title),
                p.title().add_modifier(modifier),
            ));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::from(Span::styled(card.entry.category.as_str(), p.tag())),
            Line::from(Span::styled(card.entry.description.as_str(), p.body())),
            chips::tech_chips(&card.entry.technologies, p),
        ];
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().add_modifier(modifier)),
            inner,
        );
    }
}

fn to_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

impl Component for ProjectsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('h') | KeyCode::Left => self.step_filter(-1),
            KeyCode::Char('l') | KeyCode::Right => self.step_filter(1),
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('g') | KeyCode::Home => self.move_selection(isize::MIN),
            KeyCode::Char('G') | KeyCode::End => self.move_selection(isize::MAX),
            KeyCode::PageDown => Some(Action::Scroll(i32::from(self.rows_in_view.get()))),
            KeyCode::PageUp => Some(Action::Scroll(-i32::from(self.rows_in_view.get()))),
            KeyCode::Enter | KeyCode::Char(' ') => self.open_selected(),
            _ => None,
        };
        Ok(action)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        let action = match mouse.kind {
            MouseEventKind::ScrollDown => Some(Action::Scroll(1)),
            MouseEventKind::ScrollUp => Some(Action::Scroll(-1)),
            MouseEventKind::Down(MouseButton::Left) => {
                let pos = Position::new(mouse.column, mouse.row);
                let filters = self.filter_area.get();
                if filters.contains(pos) {
                    sub_tabs::tab_at(&self.labels(), filters.x, mouse.column).map(Action::SelectFilter)
                } else {
                    let hit = self
                        .card_rects
                        .borrow()
                        .iter()
                        .find(|(rect, _)| rect.contains(pos))
                        .map(|&(_, index)| index);
                    hit.and_then(|index| {
                        self.selected = index;
                        self.open_selected()
                    })
                }
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::ShowcaseChanged(view) => {
                self.view = Arc::clone(view);
                self.selected = self.selected.min(self.view.cards.len().saturating_sub(1));
            }
            Action::ThemeChanged(mode) => self.palette = theme::palette(*mode),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let p = self.palette;
        let offset = usize::try_from(self.view.scroll_offset).unwrap_or(usize::MAX);
        let below = self.view.cards.len().saturating_sub(offset);

        let mut block = Block::default()
            .title(" Featured Projects ")
            .title_style(p.title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                p.border_focused()
            } else {
                p.border_default()
            })
            .style(p.base());
        if self.view.scroll_locked {
            block = block.title_bottom(Line::from(Span::styled(" scroll locked ", p.key_hint())).right_aligned());
        } else if offset > 0 || below > usize::from(self.rows_in_view.get()) {
            block = block.title_bottom(
                Line::from(Span::styled(
                    format!(" {}/{} ", self.selected + 1, self.view.cards.len()),
                    p.key_hint(),
                ))
                .right_aligned(),
            );
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [filters_area, _, cards_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        let labels = self.labels();
        frame.render_widget(
            Paragraph::new(sub_tabs::render_sub_tabs(&labels, self.active_filter(), p)),
            filters_area,
        );
        self.filter_area.set(filters_area);

        let capacity = (cards_area.height / CARD_HEIGHT).max(1);
        self.rows_in_view.set(capacity);

        let mut rects = self.card_rects.borrow_mut();
        rects.clear();

        if self.view.cards.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("No projects in this category", p.key_hint()))
                    .alignment(Alignment::Center),
                cards_area,
            );
            return;
        }

        let mut y = cards_area.y;
        for (index, card) in self
            .view
            .cards
            .iter()
            .enumerate()
            .skip(offset)
            .take(usize::from(capacity))
        {
            let height = CARD_HEIGHT.min(cards_area.bottom().saturating_sub(y));
            if height == 0 {
                break;
            }
            let rect = Rect::new(cards_area.x, y, cards_area.width, height);
            self.render_card(frame, rect, card, index == self.selected);
            rects.push((rect, index));
            y = y.saturating_add(CARD_HEIGHT);
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &'static str {
        "projects"
    }
}
