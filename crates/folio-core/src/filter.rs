// ── Filter controller ──
//
// Maps the selected category token to a visibility decision per card and
// sequences the enter/exit transitions. A card entering layout is revealed
// on the next animation opportunity; a card leaving layout fades first and
// is removed once the fade has had time to play. Any transition still
// pending for a card is cancelled when a newer decision supersedes it.

use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::catalog::CatalogStore;
use crate::config::Timings;
use crate::error::FilterError;
use crate::model::EntryId;
use crate::timer::{TimerHandle, TimerQueue};

/// Sentinel token that admits every category.
pub const ALL_TOKEN: &str = "all";

/// The active category selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Parse a filter token. `all` is matched case-insensitively; any other
    /// token is taken verbatim as a category name.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if token.eq_ignore_ascii_case(ALL_TOKEN) {
            Self::All
        } else {
            Self::Category(token.to_owned())
        }
    }

    pub fn admits(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(c) => c == category,
        }
    }

    pub fn token(&self) -> &str {
        match self {
            Self::All => ALL_TOKEN,
            Self::Category(c) => c,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Layout/transition phase of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    /// In layout, fade-in not yet started.
    Entering,
    /// In layout, fully opaque at its resting offset.
    Shown,
    /// Still in layout, fading out.
    Leaving,
    /// Out of layout.
    Hidden,
}

/// A showcase card bound to one catalog entry.
#[derive(Debug, Clone)]
pub struct Card {
    pub entry_id: EntryId,
    pub category: String,
    pub phase: CardPhase,
    pending: Option<TimerHandle>,
}

impl Card {
    /// Whether the current filter decision keeps this card.
    pub fn is_visible(&self) -> bool {
        matches!(self.phase, CardPhase::Entering | CardPhase::Shown)
    }

    /// Whether the card still occupies layout (including while fading out).
    pub fn in_layout(&self) -> bool {
        self.phase != CardPhase::Hidden
    }
}

/// One filter control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterButton {
    pub filter: CategoryFilter,
    pub label: String,
    pub active: bool,
}

/// Deferred card transitions, addressed by card position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterTimer {
    Reveal { card: usize },
    Remove { card: usize },
}

#[derive(Debug)]
pub struct FilterController {
    active: CategoryFilter,
    buttons: Vec<FilterButton>,
    cards: Vec<Card>,
    reveal_delay: Duration,
    exit_delay: Duration,
}

impl FilterController {
    /// One card per catalog entry, all shown, with `all` active.
    pub fn new(catalog: &CatalogStore, timings: &Timings) -> Self {
        let mut buttons = vec![FilterButton {
            filter: CategoryFilter::All,
            label: "All".into(),
            active: true,
        }];
        buttons.extend(catalog.categories().into_iter().map(|c| FilterButton {
            filter: CategoryFilter::Category(c.clone()),
            label: c,
            active: false,
        }));

        let cards = catalog
            .entries()
            .map(|e| Card {
                entry_id: e.id.clone(),
                category: e.category.clone(),
                phase: CardPhase::Shown,
                pending: None,
            })
            .collect();

        Self {
            active: CategoryFilter::All,
            buttons,
            cards,
            reveal_delay: timings.card_reveal(),
            exit_delay: timings.card_exit(),
        }
    }

    /// Select a category by token and re-decide every card.
    pub fn select_category<T: From<FilterTimer>>(
        &mut self,
        timers: &mut TimerQueue<T>,
        token: &str,
    ) -> Result<(), FilterError> {
        let filter = CategoryFilter::parse(token);
        let Some(index) = self.buttons.iter().position(|b| b.filter == filter) else {
            return Err(FilterError::UnknownCategory {
                token: token.to_owned(),
            });
        };
        self.apply(timers, index);
        Ok(())
    }

    /// Select the filter control at `index`.
    pub fn select_button<T: From<FilterTimer>>(
        &mut self,
        timers: &mut TimerQueue<T>,
        index: usize,
    ) -> Result<(), FilterError> {
        if index >= self.buttons.len() {
            return Err(FilterError::NoSuchButton { index });
        }
        self.apply(timers, index);
        Ok(())
    }

    fn apply<T: From<FilterTimer>>(&mut self, timers: &mut TimerQueue<T>, index: usize) {
        for (i, button) in self.buttons.iter_mut().enumerate() {
            button.active = i == index;
            if button.active {
                self.active = button.filter.clone();
            }
        }
        debug!(filter = %self.active, "filter selected");

        for (i, card) in self.cards.iter_mut().enumerate() {
            let visible = self.active.admits(&card.category);
            match (visible, card.phase) {
                (true, CardPhase::Shown | CardPhase::Entering) | (false, CardPhase::Hidden | CardPhase::Leaving) => {}
                (true, CardPhase::Hidden | CardPhase::Leaving) => {
                    cancel(timers, card);
                    card.phase = CardPhase::Entering;
                    card.pending = Some(timers.schedule(self.reveal_delay, FilterTimer::Reveal { card: i }.into()));
                }
                (false, CardPhase::Shown | CardPhase::Entering) => {
                    cancel(timers, card);
                    card.phase = CardPhase::Leaving;
                    card.pending = Some(timers.schedule(self.exit_delay, FilterTimer::Remove { card: i }.into()));
                }
            }
        }
    }

    /// Apply a fired card transition.
    pub fn on_timer(&mut self, timer: FilterTimer) {
        match timer {
            FilterTimer::Reveal { card } => {
                if let Some(card) = self.cards.get_mut(card) {
                    if card.phase == CardPhase::Entering {
                        card.phase = CardPhase::Shown;
                        card.pending = None;
                    }
                }
            }
            FilterTimer::Remove { card } => {
                if let Some(card) = self.cards.get_mut(card) {
                    if card.phase == CardPhase::Leaving {
                        card.phase = CardPhase::Hidden;
                        card.pending = None;
                    }
                }
            }
        }
    }

    pub fn active(&self) -> &CategoryFilter {
        &self.active
    }

    pub fn buttons(&self) -> &[FilterButton] {
        &self.buttons
    }

    pub fn active_button_index(&self) -> usize {
        self.buttons.iter().position(|b| b.active).unwrap_or(0)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Ids of cards the current decision keeps, in catalog order.
    pub fn visible_ids(&self) -> Vec<&EntryId> {
        self.cards
            .iter()
            .filter(|c| c.is_visible())
            .map(|c| &c.entry_id)
            .collect()
    }
}

fn cancel<T>(timers: &mut TimerQueue<T>, card: &mut Card) {
    if let Some(handle) = card.pending.take() {
        timers.cancel(handle);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn setup() -> (FilterController, TimerQueue<FilterTimer>) {
        let catalog = CatalogStore::builtin();
        (FilterController::new(&catalog, &Timings::default()), TimerQueue::new())
    }

    fn run(filter: &mut FilterController, timers: &mut TimerQueue<FilterTimer>, until: Duration) {
        while let Some(timer) = timers.pop_due(until) {
            filter.on_timer(timer);
        }
    }

    fn ids(filter: &FilterController) -> Vec<String> {
        filter.visible_ids().iter().map(ToString::to_string).collect()
    }

    fn phases(filter: &FilterController) -> Vec<CardPhase> {
        filter.cards().iter().map(|c| c.phase).collect()
    }

    #[test]
    fn starts_with_everything_shown_and_all_active() {
        let (filter, _) = setup();
        assert_eq!(filter.active(), &CategoryFilter::All);
        assert_eq!(ids(&filter), vec!["1", "2", "3", "4"]);
        let labels: Vec<&str> = filter.buttons().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["All", "Networking", "Web Development", "Security"]);
    }

    #[test]
    fn selecting_a_category_keeps_only_matching_cards() {
        let (mut filter, mut timers) = setup();
        filter.select_category(&mut timers, "Networking").unwrap();
        assert_eq!(ids(&filter), vec!["1", "4"]);

        // Excluded cards fade before leaving layout.
        assert_eq!(
            phases(&filter),
            vec![CardPhase::Shown, CardPhase::Leaving, CardPhase::Leaving, CardPhase::Shown]
        );
        run(&mut filter, &mut timers, ms(299));
        assert!(filter.cards()[1].in_layout());
        run(&mut filter, &mut timers, ms(300));
        assert!(!filter.cards()[1].in_layout());
    }

    #[test]
    fn reveal_is_two_phase() {
        let (mut filter, mut timers) = setup();
        filter.select_category(&mut timers, "Security").unwrap();
        run(&mut filter, &mut timers, ms(500));

        filter.select_category(&mut timers, "all").unwrap();
        assert_eq!(filter.cards()[0].phase, CardPhase::Entering);
        assert!(filter.cards()[0].in_layout());
        run(&mut filter, &mut timers, ms(510));
        assert!(filter.cards().iter().all(|c| c.phase == CardPhase::Shown));
    }

    #[test]
    fn quick_reselect_does_not_hide_cards_that_came_back() {
        let (mut filter, mut timers) = setup();
        filter.select_category(&mut timers, "Security").unwrap();
        run(&mut filter, &mut timers, ms(100));
        filter.select_category(&mut timers, "ALL").unwrap();

        // The removal scheduled at 300ms was cancelled.
        run(&mut filter, &mut timers, ms(1_000));
        assert_eq!(ids(&filter), vec!["1", "2", "3", "4"]);
        assert!(filter.cards().iter().all(Card::in_layout));
    }

    #[test]
    fn exactly_one_button_is_active_and_matches() {
        let (mut filter, mut timers) = setup();
        for token in ["Security", "all", "Web Development", "Web Development", "Networking"] {
            filter.select_category(&mut timers, token).unwrap();
            let active: Vec<&FilterButton> = filter.buttons().iter().filter(|b| b.active).collect();
            assert_eq!(active.len(), 1);
            assert_eq!(active[0].filter, CategoryFilter::parse(token));
            assert_eq!(filter.active(), &CategoryFilter::parse(token));
        }
    }

    #[test]
    fn reselecting_active_token_is_idempotent() {
        let (mut filter, mut timers) = setup();
        filter.select_category(&mut timers, "Networking").unwrap();
        run(&mut filter, &mut timers, ms(400));
        let before = phases(&filter);

        filter.select_category(&mut timers, "Networking").unwrap();
        assert_eq!(phases(&filter), before);
        assert!(timers.is_empty());
    }

    #[test]
    fn unknown_category_changes_nothing() {
        let (mut filter, mut timers) = setup();
        let err = filter.select_category(&mut timers, "Gardening").unwrap_err();
        assert_eq!(
            err,
            FilterError::UnknownCategory {
                token: "Gardening".into()
            }
        );
        assert_eq!(filter.active(), &CategoryFilter::All);
        assert!(timers.is_empty());
    }

    #[test]
    fn select_button_by_position() {
        let (mut filter, mut timers) = setup();
        filter.select_button(&mut timers, 2).unwrap();
        assert_eq!(filter.active(), &CategoryFilter::Category("Web Development".into()));
        assert_eq!(filter.active_button_index(), 2);
        assert!(filter.select_button(&mut timers, 9).is_err());
    }

    #[test]
    fn padded_feed_category_is_selectable_by_name() {
        let entry = |id: u64, category: &str| crate::model::CatalogEntry {
            id: EntryId::Numeric(id),
            title: format!("Project {id}"),
            category: category.into(),
            description: String::new(),
            details: Vec::new(),
            technologies: Vec::new(),
            image: None,
            links: crate::model::ExternalLinks::default(),
        };
        let catalog = CatalogStore::new([entry(1, " Networking "), entry(2, "Security")]).unwrap();
        let mut filter = FilterController::new(&catalog, &Timings::default());
        let mut timers = TimerQueue::new();

        filter.select_category(&mut timers, "Networking").unwrap();
        assert_eq!(filter.active_button_index(), 1);
        run(&mut filter, &mut timers, ms(300));
        assert_eq!(ids(&filter), vec!["1"]);
    }
}
