//! Week carousel: the horizontally paged window of day panels.
//!
//! # Responsibility
//! - Compute which dates are visible for an anchor date under the
//!   configured shown-weekday policy.
//! - Page the window by whole weeks, rebuilding panels lazily.
//! - Enforce the paging state machine: one page operation at a time.
//!
//! # Invariants
//! - Panels exist only for dates inside the current window; paging drops
//!   the old set and builds fresh ones.
//! - A rejected or failed page leaves anchor and panels untouched.
//! - Paging forward then back restores the same visible date set.

use crate::agenda::cell::{AncestorWalk, ItemCell};
use crate::agenda::panel::{AddOutcome, DayPanel};
use crate::agenda::{AgendaError, AgendaResult};
use crate::model::item::ItemId;
use crate::repo::agenda_repo::AgendaStore;
use crate::settings::Settings;
use chrono::{Datelike, Duration, Locale, NaiveDate};
use log::debug;

/// Which weekdays are visible, Monday-first.
pub type ShownDays = [bool; 7];

/// Paging direction, one full window length per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Forward,
    Back,
}

impl PageDirection {
    fn offset_days(self) -> i64 {
        match self {
            Self::Forward => 7,
            Self::Back => -7,
        }
    }
}

/// Paging state machine; `page` transitions Idle -> Paging -> Idle
/// synchronously from the caller's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingState {
    Idle,
    Paging,
}

/// Outcome of a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The window moved and panels were rebuilt.
    Paged,
    /// A page was already in flight; this request was a no-op.
    Rejected,
}

/// Visible dates for `anchor` under the shown-weekday policy.
///
/// Pure: the Monday-start week containing `anchor`, filtered by `shown`,
/// in chronological order. Callers stub `shown` to test the policy apart
/// from the date arithmetic.
pub fn visible_dates(anchor: NaiveDate, shown: &ShownDays) -> Vec<NaiveDate> {
    let monday = anchor - Duration::days(i64::from(anchor.weekday().num_days_from_monday()));
    shown
        .iter()
        .enumerate()
        .filter(|(_, visible)| **visible)
        .map(|(offset, _)| monday + Duration::days(offset as i64))
        .collect()
}

/// The paged container cycling through visible date windows.
#[derive(Debug)]
pub struct CarouselGrid {
    anchor: NaiveDate,
    shown: ShownDays,
    locale: Locale,
    default_matiere: String,
    state: PagingState,
    panels: Vec<DayPanel>,
}

impl CarouselGrid {
    /// Creates an unloaded grid anchored at `anchor`.
    ///
    /// No panel is built yet; `load` materializes the first window.
    pub fn new(anchor: NaiveDate, settings: &Settings) -> Self {
        Self {
            anchor,
            shown: settings.shown_days,
            locale: settings.locale(),
            default_matiere: settings.default_matiere.clone(),
            state: PagingState::Idle,
            panels: Vec::new(),
        }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn paging_state(&self) -> PagingState {
        self.state
    }

    /// Dates of the current window, in display order.
    pub fn visible_dates(&self) -> Vec<NaiveDate> {
        visible_dates(self.anchor, &self.shown)
    }

    pub fn panels(&self) -> &[DayPanel] {
        &self.panels
    }

    pub fn panel(&self, date: NaiveDate) -> Option<&DayPanel> {
        self.panels.iter().find(|panel| panel.date() == date)
    }

    pub fn panel_mut(&mut self, date: NaiveDate) -> Option<&mut DayPanel> {
        self.panels.iter_mut().find(|panel| panel.date() == date)
    }

    /// Builds panels for the current window.
    pub fn load(&mut self, store: &dyn AgendaStore) -> AgendaResult<()> {
        self.panels = build_panels(&self.visible_dates(), self.locale, store)?;
        Ok(())
    }

    /// Claims the paging state machine; `false` when a page is in flight.
    pub fn try_begin_page(&mut self) -> bool {
        if self.state == PagingState::Paging {
            return false;
        }
        self.state = PagingState::Paging;
        true
    }

    /// Releases the paging state machine.
    pub fn finish_page(&mut self) {
        self.state = PagingState::Idle;
    }

    /// Shifts the window by one week and lazily rebuilds its panels.
    ///
    /// Concurrent requests while paging are rejected as no-ops. The new
    /// window is staged into a fresh panel set and swapped in only on
    /// success, so a failed page leaves the grid unchanged.
    pub fn page(
        &mut self,
        direction: PageDirection,
        store: &dyn AgendaStore,
    ) -> AgendaResult<PageOutcome> {
        if !self.try_begin_page() {
            debug!("event=page module=agenda status=rejected reason=already_paging");
            return Ok(PageOutcome::Rejected);
        }

        let next_anchor = self.anchor + Duration::days(direction.offset_days());
        let rebuilt = build_panels(&visible_dates(next_anchor, &self.shown), self.locale, store);
        self.finish_page();

        let panels = rebuilt?;
        self.anchor = next_anchor;
        self.panels = panels;
        debug!(
            "event=page module=agenda status=ok anchor={} window={}",
            self.anchor,
            self.panels.len()
        );
        Ok(PageOutcome::Paged)
    }

    /// Runs the add-item flow on the panel for `date`.
    pub fn add_item(
        &mut self,
        date: NaiveDate,
        store: &dyn AgendaStore,
    ) -> AgendaResult<AddOutcome> {
        let default_matiere = self.default_matiere.clone();
        let panel = self.panel_mut(date).ok_or(AgendaError::InvalidState(
            "date is not in the visible window",
        ))?;
        panel.add_item(store, &default_matiere)
    }

    /// Toggles an item's done flag via its cached owner reference.
    ///
    /// The owning panel is resolved through the cell (memoized after the
    /// first walk) and its progression display refreshed.
    pub fn toggle_item(&mut self, entry: ItemId, store: &dyn AgendaStore) -> AgendaResult<bool> {
        let date = {
            let cell = self.find_cell(entry).ok_or(AgendaError::InvalidState(
                "item is not in the visible window",
            ))?;
            cell.owning_panel(&*self)?
        };

        let panel = self.panel_mut(date).ok_or(AgendaError::InvalidState(
            "owning panel left the visible window",
        ))?;
        panel.toggle_item(entry, store)
    }

    fn find_cell(&self, entry: ItemId) -> Option<&ItemCell> {
        self.panels
            .iter()
            .find_map(|panel| panel.items().cell(entry))
    }
}

impl AncestorWalk for CarouselGrid {
    fn find_owner(&self, entry: ItemId) -> Option<NaiveDate> {
        self.panels
            .iter()
            .find(|panel| panel.items().cell(entry).is_some())
            .map(|panel| panel.date())
    }
}

fn build_panels(
    dates: &[NaiveDate],
    locale: Locale,
    store: &dyn AgendaStore,
) -> AgendaResult<Vec<DayPanel>> {
    dates
        .iter()
        .map(|date| DayPanel::load(*date, locale, store))
        .collect()
}
