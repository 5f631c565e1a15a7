//! Day panel: header, item list and progression display for one date.
//!
//! # Responsibility
//! - Compose the localized date header with the day's item list.
//! - Keep the displayed done/total ratio in sync after cell mutations.
//! - Guarantee add-item ordering: the item is persisted before the matiere
//!   menu data is produced.

use crate::agenda::day_items::DayItems;
use crate::agenda::header::format_day_header;
use crate::agenda::{AgendaError, AgendaResult};
use crate::model::item::ItemId;
use crate::model::matiere::Matiere;
use crate::repo::agenda_repo::AgendaStore;
use chrono::{Locale, NaiveDate};

/// Result of the add-item flow on a panel.
///
/// `entry` is persisted before `matiere_menu` is read; callers open the
/// subject-selection affordance with a creation that already committed.
#[derive(Debug)]
pub struct AddOutcome {
    /// Stable id of the freshly created item, for focus/editing.
    pub entry: ItemId,
    /// Entries for the subject-selection menu, sorted by name.
    pub matiere_menu: Vec<Matiere>,
}

/// Composite agenda widget state for one calendar day.
#[derive(Debug)]
pub struct DayPanel {
    date: NaiveDate,
    header: String,
    items: DayItems,
    progression: (usize, usize),
}

impl DayPanel {
    /// Builds the panel for `date` and loads its items from the gateway.
    pub fn load(
        date: NaiveDate,
        locale: Locale,
        store: &dyn AgendaStore,
    ) -> AgendaResult<Self> {
        let mut items = DayItems::for_date(date);
        items.load(store)?;

        let mut panel = Self {
            date,
            header: format_day_header(date, locale),
            items,
            progression: (0, 0),
        };
        panel.update_progression();
        Ok(panel)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Localized header text, e.g. "mardi 12 novembre 2019".
    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn items(&self) -> &DayItems {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut DayItems {
        &mut self.items
    }

    /// The displayed done/total ratio.
    ///
    /// Updated by `update_progression`; descendant cells trigger that after
    /// every done-toggle.
    pub fn progression(&self) -> (usize, usize) {
        self.progression
    }

    /// Pulls the current ratio from the item list into the display.
    ///
    /// No side effect beyond the stored display value; safe to call at any
    /// time.
    pub fn update_progression(&mut self) {
        self.progression = self.items.progression();
    }

    /// Creates a blank item on this date, then produces the matiere menu.
    ///
    /// The persisted creation strictly precedes the menu data so the
    /// editing affordance always targets an existing item.
    pub fn add_item(
        &mut self,
        store: &dyn AgendaStore,
        default_matiere: &str,
    ) -> AgendaResult<AddOutcome> {
        let entry = self.items.add_item(store, default_matiere)?;
        self.update_progression();

        let matiere_menu = store.list_matieres()?;
        Ok(AddOutcome {
            entry,
            matiere_menu,
        })
    }

    /// Toggles one cell's done flag and refreshes the displayed ratio.
    pub fn toggle_item(&mut self, entry: ItemId, store: &dyn AgendaStore) -> AgendaResult<bool> {
        let cell = self
            .items
            .cell_mut(entry)
            .ok_or(AgendaError::InvalidState(
                "toggled item is not part of this panel",
            ))?;
        let done = cell.toggle_done(store)?;
        self.update_progression();
        Ok(done)
    }
}
