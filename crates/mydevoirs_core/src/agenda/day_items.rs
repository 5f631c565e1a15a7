//! Ordered item-cell list for one calendar day.
//!
//! # Responsibility
//! - Load a day's items newest-first and materialize their cells.
//! - Insert newly created items at the front.
//! - Report the done/total progression on demand.
//!
//! # Invariants
//! - Cell order is reverse creation order and reproducible across reloads.
//! - `progression()` is recomputed from current cells on every call, never
//!   cached across mutations.
//! - Loading without a bound date is a usage bug (`InvalidState`).

use crate::agenda::cell::ItemCell;
use crate::agenda::{AgendaError, AgendaResult};
use crate::model::item::ItemId;
use crate::repo::agenda_repo::AgendaStore;
use chrono::NaiveDate;

/// The ordered, reorderable cell collection for exactly one day.
#[derive(Debug, Default)]
pub struct DayItems {
    date: Option<NaiveDate>,
    cells: Vec<ItemCell>,
}

impl DayItems {
    /// Creates an empty list bound to `date`.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            cells: Vec::new(),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    fn bound_date(&self) -> AgendaResult<NaiveDate> {
        self.date
            .ok_or(AgendaError::InvalidState("day item list has no bound date"))
    }

    /// Replaces the cells with the persisted items for the bound date.
    ///
    /// Items arrive newest-first from the gateway and keep that order; a
    /// date with no items yields an empty list, not an error.
    pub fn load(&mut self, store: &dyn AgendaStore) -> AgendaResult<()> {
        let date = self.bound_date()?;
        let records = store.items_for_day(date)?;

        self.cells = records.iter().map(ItemCell::from_record).collect();
        for cell in &self.cells {
            cell.attach(date);
        }
        Ok(())
    }

    /// Creates a blank item on the bound date and inserts its cell first.
    ///
    /// The day row is created on demand; the new item uses the provided
    /// default matiere and empty content. Returns the new entry id so the
    /// caller can focus the cell for editing.
    pub fn add_item(
        &mut self,
        store: &dyn AgendaStore,
        default_matiere: &str,
    ) -> AgendaResult<ItemId> {
        let date = self.bound_date()?;
        let record = store.create_item(date, default_matiere, "")?;

        let cell = ItemCell::from_record(&record);
        cell.attach(date);
        self.cells.insert(0, cell);
        Ok(record.id)
    }

    /// `(done, total)` over the currently loaded cells.
    pub fn progression(&self) -> (usize, usize) {
        let done = self.cells.iter().filter(|cell| cell.done()).count();
        (done, self.cells.len())
    }

    pub fn cells(&self) -> &[ItemCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, entry: ItemId) -> Option<&ItemCell> {
        self.cells.iter().find(|cell| cell.entry() == entry)
    }

    pub fn cell_mut(&mut self, entry: ItemId) -> Option<&mut ItemCell> {
        self.cells.iter_mut().find(|cell| cell.entry() == entry)
    }

    /// Removes a cell from this list, clearing its owner cache.
    pub fn take_cell(&mut self, entry: ItemId) -> Option<ItemCell> {
        let index = self.cells.iter().position(|cell| cell.entry() == entry)?;
        let cell = self.cells.remove(index);
        cell.detach();
        Some(cell)
    }

    /// Adopts a cell at the front of this list, re-attaching it here.
    pub fn insert_front(&mut self, cell: ItemCell) -> AgendaResult<()> {
        let date = self.bound_date()?;
        cell.attach(date);
        self.cells.insert(0, cell);
        Ok(())
    }
}
