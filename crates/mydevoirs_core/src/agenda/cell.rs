//! Item presentation cell.
//!
//! # Responsibility
//! - Hold the visual state of one homework item.
//! - Persist done/content/matiere changes through the gateway.
//! - Cache the back-reference to the owning day panel.
//!
//! # Invariants
//! - Record binding runs exactly once, through the normal construction
//!   path, for every cell variant.
//! - A resolved owner is memoized; a second resolution must not walk the
//!   hierarchy again unless the cell was detached in between.
//! - A failed persist leaves the visible state as-is (no implicit
//!   rollback); the caller reconciles from a fresh load.

use crate::agenda::{AgendaError, AgendaResult};
use crate::model::item::{ItemId, ItemRecord};
use crate::model::matiere::{Color, Matiere};
use crate::repo::agenda_repo::AgendaStore;
use chrono::NaiveDate;
use std::cell::Cell;

/// Upward lookup used when a cell has no cached owner yet.
///
/// Production grids implement this by scanning their panels; tests stub it
/// to observe how often the walk actually happens.
pub trait AncestorWalk {
    /// Returns the date of the day panel currently owning `entry`.
    fn find_owner(&self, entry: ItemId) -> Option<NaiveDate>;
}

/// Visual cell for one homework item.
#[derive(Debug)]
pub struct ItemCell {
    entry: ItemId,
    content: String,
    matiere: String,
    color: Color,
    done: bool,
    owner: Cell<Option<NaiveDate>>,
}

impl ItemCell {
    /// Builds a cell from a flattened item record.
    ///
    /// Runs the shared binding step exactly once; the stable `entry` id is
    /// set here and never changes afterwards.
    pub fn from_record(record: &ItemRecord) -> Self {
        let mut cell = Self {
            entry: 0,
            content: String::new(),
            matiere: String::new(),
            color: Color::BLACK,
            done: false,
            owner: Cell::new(None),
        };
        cell.bind(record);
        cell
    }

    /// Shared list-cell binding step, common to all cell variants.
    fn bind(&mut self, record: &ItemRecord) {
        debug_assert_eq!(self.entry, 0, "record binding must run exactly once");
        self.entry = record.id;
        self.content = record.content.clone();
        self.matiere = record.matiere.clone();
        self.color = record.color;
        self.done = record.done;
    }

    /// Stable surface identifier of the underlying item.
    pub fn entry(&self) -> ItemId {
        self.entry
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn matiere(&self) -> &str {
        &self.matiere
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn done(&self) -> bool {
        self.done
    }

    /// Sets the cached owner; called by the day list on insertion.
    pub fn attach(&self, date: NaiveDate) {
        self.owner.set(Some(date));
    }

    /// Clears the cached owner; called when the cell leaves its list.
    ///
    /// The next `owning_panel` call re-resolves through the walk, so a
    /// re-parented cell never reports its old panel.
    pub fn detach(&self) {
        self.owner.set(None);
    }

    /// Date of the day panel owning this cell.
    ///
    /// Resolves lazily through `walk` and memoizes; repeated access is O(1)
    /// and does not walk again until the cell is detached.
    pub fn owning_panel(&self, walk: &dyn AncestorWalk) -> AgendaResult<NaiveDate> {
        if let Some(date) = self.owner.get() {
            return Ok(date);
        }

        let date = walk
            .find_owner(self.entry)
            .ok_or(AgendaError::InvalidState(
                "cell is not attached to any day panel",
            ))?;
        self.owner.set(Some(date));
        Ok(date)
    }

    /// Flips the done flag and persists the new value.
    ///
    /// The visible flag flips before the write; on persistence failure the
    /// error propagates and the flag stays flipped. Returns the new flag.
    pub fn toggle_done(&mut self, store: &dyn AgendaStore) -> AgendaResult<bool> {
        self.done = !self.done;
        store.set_item_done(self.entry, self.done)?;
        Ok(self.done)
    }

    /// Persists edited content, then mirrors it locally.
    pub fn set_content(&mut self, store: &dyn AgendaStore, content: &str) -> AgendaResult<()> {
        store.update_item_content(self.entry, content)?;
        self.content = content.to_owned();
        Ok(())
    }

    /// Persists a matiere reassignment, then mirrors it locally.
    pub fn set_matiere(&mut self, store: &dyn AgendaStore, matiere: &Matiere) -> AgendaResult<()> {
        store.set_item_matiere(self.entry, &matiere.nom)?;
        self.matiere = matiere.nom.clone();
        self.color = matiere.color;
        Ok(())
    }
}
