//! Agenda state-synchronization core for MyDevoirs.
//! This crate is the single source of truth for agenda invariants: item
//! ordering, progression aggregates, owner caching and week paging.

pub mod agenda;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod settings;

pub use agenda::cell::{AncestorWalk, ItemCell};
pub use agenda::day_items::DayItems;
pub use agenda::grid::{
    visible_dates, CarouselGrid, PageDirection, PageOutcome, PagingState, ShownDays,
};
pub use agenda::header::{format_day_header, locale_for_tag};
pub use agenda::panel::{AddOutcome, DayPanel};
pub use agenda::{AgendaError, AgendaResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{ItemId, ItemRecord};
pub use model::jour::{Jour, JourId};
pub use model::matiere::{Color, Matiere};
pub use repo::agenda_repo::{AgendaStore, SqliteAgendaStore, StoreError, StoreResult};
pub use settings::{Settings, SettingsError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
