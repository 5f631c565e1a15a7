//! Agenda state core: cells, day lists, day panels and the week carousel.
//!
//! # Responsibility
//! - Materialize persisted days/items into interactive agenda state.
//! - Keep visual state (done flags, progression ratios, visible window)
//!   consistent with the persistence gateway.
//!
//! # Invariants
//! - All mutations run synchronously on the caller's thread; nothing here
//!   suspends mid-operation.
//! - Gateway errors propagate unchanged; the core never swallows or
//!   retries them.

use crate::repo::agenda_repo::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod cell;
pub mod day_items;
pub mod grid;
pub mod header;
pub mod panel;

pub type AgendaResult<T> = Result<T, AgendaError>;

/// Error surface of the agenda state layer.
#[derive(Debug)]
pub enum AgendaError {
    /// Persistence gateway failure, propagated unchanged to the shell.
    Store(StoreError),
    /// Operation invoked outside its required context; a usage bug in the
    /// calling code, not a recoverable condition.
    InvalidState(&'static str),
}

impl Display for AgendaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidState(details) => write!(f, "invalid agenda state: {details}"),
        }
    }
}

impl Error for AgendaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidState(_) => None,
        }
    }
}

impl From<StoreError> for AgendaError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
