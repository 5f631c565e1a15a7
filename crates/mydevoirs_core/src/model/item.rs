//! Flattened item projection crossing the shell boundary.
//!
//! # Responsibility
//! - Define the record presentation cells are constructed from.
//!
//! # Invariants
//! - `id` is the stable surface identifier used to re-fetch and persist an
//!   item without re-querying the whole day.
//! - The record carries no live storage handle; it is a plain value.

use crate::model::matiere::Color;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable identifier of a persisted homework item.
pub type ItemId = i64;

/// One homework entry, flattened with its matiere and day for display.
///
/// Produced by the persistence gateway (joined over matiere and jour) so the
/// agenda layer never holds a row handle across the UI boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    pub content: String,
    pub matiere: String,
    pub color: Color,
    pub date: NaiveDate,
    pub done: bool,
}
