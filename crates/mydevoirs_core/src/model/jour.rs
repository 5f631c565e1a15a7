//! Jour (calendar day) model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable identifier of a persisted day row.
pub type JourId = i64;

/// One calendar day, keyed by its unique date.
///
/// Created lazily by get-or-create the first time an item attaches to the
/// date; never deleted by the agenda core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jour {
    pub id: JourId,
    pub date: NaiveDate,
}
