//! Agenda persistence gateway: contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the day/item/matiere operations the agenda layer needs.
//! - Keep every read and write inside a scoped transaction.
//!
//! # Invariants
//! - Items for a day are returned newest-first (`ORDER BY id DESC`), which
//!   is deterministic and reproducible across reloads.
//! - Read paths reject invalid persisted state instead of masking it,
//!   except matiere colors which degrade to opaque black.
//! - No method retries on failure; errors surface to the caller unchanged.

use crate::db::DbError;
use crate::model::item::{ItemId, ItemRecord};
use crate::model::jour::Jour;
use crate::model::matiere::{Color, Matiere};
use chrono::NaiveDate;
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ITEM_SELECT_SQL: &str = "SELECT
    items.id,
    items.content,
    items.matiere,
    matieres.color,
    jours.date,
    items.done
FROM items
JOIN jours ON jours.id = items.jour
JOIN matieres ON matieres.nom = items.matiere";

const DATE_FORMAT: &str = "%Y-%m-%d";

pub type StoreResult<T> = Result<T, StoreError>;

/// Gateway error for agenda persistence operations.
#[derive(Debug)]
pub enum StoreError {
    /// Referenced matiere does not exist.
    MatiereNotFound(String),
    /// Referenced item does not exist.
    ItemNotFound(ItemId),
    /// Transactional read/write failed at the storage layer.
    Db(DbError),
    /// Persisted row is corrupt and cannot be materialized.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MatiereNotFound(nom) => write!(f, "matiere not found: `{nom}`"),
            Self::ItemNotFound(id) => write!(f, "item not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted agenda data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// The persistence gateway consumed by the agenda layer.
///
/// Implementations must keep each call transactional: a failed call leaves
/// no partial write observable to later calls.
pub trait AgendaStore {
    /// Returns the day row for `date`, creating it if absent.
    fn get_or_create_day(&self, date: NaiveDate) -> StoreResult<Jour>;
    /// Returns all items attached to `date`, newest-first. Empty when the
    /// day has no items (or no day row exists yet).
    fn items_for_day(&self, date: NaiveDate) -> StoreResult<Vec<ItemRecord>>;
    /// Creates an item on `date` (day created on demand), `done = false`.
    fn create_item(&self, date: NaiveDate, matiere: &str, content: &str)
        -> StoreResult<ItemRecord>;
    /// Persists the done flag for one item.
    fn set_item_done(&self, item: ItemId, done: bool) -> StoreResult<()>;
    /// Persists edited content for one item.
    fn update_item_content(&self, item: ItemId, content: &str) -> StoreResult<()>;
    /// Reassigns one item to another matiere.
    fn set_item_matiere(&self, item: ItemId, matiere: &str) -> StoreResult<()>;
    /// Looks up one matiere by name.
    fn get_matiere(&self, nom: &str) -> StoreResult<Matiere>;
    /// Lists all matieres, sorted by name.
    fn list_matieres(&self) -> StoreResult<Vec<Matiere>>;
}

/// SQLite-backed agenda gateway.
pub struct SqliteAgendaStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAgendaStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Runs `run` inside one scoped transaction.
    ///
    /// Commit happens only when `run` succeeds; dropping the transaction on
    /// the error path rolls back, so partial writes never escape.
    fn with_tx<T>(
        &self,
        op: &'static str,
        run: impl FnOnce(&Transaction<'_>) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let tx = self.conn.unchecked_transaction()?;
        match run(&tx) {
            Ok(value) => {
                tx.commit()?;
                debug!("event=store_tx module=repo op={op} status=ok");
                Ok(value)
            }
            Err(err) => {
                error!("event=store_tx module=repo op={op} status=error error={err}");
                Err(err)
            }
        }
    }
}

impl AgendaStore for SqliteAgendaStore<'_> {
    fn get_or_create_day(&self, date: NaiveDate) -> StoreResult<Jour> {
        self.with_tx("get_or_create_day", |tx| day_for_date(tx, date))
    }

    fn items_for_day(&self, date: NaiveDate) -> StoreResult<Vec<ItemRecord>> {
        self.with_tx("items_for_day", |tx| {
            let mut stmt = tx.prepare(&format!(
                "{ITEM_SELECT_SQL}
                 WHERE jours.date = ?1
                 ORDER BY items.id DESC;"
            ))?;

            let mut rows = stmt.query(params![sql_date(date)])?;
            let mut records = Vec::new();
            while let Some(row) = rows.next()? {
                records.push(parse_item_row(row)?);
            }
            Ok(records)
        })
    }

    fn create_item(
        &self,
        date: NaiveDate,
        matiere: &str,
        content: &str,
    ) -> StoreResult<ItemRecord> {
        self.with_tx("create_item", |tx| {
            let matiere = matiere_by_nom(tx, matiere)?;
            let jour = day_for_date(tx, date)?;

            tx.execute(
                "INSERT INTO items (content, matiere, jour, done) VALUES (?1, ?2, ?3, 0);",
                params![content, matiere.nom, jour.id],
            )?;

            Ok(ItemRecord {
                id: tx.last_insert_rowid(),
                content: content.to_owned(),
                matiere: matiere.nom,
                color: matiere.color,
                date,
                done: false,
            })
        })
    }

    fn set_item_done(&self, item: ItemId, done: bool) -> StoreResult<()> {
        self.with_tx("set_item_done", |tx| {
            let changed = tx.execute(
                "UPDATE items SET done = ?1 WHERE id = ?2;",
                params![done as i64, item],
            )?;
            if changed == 0 {
                return Err(StoreError::ItemNotFound(item));
            }
            Ok(())
        })
    }

    fn update_item_content(&self, item: ItemId, content: &str) -> StoreResult<()> {
        self.with_tx("update_item_content", |tx| {
            let changed = tx.execute(
                "UPDATE items SET content = ?1 WHERE id = ?2;",
                params![content, item],
            )?;
            if changed == 0 {
                return Err(StoreError::ItemNotFound(item));
            }
            Ok(())
        })
    }

    fn set_item_matiere(&self, item: ItemId, matiere: &str) -> StoreResult<()> {
        self.with_tx("set_item_matiere", |tx| {
            let matiere = matiere_by_nom(tx, matiere)?;
            let changed = tx.execute(
                "UPDATE items SET matiere = ?1 WHERE id = ?2;",
                params![matiere.nom, item],
            )?;
            if changed == 0 {
                return Err(StoreError::ItemNotFound(item));
            }
            Ok(())
        })
    }

    fn get_matiere(&self, nom: &str) -> StoreResult<Matiere> {
        self.with_tx("get_matiere", |tx| matiere_by_nom(tx, nom))
    }

    fn list_matieres(&self) -> StoreResult<Vec<Matiere>> {
        self.with_tx("list_matieres", |tx| {
            let mut stmt = tx.prepare("SELECT nom, color FROM matieres ORDER BY nom;")?;
            let mut rows = stmt.query([])?;
            let mut matieres = Vec::new();
            while let Some(row) = rows.next()? {
                let nom: String = row.get(0)?;
                let color: String = row.get(1)?;
                matieres.push(Matiere::new(nom, Color::from_stored(&color)));
            }
            Ok(matieres)
        })
    }
}

fn day_for_date(tx: &Transaction<'_>, date: NaiveDate) -> StoreResult<Jour> {
    let existing = tx
        .query_row(
            "SELECT id FROM jours WHERE date = ?1;",
            params![sql_date(date)],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;

    let id = match existing {
        Some(id) => id,
        None => {
            tx.execute("INSERT INTO jours (date) VALUES (?1);", params![sql_date(date)])?;
            tx.last_insert_rowid()
        }
    };

    Ok(Jour { id, date })
}

fn matiere_by_nom(tx: &Transaction<'_>, nom: &str) -> StoreResult<Matiere> {
    let color = tx
        .query_row(
            "SELECT color FROM matieres WHERE nom = ?1;",
            params![nom],
            |row| row.get::<_, String>(0),
        )
        .optional()?;

    match color {
        Some(color) => Ok(Matiere::new(nom, Color::from_stored(&color))),
        None => Err(StoreError::MatiereNotFound(nom.to_owned())),
    }
}

fn parse_item_row(row: &Row<'_>) -> StoreResult<ItemRecord> {
    let date_text: String = row.get(4)?;
    let date = NaiveDate::parse_from_str(&date_text, DATE_FORMAT).map_err(|_| {
        StoreError::InvalidData(format!("invalid date value `{date_text}` in jours.date"))
    })?;

    let done = match row.get::<_, i64>(5)? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid done value `{other}` in items.done"
            )));
        }
    };

    let color: String = row.get(3)?;

    Ok(ItemRecord {
        id: row.get(0)?,
        content: row.get(1)?,
        matiere: row.get(2)?,
        color: Color::from_stored(&color),
        date,
        done,
    })
}

fn sql_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
