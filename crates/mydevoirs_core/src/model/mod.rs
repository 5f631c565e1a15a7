//! Domain model for the homework agenda.
//!
//! # Responsibility
//! - Define the persisted entities (`Matiere`, `Jour`) and the flattened
//!   item projection handed to presentation cells.
//! - Keep a single canonical shape per entity for all agenda views.
//!
//! # Invariants
//! - Every item is identified by a stable `ItemId` surface identifier.
//! - Matiere names are unique and stable; colors are display metadata only.

pub mod item;
pub mod jour;
pub mod matiere;
