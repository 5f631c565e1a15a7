//! Persistence gateway abstractions and the SQLite implementation.
//!
//! # Responsibility
//! - Define the narrow storage contract the agenda layer consumes.
//! - Isolate SQL details from agenda state orchestration.
//!
//! # Invariants
//! - Every gateway call runs inside one scoped transaction: commit on
//!   success, rollback on every error path.
//! - Gateway APIs return semantic errors (`ItemNotFound`,
//!   `MatiereNotFound`) in addition to transport errors.

pub mod agenda_repo;
