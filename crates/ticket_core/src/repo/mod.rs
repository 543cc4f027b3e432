//! Repository layer abstraction and persistence implementation.
//!
//! # Responsibility
//! - Define the narrow data access contract the service depends on.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Ticket::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod ticket_repo;
