//! Domain model for support tickets.
//!
//! # Responsibility
//! - Define the canonical ticket record used by core business logic.
//! - Keep persistence and transfer concerns out of the entity itself.
//!
//! # Invariants
//! - Every ticket is identified by a storage-assigned integer `TicketId`.
//! - `updated_at` is never earlier than `created_at`.

pub mod ticket;
