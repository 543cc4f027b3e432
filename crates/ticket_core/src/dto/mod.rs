//! Transfer shapes and entity mapping.
//!
//! # Responsibility
//! - Define the shapes crossing the service boundary.
//! - Keep entity-to-view conversion pure and side-effect free.
//!
//! # Invariants
//! - Views never expose fields the service did not intend to publish.
//! - Drafts never carry `id` or timestamps; those are never caller-supplied.

pub mod ticket_dto;
