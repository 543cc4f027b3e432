//! Ticket domain model.
//!
//! # Responsibility
//! - Define the persisted ticket record and its two-valued status.
//! - Enforce the description length cap on write paths.
//!
//! # Invariants
//! - `id` is assigned by storage and never reused for another ticket.
//! - `status` has exactly two legal values, `Open` and `Closed`.
//! - `updated_at >= created_at` for every persisted ticket.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned identifier for a ticket.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TicketId = i64;

/// Maximum number of characters a ticket description may hold.
pub const DESCRIPTION_MAX_CHARS: usize = 40;

/// Lifecycle state of a ticket.
///
/// Serialized as `"Open"`/`"Closed"`, the naming existing API clients
/// already consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    /// Awaiting resolution.
    Open,
    /// Resolved, no further work expected.
    Closed,
}

impl Default for TicketStatus {
    fn default() -> Self {
        Self::Open
    }
}

/// Canonical persisted ticket record.
///
/// Timestamps are Unix epoch milliseconds. Both are stamped by the service
/// layer; storage never computes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Storage-assigned primary key. Zero until first persisted.
    pub id: TicketId,
    /// Free-text summary, at most [`DESCRIPTION_MAX_CHARS`] characters.
    pub description: String,
    /// Current lifecycle state.
    pub status: TicketStatus,
    /// Set once at creation, immutable afterwards.
    pub created_at: i64,
    /// Refreshed on every successful update.
    pub updated_at: i64,
}

impl Ticket {
    /// Builds an unpersisted ticket stamped with the given instant.
    ///
    /// # Invariants
    /// - `id` starts at 0 and is replaced by storage on insert.
    /// - `created_at == updated_at` at creation.
    pub fn new(description: impl Into<String>, status: TicketStatus, now_epoch_ms: i64) -> Self {
        Self {
            id: 0,
            description: description.into(),
            status,
            created_at: now_epoch_ms,
            updated_at: now_epoch_ms,
        }
    }

    /// Checks the invariants the core is responsible for.
    ///
    /// Required-ness and minimum length are boundary concerns; the core
    /// only refuses descriptions over the storage cap.
    ///
    /// # Errors
    /// - [`TicketValidationError::DescriptionTooLong`] when the description
    ///   exceeds [`DESCRIPTION_MAX_CHARS`] characters.
    pub fn validate(&self) -> Result<(), TicketValidationError> {
        let chars = self.description.chars().count();
        if chars > DESCRIPTION_MAX_CHARS {
            return Err(TicketValidationError::DescriptionTooLong { chars });
        }
        Ok(())
    }
}

/// Validation failure for a ticket write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketValidationError {
    /// Description exceeds [`DESCRIPTION_MAX_CHARS`] characters.
    DescriptionTooLong {
        /// Observed character count.
        chars: usize,
    },
}

impl Display for TicketValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DescriptionTooLong { chars } => write!(
                f,
                "description is {chars} characters, maximum is {DESCRIPTION_MAX_CHARS}"
            ),
        }
    }
}

impl Error for TicketValidationError {}
