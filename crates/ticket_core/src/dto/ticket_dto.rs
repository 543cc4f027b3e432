//! Ticket transfer shapes and mappers.
//!
//! # Responsibility
//! - Define the view returned to callers and the draft accepted from them.
//! - Provide pure mapping between drafts, entities and views.
//!
//! # Invariants
//! - `TicketView` is built from a persisted entity only.
//! - `draft_to_ticket` stamps both timestamps with the same instant.

use crate::model::ticket::{Ticket, TicketId, TicketStatus};
use serde::{Deserialize, Serialize};

/// Read model returned by every service operation that yields a ticket.
///
/// Structurally identical to [`Ticket`] today; the indirection exists so
/// future internal fields can stay hidden without touching storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketView {
    /// Storage-assigned identifier.
    pub id: TicketId,
    /// Free-text summary.
    pub description: String,
    /// Current lifecycle state.
    pub status: TicketStatus,
    /// Creation instant, epoch milliseconds.
    pub created_at: i64,
    /// Last modification instant, epoch milliseconds.
    pub updated_at: i64,
}

/// Caller-supplied fields for create and update.
///
/// No `id` and no timestamps: identity comes from storage, instants from
/// the service clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketDraft {
    /// Free-text summary, validated against the storage cap on write.
    pub description: String,
    /// Requested state. `None` falls back to `Open`.
    #[serde(default)]
    pub status: Option<TicketStatus>,
}

impl TicketDraft {
    /// Creates a draft with an explicit status.
    pub fn new(description: impl Into<String>, status: TicketStatus) -> Self {
        Self {
            description: description.into(),
            status: Some(status),
        }
    }

    /// Creates a draft that leaves the status to the `Open` default.
    pub fn with_default_status(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            status: None,
        }
    }

    /// Resolves the effective status, defaulting to `Open`.
    pub fn status_or_default(&self) -> TicketStatus {
        self.status.unwrap_or_default()
    }
}

/// Maps a persisted entity to its caller-facing view.
pub fn ticket_to_view(ticket: &Ticket) -> TicketView {
    TicketView {
        id: ticket.id,
        description: ticket.description.clone(),
        status: ticket.status,
        created_at: ticket.created_at,
        updated_at: ticket.updated_at,
    }
}

/// Builds a fresh unpersisted entity from a draft.
///
/// Both timestamps receive `now_epoch_ms`; storage assigns the id later.
pub fn draft_to_ticket(draft: &TicketDraft, now_epoch_ms: i64) -> Ticket {
    Ticket::new(
        draft.description.clone(),
        draft.status_or_default(),
        now_epoch_ms,
    )
}
