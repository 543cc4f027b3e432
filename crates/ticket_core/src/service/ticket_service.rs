//! Ticket use-case service.
//!
//! # Responsibility
//! - Provide the five CRUD entry points exposed to boundary layers.
//! - Detect missing ids before any mutation and report them as `NotFound`.
//! - Stamp `created_at`/`updated_at` through the injected clock.
//!
//! # Invariants
//! - `id` and `created_at` are never changed after creation.
//! - `updated_at` is refreshed on every successful update.
//! - The service holds no mutable state; concurrent calls for different
//!   ids are independent. Read-modify-write on one id has no conflict
//!   detection: two concurrent updates race and the last write wins.

use crate::clock::{Clock, SystemClock};
use crate::dto::ticket_dto::{draft_to_ticket, ticket_to_view, TicketDraft, TicketView};
use crate::model::ticket::{Ticket, TicketId};
use crate::repo::ticket_repo::{RepoError, TicketListQuery, TicketRepository};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure surfaced by ticket service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// No ticket exists for the requested id. The rendered message is part
    /// of the API contract consumed by existing clients.
    NotFound(TicketId),
    /// Storage or validation failure, passed through unchanged.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "Ticket with ID {id} not found."),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        // Promote the repository's row-level miss so the not-found message
        // stays single-sourced regardless of which layer noticed first.
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Use-case service wrapper for ticket CRUD operations.
pub struct TicketService<R: TicketRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
}

impl<R: TicketRepository> TicketService<R> {
    /// Creates a service using the provided repository and the wall clock.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            clock: SystemClock,
        }
    }
}

impl<R: TicketRepository, C: Clock> TicketService<R, C> {
    /// Creates a service with an explicit clock, for deterministic tests.
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Lists tickets after filter, ordering and pagination.
    ///
    /// # Contract
    /// - Zero matches is success with an empty list, never an error.
    pub fn list_tickets(&self, query: &TicketListQuery) -> ServiceResult<Vec<TicketView>> {
        info!(
            "event=ticket_list module=service status=start page={} size={} sort={:?} keyword_len={}",
            query.page_number,
            query.page_size,
            query.sort_direction,
            query.keyword.len()
        );
        let tickets = self.repo.list_tickets(query)?;
        Ok(tickets.iter().map(ticket_to_view).collect())
    }

    /// Gets one ticket by id.
    ///
    /// # Errors
    /// - [`ServiceError::NotFound`] when no ticket has this id.
    pub fn get_ticket(&self, id: TicketId) -> ServiceResult<TicketView> {
        let ticket = self.require_ticket(id, "get")?;
        Ok(ticket_to_view(&ticket))
    }

    /// Creates a ticket from a draft and returns it with its assigned id.
    ///
    /// # Contract
    /// - A draft without a status gets `Open`.
    /// - `created_at` and `updated_at` receive the same instant.
    pub fn create_ticket(&self, draft: &TicketDraft) -> ServiceResult<TicketView> {
        let mut ticket = draft_to_ticket(draft, self.clock.now_epoch_ms());
        ticket.id = self.repo.add_ticket(&ticket)?;
        info!(
            "event=ticket_create module=service status=ok id={}",
            ticket.id
        );
        Ok(ticket_to_view(&ticket))
    }

    /// Overwrites description and status of an existing ticket.
    ///
    /// # Contract
    /// - `id` and `created_at` are left untouched.
    /// - `updated_at` is refreshed to the current instant.
    ///
    /// # Errors
    /// - [`ServiceError::NotFound`] when no ticket has this id.
    pub fn update_ticket(&self, id: TicketId, draft: &TicketDraft) -> ServiceResult<TicketView> {
        let mut ticket = self.require_ticket(id, "update")?;

        ticket.description = draft.description.clone();
        ticket.status = draft.status_or_default();
        ticket.updated_at = self.clock.now_epoch_ms();

        self.repo.update_ticket(&ticket)?;
        info!("event=ticket_update module=service status=ok id={id}");
        Ok(ticket_to_view(&ticket))
    }

    /// Deletes an existing ticket.
    ///
    /// Returns `true` on success; there is no partial-success state.
    ///
    /// # Errors
    /// - [`ServiceError::NotFound`] when no ticket has this id.
    pub fn delete_ticket(&self, id: TicketId) -> ServiceResult<bool> {
        self.require_ticket(id, "delete")?;
        self.repo.delete_ticket(id)?;
        info!("event=ticket_delete module=service status=ok id={id}");
        Ok(true)
    }

    fn require_ticket(&self, id: TicketId, operation: &str) -> ServiceResult<Ticket> {
        match self.repo.get_ticket(id)? {
            Some(ticket) => Ok(ticket),
            None => {
                warn!("event=ticket_{operation} module=service status=not_found id={id}");
                Err(ServiceError::NotFound(id))
            }
        }
    }
}
