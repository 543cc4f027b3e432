//! Core domain logic for the ticket tracker.
//! This crate is the single source of truth for ticket business rules.

pub mod clock;
pub mod db;
pub mod dto;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, SystemClock};
pub use dto::ticket_dto::{draft_to_ticket, ticket_to_view, TicketDraft, TicketView};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::ticket::{Ticket, TicketId, TicketStatus, TicketValidationError};
pub use repo::ticket_repo::{
    RepoError, RepoResult, SortDirection, SqliteTicketRepository, TicketListQuery,
    TicketRepository,
};
pub use service::ticket_service::{ServiceError, ServiceResult, TicketService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
