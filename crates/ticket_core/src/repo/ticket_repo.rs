//! Ticket repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `tickets` table.
//! - Apply keyword filter, creation-date ordering and pagination in SQL.
//!
//! # Invariants
//! - Write paths call `Ticket::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - List results are deterministic: ties on `created_at` break by `id`.

use crate::db::DbError;
use crate::model::ticket::{Ticket, TicketId, TicketStatus, TicketValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TICKET_SELECT_SQL: &str = "SELECT
    id,
    description,
    status,
    created_at,
    updated_at
FROM tickets";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for ticket persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TicketValidationError),
    Db(DbError),
    NotFound(TicketId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "ticket not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted ticket data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<TicketValidationError> for RepoError {
    fn from(value: TicketValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Ordering over `created_at` for ticket listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Oldest first. The fallback for any unrecognized input.
    #[default]
    Asc,
    /// Newest first.
    Desc,
}

impl SortDirection {
    /// Parses a caller-supplied direction string.
    ///
    /// Case-insensitive `"desc"` selects descending; anything else,
    /// including the empty string, selects ascending. Never fails.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    fn sql_keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Filter, ordering and pagination specification for ticket listings.
///
/// Replaces a storage-specific query-builder callback with one explicit
/// value the repository interprets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketListQuery {
    /// 1-indexed page. Values below 1 are treated as page 1.
    pub page_number: u32,
    /// Maximum rows per page. Zero yields an empty page.
    pub page_size: u32,
    /// Ordering over `created_at`.
    pub sort_direction: SortDirection,
    /// Case-insensitive substring filter on `description`. Blank means no
    /// filtering.
    pub keyword: String,
}

impl Default for TicketListQuery {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: 10,
            sort_direction: SortDirection::Asc,
            keyword: String::new(),
        }
    }
}

impl TicketListQuery {
    fn offset(&self) -> i64 {
        i64::from(self.page_number.max(1) - 1) * i64::from(self.page_size)
    }
}

/// Repository interface for ticket CRUD operations.
pub trait TicketRepository {
    /// Looks up one ticket by primary key. Absence is `Ok(None)`.
    fn get_ticket(&self, id: TicketId) -> RepoResult<Option<Ticket>>;
    /// Lists tickets using filter, ordering and pagination options.
    fn list_tickets(&self, query: &TicketListQuery) -> RepoResult<Vec<Ticket>>;
    /// Inserts a new ticket and returns the storage-assigned id.
    fn add_ticket(&self, ticket: &Ticket) -> RepoResult<TicketId>;
    /// Persists mutable fields of an existing ticket, keyed by its id.
    fn update_ticket(&self, ticket: &Ticket) -> RepoResult<()>;
    /// Removes the ticket with the given id.
    fn delete_ticket(&self, id: TicketId) -> RepoResult<()>;
}

/// SQLite-backed ticket repository.
pub struct SqliteTicketRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTicketRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TicketRepository for SqliteTicketRepository<'_> {
    fn get_ticket(&self, id: TicketId) -> RepoResult<Option<Ticket>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TICKET_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_ticket_row(row)?));
        }

        Ok(None)
    }

    fn list_tickets(&self, query: &TicketListQuery) -> RepoResult<Vec<Ticket>> {
        let mut sql = String::from(TICKET_SELECT_SQL);
        let mut bind_values: Vec<Value> = Vec::new();

        let keyword = query.keyword.trim();
        if !keyword.is_empty() {
            // instr-based match needs no LIKE-wildcard escaping.
            sql.push_str(" WHERE instr(lower(description), lower(?)) > 0");
            bind_values.push(Value::Text(keyword.to_string()));
        }

        sql.push_str(&format!(
            " ORDER BY created_at {}, id ASC LIMIT ? OFFSET ?",
            query.sort_direction.sql_keyword()
        ));
        bind_values.push(Value::Integer(i64::from(query.page_size)));
        bind_values.push(Value::Integer(query.offset()));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut tickets = Vec::new();

        while let Some(row) = rows.next()? {
            tickets.push(parse_ticket_row(row)?);
        }

        Ok(tickets)
    }

    fn add_ticket(&self, ticket: &Ticket) -> RepoResult<TicketId> {
        ticket.validate()?;

        self.conn.execute(
            "INSERT INTO tickets (description, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                ticket.description.as_str(),
                status_to_db(ticket.status),
                ticket.created_at,
                ticket.updated_at,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_ticket(&self, ticket: &Ticket) -> RepoResult<()> {
        ticket.validate()?;

        let changed = self.conn.execute(
            "UPDATE tickets
             SET
                description = ?1,
                status = ?2,
                updated_at = ?3
             WHERE id = ?4;",
            params![
                ticket.description.as_str(),
                status_to_db(ticket.status),
                ticket.updated_at,
                ticket.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(ticket.id));
        }

        Ok(())
    }

    fn delete_ticket(&self, id: TicketId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tickets WHERE id = ?1;", params![id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_ticket_row(row: &Row<'_>) -> RepoResult<Ticket> {
    let status_code: i64 = row.get("status")?;
    let status = parse_status(status_code).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid status code `{status_code}` in tickets.status"
        ))
    })?;

    let ticket = Ticket {
        id: row.get("id")?,
        description: row.get("description")?,
        status,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    ticket.validate()?;
    Ok(ticket)
}

fn status_to_db(status: TicketStatus) -> i64 {
    match status {
        TicketStatus::Open => 0,
        TicketStatus::Closed => 1,
    }
}

fn parse_status(value: i64) -> Option<TicketStatus> {
    match value {
        0 => Some(TicketStatus::Open),
        1 => Some(TicketStatus::Closed),
        _ => None,
    }
}
