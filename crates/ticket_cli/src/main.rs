//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `ticket_core` linkage.
//! - Run one create/list pass against an in-memory store.

use ticket_core::db::open_db_in_memory;
use ticket_core::{SqliteTicketRepository, TicketDraft, TicketListQuery, TicketService};

fn main() {
    println!("ticket_core ping={}", ticket_core::ping());
    println!("ticket_core version={}", ticket_core::core_version());

    if let Err(err) = smoke_pass() {
        eprintln!("smoke pass failed: {err}");
        std::process::exit(1);
    }
}

fn smoke_pass() -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db_in_memory()?;
    let service = TicketService::new(SqliteTicketRepository::new(&conn));

    let created = service.create_ticket(&TicketDraft::with_default_status("printer broken"))?;
    println!(
        "created ticket id={} status={:?} description={:?}",
        created.id, created.status, created.description
    );

    let listed = service.list_tickets(&TicketListQuery::default())?;
    println!("listed {} ticket(s)", listed.len());

    Ok(())
}
