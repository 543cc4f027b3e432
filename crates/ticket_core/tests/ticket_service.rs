use std::cell::Cell;
use std::rc::Rc;
use ticket_core::db::open_db_in_memory;
use ticket_core::{
    Clock, ServiceError, SortDirection, SqliteTicketRepository, TicketDraft, TicketListQuery,
    TicketService, TicketStatus, TicketView,
};

/// Deterministic clock the tests advance by hand.
struct ManualClock {
    now_ms: Cell<i64>,
}

impl ManualClock {
    fn starting_at(now_ms: i64) -> Rc<Self> {
        Rc::new(Self {
            now_ms: Cell::new(now_ms),
        })
    }

    fn advance_ms(&self, delta: i64) {
        self.now_ms.set(self.now_ms.get() + delta);
    }
}

/// Local wrapper so the foreign `Rc` type can carry the `Clock` impl
/// without violating the orphan rule.
struct SharedClock(Rc<ManualClock>);

impl Clock for SharedClock {
    fn now_epoch_ms(&self) -> i64 {
        self.0.now_ms.get()
    }
}

fn service_at<'conn>(
    conn: &'conn rusqlite::Connection,
    start_ms: i64,
) -> (
    TicketService<SqliteTicketRepository<'conn>, SharedClock>,
    Rc<ManualClock>,
) {
    let clock = ManualClock::starting_at(start_ms);
    let service = TicketService::with_clock(
        SqliteTicketRepository::new(conn),
        SharedClock(Rc::clone(&clock)),
    );
    (service, clock)
}

#[test]
fn get_absent_id_fails_with_exact_not_found_message() {
    let conn = open_db_in_memory().unwrap();
    let (service, _clock) = service_at(&conn, 1_000);

    let err = service.get_ticket(7).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(7)));
    assert_eq!(err.to_string(), "Ticket with ID 7 not found.");
}

#[test]
fn update_absent_id_fails_with_exact_not_found_message() {
    let conn = open_db_in_memory().unwrap();
    let (service, _clock) = service_at(&conn, 1_000);

    let draft = TicketDraft::new("whatever", TicketStatus::Closed);
    let err = service.update_ticket(123, &draft).unwrap_err();
    assert_eq!(err.to_string(), "Ticket with ID 123 not found.");
}

#[test]
fn delete_absent_id_fails_with_exact_not_found_message() {
    let conn = open_db_in_memory().unwrap();
    let (service, _clock) = service_at(&conn, 1_000);

    let err = service.delete_ticket(55).unwrap_err();
    assert_eq!(err.to_string(), "Ticket with ID 55 not found.");
}

#[test]
fn create_then_get_returns_equal_view_with_matching_timestamps() {
    let conn = open_db_in_memory().unwrap();
    let (service, _clock) = service_at(&conn, 5_000);

    let draft = TicketDraft::new("vpn flaky on 3rd floor", TicketStatus::Open);
    let created = service.create_ticket(&draft).unwrap();

    assert!(created.id > 0);
    assert_eq!(created.description, "vpn flaky on 3rd floor");
    assert_eq!(created.status, TicketStatus::Open);
    assert_eq!(created.created_at, 5_000);
    assert_eq!(created.created_at, created.updated_at);

    let fetched = service.get_ticket(created.id).unwrap();
    assert_eq!(fetched, created);
}

#[test]
fn create_defaults_missing_status_to_open() {
    let conn = open_db_in_memory().unwrap();
    let (service, _clock) = service_at(&conn, 1_000);

    let created = service
        .create_ticket(&TicketDraft::with_default_status("no status given"))
        .unwrap();
    assert_eq!(created.status, TicketStatus::Open);
}

#[test]
fn update_refreshes_updated_at_and_preserves_id_and_created_at() {
    let conn = open_db_in_memory().unwrap();
    let (service, clock) = service_at(&conn, 10_000);

    let created = service
        .create_ticket(&TicketDraft::new("old wording", TicketStatus::Open))
        .unwrap();

    clock.advance_ms(250);
    let updated = service
        .update_ticket(
            created.id,
            &TicketDraft::new("new wording", TicketStatus::Closed),
        )
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.description, "new wording");
    assert_eq!(updated.status, TicketStatus::Closed);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    let fetched = service.get_ticket(created.id).unwrap();
    assert_eq!(fetched, updated);
}

#[test]
fn delete_returns_true_and_subsequent_get_fails_not_found() {
    let conn = open_db_in_memory().unwrap();
    let (service, _clock) = service_at(&conn, 1_000);

    let created = service
        .create_ticket(&TicketDraft::new("short lived", TicketStatus::Open))
        .unwrap();

    assert!(service.delete_ticket(created.id).unwrap());

    let err = service.get_ticket(created.id).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("Ticket with ID {} not found.", created.id)
    );
}

#[test]
fn list_returns_views_in_query_order_and_empty_on_no_match() {
    let conn = open_db_in_memory().unwrap();
    let (service, clock) = service_at(&conn, 1_000);

    let first = service
        .create_ticket(&TicketDraft::new("alpha", TicketStatus::Open))
        .unwrap();
    clock.advance_ms(10);
    let second = service
        .create_ticket(&TicketDraft::new("beta", TicketStatus::Closed))
        .unwrap();

    let descending = TicketListQuery {
        sort_direction: SortDirection::parse("DESC"),
        ..TicketListQuery::default()
    };
    let views = service.list_tickets(&descending).unwrap();
    let ids: Vec<i64> = views.iter().map(|view| view.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let no_match = TicketListQuery {
        keyword: "gamma".to_string(),
        ..TicketListQuery::default()
    };
    assert!(service.list_tickets(&no_match).unwrap().is_empty());
}

#[test]
fn validation_failure_propagates_as_repo_error_not_not_found() {
    let conn = open_db_in_memory().unwrap();
    let (service, _clock) = service_at(&conn, 1_000);

    let err = service
        .create_ticket(&TicketDraft::new("z".repeat(41), TicketStatus::Open))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Repo(_)));
}

#[test]
fn printer_broken_lifecycle_scenario() {
    let conn = open_db_in_memory().unwrap();
    let (service, clock) = service_at(&conn, 1_000);

    // Create with default status.
    let ticket_a = service
        .create_ticket(&TicketDraft::with_default_status("printer broken"))
        .unwrap();
    assert_eq!(ticket_a.status, TicketStatus::Open);

    // Close it.
    clock.advance_ms(100);
    service
        .update_ticket(
            ticket_a.id,
            &TicketDraft::new("printer broken", TicketStatus::Closed),
        )
        .unwrap();
    let closed = service.get_ticket(ticket_a.id).unwrap();
    assert_eq!(closed.status, TicketStatus::Closed);
    assert_eq!(closed.id, ticket_a.id);
    assert_eq!(closed.created_at, ticket_a.created_at);

    // Delete, then the id never resolves again.
    assert!(service.delete_ticket(ticket_a.id).unwrap());
    let err = service.get_ticket(ticket_a.id).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(id) if id == ticket_a.id));
}

#[test]
fn view_serializes_status_with_client_facing_names() {
    let view = TicketView {
        id: 1,
        description: "printer broken".to_string(),
        status: TicketStatus::Open,
        created_at: 1_000,
        updated_at: 1_000,
    };

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["status"], "Open");

    let draft: TicketDraft = serde_json::from_str(r#"{"description":"no status"}"#).unwrap();
    assert_eq!(draft.status, None);
    assert_eq!(draft.status_or_default(), TicketStatus::Open);
}
