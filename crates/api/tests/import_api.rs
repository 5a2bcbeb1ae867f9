//! Integration tests for the migration and ticket-browsing endpoints.
//!
//! These go through the full router. Remote calls are only exercised
//! against unroutable addresses, where the transport error itself is the
//! behaviour under test; the happy-path pipeline is covered separately
//! with an in-process importer.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json};
use serde_json::json;
use sqlx::PgPool;
use ticketport_db::models::{CreateImportedTicket, Ticket, UpsertPerson};
use ticketport_db::repositories::{OptionRepo, PersonRepo, TicketRepo};

async fn seed_ticket(pool: &PgPool, origin_id: i64, title: &str) -> Ticket {
    let person = PersonRepo::upsert(
        pool,
        &UpsertPerson {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            person_type: "customer".to_string(),
        },
    )
    .await
    .unwrap();

    TicketRepo::insert_imported(
        pool,
        &CreateImportedTicket {
            customer_id: person.id,
            mailbox_id: None,
            title: title.to_string(),
            content: "body".to_string(),
            status: "active".to_string(),
            priority: "normal".to_string(),
            client_priority: "normal".to_string(),
            source: "zendesk".to_string(),
            origin_id,
            created_at: None,
            updated_at: None,
        },
    )
    .await
    .unwrap()
    .expect("origin id must be fresh")
}

// ---------------------------------------------------------------------------
// POST /api/v1/admin/import/tickets -- validation tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn import_rejects_invalid_body(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/admin/import/tickets",
        json!({
            "handler": "",
            "page": 0,
            "query": {
                "access_token": "",
                "domain": "",
                "email": "not-an-email"
            }
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn import_rejects_unknown_handler(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/admin/import/tickets",
        json!({
            "handler": "helpscout",
            "page": 1,
            "query": {
                "access_token": "token",
                "domain": "https://support.example.com",
                "email": "admin@example.com"
            }
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("Unknown import handler"),
        "unexpected error body: {body}"
    );
}

// ---------------------------------------------------------------------------
// POST /api/v1/admin/import/tickets -- remote failures stay in-band
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unreachable_remote_reports_error_in_band(pool: PgPool) {
    let app = common::build_test_app(pool);

    // Port 1 refuses the connection immediately; the failing count call
    // must come back as a 200 with error=true, not as an HTTP error.
    let response = post_json(
        app,
        "/api/v1/admin/import/tickets",
        json!({
            "handler": "zendesk",
            "page": 1,
            "query": {
                "access_token": "token",
                "domain": "http://127.0.0.1:1",
                "email": "admin@example.com"
            }
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["error"], true);
    assert!(
        data["message"]
            .as_str()
            .unwrap()
            .starts_with("Error while making request"),
        "unexpected message: {}",
        data["message"]
    );
    assert_eq!(data["handler"], "zendesk");
    assert_eq!(data["insert_ids"].as_array().unwrap().len(), 0);
    assert_eq!(data["total_tickets"], 0);
    assert_eq!(data["has_more"], false);
}

// ---------------------------------------------------------------------------
// GET /api/v1/admin/import/stats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_reflect_the_completion_marker(pool: PgPool) {
    let response = get(common::build_test_app(pool.clone()), "/api/v1/admin/import/stats").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let stats = body["data"].as_array().unwrap();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0]["name"], "Zendesk");
    assert_eq!(stats[0]["handler"], "zendesk");
    assert_eq!(stats[0]["type"], "sass");
    assert!(stats[0]["last_migrated"].is_null());

    // Once a migration has completed, its marker shows up verbatim.
    OptionRepo::set(&pool, "_ticketport_migrate_zendesk", "2025-01-10 09:30:00")
        .await
        .unwrap();

    let response = get(common::build_test_app(pool), "/api/v1/admin/import/stats").await;
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["last_migrated"], "2025-01-10 09:30:00");
}

// ---------------------------------------------------------------------------
// POST /api/v1/admin/import/tickets/delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_reports_unsupported_for_zendesk(pool: PgPool) {
    let app = common::build_test_app(pool);

    // Credentials are optional for deletion.
    let response = post_json(
        app,
        "/api/v1/admin/import/tickets/delete",
        json!({ "handler": "zendesk", "page": 1 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["handler"], "zendesk");
    assert_eq!(data["page"], 1);
    assert_eq!(data["deleted"], 0);
    assert_eq!(data["supported"], false);
}

// ---------------------------------------------------------------------------
// Ticket browsing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn browse_then_delete_an_imported_ticket(pool: PgPool) {
    let ticket = seed_ticket(&pool, 42, "Printer on fire").await;

    let response = get(common::build_test_app(pool.clone()), "/api/v1/tickets").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["title"], "Printer on fire");
    assert_eq!(body["data"][0]["origin_id"], 42);

    let uri = format!("/api/v1/tickets/{}", ticket.id);
    let response = get(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let detail = &body_json(response).await["data"];
    assert_eq!(detail["ticket"]["id"], ticket.id);
    assert_eq!(detail["customer"]["email"], "ada@example.com");
    assert_eq!(detail["replies"].as_array().unwrap().len(), 0);
    assert_eq!(detail["attachments"].as_array().unwrap().len(), 0);

    let response = delete(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(common::build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ticket_list_paginates(pool: PgPool) {
    for origin_id in 1..=3 {
        seed_ticket(&pool, origin_id, &format!("Ticket {origin_id}")).await;
    }

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/tickets?per_page=2&page=1",
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["per_page"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let response = get(
        common::build_test_app(pool),
        "/api/v1/tickets?per_page=2&page=2",
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["page"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ticket_list_filters_by_source(pool: PgPool) {
    seed_ticket(&pool, 7, "Imported").await;

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/tickets?source=zendesk",
    )
    .await;
    assert_eq!(body_json(response).await["total"], 1);

    let response = get(
        common::build_test_app(pool),
        "/api/v1/tickets?source=helpscout",
    )
    .await;
    assert_eq!(body_json(response).await["total"], 0);
}
