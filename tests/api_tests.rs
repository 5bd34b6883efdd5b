//! Router-level tests against a real database.
//!
//! Each test gets a fresh database from `#[sqlx::test]`, so a `DATABASE_URL`
//! pointing at a Postgres server is required. Run with:
//! `cargo test -- --ignored`

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::json;
use sqlx::PgPool;

use asset_tracker::config::LifecycleConfig;
use common::{
    audit_count, body_bytes, body_json, build_test_app, build_test_app_with, create_asset, get,
    post_empty, post_json, send,
};

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn ready_pings_database(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(&app, "/api/v1/ready").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ready");
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn create_asset_logs_and_renders_identifier(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let id = create_asset(&app, "Projector", "PRJ-1").await;

    let asset = body_json(get(&app, &format!("/api/v1/assets/{}", id)).await).await;
    assert_eq!(asset["status"], "available");
    assert_eq!(asset["qr_code"], format!("qr_codes/asset_{}_qr.png", id));
    assert!(app
        .media
        .path()
        .join(format!("qr_codes/asset_{}_qr.png", id))
        .exists());

    assert_eq!(audit_count(&pool, id, "created").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn duplicate_serial_is_rejected_without_write(pool: PgPool) {
    let app = build_test_app(pool.clone());
    create_asset(&app, "Laptop", "SN-1").await;

    let response = post_json(
        &app,
        "/api/v1/assets",
        json!({ "name": "Other laptop", "serial_number": "SN-1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["error"], "DuplicateSerial");
    assert_eq!(body["message"], "Asset with this serial number already exists.");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assets")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn whitespace_serial_is_rejected_without_write(pool: PgPool) {
    let app = build_test_app(pool.clone());

    let response = post_json(
        &app,
        "/api/v1/assets",
        json!({ "name": "Drill", "serial_number": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let assets: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM assets")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(assets, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn update_with_blank_fields_keeps_values(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let id = create_asset(&app, "Camera", "CAM-1").await;

    let request = Request::builder()
        .method(Method::PUT)
        .uri(format!("/api/v1/assets/{}", id))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "name": "  ", "location": "Studio B" }).to_string(),
        ))
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["asset"]["name"], "Camera");
    assert_eq!(body["asset"]["location"], "Studio B");
    assert_eq!(audit_count(&pool, id, "updated").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn list_filters_by_status(pool: PgPool) {
    let app = build_test_app(pool);
    let a = create_asset(&app, "Alpha", "A-1").await;
    create_asset(&app, "Beta", "B-1").await;

    post_json(
        &app,
        "/api/v1/reservations",
        json!({ "asset_id": a, "holder_name": "Dana", "check_in": "2024-03-01" }),
    )
    .await;

    let body = body_json(get(&app, "/api/v1/assets?status=available").await).await;
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Beta"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn delete_asset_keeps_audit_rows(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let id = create_asset(&app, "Tripod", "TRI-1").await;

    let request = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/api/v1/assets/{}", id))
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&app, request).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        get(&app, &format!("/api/v1/assets/{}", id)).await.status(),
        StatusCode::NOT_FOUND
    );

    let orphaned: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM audit_logs WHERE asset_id IS NULL")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(orphaned, 2);
}

// ---------------------------------------------------------------------------
// Reservations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn reservation_makes_asset_unavailable(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let id = create_asset(&app, "Drill", "ABC123").await;

    let response = post_json(
        &app,
        "/api/v1/reservations",
        json!({ "asset_id": id, "holder_name": "Alice", "check_in": "2024-01-01", "days": 3 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Reservation created.");
    assert_eq!(body["reservation"]["status"], "booked");
    assert_eq!(body["reservation"]["check_in"], "2024-01-01T00:00:00Z");
    assert_eq!(body["reservation"]["check_out"], "2024-01-04T00:00:00Z");

    let asset = body_json(get(&app, &format!("/api/v1/assets/{}", id)).await).await;
    assert_eq!(asset["status"], "unavailable");
    assert_eq!(audit_count(&pool, id, "checked_out").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn checkout_makes_asset_available(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let id = create_asset(&app, "Ladder", "LAD-1").await;

    let created = post_json(
        &app,
        "/api/v1/reservations",
        json!({ "asset_id": id, "holder_name": "Bob", "check_in": "2024-05-02T09:30" }),
    )
    .await;
    let reservation = body_json(created).await["reservation"]["id"].as_i64().unwrap();
    assert_eq!(
        body_json(get(&app, "/api/v1/reservations").await).await[0]["days"],
        1
    );

    let response = post_empty(&app, &format!("/api/v1/reservations/{}/checkout", reservation)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Asset checked out successfully and is now available again."
    );
    assert_eq!(body["reservation"]["status"], "checked_out");

    let asset = body_json(get(&app, &format!("/api/v1/assets/{}", id)).await).await;
    assert_eq!(asset["status"], "available");
    assert_eq!(audit_count(&pool, id, "returned").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn invalid_check_in_is_rejected_without_write(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let id = create_asset(&app, "Saw", "SAW-1").await;

    let response = post_json(
        &app,
        "/api/v1/reservations",
        json!({ "asset_id": id, "holder_name": "Carol", "check_in": "next tuesday" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid date format.");

    let reservations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(reservations, 0);

    let asset = body_json(get(&app, &format!("/api/v1/assets/{}", id)).await).await;
    assert_eq!(asset["status"], "available");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn far_future_check_in_is_rejected_without_write(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let id = create_asset(&app, "Saw", "SAW-1").await;

    for check_in in ["+262142-12-31", "+10000-01-01T00:00"] {
        let response = post_json(
            &app,
            "/api/v1/reservations",
            json!({ "asset_id": id, "holder_name": "Carol", "check_in": check_in, "days": 3650 }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", check_in);
    }

    let reservations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reservations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(reservations, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn reservation_for_unknown_asset_is_not_found(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        &app,
        "/api/v1/reservations",
        json!({ "asset_id": 999, "holder_name": "Eve", "check_in": "2024-01-01" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn permissive_lifecycle_allows_double_booking(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let id = create_asset(&app, "Van", "VAN-1").await;

    for holder in ["First", "Second"] {
        let response = post_json(
            &app,
            "/api/v1/reservations",
            json!({ "asset_id": id, "holder_name": holder, "check_in": "2024-02-01" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    assert_eq!(audit_count(&pool, id, "checked_out").await, 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn strict_lifecycle_rejects_double_booking(pool: PgPool) {
    let app = build_test_app_with(
        pool.clone(),
        LifecycleConfig {
            reject_conflicts: true,
        },
    );
    let id = create_asset(&app, "Van", "VAN-2").await;

    let first = post_json(
        &app,
        "/api/v1/reservations",
        json!({ "asset_id": id, "holder_name": "First", "check_in": "2024-02-01" }),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let reservation = body_json(first).await["reservation"]["id"].as_i64().unwrap();

    let second = post_json(
        &app,
        "/api/v1/reservations",
        json!({ "asset_id": id, "holder_name": "Second", "check_in": "2024-02-01" }),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["error"], "LifecycleConflict");
    assert_eq!(audit_count(&pool, id, "checked_out").await, 1);

    let uri = format!("/api/v1/reservations/{}/checkout", reservation);
    assert_eq!(post_empty(&app, &uri).await.status(), StatusCode::OK);
    assert_eq!(post_empty(&app, &uri).await.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn maintenance_status_drives_asset_status(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let id = create_asset(&app, "Generator", "GEN-1").await;

    let response = post_json(
        &app,
        "/api/v1/maintenance",
        json!({
            "asset_id": id,
            "start_date": "2024-06-01 08:00",
            "end_date": "2024-06-02",
            "hours": 6,
            "cost": "125.50"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Maintenance scheduled.");
    assert_eq!(body["maintenance"]["status"], "in_progress");
    assert_eq!(body["maintenance"]["notes"], "");
    let maintenance = body["maintenance"]["id"].as_i64().unwrap();

    let asset = body_json(get(&app, &format!("/api/v1/assets/{}", id)).await).await;
    assert_eq!(asset["status"], "maintenance");

    let response = post_empty(&app, &format!("/api/v1/maintenance/{}/complete", maintenance)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Generator maintenance completed.");
    assert_eq!(body["maintenance"]["status"], "done");

    let asset = body_json(get(&app, &format!("/api/v1/assets/{}", id)).await).await;
    assert_eq!(asset["status"], "available");
    assert_eq!(audit_count(&pool, id, "maintenance_created").await, 1);
    assert_eq!(audit_count(&pool, id, "maintenance_completed").await, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn out_of_range_cost_is_rejected_without_write(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let id = create_asset(&app, "Generator", "GEN-1").await;

    for cost in ["-10.00", "100000000"] {
        let response = post_json(
            &app,
            "/api/v1/maintenance",
            json!({ "asset_id": id, "start_date": "2024-06-01", "end_date": "2024-06-02", "cost": cost }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", cost);
    }

    let records: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM maintenance")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(records, 0);
    let asset = body_json(get(&app, &format!("/api/v1/assets/{}", id)).await).await;
    assert_eq!(asset["status"], "available");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn dashboard_counts_assets(pool: PgPool) {
    let app = build_test_app(pool);
    let id = create_asset(&app, "Mixer", "MIX-1").await;
    create_asset(&app, "Speaker", "SPK-1").await;
    post_json(
        &app,
        "/api/v1/maintenance",
        json!({ "asset_id": id, "start_date": "2024-06-01", "end_date": "2024-06-03" }),
    )
    .await;

    let body = body_json(get(&app, "/api/v1/dashboard").await).await;
    assert_eq!(body["total_assets"], 2);
    assert_eq!(body["available_assets"], 1);
    assert_eq!(body["unavailable_assets"], 1);
    assert_eq!(body["recent_assets"].as_array().unwrap().len(), 2);
    assert_eq!(body["recent_maintenances"][0]["asset_name"], "Mixer");
}

// ---------------------------------------------------------------------------
// Actors and audit log
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn actor_header_attributes_audit_entries(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        &app,
        "/api/v1/actors",
        json!({ "username": "jdoe", "display_name": "J. Doe" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let actor = body_json(response).await["id"].as_i64().unwrap();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/assets")
        .header("content-type", "application/json")
        .header("x-actor-id", actor.to_string())
        .body(Body::from(
            json!({ "name": "Scanner", "serial_number": "SCN-1" }).to_string(),
        ))
        .unwrap();
    assert_eq!(send(&app, request).await.status(), StatusCode::CREATED);

    let page = body_json(get(&app, "/api/v1/audit-logs").await).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["actor_name"], "J. Doe");
    assert_eq!(page["items"][0]["asset_name"], "Scanner");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn bad_actor_header_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);

    for (value, status) in [("abc", StatusCode::BAD_REQUEST), ("4242", StatusCode::NOT_FOUND)] {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/assets")
            .header("content-type", "application/json")
            .header("x-actor-id", value)
            .body(Body::from(
                json!({ "name": "Router", "serial_number": value }).to_string(),
            ))
            .unwrap();
        assert_eq!(send(&app, request).await.status(), status);
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn exports_contain_every_entry(pool: PgPool) {
    let app = build_test_app(pool);
    let id = create_asset(&app, "Printer", "PRN-1").await;
    let created = post_json(
        &app,
        "/api/v1/reservations",
        json!({ "asset_id": id, "holder_name": "Frank", "check_in": "2024-01-01" }),
    )
    .await;
    let reservation = body_json(created).await["reservation"]["id"].as_i64().unwrap();
    post_empty(&app, &format!("/api/v1/reservations/{}/checkout", reservation)).await;

    let response = get(&app, "/api/v1/audit-logs/export/csv").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/csv");
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"audit_log.csv\""
    );
    let csv = String::from_utf8(body_bytes(response).await).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Asset,Action,Description,User,Timestamp");
    assert!(lines[1].starts_with("Printer,Returned,"));

    let response = get(&app, "/api/v1/audit-logs/export/pdf").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/pdf");
    assert_eq!(
        response.headers()["content-disposition"],
        "attachment; filename=\"audit_checkpoint.pdf\""
    );
    let pdf = body_bytes(response).await;
    assert!(pdf.starts_with(b"%PDF-"));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn audit_page_past_the_end_is_empty(pool: PgPool) {
    let app = build_test_app(pool);
    create_asset(&app, "Printer", "PRN-1").await;

    let uri = format!("/api/v1/audit-logs?page={}&per_page={}", i64::MAX, i64::MAX);
    let response = get(&app, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"].as_array().unwrap().len(), 0);
}
