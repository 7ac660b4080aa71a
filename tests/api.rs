//! API integration tests
//!
//! Drives the real router in-process over a seeded in-memory store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use labbook_server::{
    api,
    config::{AppConfig, LoggingConfig, SeedConfig, ServerConfig},
    repository::{seed, Database, Repository},
    services::Services,
    AppState,
};

async fn test_app() -> Router {
    let repository = Repository::new(Database::new());
    seed::seed_demo_data(&repository).await.expect("seed failed");

    let state = AppState {
        config: Arc::new(AppConfig {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            seed: SeedConfig::default(),
        }),
        services: Arc::new(Services::new(repository)),
    };
    api::create_router(state)
}

/// Send one request; returns status and parsed JSON body (Null when empty)
async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(format!("/api/v1{}", uri));
    if let Some(user_id) = user {
        builder = builder.header("x-user-id", user_id);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn booking_body(equipment_id: &str, user_id: &str, start_h: i64, end_h: i64) -> Value {
    let base = Utc::now();
    json!({
        "equipment_id": equipment_id,
        "user_id": user_id,
        "start_time": (base + Duration::hours(start_h)).to_rfc3339(),
        "end_time": (base + Duration::hours(end_h)).to_rfc3339(),
        "purpose": "Thin film deposition run",
    })
}

#[tokio::test]
async fn health_check() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn readiness_reports_the_seeded_store() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["equipment_count"], 3);
}

#[tokio::test]
async fn equipment_listing_supports_search_and_status_filter() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/equipment", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (_, body) = send(&app, Method::GET, "/equipment?search=sem", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["code"], "SEM-01");

    let (_, body) = send(&app, Method::GET, "/equipment?status=MAINTENANCE", None, None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["code"], "OSC-07");
}

#[tokio::test]
async fn bookings_require_identity_header() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/bookings", None, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "NotAuthorized");
}

#[tokio::test]
async fn competing_requests_resolve_at_approval_time() {
    let app = test_app().await;

    let (status, first) = send(
        &app,
        Method::POST,
        "/bookings",
        None,
        Some(booking_body("eq-centrifuge", "user-student", 10, 11)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["status"], "PENDING");

    // Overlapping window is still accepted while both are pending
    let (status, second) = send(
        &app,
        Method::POST,
        "/bookings",
        None,
        Some(booking_body("eq-centrifuge", "user-student", 10, 12)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let first_id = first["id"].as_str().unwrap();
    let second_id = second["id"].as_str().unwrap();

    let (status, approved) = send(
        &app,
        Method::POST,
        &format!("/bookings/{}/approve", first_id),
        Some("user-staff"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "APPROVED");
    assert_eq!(approved["approver_name"], "Ben Tran");

    // The second approval loses the race
    let (status, conflict) = send(
        &app,
        Method::POST,
        &format!("/bookings/{}/approve", second_id),
        Some("user-staff"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(conflict["error"], "OverlapConflict");

    // ... and can be rejected with the standard reason
    let (status, rejected) = send(
        &app,
        Method::POST,
        &format!("/bookings/{}/reject", second_id),
        Some("user-staff"),
        Some(json!({ "reason": "Equipment no longer available for requested window" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rejected["status"], "REJECTED");
}

#[tokio::test]
async fn students_cannot_approve_bookings() {
    let app = test_app().await;

    let (_, booking) = send(
        &app,
        Method::POST,
        "/bookings",
        None,
        Some(booking_body("eq-centrifuge", "user-student", 10, 11)),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/bookings/{}/approve", booking["id"].as_str().unwrap()),
        Some("user-student"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "NotAuthorized");
}

#[tokio::test]
async fn restricted_equipment_requires_sop_confirmation() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/bookings",
        None,
        Some(booking_body("eq-sem", "user-student", 10, 11)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let mut confirmed = booking_body("eq-sem", "user-student", 10, 11);
    confirmed["sop_confirmed"] = json!(true);
    let (status, _) = send(&app, Method::POST, "/bookings", None, Some(confirmed)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn checkout_checkin_cycle_with_damage() {
    let app = test_app().await;

    // Window already started so the flow can run immediately
    let (_, booking) = send(
        &app,
        Method::POST,
        "/bookings",
        None,
        Some(booking_body("eq-centrifuge", "user-student", -1, 2)),
    )
    .await;
    let id = booking["id"].as_str().unwrap().to_string();

    send(
        &app,
        Method::POST,
        &format!("/bookings/{}/approve", id),
        Some("user-staff"),
        None,
    )
    .await;

    // Checkin before checkout fails
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/bookings/{}/checkin", id),
        Some("user-staff"),
        Some(json!({ "post_condition": "GOOD" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "NoOpenUsageLog");

    let (status, active) = send(
        &app,
        Method::POST,
        &format!("/bookings/{}/checkout", id),
        Some("user-staff"),
        Some(json!({ "pre_condition": "GOOD", "pre_images": ["pre.jpg"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(active["status"], "ACTIVE");

    let (_, equipment) = send(&app, Method::GET, "/equipment/eq-centrifuge", None, None).await;
    assert_eq!(equipment["status"], "IN_USE");

    // Double checkout is an invalid transition
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/bookings/{}/checkout", id),
        Some("user-staff"),
        Some(json!({ "pre_condition": "GOOD" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, done) = send(
        &app,
        Method::POST,
        &format!("/bookings/{}/checkin", id),
        Some("user-staff"),
        Some(json!({ "post_condition": "DAMAGED", "notes": "Rotor imbalance" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(done["status"], "COMPLETED");

    let (_, equipment) = send(&app, Method::GET, "/equipment/eq-centrifuge", None, None).await;
    assert_eq!(equipment["status"], "BROKEN");

    let (_, user) = send(&app, Method::GET, "/users/user-student", Some("user-admin"), None).await;
    assert_eq!(user["violation_count"], 1);

    // Usage log history records the closed cycle
    let (_, logs) = send(
        &app,
        Method::GET,
        "/equipment/eq-centrifuge/logs",
        Some("user-staff"),
        None,
    )
    .await;
    let logs = logs.as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["is_completed"], true);
    assert_eq!(logs[0]["post_condition"], "DAMAGED");

    // COMPLETED is terminal: cancel fails
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/bookings/{}/cancel", id),
        Some("user-admin"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "InvalidTransition");
}

#[tokio::test]
async fn equipment_detail_embeds_the_manager() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/equipment/eq-centrifuge", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "CF-02");
    assert_eq!(body["manager"]["id"], "user-staff");
    assert_eq!(body["manager"]["name"], "Ben Tran");
    assert_eq!(body["manager"]["role"], "STAFF");
}

#[tokio::test]
async fn clearing_a_manual_hold_lands_on_booked_while_a_window_covers_now() {
    let app = test_app().await;

    // Approve a booking whose window covers now
    let (_, booking) = send(
        &app,
        Method::POST,
        "/bookings",
        None,
        Some(booking_body("eq-centrifuge", "user-student", -1, 2)),
    )
    .await;
    send(
        &app,
        Method::POST,
        &format!("/bookings/{}/approve", booking["id"].as_str().unwrap()),
        Some("user-staff"),
        None,
    )
    .await;

    let (_, equipment) = send(&app, Method::GET, "/equipment/eq-centrifuge", None, None).await;
    assert_eq!(equipment["status"], "BOOKED");

    // Admin takes the equipment out of service, then puts it back
    let (status, held) = send(
        &app,
        Method::PUT,
        "/equipment/eq-centrifuge/status",
        Some("user-admin"),
        Some(json!({ "status": "BROKEN" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(held["status"], "BROKEN");

    // Releasing the hold must not mask the still-covering booking
    let (status, released) = send(
        &app,
        Method::PUT,
        "/equipment/eq-centrifuge/status",
        Some("user-admin"),
        Some(json!({ "status": "AVAILABLE" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(released["status"], "BOOKED");

    let (_, equipment) = send(&app, Method::GET, "/equipment/eq-centrifuge", None, None).await;
    assert_eq!(equipment["status"], "BOOKED");
}

#[tokio::test]
async fn locked_users_cannot_book() {
    let app = test_app().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/users/user-student/lock",
        Some("user-admin"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        "/bookings",
        None,
        Some(booking_body("eq-centrifuge", "user-student", 10, 11)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "NotAuthorized");
}

#[tokio::test]
async fn user_listing_is_admin_only() {
    let app = test_app().await;

    let (status, _) = send(&app, Method::GET, "/users", Some("user-student"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&app, Method::GET, "/users", Some("user-admin"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn students_see_only_their_own_bookings() {
    let app = test_app().await;

    send(
        &app,
        Method::POST,
        "/bookings",
        None,
        Some(booking_body("eq-centrifuge", "user-student", 10, 11)),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/bookings",
        None,
        Some(booking_body("eq-centrifuge", "user-staff", 12, 13)),
    )
    .await;

    let (status, mine) = send(&app, Method::GET, "/bookings", Some("user-student"), None).await;
    assert_eq!(status, StatusCode::OK);
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["equipment_code"], "CF-02");

    let (_, all) = send(&app, Method::GET, "/bookings", Some("user-staff"), None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}
