use atrio_api::{app, AppState};
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    app(AppState::new())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn booking_payload(name: &str, check_in_day: &str, check_out_day: &str) -> Value {
    json!({
        "guest_name": name,
        "guest_email": "guest@example.com",
        "room_number": "101",
        "check_in": format!("{check_in_day}T14:00:00Z"),
        "check_out": format!("{check_out_day}T11:00:00Z"),
        "adults": 2,
        "children": 0,
        "total_amount": 600.0
    })
}

async fn create_booking(app: &Router, name: &str, check_in: &str, check_out: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/bookings",
        Some(booking_payload(name, check_in, check_out)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn test_booking_lifecycle_over_http() {
    let app = test_app();
    let created = create_booking(&app, "John Smith", "2025-03-20", "2025-03-25").await;
    assert_eq!(created["status"], "pending");
    assert_eq!(created["payment_status"], "unpaid");
    assert_eq!(created["reference_code"], "BK-000001");
    let id = created["id"].as_str().unwrap().to_string();

    for next in ["confirmed", "checked_in", "checked_out"] {
        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/bookings/{id}/status"),
            Some(json!({ "status": next })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "transition to {next}");
        assert_eq!(body["status"], next);
    }

    // Checked out is terminal: nothing else is accepted
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/bookings/{id}/status"),
        Some(json!({ "status": "confirmed" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("invalid status transition"));

    // And the stay history cannot be deleted
    let (status, _) = send(&app, "DELETE", &format!("/api/bookings/{id}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_skipping_check_in_is_a_conflict() {
    let app = test_app();
    let created = create_booking(&app, "John Smith", "2025-03-20", "2025-03-25").await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/bookings/{id}/status"),
        Some(json!({ "status": "checked_in" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // The row is untouched
    let (_, body) = send(&app, "GET", &format!("/api/bookings/{id}"), None).await;
    assert_eq!(body["status"], "pending");
}

#[tokio::test]
async fn test_unknown_status_value_is_bad_request() {
    let app = test_app();
    let created = create_booking(&app, "John Smith", "2025-03-20", "2025-03-25").await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/bookings/{id}/status"),
        Some(json!({ "status": "arrived" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_validation_maps_field_errors() {
    let app = test_app();
    let mut payload = booking_payload("", "2025-03-20", "2025-03-25");
    payload["guest_email"] = json!("not-an-email");
    let (status, body) = send(&app, "POST", "/api/bookings", Some(payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"].get("guest_name").is_some());
    assert!(body["errors"].get("guest_email").is_some());
}

#[tokio::test]
async fn test_inverted_dates_rejected_with_field_error() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/bookings",
        Some(booking_payload("John Smith", "2025-03-25", "2025-03-20")),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"].get("check_out").is_some());
}

#[tokio::test]
async fn test_delete_allowed_before_arrival_only() {
    let app = test_app();
    let created = create_booking(&app, "John Smith", "2025-03-20", "2025-03-25").await;
    let id = created["id"].as_str().unwrap().to_string();
    send(
        &app,
        "POST",
        &format!("/api/bookings/{id}/status"),
        Some(json!({ "status": "confirmed" })),
    )
    .await;

    let (status, _) = send(&app, "DELETE", &format!("/api/bookings/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/api/bookings/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_via_method_spoofing() {
    let app = test_app();
    let created = create_booking(&app, "John Smith", "2025-03-20", "2025-03-25").await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/bookings/{id}"),
        Some(json!({ "_method": "PUT", "guest_name": "John A. Smith", "payment_status": "paid" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["guest_name"], "John A. Smith");
    assert_eq!(body["payment_status"], "paid");
    // Untouched fields survive the partial update
    assert_eq!(body["room_number"], "101");

    // A bare POST to the row is not an update
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/bookings/{id}"),
        Some(json!({ "guest_name": "Nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_filtering() {
    let app = test_app();
    create_booking(&app, "John Smith", "2025-03-14", "2025-03-16").await;
    let garcia = create_booking(&app, "Maria Garcia", "2025-03-18", "2025-03-20").await;
    send(
        &app,
        "POST",
        &format!("/api/bookings/{}/status", garcia["id"].as_str().unwrap()),
        Some(json!({ "status": "confirmed" })),
    )
    .await;

    let (_, body) = send(&app, "GET", "/api/bookings?status=all", None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = send(&app, "GET", "/api/bookings?status=confirmed", None).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["guest_name"], "Maria Garcia");

    let (_, body) = send(&app, "GET", "/api/bookings?search=smith", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (_, body) = send(&app, "GET", "/api/bookings?month=4&year=2025", None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_calendar_bookings_grouped_by_day() {
    let app = test_app();
    create_booking(&app, "John Smith", "2025-03-14", "2025-03-16").await;
    create_booking(&app, "Ana Brown", "2025-03-14", "2025-03-15").await;
    create_booking(&app, "Maria Garcia", "2025-03-18", "2025-03-20").await;
    create_booking(&app, "April Guest", "2025-04-02", "2025-04-04").await;

    let (status, body) = send(
        &app,
        "GET",
        "/api/calendar-bookings?month=3&year=2025",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let groups = body["bookings"].as_object().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups["2025-03-14"].as_array().unwrap().len(), 2);
    assert_eq!(groups["2025-03-18"].as_array().unwrap().len(), 1);

    let (_, body) = send(
        &app,
        "GET",
        "/api/calendar-bookings?month=3&year=2025&search=smith",
        None,
    )
    .await;
    let groups = body["bookings"].as_object().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups["2025-03-14"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_event_lifecycle_and_calendar() {
    let app = test_app();
    let (status, created) = send(
        &app,
        "POST",
        "/api/events",
        Some(json!({
            "client_name": "Garcia Wedding",
            "venue": "Terrace Hall",
            "date": "2025-06-14",
            "start_time": "18:00:00",
            "end_time": "23:00:00",
            "guest_count": 120,
            "total_amount": 8400.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "pending");
    assert_eq!(created["reference_code"], "EV-000001");
    let id = created["id"].as_str().unwrap();

    for next in ["confirmed", "completed"] {
        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/events/{id}/status"),
            Some(json!({ "status": next })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], next);
    }

    let (_, body) = send(&app, "GET", "/api/calendar-events?month=6&year=2025", None).await;
    assert_eq!(body["success"], true);
    assert_eq!(
        body["events"]["2025-06-14"].as_array().unwrap().len(),
        1
    );
}

#[tokio::test]
async fn test_event_rejects_inverted_times() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/events",
        Some(json!({
            "client_name": "Garcia Wedding",
            "venue": "Terrace Hall",
            "date": "2025-06-14",
            "start_time": "18:00:00",
            "end_time": "17:00:00",
            "guest_count": 120,
            "total_amount": 8400.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"].get("end_time").is_some());
}

#[tokio::test]
async fn test_room_status_toggle() {
    let app = test_app();
    let (status, room) = send(
        &app,
        "POST",
        "/api/rooms",
        Some(json!({
            "number": "101",
            "room_type": "Standard Queen",
            "capacity": 2,
            "nightly_rate": 120.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(room["status"], "available");
    let id = room["id"].as_str().unwrap();

    let (status, room) = send(
        &app,
        "POST",
        &format!("/api/rooms/{id}/status"),
        Some(json!({ "status": "maintenance" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(room["status"], "maintenance");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/rooms/{id}/status"),
        Some(json!({ "status": "occupied" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_inventory_stock_level_is_derived() {
    let app = test_app();
    let (status, item) = send(
        &app,
        "POST",
        "/api/inventory",
        Some(json!({
            "name": "Bath Towels",
            "category": "Linen",
            "quantity": 0,
            "min_stock_level": 20,
            "unit": "pieces"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["stock_level"], "out_of_stock");
    let id = item["id"].as_str().unwrap();

    let (_, item) = send(
        &app,
        "PUT",
        &format!("/api/inventory/{id}"),
        Some(json!({ "quantity": 12 })),
    )
    .await;
    assert_eq!(item["stock_level"], "low_stock");

    let (_, item) = send(
        &app,
        "PUT",
        &format!("/api/inventory/{id}"),
        Some(json!({ "quantity": 48 })),
    )
    .await;
    assert_eq!(item["stock_level"], "in_stock");

    // The stock tab filters on the derived level
    let (_, rows) = send(&app, "GET", "/api/inventory?status=in_stock", None).await;
    assert_eq!(rows.as_array().unwrap().len(), 1);
    let (_, rows) = send(&app, "GET", "/api/inventory?status=low_stock", None).await;
    assert_eq!(rows.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_menu_sold_out_toggle() {
    let app = test_app();
    let (_, item) = send(
        &app,
        "POST",
        "/api/menu",
        Some(json!({
            "name": "Seared Salmon",
            "category": "Mains",
            "price": 28.0
        })),
    )
    .await;
    let id = item["id"].as_str().unwrap();
    assert_eq!(item["status"], "available");

    let (status, item) = send(
        &app,
        "POST",
        &format!("/api/menu/{id}/status"),
        Some(json!({ "status": "sold_out" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["status"], "sold_out");
}

#[tokio::test]
async fn test_missing_row_is_not_found() {
    let app = test_app();
    let ghost = uuid::Uuid::new_v4();
    for uri in [
        format!("/api/bookings/{ghost}"),
        format!("/api/events/{ghost}"),
        format!("/api/rooms/{ghost}"),
    ] {
        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
