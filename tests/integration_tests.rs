use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use sportsspot::config::AppConfig;
use sportsspot::db;
use sportsspot::routes;
use sportsspot::state::AppState;

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        port: 3000,
        database_url: ":memory:".to_string(),
        admin_token: "test-token".to_string(),
        seed_demo_venues: false,
    }
}

fn test_state() -> Arc<AppState> {
    let conn = db::init_db(":memory:").unwrap();
    Arc::new(AppState::new(conn, test_config()).unwrap())
}

fn test_app(state: Arc<AppState>) -> Router {
    routes::router(state)
}

async fn send(state: &Arc<AppState>, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let res = test_app(state.clone()).oneshot(req).await.unwrap();
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn get(uri: &str, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(user) = user {
        builder = builder.header("X-User-Id", user);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, user: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(user) = user {
        builder = builder.header("X-User-Id", user);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn admin(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", "Bearer test-token")
        .header("Content-Type", "application/json");
    match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Creates a venue through the admin API and returns its id.
async fn create_venue(state: &Arc<AppState>, name: &str, sport: &str, city: &str, price: f64) -> String {
    let (status, json) = send(
        state,
        admin(
            "POST",
            "/api/admin/venues",
            Some(serde_json::json!({
                "name": name,
                "sport": sport,
                "city": city,
                "price": price,
                "images": ["https://img.example/cover.jpg"],
                "amenities": ["parking"],
                "rating": 4.5
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create venue failed: {json}");
    json["id"].as_str().unwrap().to_string()
}

// ── Health ──

#[tokio::test]
async fn test_health() {
    let state = test_state();
    let (status, json) = send(&state, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

// ── Venues ──

#[tokio::test]
async fn test_venue_filter_by_sport_and_city() {
    let state = test_state();
    create_venue(&state, "Greenfield Arena", "Football", "Rajkot", 800.0).await;
    create_venue(&state, "Willow Grounds", "Cricket", "Rajkot", 1200.0).await;
    create_venue(&state, "Kick Off", "Football", "Ahmedabad", 600.0).await;

    let (status, json) = send(&state, get("/api/venues", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 3);

    let (_, json) = send(&state, get("/api/venues?sport=Football&city=Rajkot", None)).await;
    let venues = json.as_array().unwrap();
    assert_eq!(venues.len(), 1);
    assert_eq!(venues[0]["name"], "Greenfield Arena");

    let (status, _) = send(&state, get("/api/venues?sport=Curling", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_venue_is_404() {
    let state = test_state();
    let (status, json) = send(&state, get("/api/venues/venue-nope", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("venue-nope"));
}

#[tokio::test]
async fn test_slots_for_venue() {
    let state = test_state();
    let venue_id = create_venue(&state, "Hoops Hub", "Basketball", "Surat", 500.0).await;

    let (status, json) = send(
        &state,
        get(&format!("/api/venues/{venue_id}/slots?date=2025-06-16"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let slots = json.as_array().unwrap();
    assert_eq!(slots.len(), 16);
    assert_eq!(slots[0]["start_time"], "6:00");
    assert_eq!(slots[0]["end_time"], "7:00");
    assert_eq!(slots[15]["start_time"], "21:00");
    assert_eq!(slots[15]["end_time"], "22:00");
    assert!(slots.iter().all(|s| s["is_available"] == true));
}

// ── Booking lifecycle ──

#[tokio::test]
async fn test_booking_happy_path() {
    let state = test_state();
    let venue_id = create_venue(&state, "Greenfield Arena", "Football", "Rajkot", 800.0).await;

    let (status, json) = send(
        &state,
        post_json(
            "/api/bookings",
            Some("user-1"),
            serde_json::json!({"venue_id": venue_id, "date": "2025-06-16", "hour": 18, "player_count": 4}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_price"], 3200.0);
    assert_eq!(json["status"], "pending");
    let booking_id = json["id"].as_str().unwrap().to_string();

    let (status, json) = send(&state, get("/api/bookings/current", Some("user-1"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], booking_id.as_str());

    let (status, json) = send(
        &state,
        post_json(
            &format!("/api/bookings/{booking_id}/complete"),
            Some("user-1"),
            serde_json::json!({"name": "Asha", "phone": "9998887777", "payment_method": "venue"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "confirmed");
    assert_eq!(json["payment_method"], "venue");
    assert_eq!(json["booking_name"], "Asha");
    assert_eq!(json["time_slot"]["start_time"], "18:00");

    // draft is cleared
    let (status, _) = send(&state, get("/api/bookings/current", Some("user-1"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = send(&state, get(&format!("/api/bookings/{booking_id}"), Some("user-1"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_price"], 3200.0);
    assert_eq!(json["phone_number"], "9998887777");

    // exactly one durable record
    let (_, json) = send(&state, admin("GET", "/api/admin/bookings", None)).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    // the slot is now taken
    let (_, json) = send(
        &state,
        get(&format!("/api/venues/{venue_id}/slots?date=2025-06-16"), None),
    )
    .await;
    let taken: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["is_available"] == false)
        .map(|s| s["hour"].as_u64().unwrap())
        .collect();
    assert_eq!(taken, vec![18]);
}

#[tokio::test]
async fn test_booking_requires_user() {
    let state = test_state();
    let venue_id = create_venue(&state, "Greenfield Arena", "Football", "Rajkot", 800.0).await;

    let (status, _) = send(
        &state,
        post_json(
            "/api/bookings",
            None,
            serde_json::json!({"venue_id": venue_id, "date": "2025-06-16", "hour": 9, "player_count": 2}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_initiate_unknown_venue() {
    let state = test_state();

    let (status, _) = send(
        &state,
        post_json(
            "/api/bookings",
            Some("user-1"),
            serde_json::json!({"venue_id": "venue-missing", "date": "2025-06-16", "hour": 9, "player_count": 2}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // the venue is resolved before the hour or player count are looked at
    let (status, _) = send(
        &state,
        post_json(
            "/api/bookings",
            Some("user-1"),
            serde_json::json!({"venue_id": "venue-missing", "date": "2025-06-16", "hour": 23, "player_count": 0}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&state, get("/api/bookings/current", Some("user-1"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_initiate_rejects_bad_input() {
    let state = test_state();
    let venue_id = create_venue(&state, "Smash Point", "Pickleball", "Ahmedabad", 350.0).await;

    let (status, _) = send(
        &state,
        post_json(
            "/api/bookings",
            Some("user-1"),
            serde_json::json!({"venue_id": venue_id, "date": "2025-06-16", "hour": 9, "player_count": 0}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &state,
        post_json(
            "/api/bookings",
            Some("user-1"),
            serde_json::json!({"venue_id": venue_id, "date": "2025-06-16", "hour": 23, "player_count": 2}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_booked_slot_conflicts() {
    let state = test_state();
    let venue_id = create_venue(&state, "Beachside Nets", "Volleyball", "Rajkot", 400.0).await;

    let (_, json) = send(
        &state,
        post_json(
            "/api/bookings",
            Some("user-1"),
            serde_json::json!({"venue_id": venue_id, "date": "2025-06-16", "hour": 7, "player_count": 6}),
        ),
    )
    .await;
    let booking_id = json["id"].as_str().unwrap().to_string();
    send(
        &state,
        post_json(
            &format!("/api/bookings/{booking_id}/complete"),
            Some("user-1"),
            serde_json::json!({"name": "Asha", "phone": "9998887777", "payment_method": "online"}),
        ),
    )
    .await;

    let (status, _) = send(
        &state,
        post_json(
            "/api/bookings",
            Some("user-2"),
            serde_json::json!({"venue_id": venue_id, "date": "2025-06-16", "hour": 7, "player_count": 2}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // cancelling through the admin console frees the hour again
    let (status, _) = send(
        &state,
        admin(
            "POST",
            &format!("/api/admin/bookings/{booking_id}/status"),
            Some(serde_json::json!({"status": "cancelled"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &state,
        post_json(
            "/api/bookings",
            Some("user-2"),
            serde_json::json!({"venue_id": venue_id, "date": "2025-06-16", "hour": 7, "player_count": 2}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_second_initiate_overwrites_draft() {
    let state = test_state();
    let venue_id = create_venue(&state, "Greenfield Arena", "Football", "Rajkot", 800.0).await;

    let mut ids = vec![];
    for hour in [9, 10] {
        let (_, json) = send(
            &state,
            post_json(
                "/api/bookings",
                Some("user-1"),
                serde_json::json!({"venue_id": venue_id, "date": "2025-06-16", "hour": hour, "player_count": 1}),
            ),
        )
        .await;
        ids.push(json["id"].as_str().unwrap().to_string());
    }

    let (status, _) = send(
        &state,
        post_json(
            &format!("/api/bookings/{}/complete", ids[0]),
            Some("user-1"),
            serde_json::json!({"name": "Asha", "phone": "9998887777", "payment_method": "online"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &state,
        post_json(
            &format!("/api/bookings/{}/complete", ids[1]),
            Some("user-1"),
            serde_json::json!({"name": "Asha", "phone": "9998887777", "payment_method": "online"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_drafts_are_per_user() {
    let state = test_state();
    let venue_id = create_venue(&state, "Greenfield Arena", "Football", "Rajkot", 800.0).await;

    let (_, json) = send(
        &state,
        post_json(
            "/api/bookings",
            Some("user-1"),
            serde_json::json!({"venue_id": venue_id, "date": "2025-06-16", "hour": 9, "player_count": 1}),
        ),
    )
    .await;
    let booking_id = json["id"].as_str().unwrap().to_string();

    let (status, _) = send(&state, get("/api/bookings/current", Some("user-2"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &state,
        post_json(
            &format!("/api/bookings/{booking_id}/complete"),
            Some("user-2"),
            serde_json::json!({"name": "Ravi", "phone": "9000000000", "payment_method": "online"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_price_frozen_after_venue_repriced() {
    let state = test_state();
    let venue_id = create_venue(&state, "Greenfield Arena", "Football", "Rajkot", 800.0).await;

    let (_, json) = send(
        &state,
        post_json(
            "/api/bookings",
            Some("user-1"),
            serde_json::json!({"venue_id": venue_id, "date": "2025-06-16", "hour": 18, "player_count": 4}),
        ),
    )
    .await;
    let booking_id = json["id"].as_str().unwrap().to_string();

    let (status, json) = send(
        &state,
        admin(
            "PUT",
            &format!("/api/admin/venues/{venue_id}"),
            Some(serde_json::json!({"price": 1000.0})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["price"], 1000.0);
    // fields left out of the edit keep their values
    assert_eq!(json["name"], "Greenfield Arena");
    assert_eq!(json["rating"], 4.5);
    assert_eq!(json["images"], serde_json::json!(["https://img.example/cover.jpg"]));
    assert_eq!(json["amenities"], serde_json::json!(["parking"]));

    send(
        &state,
        post_json(
            &format!("/api/bookings/{booking_id}/complete"),
            Some("user-1"),
            serde_json::json!({"name": "Asha", "phone": "9998887777", "payment_method": "venue-pay"}),
        ),
    )
    .await;

    let (status, json) = send(&state, get(&format!("/api/bookings/{booking_id}"), Some("user-1"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_price"], 3200.0);
    assert_eq!(json["payment_method"], "venue");
}

#[tokio::test]
async fn test_lookup_falls_back_to_store_for_other_sessions() {
    let state = test_state();
    let venue_id = create_venue(&state, "Hoops Hub", "Basketball", "Surat", 500.0).await;

    let (_, json) = send(
        &state,
        post_json(
            "/api/bookings",
            Some("user-1"),
            serde_json::json!({"venue_id": venue_id, "date": "2025-07-01", "hour": 20, "player_count": 2}),
        ),
    )
    .await;
    let booking_id = json["id"].as_str().unwrap().to_string();
    send(
        &state,
        post_json(
            &format!("/api/bookings/{booking_id}/complete"),
            Some("user-1"),
            serde_json::json!({"name": "Asha", "phone": "9998887777", "payment_method": "online"}),
        ),
    )
    .await;

    let (status, json) = send(&state, get(&format!("/api/bookings/{booking_id}"), Some("someone-else"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["user_id"], "user-1");

    let (_, json) = send(&state, get("/api/me/bookings", Some("user-1"))).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    let (status, _) = send(&state, get("/api/bookings/booking-missing", Some("user-1"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ── Admin ──

#[tokio::test]
async fn test_admin_requires_auth() {
    let state = test_state();

    let (status, _) = send(&state, get("/api/admin/stats", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .uri("/api/admin/stats")
        .header("Authorization", "Bearer wrong-token")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&state, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_stats() {
    let state = test_state();
    let venue_id = create_venue(&state, "Greenfield Arena", "Football", "Rajkot", 800.0).await;

    for (user, hour) in [("user-1", 8), ("user-2", 9)] {
        let (_, json) = send(
            &state,
            post_json(
                "/api/bookings",
                Some(user),
                serde_json::json!({"venue_id": venue_id, "date": "2025-06-16", "hour": hour, "player_count": 1}),
            ),
        )
        .await;
        let id = json["id"].as_str().unwrap().to_string();
        send(
            &state,
            post_json(
                &format!("/api/bookings/{id}/complete"),
                Some(user),
                serde_json::json!({"name": "N", "phone": "1", "payment_method": "online"}),
            ),
        )
        .await;
    }

    let (status, json) = send(&state, admin("GET", "/api/admin/stats", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["venues"], 1);
    assert_eq!(json["bookings"], 2);
    assert_eq!(json["users"], 2);
    assert_eq!(json["recent_bookings"].as_array().unwrap().len(), 2);
    assert_eq!(json["recent_venues"][0]["id"], venue_id.as_str());
}

#[tokio::test]
async fn test_admin_venue_validation_and_delete() {
    let state = test_state();

    let (status, _) = send(
        &state,
        admin(
            "POST",
            "/api/admin/venues",
            Some(serde_json::json!({"name": "Free Court", "sport": "Basketball", "city": "Surat", "price": 0})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let venue_id = create_venue(&state, "Hoops Hub", "Basketball", "Surat", 500.0).await;

    let (status, _) = send(&state, admin("DELETE", &format!("/api/admin/venues/{venue_id}"), None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&state, get(&format!("/api/venues/{venue_id}"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&state, admin("DELETE", &format!("/api/admin/venues/{venue_id}"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_booking_status_filter() {
    let state = test_state();

    let (status, _) = send(&state, admin("GET", "/api/admin/bookings?status=bogus", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &state,
        admin(
            "POST",
            "/api/admin/bookings/booking-missing/status",
            Some(serde_json::json!({"status": "cancelled"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_enters_booking_directly() {
    let state = test_state();
    let venue_id = create_venue(&state, "Willow Grounds", "Cricket", "Rajkot", 1200.0).await;

    let (status, json) = send(
        &state,
        admin(
            "POST",
            "/api/admin/bookings",
            Some(serde_json::json!({
                "user_id": "walk-in-7",
                "venue_id": venue_id,
                "date": "2025-06-20",
                "hour": 17,
                "player_count": 2
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "admin booking failed: {json}");
    assert_eq!(json["status"], "confirmed");
    assert_eq!(json["total_price"], 2400.0);
    assert_eq!(json["time_slot"]["start_time"], "17:00");
    let booking_id = json["id"].as_str().unwrap().to_string();

    let (_, json) = send(&state, get("/api/me/bookings", Some("walk-in-7"))).await;
    assert_eq!(json[0]["id"], booking_id.as_str());

    let (_, json) = send(
        &state,
        get(&format!("/api/venues/{venue_id}/slots?date=2025-06-20"), None),
    )
    .await;
    assert_eq!(json[11]["hour"], 17);
    assert_eq!(json[11]["is_available"], false);

    // the hour is now held
    let (status, _) = send(
        &state,
        admin(
            "POST",
            "/api/admin/bookings",
            Some(serde_json::json!({
                "user_id": "walk-in-8",
                "venue_id": venue_id,
                "date": "2025-06-20",
                "hour": 17,
                "amount": 500.0
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, json) = send(
        &state,
        admin(
            "POST",
            "/api/admin/bookings",
            Some(serde_json::json!({
                "user_id": "walk-in-8",
                "venue_id": venue_id,
                "date": "2025-06-20",
                "hour": 18,
                "status": "pending",
                "amount": 500.0
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_price"], 500.0);
    assert_eq!(json["status"], "pending");

    let (status, _) = send(
        &state,
        admin(
            "POST",
            "/api/admin/bookings",
            Some(serde_json::json!({"user_id": "u", "venue_id": venue_id, "date": "2025-06-20", "hour": 22})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &state,
        admin(
            "POST",
            "/api/admin/bookings",
            Some(serde_json::json!({"user_id": "u", "venue_id": "venue-missing", "date": "2025-06-20", "hour": 9})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = send(&state, admin("GET", "/api/admin/bookings", None)).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

// ── Teams ──

#[tokio::test]
async fn test_team_create_and_join() {
    let state = test_state();

    let (status, json) = send(
        &state,
        post_json(
            "/api/teams",
            Some("user-1"),
            serde_json::json!({
                "name": "Thunder Strikers",
                "sport": "Football",
                "city": "Rajkot",
                "max_players": 2,
                "skill_level": "Intermediate"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["members"], serde_json::json!(["user-1"]));
    let team_id = json["id"].as_str().unwrap().to_string();

    let (status, json) = send(
        &state,
        post_json(&format!("/api/teams/{team_id}/join"), Some("user-2"), serde_json::json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["members"], serde_json::json!(["user-1", "user-2"]));

    let (status, _) = send(
        &state,
        post_json(&format!("/api/teams/{team_id}/join"), Some("user-3"), serde_json::json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, json) = send(&state, get("/api/me/teams", Some("user-2"))).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    let (_, json) = send(&state, get("/api/teams", None)).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    let (status, _) = send(&state, get("/api/teams/team-missing", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
