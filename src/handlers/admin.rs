use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::{NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{
    Booking, BookingStatus, NewVenue, PaymentMethod, TimeSlot, Venue, VenueEdit,
};
use crate::services::pricing;
use crate::services::store::{BookingStore, VenueSource};
use crate::state::AppState;

#[allow(clippy::result_large_err)]
fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token.is_empty() || token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

// GET /api/admin/stats
#[derive(Serialize)]
pub struct StatsResponse {
    venues: i64,
    bookings: i64,
    users: i64,
    recent_bookings: Vec<Booking>,
    recent_venues: Vec<Venue>,
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<StatsResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let stats = queries::get_dashboard_stats(&*state.conn()?)?;
    let recent_bookings = state.store.find_all(None, 5)?;
    let recent_venues = state.catalog()?.venues().iter().take(5).cloned().collect();

    Ok(Json(StatsResponse {
        venues: stats.venue_count,
        bookings: stats.booking_count,
        users: stats.user_count,
        recent_bookings,
        recent_venues,
    }))
}

// POST /api/admin/venues
pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(new_venue): Json<NewVenue>,
) -> Result<Json<Venue>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    new_venue.validate().map_err(AppError::BadRequest)?;

    let venue = Venue {
        id: format!("venue-{}", uuid::Uuid::new_v4()),
        name: new_venue.name,
        sport: new_venue.sport,
        city: new_venue.city,
        price: new_venue.price,
        address: new_venue.address,
        description: new_venue.description,
        images: new_venue.images,
        amenities: new_venue.amenities,
        rating: new_venue.rating,
        created_at: Utc::now().naive_utc().trunc_subsecs(0),
    };

    state.store.insert_venue(&venue)?;
    tracing::info!(venue_id = %venue.id, "venue created");
    state.refresh_catalog()?;

    Ok(Json(venue))
}

// PUT /api/admin/venues/:id
pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(edit): Json<VenueEdit>,
) -> Result<Json<Venue>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let current = state
        .store
        .get_venue(&id)?
        .ok_or_else(|| AppError::NotFound(format!("venue {id}")))?;
    let merged = edit.merge_into(current);
    merged.validate().map_err(AppError::BadRequest)?;

    if !state.store.update_venue(&id, &merged)? {
        return Err(AppError::NotFound(format!("venue {id}")));
    }
    tracing::info!(venue_id = %id, "venue updated");
    state.refresh_catalog()?;

    let venue = state
        .catalog()?
        .get_by_id(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("venue {id}")))?;
    Ok(Json(venue))
}

// DELETE /api/admin/venues/:id
pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    if !state.store.delete_venue(&id)? {
        return Err(AppError::NotFound(format!("venue {id}")));
    }
    tracing::info!(venue_id = %id, "venue deleted");
    state.refresh_catalog()?;

    Ok(Json(serde_json::json!({"ok": true})))
}

// GET /api/admin/bookings
#[derive(Deserialize)]
pub struct BookingsQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
}

pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let status = match query.status.as_deref() {
        Some(s) => Some(
            BookingStatus::parse(s)
                .ok_or_else(|| AppError::BadRequest(format!("unknown booking status: {s}")))?,
        ),
        None => None,
    };
    let limit = query.limit.unwrap_or(50);

    let bookings = state.store.find_all(status, limit)?;
    Ok(Json(bookings))
}

// POST /api/admin/bookings
#[derive(Deserialize)]
pub struct AdminBookingRequest {
    pub user_id: String,
    pub venue_id: String,
    pub date: NaiveDate,
    pub hour: u32,
    #[serde(default = "default_player_count")]
    pub player_count: u32,
    #[serde(default = "default_admin_status")]
    pub status: BookingStatus,
    pub amount: Option<f64>,
    #[serde(default)]
    pub booking_name: String,
    #[serde(default)]
    pub phone_number: String,
    pub payment_method: Option<PaymentMethod>,
}

fn default_player_count() -> u32 {
    1
}

fn default_admin_status() -> BookingStatus {
    BookingStatus::Confirmed
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<AdminBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    if req.user_id.trim().is_empty() {
        return Err(AppError::BadRequest("user_id must not be empty".to_string()));
    }
    if req.player_count == 0 {
        return Err(AppError::BadRequest("player count must be at least 1".to_string()));
    }
    if let Some(amount) = req.amount {
        if !(amount.is_finite() && amount >= 0.0) {
            return Err(AppError::BadRequest(format!("invalid amount: {amount}")));
        }
    }

    let rate = state
        .catalog()?
        .get_by_id(&req.venue_id)
        .map(|v| v.price)
        .ok_or_else(|| AppError::NotFound(format!("venue {}", req.venue_id)))?;

    let time_slot = TimeSlot::for_hour(req.hour, true)
        .ok_or_else(|| AppError::BadRequest(format!("no slot starts at hour {}", req.hour)))?;
    if state
        .store
        .booked_hours(&req.venue_id, &req.date)?
        .contains(&req.hour)
    {
        return Err(AppError::Conflict(format!("slot {} is already booked", time_slot.id)));
    }

    let booking = Booking {
        id: format!("booking-{}", uuid::Uuid::new_v4()),
        venue_id: req.venue_id,
        user_id: req.user_id,
        date: req.date,
        time_slot,
        total_price: req
            .amount
            .unwrap_or_else(|| pricing::price(rate, req.player_count)),
        payment_method: req.payment_method,
        status: req.status,
        player_count: req.player_count,
        booking_name: req.booking_name,
        phone_number: req.phone_number,
        created_at: Utc::now().naive_utc().trunc_subsecs(0),
    };

    state.store.append(&booking)?;
    tracing::info!(
        booking_id = %booking.id,
        venue_id = %booking.venue_id,
        user_id = %booking.user_id,
        "booking entered by admin"
    );

    Ok(Json(booking))
}

// POST /api/admin/bookings/:id/status
#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: BookingStatus,
}

pub async fn set_booking_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    if !state.store.update_status(&id, req.status)? {
        return Err(AppError::NotFound(format!("booking {id}")));
    }
    tracing::info!(booking_id = %id, status = req.status.as_str(), "booking status changed");

    Ok(Json(serde_json::json!({"ok": true, "status": req.status})))
}
