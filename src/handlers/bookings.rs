use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::handlers::user_id;
use crate::models::{Booking, BookingStatus, PaymentMethod, Session};
use crate::services::booking::{self, BookingError, Checkout};
use crate::services::slots;
use crate::services::store::BookingStore;
use crate::state::AppState;

// POST /api/bookings
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub venue_id: String,
    pub date: NaiveDate,
    pub hour: u32,
    pub player_count: u32,
}

#[derive(Serialize)]
pub struct DraftResponse {
    id: String,
    total_price: f64,
    status: BookingStatus,
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<DraftResponse>, AppError> {
    let user = user_id(&headers)?;

    if state.catalog()?.get_by_id(&req.venue_id).is_none() {
        return Err(BookingError::VenueNotFound(req.venue_id).into());
    }

    let slot = slots::slot_at(&state.store, &req.venue_id, &req.date, req.hour)?
        .ok_or_else(|| AppError::BadRequest(format!("no slot starts at hour {}", req.hour)))?;

    let catalog = state.catalog()?;
    let mut sessions = state.sessions()?;
    let session = sessions
        .entry(user.clone())
        .or_insert_with(|| Session::new(user));

    let id = booking::initiate(
        session,
        &catalog,
        &req.venue_id,
        req.date,
        slot,
        req.player_count,
    )?;

    let total_price = session
        .draft
        .as_ref()
        .map(|d| d.total_price)
        .unwrap_or_default();

    Ok(Json(DraftResponse {
        id,
        total_price,
        status: BookingStatus::Pending,
    }))
}

// GET /api/bookings/current
pub async fn current_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Booking>, AppError> {
    let user = user_id(&headers)?;

    let sessions = state.sessions()?;
    sessions
        .get(&user)
        .and_then(|s| s.draft.clone())
        .map(Json)
        .ok_or_else(|| AppError::NotFound("no booking in progress".to_string()))
}

// POST /api/bookings/:id/complete
#[derive(Deserialize)]
pub struct CompleteBookingRequest {
    pub name: String,
    pub phone: String,
    pub payment_method: PaymentMethod,
}

pub async fn complete_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<CompleteBookingRequest>,
) -> Result<Json<Booking>, AppError> {
    let user = user_id(&headers)?;

    let mut sessions = state.sessions()?;
    let session = sessions
        .get_mut(&user)
        .ok_or_else(|| AppError::NotFound(format!("no draft booking with id {id}")))?;

    let confirmed = booking::complete(
        session,
        &state.store,
        &id,
        Checkout {
            booking_name: req.name,
            phone_number: req.phone,
            payment_method: req.payment_method,
        },
    )?;

    Ok(Json(confirmed))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let user = user_id(&headers)?;

    let found = {
        let sessions = state.sessions()?;
        match sessions.get(&user) {
            Some(session) => booking::get_by_id(session, &state.store, &id)?,
            None => booking::get_by_id(&Session::new(user), &state.store, &id)?,
        }
    };

    found
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("booking {id}")))
}

// GET /api/me/bookings
pub async fn my_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Booking>>, AppError> {
    let user = user_id(&headers)?;
    let bookings = state.store.list_by_user(&user)?;
    Ok(Json(bookings))
}
