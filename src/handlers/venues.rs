use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{Sport, TimeSlot, Venue};
use crate::services::slots;
use crate::state::AppState;

// GET /api/venues
#[derive(Deserialize)]
pub struct VenuesQuery {
    pub sport: Option<String>,
    pub city: Option<String>,
}

pub async fn list_venues(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VenuesQuery>,
) -> Result<Json<Vec<Venue>>, AppError> {
    let sport = match query.sport.as_deref().filter(|s| !s.is_empty()) {
        Some(s) => Some(
            Sport::parse(s).ok_or_else(|| AppError::BadRequest(format!("unknown sport: {s}")))?,
        ),
        None => None,
    };
    let city = query.city.as_deref().filter(|c| !c.is_empty());

    let catalog = state.catalog()?;
    let venues = catalog.filter(sport, city).into_iter().cloned().collect();
    Ok(Json(venues))
}

// GET /api/venues/:id
pub async fn get_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Venue>, AppError> {
    let catalog = state.catalog()?;
    let venue = catalog
        .get_by_id(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("venue {id}")))?;
    Ok(Json(venue))
}

// GET /api/venues/:id/slots?date=YYYY-MM-DD
#[derive(Deserialize)]
pub struct SlotsQuery {
    pub date: NaiveDate,
}

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    if state.catalog()?.get_by_id(&id).is_none() {
        return Err(AppError::NotFound(format!("venue {id}")));
    }

    let slots = slots::generate(&state.store, &id, &query.date)?;
    Ok(Json(slots))
}
