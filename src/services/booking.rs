use chrono::{NaiveDate, SubsecRound, Utc};

use crate::models::{Booking, BookingStatus, PaymentMethod, Session, TimeSlot};
use crate::services::catalog::VenueCatalog;
use crate::services::pricing;
use crate::services::store::BookingStore;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("venue not found: {0}")]
    VenueNotFound(String),

    #[error("no draft booking with id {0}")]
    DraftNotFound(String),

    #[error("player count must be at least 1")]
    InvalidPlayerCount,

    #[error("slot {0} is already booked")]
    SlotUnavailable(String),

    #[error("booking store error: {0}")]
    Store(#[from] anyhow::Error),
}

/// Contact and payment details supplied when confirming a draft.
#[derive(Debug, Clone)]
pub struct Checkout {
    pub booking_name: String,
    pub phone_number: String,
    pub payment_method: PaymentMethod,
}

/// Starts a draft booking for the session and returns its id.
///
/// The price is fixed here from the venue's current rate. Any draft the
/// session already held is replaced.
pub fn initiate(
    session: &mut Session,
    catalog: &VenueCatalog,
    venue_id: &str,
    date: NaiveDate,
    slot: TimeSlot,
    player_count: u32,
) -> Result<String, BookingError> {
    let venue = catalog
        .get_by_id(venue_id)
        .ok_or_else(|| BookingError::VenueNotFound(venue_id.to_string()))?;

    if player_count == 0 {
        return Err(BookingError::InvalidPlayerCount);
    }
    if !slot.is_available {
        return Err(BookingError::SlotUnavailable(slot.id));
    }

    let booking = Booking {
        id: format!("booking-{}", uuid::Uuid::new_v4()),
        venue_id: venue.id.clone(),
        user_id: session.user_id.clone(),
        date,
        time_slot: slot,
        total_price: pricing::price(venue.price, player_count),
        payment_method: None,
        status: BookingStatus::Pending,
        player_count,
        booking_name: String::new(),
        phone_number: String::new(),
        created_at: Utc::now().naive_utc().trunc_subsecs(0),
    };

    if let Some(previous) = &session.draft {
        tracing::info!(
            user_id = %session.user_id,
            booking_id = %previous.id,
            "discarding unconfirmed draft"
        );
    }

    tracing::info!(
        user_id = %session.user_id,
        venue_id,
        booking_id = %booking.id,
        total_price = booking.total_price,
        "draft booking created"
    );

    let id = booking.id.clone();
    session.draft = Some(booking);
    Ok(id)
}

/// Confirms the session's draft and appends it to the durable store.
///
/// The slot is checked against the store again first, since another session
/// may have confirmed the same hour. If that check or the store write fails the
/// draft is kept.
pub fn complete(
    session: &mut Session,
    store: &dyn BookingStore,
    booking_id: &str,
    checkout: Checkout,
) -> Result<Booking, BookingError> {
    let draft = match &session.draft {
        Some(draft) if draft.id == booking_id => draft,
        _ => {
            tracing::warn!(user_id = %session.user_id, booking_id, "complete without matching draft");
            return Err(BookingError::DraftNotFound(booking_id.to_string()));
        }
    };

    if store
        .booked_hours(&draft.venue_id, &draft.date)?
        .contains(&draft.time_slot.hour)
    {
        tracing::warn!(user_id = %session.user_id, booking_id, "slot taken before confirmation");
        return Err(BookingError::SlotUnavailable(draft.time_slot.id.clone()));
    }

    let confirmed = Booking {
        booking_name: checkout.booking_name,
        phone_number: checkout.phone_number,
        payment_method: Some(checkout.payment_method),
        status: BookingStatus::Confirmed,
        ..draft.clone()
    };

    store.append(&confirmed)?;

    tracing::info!(
        user_id = %session.user_id,
        booking_id,
        payment_method = checkout.payment_method.as_str(),
        "booking confirmed"
    );

    session.confirmed.push(confirmed.clone());
    session.draft = None;
    Ok(confirmed)
}

/// Finds a booking among the session's confirmed bookings, then the durable store.
pub fn get_by_id(
    session: &Session,
    store: &dyn BookingStore,
    booking_id: &str,
) -> Result<Option<Booking>, BookingError> {
    if let Some(booking) = session.confirmed.iter().find(|b| b.id == booking_id) {
        return Ok(Some(booking.clone()));
    }
    Ok(store.find_by_id(booking_id)?)
}
