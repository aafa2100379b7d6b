use chrono::NaiveDate;

use crate::models::TimeSlot;
use crate::services::store::BookingStore;

/// The 16 hourly slots (06:00 to 22:00) for a venue on a date. A slot is
/// available unless a non-cancelled booking already holds that hour.
pub fn generate(
    store: &dyn BookingStore,
    venue_id: &str,
    date: &NaiveDate,
) -> anyhow::Result<Vec<TimeSlot>> {
    let booked = store.booked_hours(venue_id, date)?;
    Ok(slots_excluding(&booked))
}

pub fn slots_excluding(booked_hours: &[u32]) -> Vec<TimeSlot> {
    TimeSlot::hours()
        .filter_map(|hour| TimeSlot::for_hour(hour, !booked_hours.contains(&hour)))
        .collect()
}

/// The slot at `hour` with its current availability, or `None` outside opening hours.
pub fn slot_at(
    store: &dyn BookingStore,
    venue_id: &str,
    date: &NaiveDate,
    hour: u32,
) -> anyhow::Result<Option<TimeSlot>> {
    Ok(generate(store, venue_id, date)?
        .into_iter()
        .find(|slot| slot.hour == hour))
}
