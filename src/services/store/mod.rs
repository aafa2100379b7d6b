pub mod sqlite;

use chrono::NaiveDate;

use crate::models::{Booking, BookingStatus, NewVenue, Venue};

/// Where venue records come from. The booking core only reads through `list_venues`;
/// the mutating calls exist for the admin console.
pub trait VenueSource: Send + Sync {
    fn list_venues(&self) -> anyhow::Result<Vec<Venue>>;
    fn get_venue(&self, id: &str) -> anyhow::Result<Option<Venue>>;
    fn insert_venue(&self, venue: &Venue) -> anyhow::Result<()>;
    fn update_venue(&self, id: &str, venue: &NewVenue) -> anyhow::Result<bool>;
    fn delete_venue(&self, id: &str) -> anyhow::Result<bool>;
}

/// Durable table of finalized bookings.
pub trait BookingStore: Send + Sync {
    fn append(&self, booking: &Booking) -> anyhow::Result<()>;
    fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Booking>>;
    fn find_all(&self, status: Option<BookingStatus>, limit: i64) -> anyhow::Result<Vec<Booking>>;
    fn list_by_user(&self, user_id: &str) -> anyhow::Result<Vec<Booking>>;
    /// Hours with a non-cancelled booking for the venue on that date.
    fn booked_hours(&self, venue_id: &str, date: &NaiveDate) -> anyhow::Result<Vec<u32>>;
    fn update_status(&self, id: &str, status: BookingStatus) -> anyhow::Result<bool>;
}
