use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;
use chrono::NaiveDate;
use rusqlite::Connection;

use super::{BookingStore, VenueSource};
use crate::db::queries;
use crate::models::{Booking, BookingStatus, NewVenue, Venue};

/// Venue source and booking store over one shared SQLite connection.
#[derive(Clone)]
pub struct SqliteStore {
    db: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn new(db: Arc<Mutex<Connection>>) -> Self {
        Self { db }
    }

    fn conn(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.db
            .lock()
            .map_err(|_| anyhow!("database connection lock poisoned"))
    }
}

impl VenueSource for SqliteStore {
    fn list_venues(&self) -> anyhow::Result<Vec<Venue>> {
        queries::list_venues(&*self.conn()?)
    }

    fn get_venue(&self, id: &str) -> anyhow::Result<Option<Venue>> {
        queries::get_venue(&*self.conn()?, id)
    }

    fn insert_venue(&self, venue: &Venue) -> anyhow::Result<()> {
        queries::insert_venue(&*self.conn()?, venue)
    }

    fn update_venue(&self, id: &str, venue: &NewVenue) -> anyhow::Result<bool> {
        queries::update_venue(&*self.conn()?, id, venue)
    }

    fn delete_venue(&self, id: &str) -> anyhow::Result<bool> {
        queries::delete_venue(&*self.conn()?, id)
    }
}

impl BookingStore for SqliteStore {
    fn append(&self, booking: &Booking) -> anyhow::Result<()> {
        queries::insert_booking(&*self.conn()?, booking)
    }

    fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Booking>> {
        queries::get_booking_by_id(&*self.conn()?, id)
    }

    fn find_all(&self, status: Option<BookingStatus>, limit: i64) -> anyhow::Result<Vec<Booking>> {
        queries::get_all_bookings(&*self.conn()?, status, limit)
    }

    fn list_by_user(&self, user_id: &str) -> anyhow::Result<Vec<Booking>> {
        queries::get_bookings_for_user(&*self.conn()?, user_id)
    }

    fn booked_hours(&self, venue_id: &str, date: &NaiveDate) -> anyhow::Result<Vec<u32>> {
        queries::get_booked_hours(&*self.conn()?, venue_id, date)
    }

    fn update_status(&self, id: &str, status: BookingStatus) -> anyhow::Result<bool> {
        queries::update_booking_status(&*self.conn()?, id, status)
    }
}
