pub mod migrations;
pub mod queries;

use std::collections::BTreeSet;

use anyhow::Context;
use chrono::{Duration, Utc};
use rusqlite::Connection;

use crate::models::{Sport, Venue};

pub fn init_db(path: &str) -> anyhow::Result<Connection> {
    let conn = Connection::open(path).context("failed to open database")?;

    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
        .context("failed to set database pragmas")?;

    migrations::run_migrations(&conn)?;

    Ok(conn)
}

/// Inserts a few demo venues when the venue table is empty. Returns how many were added.
pub fn seed_demo_venues(conn: &Connection) -> anyhow::Result<usize> {
    if !queries::list_venues(conn)?.is_empty() {
        return Ok(0);
    }

    let demo = [
        ("Greenfield Arena", Sport::Football, "Rajkot", 800.0, 4.6),
        ("Smash Point", Sport::Pickleball, "Ahmedabad", 350.0, 4.3),
        ("Beachside Nets", Sport::Volleyball, "Rajkot", 400.0, 4.1),
        ("Willow Grounds", Sport::Cricket, "Ahmedabad", 1200.0, 4.8),
        ("Hoops Hub", Sport::Basketball, "Surat", 500.0, 4.0),
    ];

    let now = Utc::now().naive_utc();
    for (i, (name, sport, city, price, rating)) in demo.iter().enumerate() {
        let venue = Venue {
            id: format!("venue-{}", uuid::Uuid::new_v4()),
            name: name.to_string(),
            sport: *sport,
            city: city.to_string(),
            price: *price,
            address: format!("{name}, {city}"),
            description: format!("{} venue in {city}", sport.as_str()),
            images: vec![],
            amenities: BTreeSet::from(["parking".to_string(), "floodlights".to_string()]),
            rating: *rating,
            created_at: now - Duration::seconds(i as i64),
        };
        queries::insert_venue(conn, &venue)?;
    }

    tracing::info!(count = demo.len(), "seeded demo venues");
    Ok(demo.len())
}
