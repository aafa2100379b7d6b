use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{
    Booking, BookingStatus, NewVenue, PaymentMethod, SkillLevel, Sport, Team, TimeSlot, Venue,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

// ── Venues ──

const VENUE_COLUMNS: &str =
    "id, name, sport, city, price, address, description, images, amenities, rating, created_at";

pub fn list_venues(conn: &Connection) -> anyhow::Result<Vec<Venue>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {VENUE_COLUMNS} FROM venues ORDER BY created_at DESC, rowid DESC"
    ))?;

    let rows = stmt.query_map([], |row| Ok(parse_venue_row(row)))?;

    let mut venues = vec![];
    for row in rows {
        venues.push(row??);
    }
    Ok(venues)
}

pub fn get_venue(conn: &Connection, id: &str) -> anyhow::Result<Option<Venue>> {
    let venue = conn
        .query_row(
            &format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = ?1"),
            params![id],
            |row| Ok(parse_venue_row(row)),
        )
        .optional()?;

    venue.transpose()
}

pub fn insert_venue(conn: &Connection, venue: &Venue) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO venues (id, name, sport, city, price, address, description, images, amenities, rating, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            venue.id,
            venue.name,
            venue.sport.as_str(),
            venue.city,
            venue.price,
            venue.address,
            venue.description,
            serde_json::to_string(&venue.images)?,
            serde_json::to_string(&venue.amenities)?,
            venue.rating,
            venue.created_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn update_venue(conn: &Connection, id: &str, venue: &NewVenue) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE venues SET
           name = ?1, sport = ?2, city = ?3, price = ?4, address = ?5,
           description = ?6, images = ?7, amenities = ?8, rating = ?9
         WHERE id = ?10",
        params![
            venue.name,
            venue.sport.as_str(),
            venue.city,
            venue.price,
            venue.address,
            venue.description,
            serde_json::to_string(&venue.images)?,
            serde_json::to_string(&venue.amenities)?,
            venue.rating,
            id,
        ],
    )?;
    Ok(count > 0)
}

pub fn delete_venue(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM venues WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

fn parse_venue_row(row: &rusqlite::Row) -> anyhow::Result<Venue> {
    let sport_str: String = row.get(2)?;
    let images_json: String = row.get(7)?;
    let amenities_json: String = row.get(8)?;
    let created_at_str: String = row.get(10)?;

    let sport = Sport::parse(&sport_str)
        .with_context(|| format!("unknown sport in venues table: {sport_str}"))?;

    Ok(Venue {
        id: row.get(0)?,
        name: row.get(1)?,
        sport,
        city: row.get(3)?,
        price: row.get(4)?,
        address: row.get(5)?,
        description: row.get(6)?,
        images: serde_json::from_str(&images_json).unwrap_or_default(),
        amenities: serde_json::from_str(&amenities_json).unwrap_or_default(),
        rating: row.get(9)?,
        created_at: parse_timestamp(&created_at_str),
    })
}

// ── Bookings ──

const BOOKING_COLUMNS: &str = "id, venue_id, user_id, date, slot_hour, slot_available, total_price, \
     payment_method, status, player_count, booking_name, phone_number, created_at";

pub fn insert_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO bookings (id, venue_id, user_id, date, slot_hour, slot_available, total_price,
                               payment_method, status, player_count, booking_name, phone_number, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            booking.id,
            booking.venue_id,
            booking.user_id,
            booking.date.format(DATE_FORMAT).to_string(),
            booking.time_slot.hour,
            booking.time_slot.is_available as i32,
            booking.total_price,
            booking.payment_method.map(|m| m.as_str()),
            booking.status.as_str(),
            booking.player_count,
            booking.booking_name,
            booking.phone_number,
            booking.created_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_booking_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let booking = conn
        .query_row(
            &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
            params![id],
            |row| Ok(parse_booking_row(row)),
        )
        .optional()?;

    booking.transpose()
}

pub fn get_all_bookings(
    conn: &Connection,
    status_filter: Option<BookingStatus>,
    limit: i64,
) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings
         WHERE (?1 IS NULL OR status = ?1)
         ORDER BY created_at DESC, rowid DESC LIMIT ?2"
    ))?;

    let rows = stmt.query_map(
        params![status_filter.map(|s| s.as_str()), limit],
        |row| Ok(parse_booking_row(row)),
    )?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn get_bookings_for_user(conn: &Connection, user_id: &str) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE user_id = ?1 ORDER BY date ASC, slot_hour ASC"
    ))?;

    let rows = stmt.query_map(params![user_id], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

/// Hours already taken at a venue on a date. Cancelled bookings free their slot.
pub fn get_booked_hours(
    conn: &Connection,
    venue_id: &str,
    date: &NaiveDate,
) -> anyhow::Result<Vec<u32>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT slot_hour FROM bookings
         WHERE venue_id = ?1 AND date = ?2 AND status != 'cancelled'
         ORDER BY slot_hour ASC",
    )?;

    let rows = stmt.query_map(
        params![venue_id, date.format(DATE_FORMAT).to_string()],
        |row| row.get::<_, u32>(0),
    )?;

    let mut hours = vec![];
    for row in rows {
        hours.push(row?);
    }
    Ok(hours)
}

pub fn update_booking_status(
    conn: &Connection,
    id: &str,
    status: BookingStatus,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE bookings SET status = ?1 WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(count > 0)
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let date_str: String = row.get(3)?;
    let slot_hour: u32 = row.get(4)?;
    let slot_available: bool = row.get::<_, i32>(5)? != 0;
    let payment_method: Option<String> = row.get(7)?;
    let status_str: String = row.get(8)?;
    let created_at_str: String = row.get(12)?;

    let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
        .with_context(|| format!("invalid booking date: {date_str}"))?;
    let time_slot = TimeSlot::for_hour(slot_hour, slot_available)
        .with_context(|| format!("booking slot hour out of range: {slot_hour}"))?;
    let status = BookingStatus::parse(&status_str)
        .with_context(|| format!("unknown booking status: {status_str}"))?;
    let payment_method = payment_method
        .map(|m| {
            PaymentMethod::parse(&m).with_context(|| format!("unknown payment method: {m}"))
        })
        .transpose()?;

    Ok(Booking {
        id: row.get(0)?,
        venue_id: row.get(1)?,
        user_id: row.get(2)?,
        date,
        time_slot,
        total_price: row.get(6)?,
        payment_method,
        status,
        player_count: row.get(9)?,
        booking_name: row.get(10)?,
        phone_number: row.get(11)?,
        created_at: parse_timestamp(&created_at_str),
    })
}

// ── Dashboard ──

pub struct DashboardStats {
    pub venue_count: i64,
    pub booking_count: i64,
    pub user_count: i64,
}

pub fn get_dashboard_stats(conn: &Connection) -> anyhow::Result<DashboardStats> {
    let venue_count: i64 = conn.query_row("SELECT COUNT(*) FROM venues", [], |row| row.get(0))?;
    let booking_count: i64 =
        conn.query_row("SELECT COUNT(*) FROM bookings", [], |row| row.get(0))?;
    let user_count: i64 = conn.query_row(
        "SELECT COUNT(DISTINCT user_id) FROM bookings",
        [],
        |row| row.get(0),
    )?;

    Ok(DashboardStats {
        venue_count,
        booking_count,
        user_count,
    })
}

// ── Teams ──

const TEAM_COLUMNS: &str = "id, name, sport, city, description, created_by, created_at, \
     max_players, skill_level, practice_schedule, contact_email, logo";

pub fn insert_team(conn: &Connection, team: &Team) -> anyhow::Result<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute(
        "INSERT INTO teams (id, name, sport, city, description, created_by, created_at,
                            max_players, skill_level, practice_schedule, contact_email, logo)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            team.id,
            team.name,
            team.sport,
            team.city,
            team.description,
            team.created_by,
            team.created_at.format(TIMESTAMP_FORMAT).to_string(),
            team.max_players,
            team.skill_level.as_str(),
            team.practice_schedule,
            team.contact_email,
            team.logo,
        ],
    )?;

    for (seq, member) in team.members.iter().enumerate() {
        tx.execute(
            "INSERT OR IGNORE INTO team_members (team_id, user_id, joined_seq) VALUES (?1, ?2, ?3)",
            params![team.id, member, seq as i64],
        )?;
    }

    tx.commit()?;
    Ok(())
}

/// Returns false when the user was already a member.
pub fn add_team_member(conn: &Connection, team_id: &str, user_id: &str) -> anyhow::Result<bool> {
    let count = conn.execute(
        "INSERT OR IGNORE INTO team_members (team_id, user_id, joined_seq)
         VALUES (?1, ?2, (SELECT COALESCE(MAX(joined_seq), -1) + 1 FROM team_members WHERE team_id = ?1))",
        params![team_id, user_id],
    )?;
    Ok(count > 0)
}

pub fn get_team(conn: &Connection, id: &str) -> anyhow::Result<Option<Team>> {
    let team = conn
        .query_row(
            &format!("SELECT {TEAM_COLUMNS} FROM teams WHERE id = ?1"),
            params![id],
            |row| Ok(parse_team_row(row)),
        )
        .optional()?;

    match team {
        Some(team) => {
            let mut team = team?;
            team.members = get_team_members(conn, &team.id)?;
            Ok(Some(team))
        }
        None => Ok(None),
    }
}

pub fn list_teams(conn: &Connection) -> anyhow::Result<Vec<Team>> {
    query_teams(
        conn,
        &format!("SELECT {TEAM_COLUMNS} FROM teams ORDER BY created_at ASC, rowid ASC"),
        params![],
    )
}

pub fn list_teams_for_user(conn: &Connection, user_id: &str) -> anyhow::Result<Vec<Team>> {
    query_teams(
        conn,
        &format!(
            "SELECT {TEAM_COLUMNS} FROM teams
             WHERE id IN (SELECT team_id FROM team_members WHERE user_id = ?1)
             ORDER BY created_at ASC, rowid ASC"
        ),
        params![user_id],
    )
}

fn query_teams(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::types::ToSql],
) -> anyhow::Result<Vec<Team>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, |row| Ok(parse_team_row(row)))?;

    let mut teams = vec![];
    for row in rows {
        let mut team = row??;
        team.members = get_team_members(conn, &team.id)?;
        teams.push(team);
    }
    Ok(teams)
}

fn get_team_members(conn: &Connection, team_id: &str) -> anyhow::Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT user_id FROM team_members WHERE team_id = ?1 ORDER BY joined_seq ASC",
    )?;
    let rows = stmt.query_map(params![team_id], |row| row.get::<_, String>(0))?;

    let mut members = vec![];
    for row in rows {
        members.push(row?);
    }
    Ok(members)
}

fn parse_team_row(row: &rusqlite::Row) -> anyhow::Result<Team> {
    let created_at_str: String = row.get(6)?;
    let skill_level_str: String = row.get(8)?;

    Ok(Team {
        id: row.get(0)?,
        name: row.get(1)?,
        sport: row.get(2)?,
        city: row.get(3)?,
        description: row.get(4)?,
        members: vec![],
        created_by: row.get(5)?,
        created_at: parse_timestamp(&created_at_str),
        max_players: row.get(7)?,
        skill_level: SkillLevel::parse(&skill_level_str),
        practice_schedule: row.get(9)?,
        contact_email: row.get(10)?,
        logo: row.get(11)?,
    })
}

fn parse_timestamp(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).unwrap_or_else(|_| Utc::now().naive_utc())
}
