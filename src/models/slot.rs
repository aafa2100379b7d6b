use serde::{Deserialize, Serialize};

/// First bookable hour of the day (inclusive).
pub const OPENING_HOUR: u32 = 6;
/// Closing hour (exclusive): the last slot starts at 21:00.
pub const CLOSING_HOUR: u32 = 22;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    pub id: String,
    pub hour: u32,
    pub start_time: String,
    pub end_time: String,
    pub is_available: bool,
}

impl TimeSlot {
    /// One-hour slot `[hour, hour + 1)`. `None` outside opening hours.
    pub fn for_hour(hour: u32, is_available: bool) -> Option<Self> {
        if !(OPENING_HOUR..CLOSING_HOUR).contains(&hour) {
            return None;
        }
        Some(Self {
            id: format!("slot-{hour}"),
            hour,
            start_time: format!("{hour}:00"),
            end_time: format!("{}:00", hour + 1),
            is_available,
        })
    }

    pub fn hours() -> std::ops::Range<u32> {
        OPENING_HOUR..CLOSING_HOUR
    }
}
