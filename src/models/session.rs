use crate::models::Booking;

/// Per-user booking state: at most one draft plus the bookings confirmed
/// during this session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user_id: String,
    pub draft: Option<Booking>,
    pub confirmed: Vec<Booking>,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            draft: None,
            confirmed: Vec::new(),
        }
    }
}
