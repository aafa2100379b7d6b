pub mod booking;
pub mod session;
pub mod slot;
pub mod team;
pub mod venue;

pub use booking::{Booking, BookingStatus, PaymentMethod};
pub use session::Session;
pub use slot::TimeSlot;
pub use team::{NewTeam, SkillLevel, Team};
pub use venue::{NewVenue, Sport, Venue, VenueEdit};
