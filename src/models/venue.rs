use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Sport {
    Football,
    Pickleball,
    Volleyball,
    Cricket,
    Basketball,
}

impl Sport {
    pub const ALL: [Sport; 5] = [
        Sport::Football,
        Sport::Pickleball,
        Sport::Volleyball,
        Sport::Cricket,
        Sport::Basketball,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Football => "Football",
            Sport::Pickleball => "Pickleball",
            Sport::Volleyball => "Volleyball",
            Sport::Cricket => "Cricket",
            Sport::Basketball => "Basketball",
        }
    }

    /// Case-insensitive; `None` for anything outside the fixed sport set.
    pub fn parse(s: &str) -> Option<Self> {
        Sport::ALL
            .into_iter()
            .find(|sport| sport.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub sport: Sport,
    pub city: String,
    /// Hourly rate per player.
    pub price: f64,
    pub address: String,
    pub description: String,
    pub images: Vec<String>,
    pub amenities: BTreeSet<String>,
    pub rating: f64,
    pub created_at: NaiveDateTime,
}

/// Editable venue fields, used by the admin console for inserts and updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVenue {
    pub name: String,
    pub sport: Sport,
    pub city: String,
    pub price: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: BTreeSet<String>,
    #[serde(default)]
    pub rating: f64,
}

impl NewVenue {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("venue name must not be empty".to_string());
        }
        if self.city.trim().is_empty() {
            return Err("venue city must not be empty".to_string());
        }
        if !(self.price.is_finite() && self.price > 0.0) {
            return Err(format!("venue price must be positive, got {}", self.price));
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(format!("venue rating must be between 0 and 5, got {}", self.rating));
        }
        Ok(())
    }
}

/// Partial venue update. Omitted fields keep the venue's current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VenueEdit {
    pub name: Option<String>,
    pub sport: Option<Sport>,
    pub city: Option<String>,
    pub price: Option<f64>,
    pub address: Option<String>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub amenities: Option<BTreeSet<String>>,
    pub rating: Option<f64>,
}

impl VenueEdit {
    pub fn merge_into(self, current: Venue) -> NewVenue {
        NewVenue {
            name: self.name.unwrap_or(current.name),
            sport: self.sport.unwrap_or(current.sport),
            city: self.city.unwrap_or(current.city),
            price: self.price.unwrap_or(current.price),
            address: self.address.unwrap_or(current.address),
            description: self.description.unwrap_or(current.description),
            images: self.images.unwrap_or(current.images),
            amenities: self.amenities.unwrap_or(current.amenities),
            rating: self.rating.unwrap_or(current.rating),
        }
    }
}
