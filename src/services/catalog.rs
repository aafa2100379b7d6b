use crate::models::{Sport, Venue};
use crate::services::store::VenueSource;

/// Read-only snapshot of the venue set. Refreshing builds a new catalog and
/// swaps it in whole; nothing mutates a loaded catalog.
#[derive(Debug, Clone, Default)]
pub struct VenueCatalog {
    venues: Vec<Venue>,
}

impl VenueCatalog {
    pub fn new(venues: Vec<Venue>) -> Self {
        Self { venues }
    }

    pub fn load(source: &dyn VenueSource) -> anyhow::Result<Self> {
        let venues = source.list_venues()?;
        tracing::debug!(count = venues.len(), "loaded venue catalog");
        Ok(Self::new(venues))
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Venue> {
        self.venues.iter().find(|v| v.id == id)
    }

    /// Venues matching every supplied predicate, in catalog order.
    pub fn filter(&self, sport: Option<Sport>, city: Option<&str>) -> Vec<&Venue> {
        self.venues
            .iter()
            .filter(|v| sport.map_or(true, |s| v.sport == s))
            .filter(|v| city.map_or(true, |c| v.city == c))
            .collect()
    }
}
