use super::money::NightlyRate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Apartment,
    Villa,
    Studio,
    House,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy, Default)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A bookable listing as supplied by the property catalog.
///
/// Read-only for the whole booking flow. The wizard only looks at the
/// nightly rate, name, location and image.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Property {
    pub id: String,
    pub name: String,
    pub location: String,
    pub price_per_night: NightlyRate,
    pub img_url: String,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub coordinates: Coordinates,
}
