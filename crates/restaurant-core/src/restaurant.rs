//! Restaurant and its optional geographic location.
use crate::error::{RestaurantError, Result};
use crate::kind::{clean_name, EntityKind, Named};
use crate::validation::validate_coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = RestaurantError;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        validate_coordinate(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRestaurant")]
pub struct Restaurant {
    name: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<Coordinate>,
}

#[derive(Deserialize)]
struct RawRestaurant {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    location: Option<Coordinate>,
}

impl TryFrom<RawRestaurant> for Restaurant {
    type Error = RestaurantError;

    fn try_from(raw: RawRestaurant) -> Result<Self> {
        let mut restaurant = Restaurant::new(&raw.name)?.with_description(raw.description);
        restaurant.location = raw.location;
        Ok(restaurant)
    }
}

impl Restaurant {
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            name: clean_name(name)?,
            description: String::new(),
            location: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_location(mut self, location: Coordinate) -> Self {
        self.location = Some(location);
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> Option<Coordinate> {
        self.location
    }

    pub fn set_name(&mut self, value: &str) -> Result<()> {
        self.name = clean_name(value)?;
        Ok(())
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
    }

    pub fn set_location(&mut self, location: Coordinate) {
        self.location = Some(location);
    }
}

impl Named for Restaurant {
    const KIND: EntityKind = EntityKind::Restaurant;

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Restaurant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Restaurant name: {}, Description: {}",
            self.name, self.description
        )?;
        if let Some(location) = &self.location {
            write!(f, ", Location: {}", location)?;
        }
        Ok(())
    }
}
