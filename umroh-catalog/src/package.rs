use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use umroh_core::{CoreError, CoreResult};
use uuid::Uuid;

/// Package types in the catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    Umrah,
    Tour,
}

impl PackageType {
    pub fn as_str(self) -> &'static str {
        match self {
            PackageType::Umrah => "umrah",
            PackageType::Tour => "tour",
        }
    }
}

impl FromStr for PackageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "umrah" => Ok(PackageType::Umrah),
            "tour" => Ok(PackageType::Tour),
            other => Err(format!("unknown package_type `{}`, expected `umrah` or `tour`", other)),
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A purchasable travel package. Prices are whole rupiah.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Package {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: i64,
    /// Free-form label such as "11 Hari" or "3 Hari 2 Malam".
    pub duration: String,
    pub package_type: PackageType,
    pub departure_city: String,
    pub departure_date: String,
    pub airline: String,
    pub hotel: String,
    pub hotel_rating: i32,
    pub facilities: Vec<String>,
    pub itinerary: Vec<String>,
    pub image_url: String,
    pub availability: i32,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating a package.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPackage {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub duration: String,
    pub package_type: PackageType,
    pub departure_city: String,
    pub departure_date: String,
    pub airline: String,
    pub hotel: String,
    pub hotel_rating: i32,
    pub facilities: Vec<String>,
    pub itinerary: Vec<String>,
    pub image_url: String,
    pub availability: i32,
}

impl NewPackage {
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ValidationError("name must not be empty".to_string()));
        }
        if self.price < 0 {
            return Err(CoreError::ValidationError("price must not be negative".to_string()));
        }
        if self.availability < 0 {
            return Err(CoreError::ValidationError("availability must not be negative".to_string()));
        }
        if !(0..=5).contains(&self.hotel_rating) {
            return Err(CoreError::ValidationError("hotel_rating must be between 0 and 5".to_string()));
        }
        Ok(())
    }

    pub fn into_package(self, created_at: DateTime<Utc>) -> Package {
        Package {
            id: Uuid::new_v4(),
            name: self.name,
            description: self.description,
            price: self.price,
            duration: self.duration,
            package_type: self.package_type,
            departure_city: self.departure_city,
            departure_date: self.departure_date,
            airline: self.airline,
            hotel: self.hotel,
            hotel_rating: self.hotel_rating,
            facilities: self.facilities,
            itinerary: self.itinerary,
            image_url: self.image_url,
            availability: self.availability,
            created_at,
        }
    }
}
