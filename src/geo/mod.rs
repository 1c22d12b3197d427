//! GeoJSON feature collection documents.
//!
//! The geographic datasets (cities, mountains) are stored as GeoJSON-like
//! point collections: `coordinates` is always `[longitude, latitude]`, and
//! `properties` is an open string-keyed map whose required keys are a matter
//! of convention between the site and its admin editor, not schema.
//!
//! Loading returns a typed `Corrupt` error on malformed JSON;
//! [`load_or_default`] is the explicit substitute-an-empty-document step for
//! callers that prefer recovery over failure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use waypoint_common::{Error, Result};

/// A collection of point features.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self {
            kind: "FeatureCollection".to_string(),
            features: Vec::new(),
        }
    }
}

impl FeatureCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A single point feature with an open property map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: PointGeometry,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// Point geometry. Coordinates are `[longitude, latitude]`, never the reverse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

impl Feature {
    /// Create a point feature with no properties.
    pub fn point(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: "Feature".to_string(),
            geometry: PointGeometry {
                kind: "Point".to_string(),
                coordinates: [longitude, latitude],
            },
            properties: Map::new(),
        }
    }

    pub fn longitude(&self) -> f64 {
        self.geometry.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.geometry.coordinates[1]
    }

    /// Get a property value.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Get a property as a string slice, if it is a string.
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    /// Set a property value, replacing any existing one.
    pub fn set_property<V: Into<Value>>(&mut self, key: &str, value: V) {
        self.properties.insert(key.to_string(), value.into());
    }
}

/// Load a feature collection from a file.
///
/// Returns `NotFound` when the file is absent, `Io` when it cannot be read,
/// and `Corrupt` when the content is not valid JSON of the expected shape.
pub fn load(path: &Path) -> Result<FeatureCollection> {
    if !path.exists() {
        return Err(Error::not_found(format!(
            "feature file does not exist: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| Error::corrupt(format!("{}: {}", path.display(), e)))
}

/// Load a feature collection, substituting an empty one on any failure.
///
/// The substitution is deliberate and logged; a corrupt dataset renders as an
/// empty map rather than taking the site down.
pub fn load_or_default(path: &Path) -> FeatureCollection {
    match load(path) {
        Ok(collection) => collection,
        Err(e) => {
            tracing::warn!("substituting empty collection for {}: {}", path.display(), e);
            FeatureCollection::default()
        }
    }
}

/// Save a feature collection as pretty-printed UTF-8 JSON (two-space indent).
///
/// This is the exact on-disk shape the admin editor and the map front end
/// read and write.
pub fn save(path: &Path, collection: &FeatureCollection) -> Result<()> {
    let json = serde_json::to_string_pretty(collection)
        .map_err(|e| Error::corrupt(format!("failed to serialize collection: {}", e)))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Stamp every feature's properties with an ISO `date` value.
///
/// Returns the number of features stamped.
pub fn stamp_date(collection: &mut FeatureCollection, date: NaiveDate) -> usize {
    let stamp = date.format("%Y-%m-%d").to_string();
    for feature in &mut collection.features {
        feature.set_property("date", stamp.clone());
    }
    collection.features.len()
}

/// Find a feature by string property, case-insensitively.
///
/// Returns `(latitude, longitude)` — the order map consumers expect, flipped
/// from the stored `[lon, lat]` pair.
pub fn find_point(collection: &FeatureCollection, key: &str, value: &str) -> Option<(f64, f64)> {
    collection
        .features
        .iter()
        .find(|feature| {
            feature
                .property_str(key)
                .map(|v| v.eq_ignore_ascii_case(value))
                .unwrap_or(false)
        })
        .map(|feature| (feature.latitude(), feature.longitude()))
}
