//! Property snapshots
//!
//! A [`PropertySnapshot`] holds one value for every [`Property`]. It is built
//! wholesale from one fetch and never mutated; the next fetch replaces it.

use anyhow::{bail, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

use crate::property::Property;

/// One value per known property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySnapshot {
    values: BTreeMap<Property, String>,
}

impl PropertySnapshot {
    /// Build a snapshot, rejecting any set that is missing a property
    pub fn from_values(values: BTreeMap<Property, String>) -> Result<Self> {
        let missing: Vec<&str> = Property::ALL
            .iter()
            .filter(|p| !values.contains_key(*p))
            .map(|p| p.key())
            .collect();

        if !missing.is_empty() {
            bail!("Incomplete snapshot, missing: {}", missing.join(", "));
        }

        Ok(Self { values })
    }

    /// Value of a property
    pub fn get(&self, property: Property) -> &str {
        // Construction guarantees every property is present
        self.values.get(&property).map_or("", String::as_str)
    }

    /// Boolean property (`"true"` / `"false"`)
    pub fn flag(&self, property: Property) -> bool {
        self.get(property).trim().eq_ignore_ascii_case("true")
    }

    /// Sound volume in percent
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn volume(&self) -> u8 {
        self.get(Property::SoundVolume)
            .trim()
            .parse::<f64>()
            .map(|v| v.round().clamp(0.0, 100.0) as u8)
            .unwrap_or(0)
    }

    /// Properties and values in property order
    pub fn iter(&self) -> impl Iterator<Item = (Property, &str)> {
        self.values.iter().map(|(p, v)| (*p, v.as_str()))
    }

    /// Snapshot with every value passed through `f`
    pub fn map_values(&self, mut f: impl FnMut(Property, &str) -> String) -> Self {
        let values = self.values.iter().map(|(p, v)| (*p, f(*p, v))).collect();
        Self { values }
    }
}

impl Serialize for PropertySnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (property, value) in &self.values {
            map.serialize_entry(property.key(), value)?;
        }
        map.end()
    }
}
