use serde::de::{Deserializer, Error as DeError};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A day-index -> period-index -> bool availability map, normalized once at
/// load time from loosely typed JSON (keys and values may be malformed;
/// lookup always defaults to available). See `is_available`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    days: BTreeMap<u8, BTreeMap<u32, bool>>,
}

impl Availability {
    pub fn new() -> Self {
        Availability::default()
    }

    /// Marks a single slot, overwriting any previous entry for it.
    pub fn set(&mut self, day: u8, period: u32, available: bool) {
        self.days.entry(day).or_default().insert(period, available);
    }

    /// Missing day, missing period, or a non-boolean source value all
    /// default to available (permissive lookup).
    pub fn is_available(&self, day: u8, period: u32) -> bool {
        self.days
            .get(&day)
            .and_then(|periods| periods.get(&period))
            .copied()
            .unwrap_or(true)
    }

    /// Builds an `Availability` from loosely typed JSON: outer and inner
    /// keys may be numeric or string; malformed keys are dropped (their
    /// slots then default to available through the normal lookup path) and
    /// non-boolean leaf values are dropped for the same reason.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let mut out = Availability::new();
        let Some(outer) = value.as_object() else {
            return out;
        };
        for (day_key, inner) in outer {
            let Ok(day) = day_key.parse::<u8>() else {
                continue;
            };
            let Some(inner_obj) = inner.as_object() else {
                continue;
            };
            for (period_key, leaf) in inner_obj {
                let Ok(period) = period_key.parse::<u32>() else {
                    continue;
                };
                if let Some(b) = leaf.as_bool() {
                    out.set(day, period, b);
                }
            }
        }
        out
    }
}

impl Serialize for Availability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut outer = serializer.serialize_map(Some(self.days.len()))?;
        for (day, periods) in &self.days {
            let inner: BTreeMap<String, bool> = periods
                .iter()
                .map(|(p, b)| (p.to_string(), *b))
                .collect();
            outer.serialize_entry(&day.to_string(), &inner)?;
        }
        outer.end()
    }
}

impl<'de> Deserialize<'de> for Availability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer).map_err(DeError::custom)?;
        Ok(Availability::from_json(&value))
    }
}
