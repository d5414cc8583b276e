use crate::{AppError, Result};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

/// A JSON object whose key order is kept as written in the document.
/// Repeated keys are rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct Ordered<V>(pub Vec<(String, V)>);

impl<V> Ordered<V> {
    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V: Serialize> Serialize for Ordered<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Ordered<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct OrderedVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedVisitor<V> {
            type Value = Ordered<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, V)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((k, v)) = access.next_entry::<String, V>()? {
                    if entries.iter().any(|(seen, _)| *seen == k) {
                        return Err(de::Error::custom(format!("duplicate key '{}'", k)));
                    }
                    entries.push((k, v));
                }
                Ok(Ordered(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor(PhantomData))
    }
}

/// The on-disk dataset document, served back as-is by `/sample-data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub markets: Vec<String>,
    #[serde(default)]
    pub markets_meta: Map<String, Value>,
    pub data: Ordered<Ordered<Vec<f64>>>,
    #[serde(default)]
    pub items_meta: Map<String, Value>,
    pub dates: Vec<String>,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl Dataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::DatasetLoad(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let dataset = Self::from_json(&raw)?;

        tracing::info!(
            "Loaded dataset from {}: {} markets, {} dates",
            path.display(),
            dataset.markets.len(),
            dataset.dates.len()
        );
        Ok(dataset)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(raw)
            .map_err(|e| AppError::DatasetLoad(format!("Invalid dataset document: {}", e)))?;
        dataset.validate()?;
        Ok(dataset)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for market in &self.markets {
            if !seen.insert(market.as_str()) {
                return Err(AppError::DatasetLoad(format!("Duplicate market '{}'", market)));
            }
            if self.data.get(market).is_none() {
                return Err(AppError::DatasetLoad(format!("Market '{}' has no price data", market)));
            }
        }

        for (market, commodities) in self.data.iter() {
            if !seen.contains(market) {
                return Err(AppError::DatasetLoad(format!(
                    "Price data for unlisted market '{}'",
                    market
                )));
            }
            for (commodity, prices) in commodities.iter() {
                if prices.len() != self.dates.len() {
                    return Err(AppError::DatasetLoad(format!(
                        "{}/{} has {} prices but {} dates",
                        market,
                        commodity,
                        prices.len(),
                        self.dates.len()
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn market_exists(&self, market: &str) -> bool {
        self.data.get(market).is_some()
    }

    pub fn commodities_for(&self, market: &str) -> Result<Vec<String>> {
        let commodities = self.market(market)?;
        Ok(commodities.keys().map(str::to_string).collect())
    }

    pub fn prices_for(&self, market: &str, commodity: &str) -> Result<&[f64]> {
        self.market(market)?
            .get(commodity)
            .map(Vec::as_slice)
            .ok_or_else(|| AppError::NotFound(format!("Commodity not found: {}", commodity)))
    }

    pub fn market_meta(&self, market: &str) -> Option<&Value> {
        self.markets_meta.get(market)
    }

    pub fn item_meta(&self, commodity: &str) -> Option<&Value> {
        self.items_meta.get(commodity)
    }

    /// Currency from `meta.currency`, if the document carries one.
    pub fn currency(&self) -> Option<&str> {
        self.meta.get("currency").and_then(Value::as_str)
    }

    fn market(&self, market: &str) -> Result<&Ordered<Vec<f64>>> {
        self.data
            .get(market)
            .ok_or_else(|| AppError::NotFound(format!("Market not found: {}", market)))
    }
}
