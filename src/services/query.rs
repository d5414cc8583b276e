use std::cmp::Ordering;
use std::sync::Arc;

use serde_json::Value;

use crate::dataset::Dataset;
use crate::types::{CommoditiesResponse, FeaturedItem, MarketsResponse, PriceSeries};
use crate::Result;

pub const DEFAULT_FEATURED_LIMIT: usize = 6;

/// Read-only queries over the loaded dataset.
pub struct QueryService {
    dataset: Arc<Dataset>,
}

impl QueryService {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn list_markets(&self) -> MarketsResponse {
        MarketsResponse {
            markets: self.dataset.markets.clone(),
            markets_meta: self.dataset.markets_meta.clone(),
        }
    }

    pub fn list_commodities(&self, market: &str) -> Result<CommoditiesResponse> {
        Ok(CommoditiesResponse {
            commodities: self.dataset.commodities_for(market)?,
            items_meta: self.dataset.items_meta.clone(),
        })
    }

    pub fn get_price_series(&self, market: &str, commodity: &str) -> Result<PriceSeries> {
        let prices = self.dataset.prices_for(market, commodity)?;
        let (latest_price, change_percent) = price_movement(prices);

        Ok(PriceSeries {
            market: market.to_string(),
            commodity: commodity.to_string(),
            prices: prices.to_vec(),
            dates: self.dataset.dates.clone(),
            latest_price,
            change_percent,
            meta: self.dataset.meta.clone(),
            market_meta: self.dataset.market_meta(market).cloned(),
            item_meta: self.dataset.item_meta(commodity).cloned(),
        })
    }

    /// Every (market, commodity) pair ranked by absolute change percent,
    /// largest first. Ties keep document order.
    pub fn get_featured(&self, limit: usize, city: Option<&str>) -> Vec<FeaturedItem> {
        let city = city.map(str::trim).filter(|c| !c.is_empty());
        let mut items = Vec::new();

        for (market, commodities) in self.dataset.data.iter() {
            let market_meta = self.dataset.market_meta(market);
            let market_city = market_meta
                .and_then(|m| m.get("city"))
                .and_then(Value::as_str);

            if let Some(wanted) = city {
                match market_city {
                    Some(c) if c.to_lowercase() == wanted.to_lowercase() => {}
                    _ => continue,
                }
            }

            for (commodity, prices) in commodities.iter() {
                let (latest_price, change_percent) = price_movement(prices);
                items.push(FeaturedItem {
                    market: market.to_string(),
                    commodity: commodity.to_string(),
                    city: market_city.map(str::to_string),
                    latest_price,
                    change_percent,
                    market_meta: market_meta.cloned(),
                    item_meta: self.dataset.item_meta(commodity).cloned(),
                });
            }
        }

        // sort_by is stable
        items.sort_by(|a, b| {
            b.change_percent
                .abs()
                .partial_cmp(&a.change_percent.abs())
                .unwrap_or(Ordering::Equal)
        });
        items.truncate(limit);
        items
    }
}

/// Latest price and percent change from first to last. An empty series has
/// no latest price; a zero first price yields a change of 0.
pub fn price_movement(prices: &[f64]) -> (Option<f64>, f64) {
    match (prices.first(), prices.last()) {
        (Some(&first), Some(&last)) => {
            let change = if first == 0.0 {
                0.0
            } else {
                (last - first) / first * 100.0
            };
            (Some(last), change)
        }
        _ => (None, 0.0),
    }
}
