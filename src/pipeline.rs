//! The filter/sort pipeline for canonical component collections.
//!
//! Filters are pure predicates; sorting is stable. The input list is never
//! mutated — the pipeline returns a new ordered list.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::CanonicalComponent;

/// The five fixed price buckets. A bucket never matches a component with an
/// unknown (zero or negative) price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceBucket {
    UpTo2000,
    From2000To5000,
    From5000To10000,
    From10000To20000,
    Above20000,
}

impl PriceBucket {
    /// Exclusive lower bound and inclusive upper bound, if any.
    pub fn bounds(&self) -> (f64, Option<f64>) {
        match self {
            PriceBucket::UpTo2000 => (0.0, Some(2000.0)),
            PriceBucket::From2000To5000 => (2000.0, Some(5000.0)),
            PriceBucket::From5000To10000 => (5000.0, Some(10_000.0)),
            PriceBucket::From10000To20000 => (10_000.0, Some(20_000.0)),
            PriceBucket::Above20000 => (20_000.0, None),
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        let (low, high) = self.bounds();
        price > low && high.map_or(true, |h| price <= h)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceBucket::UpTo2000 => "0-2000",
            PriceBucket::From2000To5000 => "2000-5000",
            PriceBucket::From5000To10000 => "5000-10000",
            PriceBucket::From10000To20000 => "10000-20000",
            PriceBucket::Above20000 => "20000+",
        }
    }
}

impl FromStr for PriceBucket {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0-2000" => Ok(PriceBucket::UpTo2000),
            "2000-5000" => Ok(PriceBucket::From2000To5000),
            "5000-10000" => Ok(PriceBucket::From5000To10000),
            "10000-20000" => Ok(PriceBucket::From10000To20000),
            "20000+" => Ok(PriceBucket::Above20000),
            other => anyhow::bail!(
                "unknown price range: '{}' (use 0-2000, 2000-5000, 5000-10000, 10000-20000, 20000+)",
                other
            ),
        }
    }
}

/// Listing sort order. Defaults to case-insensitive name order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "price_asc" => Ok(SortKey::PriceAsc),
            "price_desc" => Ok(SortKey::PriceDesc),
            "rating" | "rating_desc" => Ok(SortKey::RatingDesc),
            other => anyhow::bail!(
                "unknown sort key: '{}' (use name, price_asc, price_desc, rating)",
                other
            ),
        }
    }
}

/// Filter and sort options applied by [`apply`].
#[derive(Debug, Clone, Default)]
pub struct FilterSort {
    /// Case-insensitive substring match on the manufacturer.
    pub manufacturer: Option<String>,
    pub price_bucket: Option<PriceBucket>,
    pub sort: SortKey,
}

/// Apply the filter conjunction and sort order, returning a new list.
pub fn apply(components: &[CanonicalComponent], opts: &FilterSort) -> Vec<CanonicalComponent> {
    let manufacturer = opts.manufacturer.as_deref().map(str::to_lowercase);

    let mut out: Vec<CanonicalComponent> = components
        .iter()
        .filter(|c| match &manufacturer {
            Some(m) => c.manufacturer.to_lowercase().contains(m),
            None => true,
        })
        .filter(|c| match opts.price_bucket {
            Some(bucket) => bucket.contains(c.price),
            None => true,
        })
        .cloned()
        .collect();

    sort(&mut out, opts.sort);
    out
}

/// Stable in-place sort. Unknown prices and ratings order as zero.
pub fn sort(components: &mut [CanonicalComponent], key: SortKey) {
    match key {
        SortKey::Name => {
            components.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
        SortKey::PriceAsc => {
            components.sort_by(|a, b| a.price.max(0.0).total_cmp(&b.price.max(0.0)))
        }
        SortKey::PriceDesc => {
            components.sort_by(|a, b| b.price.max(0.0).total_cmp(&a.price.max(0.0)))
        }
        SortKey::RatingDesc => components.sort_by(|a, b| b.rating.cmp(&a.rating)),
    }
}
