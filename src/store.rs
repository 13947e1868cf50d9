//! Storage and review collaborator traits, plus the bundled JSON store.
//!
//! The catalog core never touches persistence directly — it issues abstract
//! fetch-by-kind and fetch-by-id queries through these traits. [`JsonStore`]
//! is the implementation shipped with the binary: a whole catalog loaded
//! from one JSON file, standing in for whatever datastore a deployment
//! plugs in.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{ComponentKind, RawComponent, ReviewRecord};

/// Read access to component records, per kind.
#[async_trait]
pub trait ComponentStore: Send + Sync {
    /// All records of one kind, optionally narrowed by a case-insensitive
    /// manufacturer substring match.
    async fn fetch_all(
        &self,
        kind: ComponentKind,
        manufacturer: Option<&str>,
    ) -> Result<Vec<RawComponent>>;

    /// One record by kind and id, or `None` when absent.
    async fn fetch_by_id(&self, kind: ComponentKind, id: i64) -> Result<Option<RawComponent>>;

    /// Number of published reviews bound to one component.
    async fn count_reviews_for(&self, kind: ComponentKind, id: i64) -> Result<i64>;
}

/// Read access to published reviews.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Published reviews whose title or summary contains the query,
    /// case-insensitively, optionally narrowed to one kind. An empty query
    /// matches every published review.
    async fn search_published_reviews(
        &self,
        query: &str,
        kind: Option<ComponentKind>,
    ) -> Result<Vec<ReviewRecord>>;
}

/// A review row as stored in the catalog file. Carries the component
/// binding and publication flag that the collaborator-facing
/// [`ReviewRecord`] does not expose.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredReview {
    pub kind: ComponentKind,
    pub component_id: i64,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub rating: u8,
    pub date: NaiveDate,
    #[serde(default = "default_published")]
    pub is_published: bool,
}

fn default_published() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    components: Vec<RawComponent>,
    #[serde(default)]
    reviews: Vec<StoredReview>,
}

/// In-memory catalog loaded from a JSON file.
pub struct JsonStore {
    components: Vec<RawComponent>,
    reviews: Vec<StoredReview>,
}

impl JsonStore {
    pub fn new(components: Vec<RawComponent>, reviews: Vec<StoredReview>) -> Self {
        Self {
            components,
            reviews,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        let file: CatalogFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;
        Ok(Self::new(file.components, file.reviews))
    }
}

#[async_trait]
impl ComponentStore for JsonStore {
    async fn fetch_all(
        &self,
        kind: ComponentKind,
        manufacturer: Option<&str>,
    ) -> Result<Vec<RawComponent>> {
        let needle = manufacturer.map(str::to_lowercase);
        Ok(self
            .components
            .iter()
            .filter(|c| c.kind() == kind)
            .filter(|c| match &needle {
                Some(m) => c.manufacturer.to_lowercase().contains(m),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn fetch_by_id(&self, kind: ComponentKind, id: i64) -> Result<Option<RawComponent>> {
        Ok(self
            .components
            .iter()
            .find(|c| c.kind() == kind && c.id == id)
            .cloned())
    }

    async fn count_reviews_for(&self, kind: ComponentKind, id: i64) -> Result<i64> {
        Ok(self
            .reviews
            .iter()
            .filter(|r| r.is_published && r.kind == kind && r.component_id == id)
            .count() as i64)
    }
}

#[async_trait]
impl ReviewStore for JsonStore {
    async fn search_published_reviews(
        &self,
        query: &str,
        kind: Option<ComponentKind>,
    ) -> Result<Vec<ReviewRecord>> {
        let needle = query.to_lowercase();
        Ok(self
            .reviews
            .iter()
            .filter(|r| r.is_published)
            .filter(|r| kind.map_or(true, |k| r.kind == k))
            .filter(|r| {
                r.title.to_lowercase().contains(&needle)
                    || r.summary.to_lowercase().contains(&needle)
            })
            .map(|r| ReviewRecord {
                title: r.title.clone(),
                summary: r.summary.clone(),
                rating: r.rating,
                date: r.date,
                kind: r.kind,
            })
            .collect())
    }
}
