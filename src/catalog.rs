//! The catalog facade tying storage, normalization, filtering, search,
//! selection, and comparison together. This is the surface the binary (and
//! any embedding caller) talks to.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::compare::{self, ComparisonTable};
use crate::error::CatalogError;
use crate::models::{
    CanonicalComponent, ComponentKind, RawComponent, SearchResult, SpecSet,
};
use crate::normalize;
use crate::pipeline::{self, FilterSort};
use crate::search::{self, SearchScope, SearchSort};
use crate::selection::{ComparisonSelection, SelectionKey};
use crate::store::{ComponentStore, ReviewStore};

/// Per-kind and total record counts.
#[derive(Debug, Clone)]
pub struct CatalogStats {
    pub per_kind: Vec<(ComponentKind, usize)>,
    pub total_components: usize,
    pub total_reviews: usize,
}

/// The catalog core. Cheap to clone; both stores sit behind `Arc`.
#[derive(Clone)]
pub struct Catalog {
    components: Arc<dyn ComponentStore>,
    reviews: Arc<dyn ReviewStore>,
}

impl Catalog {
    pub fn new(components: Arc<dyn ComponentStore>, reviews: Arc<dyn ReviewStore>) -> Self {
        Self {
            components,
            reviews,
        }
    }

    /// List canonical components, filtered and sorted. `kind = None` spans
    /// every kind. The manufacturer filter is pushed down to the store; the
    /// price bucket and sort run in the pipeline.
    pub async fn list_components(
        &self,
        kind: Option<ComponentKind>,
        opts: &FilterSort,
    ) -> Result<Vec<CanonicalComponent>, CatalogError> {
        let kinds: Vec<ComponentKind> = match kind {
            Some(kind) => vec![kind],
            None => ComponentKind::ALL.to_vec(),
        };

        let mut canonical = Vec::new();
        for kind in kinds {
            let raws = self
                .components
                .fetch_all(kind, opts.manufacturer.as_deref())
                .await?;
            for raw in raws {
                canonical.push(self.normalize(&raw).await?);
            }
        }

        Ok(pipeline::apply(&canonical, opts))
    }

    /// One component with its full formatted spec set.
    pub async fn get_component(
        &self,
        kind: ComponentKind,
        id: i64,
    ) -> Result<(CanonicalComponent, SpecSet), CatalogError> {
        let raw = self.fetch_raw(kind, id).await?;
        let canonical = self.normalize(&raw).await?;
        Ok((canonical, normalize::build_spec_set(&raw)))
    }

    /// Distinct manufacturer names across all kinds, sorted. Blank names
    /// are skipped.
    pub async fn list_manufacturers(&self) -> Result<Vec<String>, CatalogError> {
        let mut names = BTreeSet::new();
        for kind in ComponentKind::ALL {
            for raw in self.components.fetch_all(kind, None).await? {
                let name = raw.manufacturer.trim();
                if !name.is_empty() {
                    names.insert(name.to_string());
                }
            }
        }
        Ok(names.into_iter().collect())
    }

    /// Search components and reviews. Never errors; see [`search::search`].
    pub async fn search(
        &self,
        query: &str,
        scope: SearchScope,
        kind: Option<ComponentKind>,
        sort: SearchSort,
    ) -> Vec<SearchResult> {
        search::search(
            self.components.as_ref(),
            self.reviews.as_ref(),
            query,
            scope,
            kind,
            sort,
        )
        .await
    }

    /// Search suggestions. Never errors; see [`search::suggestions`].
    pub async fn suggestions(&self, limit: usize) -> Vec<String> {
        search::suggestions(self.components.as_ref(), limit).await
    }

    /// Resolve a key against storage and add the component to a selection.
    pub async fn selection_add(
        &self,
        selection: &mut ComparisonSelection,
        key: SelectionKey,
    ) -> Result<(), CatalogError> {
        let raw = self.fetch_raw(key.kind, key.id).await?;
        let canonical = self.normalize(&raw).await?;
        selection.insert(&canonical)
    }

    /// Build the aligned comparison table for a selection of 2-3 components.
    pub async fn compare(
        &self,
        selection: &ComparisonSelection,
    ) -> Result<ComparisonTable, CatalogError> {
        let Some(kind) = selection.kind().filter(|_| selection.len() >= 2) else {
            return Err(CatalogError::InsufficientSelection(selection.len()));
        };

        let mut raws = Vec::with_capacity(selection.len());
        for entry in selection.entries() {
            raws.push(self.fetch_raw(entry.key.kind, entry.key.id).await?);
        }
        Ok(compare::build_table(kind, &raws))
    }

    /// Up to `limit` other components of the same kind from the same
    /// manufacturer, in name order.
    pub async fn similar_components(
        &self,
        kind: ComponentKind,
        id: i64,
        limit: usize,
    ) -> Result<Vec<CanonicalComponent>, CatalogError> {
        let raw = self.fetch_raw(kind, id).await?;

        // exact manufacturer match; the store's substring filter is too loose
        let mut canonical = Vec::new();
        for other in self.components.fetch_all(kind, None).await? {
            if other.id != id && other.manufacturer == raw.manufacturer {
                canonical.push(self.normalize(&other).await?);
            }
        }

        let mut out = pipeline::apply(&canonical, &FilterSort::default());
        out.truncate(limit);
        Ok(out)
    }

    /// Component counts per kind plus the published review total.
    pub async fn stats(&self) -> Result<CatalogStats, CatalogError> {
        let mut per_kind = Vec::new();
        let mut total_components = 0;
        for kind in ComponentKind::ALL {
            let count = self.components.fetch_all(kind, None).await?.len();
            total_components += count;
            per_kind.push((kind, count));
        }

        // an empty query contains-matches every published review
        let total_reviews = self.reviews.search_published_reviews("", None).await?.len();

        Ok(CatalogStats {
            per_kind,
            total_components,
            total_reviews,
        })
    }

    async fn fetch_raw(&self, kind: ComponentKind, id: i64) -> Result<RawComponent, CatalogError> {
        self.components
            .fetch_by_id(kind, id)
            .await?
            .ok_or(CatalogError::NotFound { kind, id })
    }

    async fn normalize(&self, raw: &RawComponent) -> Result<CanonicalComponent, CatalogError> {
        let reviews_count = self.components.count_reviews_for(raw.kind(), raw.id).await?;
        normalize::normalize(raw, reviews_count)
    }
}
