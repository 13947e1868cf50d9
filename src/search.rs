//! The relevance search engine.
//!
//! Two independent sub-scans — components and published reviews — feed one
//! result stream in the shared [`SearchResult`] shape. A sub-scan that fails
//! against storage contributes zero results instead of aborting the search;
//! the fault is logged and the other scan still answers.

use std::str::FromStr;

use rand::seq::SliceRandom;
use tracing::warn;

use crate::models::{ComponentKind, SearchResult};
use crate::normalize;
use crate::registry;
use crate::store::{ComponentStore, ReviewStore};

/// Appended to sampled suggestions so well-known brands always surface.
const POPULAR_MANUFACTURERS: [&str; 4] = ["AMD", "Intel", "NVIDIA", "Corsair"];

/// Served whole when storage is unavailable.
const FALLBACK_SUGGESTIONS: [&str; 6] = ["AMD", "Intel", "NVIDIA", "Corsair", "MSI", "ASUS"];

/// Which sub-scans feed the result stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchScope {
    #[default]
    All,
    Components,
    Reviews,
}

impl SearchScope {
    fn includes_components(&self) -> bool {
        matches!(self, SearchScope::All | SearchScope::Components)
    }

    fn includes_reviews(&self) -> bool {
        matches!(self, SearchScope::All | SearchScope::Reviews)
    }
}

impl FromStr for SearchScope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(SearchScope::All),
            "components" => Ok(SearchScope::Components),
            "reviews" => Ok(SearchScope::Reviews),
            other => anyhow::bail!(
                "unknown search scope: '{}' (use all, components, reviews)",
                other
            ),
        }
    }
}

/// Result ordering. All sorts are stable, so equal-key results keep their
/// scan order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchSort {
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    Date,
    Rating,
}

impl FromStr for SearchSort {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevance" => Ok(SearchSort::Relevance),
            "price_asc" => Ok(SearchSort::PriceAsc),
            "price_desc" => Ok(SearchSort::PriceDesc),
            "date" => Ok(SearchSort::Date),
            "rating" => Ok(SearchSort::Rating),
            other => anyhow::bail!(
                "unknown search sort: '{}' (use relevance, price_asc, price_desc, date, rating)",
                other
            ),
        }
    }
}

/// Search components and reviews for a query.
///
/// An empty or whitespace-only query is the canonical no-op and returns an
/// empty list, distinct from "no matches".
pub async fn search(
    components: &dyn ComponentStore,
    reviews: &dyn ReviewStore,
    query: &str,
    scope: SearchScope,
    kind: Option<ComponentKind>,
    sort: SearchSort,
) -> Vec<SearchResult> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    if scope.includes_components() {
        results.extend(scan_components(components, query, kind).await);
    }
    if scope.includes_reviews() {
        results.extend(scan_reviews(reviews, query, kind).await);
    }

    sort_results(&mut results, sort);
    results
}

/// Relevance score: exact query occurrences count double, plus one point
/// per occurrence of each query word longer than 2 characters. Applied to
/// each text independently and summed.
pub fn relevance(query: &str, texts: &[&str]) -> u32 {
    let q = query.to_lowercase();
    let words: Vec<&str> = q.split_whitespace().filter(|w| w.len() > 2).collect();

    let mut score = 0;
    for text in texts {
        let t = text.to_lowercase();
        score += 2 * count_occurrences(&t, &q);
        for word in &words {
            score += count_occurrences(&t, word);
        }
    }
    score
}

fn count_occurrences(haystack: &str, needle: &str) -> u32 {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count() as u32
}

async fn scan_components(
    store: &dyn ComponentStore,
    query: &str,
    kind_filter: Option<ComponentKind>,
) -> Vec<SearchResult> {
    let kinds: Vec<ComponentKind> = match kind_filter {
        Some(kind) => vec![kind],
        None => ComponentKind::ALL.to_vec(),
    };

    let needle = query.to_lowercase();
    let mut results = Vec::new();

    for kind in kinds {
        let raws = match store.fetch_all(kind, None).await {
            Ok(raws) => raws,
            Err(err) => {
                warn!(kind = kind.as_str(), error = %err, "component scan failed, skipping kind");
                continue;
            }
        };

        let info = registry::resolve(kind);
        for raw in raws {
            let matches = raw.name.to_lowercase().contains(&needle)
                || raw.manufacturer.to_lowercase().contains(&needle);
            if !matches {
                continue;
            }

            results.push(SearchResult {
                title: raw.name.clone(),
                description: normalize::description(&raw),
                url: format!("/components/{}/{}/", kind.as_str(), raw.id),
                price: (raw.price > 0.0).then_some(raw.price),
                rating: (raw.rating > 0).then_some(raw.rating),
                type_label: info.display_name.to_string(),
                date: raw.date_added,
                category: kind.as_str().to_string(),
                relevance: relevance(query, &[&raw.name, &raw.manufacturer]),
            });
        }
    }

    results
}

async fn scan_reviews(
    store: &dyn ReviewStore,
    query: &str,
    kind_filter: Option<ComponentKind>,
) -> Vec<SearchResult> {
    let records = match store.search_published_reviews(query, kind_filter).await {
        Ok(records) => records,
        Err(err) => {
            warn!(error = %err, "review scan failed, skipping reviews");
            return Vec::new();
        }
    };

    records
        .into_iter()
        .map(|review| SearchResult {
            relevance: relevance(query, &[&review.title, &review.summary]),
            title: format!("Review: {}", review.title),
            description: review.summary,
            url: "/reviews/".to_string(),
            price: None,
            rating: (review.rating > 0).then_some(review.rating),
            type_label: "Review".to_string(),
            date: review.date,
            category: "review".to_string(),
        })
        .collect()
}

/// Stable sort by the requested criterion. Missing prices sort last in both
/// price orders; missing ratings order as zero.
pub fn sort_results(results: &mut [SearchResult], sort: SearchSort) {
    match sort {
        SearchSort::Relevance => results.sort_by(|a, b| b.relevance.cmp(&a.relevance)),
        SearchSort::PriceAsc => results.sort_by(|a, b| {
            a.price
                .unwrap_or(f64::INFINITY)
                .total_cmp(&b.price.unwrap_or(f64::INFINITY))
        }),
        SearchSort::PriceDesc => results.sort_by(|a, b| {
            b.price
                .unwrap_or(f64::NEG_INFINITY)
                .total_cmp(&a.price.unwrap_or(f64::NEG_INFINITY))
        }),
        SearchSort::Date => results.sort_by(|a, b| b.date.cmp(&a.date)),
        SearchSort::Rating => {
            results.sort_by(|a, b| b.rating.unwrap_or(0).cmp(&a.rating.unwrap_or(0)))
        }
    }
}

/// Up to `limit` distinct search suggestions: first words sampled from
/// component names, padded with popular manufacturers. Falls back to a
/// fixed list when storage is unavailable. Never errors.
pub async fn suggestions(store: &dyn ComponentStore, limit: usize) -> Vec<String> {
    let gathered = match sample_first_words(store).await {
        Ok(mut words) => {
            words.extend(
                POPULAR_MANUFACTURERS
                    .iter()
                    .take(2)
                    .map(|s| s.to_string()),
            );
            words
        }
        Err(err) => {
            warn!(error = %err, "suggestion sampling failed, using fallback list");
            FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
        }
    };

    let mut seen = Vec::new();
    for word in gathered {
        if seen.len() >= limit {
            break;
        }
        if !word.is_empty() && !seen.contains(&word) {
            seen.push(word);
        }
    }
    seen
}

async fn sample_first_words(store: &dyn ComponentStore) -> anyhow::Result<Vec<String>> {
    let mut words = Vec::new();
    let mut rng = rand::thread_rng();

    for kind in [ComponentKind::Processor, ComponentKind::GraphicsCard] {
        let raws = store.fetch_all(kind, None).await?;
        for raw in raws.choose_multiple(&mut rng, 2) {
            if let Some(first) = raw.name.split_whitespace().next() {
                words.push(first.to_string());
            }
        }
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use crate::models::{
        GraphicsCardSpec, KindSpec, ProcessorSpec, RawComponent, ReviewRecord,
    };
    use crate::store::{JsonStore, StoredReview};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cpu(id: i64, name: &str, manufacturer: &str, price: f64, rating: u8) -> RawComponent {
        RawComponent {
            id,
            name: name.to_string(),
            manufacturer: manufacturer.to_string(),
            price,
            rating,
            date_added: date(2024, 1, 10),
            spec: KindSpec::Processor(ProcessorSpec {
                socket: Some("AM5".to_string()),
                core_count: 6,
                clock_mhz: 3800,
                tdp_w: 65,
                smt: true,
                bench_score: 27000,
            }),
        }
    }

    fn gpu(id: i64, name: &str) -> RawComponent {
        RawComponent {
            id,
            name: name.to_string(),
            manufacturer: "NVIDIA".to_string(),
            price: 32_000.0,
            rating: 4,
            date_added: date(2024, 2, 20),
            spec: KindSpec::GraphicsCard(GraphicsCardSpec {
                vram_gb: 16,
                tgp_w: 320,
            }),
        }
    }

    fn review(title: &str, summary: &str) -> StoredReview {
        StoredReview {
            kind: ComponentKind::Processor,
            component_id: 1,
            title: title.to_string(),
            summary: summary.to_string(),
            rating: 5,
            date: date(2024, 3, 5),
            is_published: true,
        }
    }

    fn store() -> JsonStore {
        JsonStore::new(
            vec![
                cpu(1, "Ryzen 5 7600", "AMD", 7500.0, 5),
                cpu(2, "Core i5-13400", "Intel", 7000.0, 4),
                gpu(3, "GeForce RTX 4080"),
            ],
            vec![review("Ryzen 5 review", "Solid mid-range chip")],
        )
    }

    struct FailingStore;

    #[async_trait]
    impl ComponentStore for FailingStore {
        async fn fetch_all(
            &self,
            _kind: ComponentKind,
            _manufacturer: Option<&str>,
        ) -> anyhow::Result<Vec<RawComponent>> {
            Err(anyhow!("storage down"))
        }

        async fn fetch_by_id(
            &self,
            _kind: ComponentKind,
            _id: i64,
        ) -> anyhow::Result<Option<RawComponent>> {
            Err(anyhow!("storage down"))
        }

        async fn count_reviews_for(&self, _kind: ComponentKind, _id: i64) -> anyhow::Result<i64> {
            Err(anyhow!("storage down"))
        }
    }

    #[async_trait]
    impl ReviewStore for FailingStore {
        async fn search_published_reviews(
            &self,
            _query: &str,
            _kind: Option<ComponentKind>,
        ) -> anyhow::Result<Vec<ReviewRecord>> {
            Err(anyhow!("storage down"))
        }
    }

    #[test]
    fn relevance_counts_exact_and_word_matches() {
        // "ryzen" in "AMD Ryzen 5": one exact occurrence (x2) plus one word
        // occurrence = 3; nothing in "AMD".
        assert_eq!(relevance("ryzen", &["AMD Ryzen 5", "AMD"]), 3);
        // Two-character words are ignored in the word pass.
        assert_eq!(relevance("i5", &["Core i5-13400", "Intel"]), 2);
        assert_eq!(relevance("missing", &["AMD Ryzen 5", "AMD"]), 0);
    }

    #[test]
    fn relevance_is_monotonic_in_occurrences() {
        let base = relevance("ryzen", &["AMD Ryzen 5", "AMD"]);
        let more = relevance("ryzen", &["AMD Ryzen 5 Ryzen", "AMD"]);
        assert!(more > base);
    }

    #[test]
    fn relevance_is_case_insensitive() {
        assert_eq!(
            relevance("RYZEN", &["amd ryzen 5"]),
            relevance("ryzen", &["AMD RYZEN 5"])
        );
    }

    #[tokio::test]
    async fn empty_query_returns_empty() {
        let store = store();
        for query in ["", "   ", "\t"] {
            let results = search(
                &store,
                &store,
                query,
                SearchScope::All,
                None,
                SearchSort::Relevance,
            )
            .await;
            assert!(results.is_empty());
        }
    }

    #[tokio::test]
    async fn search_spans_components_and_reviews() {
        let store = store();
        let results = search(
            &store,
            &store,
            "ryzen",
            SearchScope::All,
            None,
            SearchSort::Relevance,
        )
        .await;

        assert_eq!(results.len(), 2);
        let categories: Vec<&str> = results.iter().map(|r| r.category.as_str()).collect();
        assert!(categories.contains(&"processor"));
        assert!(categories.contains(&"review"));

        let component = results.iter().find(|r| r.category == "processor").unwrap();
        assert_eq!(component.url, "/components/processor/1/");
        assert_eq!(component.description, "6 cores, 3800 MHz, TDP 65 W");

        let review = results.iter().find(|r| r.category == "review").unwrap();
        assert_eq!(review.title, "Review: Ryzen 5 review");
        assert!(review.price.is_none());
    }

    #[tokio::test]
    async fn manufacturer_matches_count_as_hits() {
        let store = store();
        let results = search(
            &store,
            &store,
            "nvidia",
            SearchScope::Components,
            None,
            SearchSort::Relevance,
        )
        .await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "GeForce RTX 4080");
    }

    #[tokio::test]
    async fn kind_filter_narrows_component_scan() {
        let store = store();
        let results = search(
            &store,
            &store,
            "4080",
            SearchScope::Components,
            Some(ComponentKind::Processor),
            SearchSort::Relevance,
        )
        .await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn scope_reviews_skips_components() {
        let store = store();
        let results = search(
            &store,
            &store,
            "ryzen",
            SearchScope::Reviews,
            None,
            SearchSort::Relevance,
        )
        .await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].category, "review");
    }

    #[tokio::test]
    async fn failing_component_scan_degrades_to_reviews() {
        let failing = FailingStore;
        let reviews = JsonStore::new(vec![], vec![review("Ryzen 5 review", "Still fine")]);
        let results = search(
            &failing,
            &reviews,
            "ryzen",
            SearchScope::All,
            None,
            SearchSort::Relevance,
        )
        .await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].category, "review");
    }

    #[tokio::test]
    async fn failing_review_scan_degrades_to_components() {
        let components = store();
        let failing = FailingStore;
        let results = search(
            &components,
            &failing,
            "ryzen",
            SearchScope::All,
            None,
            SearchSort::Relevance,
        )
        .await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].category, "processor");
    }

    #[test]
    fn price_sorts_put_missing_last() {
        let mk = |title: &str, price: Option<f64>| SearchResult {
            title: title.to_string(),
            description: String::new(),
            url: String::new(),
            price,
            rating: None,
            type_label: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            category: String::new(),
            relevance: 0,
        };

        let mut results = vec![mk("none", None), mk("cheap", Some(100.0)), mk("dear", Some(900.0))];
        sort_results(&mut results, SearchSort::PriceAsc);
        let order: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(order, ["cheap", "dear", "none"]);

        sort_results(&mut results, SearchSort::PriceDesc);
        let order: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(order, ["dear", "cheap", "none"]);
    }

    #[test]
    fn relevance_sort_is_stable() {
        let mk = |title: &str, relevance: u32| SearchResult {
            title: title.to_string(),
            description: String::new(),
            url: String::new(),
            price: None,
            rating: None,
            type_label: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            category: String::new(),
            relevance,
        };

        let mut results = vec![mk("a", 3), mk("b", 3), mk("c", 5), mk("d", 3)];
        sort_results(&mut results, SearchSort::Relevance);
        let order: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(order, ["c", "a", "b", "d"]);
    }

    #[tokio::test]
    async fn suggestions_sample_and_dedupe() {
        let store = store();
        let suggestions = suggestions(&store, 6).await;
        assert!(!suggestions.is_empty());
        assert!(suggestions.len() <= 6);
        let mut deduped = suggestions.clone();
        deduped.dedup();
        assert_eq!(suggestions, deduped);
    }

    #[tokio::test]
    async fn suggestions_fall_back_when_storage_fails() {
        let failing = FailingStore;
        let suggestions = suggestions(&failing, 4).await;
        assert_eq!(suggestions, ["AMD", "Intel", "NVIDIA", "Corsair"]);
    }

    #[tokio::test]
    async fn suggestions_respect_limit() {
        let store = store();
        let suggestions = suggestions(&store, 2).await;
        assert!(suggestions.len() <= 2);
    }

    #[tokio::test]
    async fn zero_limit_yields_no_suggestions() {
        let store = store();
        assert!(suggestions(&store, 0).await.is_empty());

        let failing = FailingStore;
        assert!(suggestions(&failing, 0).await.is_empty());
    }
}
