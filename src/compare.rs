//! The comparison aligner.
//!
//! Turns 2-3 same-kind components into a row-per-attribute table: five
//! common rows first, then the kind's schema rows in registry order. Rows
//! with a declared ordering get their best values marked.

use serde::Serialize;

use crate::models::{RawComponent, SpecValue, ValueKind};
use crate::normalize;
use crate::registry;

/// One aligned attribute row. `values` holds one entry per compared
/// component, in column order; `best_indices` points at the winning columns.
#[derive(Debug, Clone, Serialize)]
pub struct CompareRow {
    pub label: &'static str,
    pub value_kind: ValueKind,
    pub unit: Option<&'static str>,
    pub higher_is_better: Option<bool>,
    pub values: Vec<SpecValue>,
    pub best_indices: Vec<usize>,
}

impl CompareRow {
    /// The row's values rendered for display, in column order.
    pub fn formatted_values(&self) -> Vec<String> {
        self.values
            .iter()
            .map(|v| normalize::format_value(v, self.unit))
            .collect()
    }
}

/// An aligned comparison table. `columns` are the component names, one per
/// compared component.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonTable {
    pub kind: crate::models::ComponentKind,
    pub columns: Vec<String>,
    pub rows: Vec<CompareRow>,
}

/// Build the aligned table for same-kind raw records.
///
/// Callers guarantee 2-3 records of one kind; the selection set enforces
/// both upstream.
pub fn build_table(kind: crate::models::ComponentKind, raws: &[RawComponent]) -> ComparisonTable {
    let columns: Vec<String> = raws.iter().map(|r| r.name.clone()).collect();
    let mut rows = Vec::new();

    rows.push(row(
        "Name",
        ValueKind::Text,
        None,
        None,
        raws.iter().map(|r| SpecValue::Text(r.name.clone())).collect(),
    ));
    rows.push(row(
        "Manufacturer",
        ValueKind::Text,
        None,
        None,
        raws.iter()
            .map(|r| SpecValue::Text(r.manufacturer.clone()))
            .collect(),
    ));
    rows.push(row(
        "Price",
        ValueKind::Price,
        Some("CZK"),
        Some(false),
        raws.iter().map(|r| SpecValue::Price(r.price)).collect(),
    ));
    rows.push(row(
        "Rating",
        ValueKind::Number,
        None,
        Some(true),
        raws.iter()
            .map(|r| SpecValue::Number(r.rating as f64))
            .collect(),
    ));
    rows.push(row(
        "Date added",
        ValueKind::Date,
        None,
        None,
        raws.iter()
            .map(|r| SpecValue::Date(r.date_added))
            .collect(),
    ));

    let schema = registry::resolve(kind).schema;
    let spec_columns: Vec<Vec<SpecValue>> = raws.iter().map(normalize::spec_values).collect();
    for (i, def) in schema.iter().enumerate() {
        rows.push(row(
            def.label,
            def.value_kind,
            def.unit,
            def.higher_is_better,
            spec_columns.iter().map(|col| col[i].clone()).collect(),
        ));
    }

    ComparisonTable { kind, columns, rows }
}

fn row(
    label: &'static str,
    value_kind: ValueKind,
    unit: Option<&'static str>,
    higher_is_better: Option<bool>,
    values: Vec<SpecValue>,
) -> CompareRow {
    let mut row = CompareRow {
        label,
        value_kind,
        unit,
        higher_is_better,
        values,
        best_indices: Vec::new(),
    };
    row.best_indices = mark_best(&row);
    row
}

/// Which columns hold the best value of a row.
///
/// Only numeric and price rows with a declared ordering are eligible, only
/// positive values compete, and at least two distinct positive values must
/// be present — a row where everything ties carries no marking.
fn mark_best(row: &CompareRow) -> Vec<usize> {
    let higher_is_better = match (row.value_kind, row.higher_is_better) {
        (ValueKind::Number | ValueKind::Price, Some(h)) => h,
        _ => return Vec::new(),
    };

    let candidates: Vec<(usize, f64)> = row
        .values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.positive_number().map(|n| (i, n)))
        .collect();

    let mut distinct: Vec<f64> = candidates.iter().map(|(_, n)| *n).collect();
    distinct.sort_by(f64::total_cmp);
    distinct.dedup();
    if distinct.len() < 2 {
        return Vec::new();
    }

    let best = if higher_is_better {
        *distinct.last().unwrap_or(&f64::NAN)
    } else {
        distinct[0]
    };

    candidates
        .into_iter()
        .filter(|(_, n)| *n == best)
        .map(|(i, _)| i)
        .collect()
}
