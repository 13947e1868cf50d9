//! The component normalizer: one raw record in, one canonical projection out.
//!
//! Normalization is the only place kind-specific fields are read. Missing
//! optional fields never fail — they surface as an explicit `N/A` branch.
//! A missing *required* common field is a contract violation by the storage
//! collaborator and fails with [`CatalogError::MalformedRecord`].

use crate::error::CatalogError;
use crate::models::{
    CanonicalComponent, KindSpec, RawComponent, SpecEntry, SpecSet, SpecValue,
};
use crate::registry;

const NOT_AVAILABLE: &str = "N/A";

/// Convert a raw record into the canonical cross-kind shape.
pub fn normalize(raw: &RawComponent, reviews_count: i64) -> Result<CanonicalComponent, CatalogError> {
    check_required(raw)?;
    let info = registry::resolve(raw.kind());

    Ok(CanonicalComponent {
        kind: raw.kind(),
        type_display: info.display_name.to_string(),
        type_class: info.css_class.to_string(),
        id: raw.id,
        name: raw.name.clone(),
        manufacturer: raw.manufacturer.clone(),
        description: description(raw),
        price: raw.price,
        rating: raw.rating,
        reviews_count,
        icon: info.icon.to_string(),
    })
}

fn check_required(raw: &RawComponent) -> Result<(), CatalogError> {
    let missing = if raw.id <= 0 {
        Some("id")
    } else if raw.name.trim().is_empty() {
        Some("name")
    } else if raw.manufacturer.trim().is_empty() {
        Some("manufacturer")
    } else {
        None
    };

    match missing {
        Some(field) => Err(CatalogError::MalformedRecord {
            kind: raw.kind(),
            id: raw.id,
            field,
        }),
        None => Ok(()),
    }
}

/// The kind-specific one-line summary shown on listing rows and search hits.
/// Never empty.
pub fn description(raw: &RawComponent) -> String {
    match &raw.spec {
        KindSpec::Processor(s) => format!(
            "{} cores, {} MHz, TDP {} W",
            s.core_count, s.clock_mhz, s.tdp_w
        ),
        KindSpec::GraphicsCard(s) => format!("{} GB VRAM, TGP {} W", s.vram_gb, s.tgp_w),
        KindSpec::Ram(s) => format!(
            "{} GB, {} MHz, {}",
            s.capacity_gb,
            s.clock_mhz,
            s.module_type.as_deref().unwrap_or(NOT_AVAILABLE)
        ),
        KindSpec::Storage(s) => format!(
            "{} GB, {}",
            s.capacity_gb,
            s.storage_type.as_deref().unwrap_or(NOT_AVAILABLE)
        ),
        KindSpec::Motherboard(s) => format!(
            "{}, {}, PCIe {}",
            s.socket.as_deref().unwrap_or(NOT_AVAILABLE),
            s.form_factor.as_deref().unwrap_or(NOT_AVAILABLE),
            s.pcie_gen
        ),
        KindSpec::PowerSupply(s) => format!("{} W", s.max_power_w),
    }
}

/// Raw spec values in the order declared by the kind's schema.
///
/// The returned vector is always exactly as long as
/// `registry::resolve(raw.kind()).schema`.
pub fn spec_values(raw: &RawComponent) -> Vec<SpecValue> {
    fn text(opt: &Option<String>) -> SpecValue {
        match opt {
            Some(s) => SpecValue::Text(s.clone()),
            None => SpecValue::Missing,
        }
    }

    match &raw.spec {
        KindSpec::Processor(s) => vec![
            text(&s.socket),
            SpecValue::Number(s.core_count as f64),
            SpecValue::Number(s.clock_mhz as f64),
            SpecValue::Number(s.tdp_w as f64),
            SpecValue::Bool(s.smt),
            SpecValue::Number(s.bench_score as f64),
        ],
        KindSpec::GraphicsCard(s) => vec![
            SpecValue::Number(s.vram_gb as f64),
            SpecValue::Number(s.tgp_w as f64),
        ],
        KindSpec::Ram(s) => vec![
            text(&s.module_type),
            SpecValue::Number(s.capacity_gb as f64),
            SpecValue::Number(s.clock_mhz as f64),
        ],
        KindSpec::Storage(s) => vec![
            SpecValue::Number(s.capacity_gb as f64),
            text(&s.storage_type),
        ],
        KindSpec::Motherboard(s) => vec![
            text(&s.socket),
            text(&s.form_factor),
            SpecValue::Number(s.max_cpu_tdp_w as f64),
            SpecValue::Number(s.sata_ports as f64),
            SpecValue::Number(s.nvme_slots as f64),
            SpecValue::Number(s.pcie_gen as f64),
        ],
        KindSpec::PowerSupply(s) => vec![SpecValue::Number(s.max_power_w as f64)],
    }
}

/// Instantiate the kind's schema as formatted label/value pairs for display.
pub fn build_spec_set(raw: &RawComponent) -> SpecSet {
    let schema = registry::resolve(raw.kind()).schema;
    let values = spec_values(raw);

    schema
        .iter()
        .zip(values)
        .map(|(def, value)| SpecEntry {
            label: def.label,
            value: format_value(&value, def.unit),
        })
        .collect()
}

/// Format one spec value for display, appending the declared unit.
///
/// Booleans become yes/no tokens; missing values and unknown prices become
/// `N/A`.
pub fn format_value(value: &SpecValue, unit: Option<&str>) -> String {
    match value {
        SpecValue::Text(s) => s.clone(),
        SpecValue::Number(n) => match unit {
            Some(unit) => format!("{} {}", fmt_num(*n), unit),
            None => fmt_num(*n),
        },
        SpecValue::Price(p) if *p > 0.0 => match unit {
            Some(unit) => format!("{} {}", fmt_num(*p), unit),
            None => fmt_num(*p),
        },
        SpecValue::Price(_) => NOT_AVAILABLE.to_string(),
        SpecValue::Bool(true) => "Yes".to_string(),
        SpecValue::Bool(false) => "No".to_string(),
        SpecValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        SpecValue::Missing => NOT_AVAILABLE.to_string(),
    }
}

fn fmt_num(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
