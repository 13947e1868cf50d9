//! Core data models used throughout hwcat.
//!
//! These types represent the raw per-kind records returned by the storage
//! collaborator, the canonical cross-kind projection used for listing and
//! filtering, and the search result shape shared by components and reviews.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// The closed set of supported component kinds.
///
/// Adding a kind means adding a variant here, a [`KindSpec`] variant for its
/// fields, and a registry entry — the compiler then points at every match
/// that needs a new arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Processor,
    GraphicsCard,
    Ram,
    Storage,
    Motherboard,
    PowerSupply,
}

impl ComponentKind {
    /// All kinds, in canonical catalog order.
    pub const ALL: [ComponentKind; 6] = [
        ComponentKind::Processor,
        ComponentKind::GraphicsCard,
        ComponentKind::Ram,
        ComponentKind::Storage,
        ComponentKind::Motherboard,
        ComponentKind::PowerSupply,
    ];

    /// Canonical string key, as used in URLs and serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Processor => "processor",
            ComponentKind::GraphicsCard => "graphics_card",
            ComponentKind::Ram => "ram",
            ComponentKind::Storage => "storage",
            ComponentKind::Motherboard => "motherboard",
            ComponentKind::PowerSupply => "power_supply",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = CatalogError;

    /// Parses a canonical kind key or one of the short category aliases
    /// (`cpu`, `gpu`, `psu`). Anything else is a
    /// [`CatalogError::UnknownKind`] — kinds are never guessed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processor" | "cpu" => Ok(ComponentKind::Processor),
            "graphics_card" | "gpu" => Ok(ComponentKind::GraphicsCard),
            "ram" => Ok(ComponentKind::Ram),
            "storage" => Ok(ComponentKind::Storage),
            "motherboard" => Ok(ComponentKind::Motherboard),
            "power_supply" | "psu" => Ok(ComponentKind::PowerSupply),
            other => Err(CatalogError::UnknownKind(other.to_string())),
        }
    }
}

/// Kind-specific fields of a raw record, tagged by kind.
///
/// The tag doubles as the record's kind on the wire, so a raw record cannot
/// carry fields from a kind it does not belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KindSpec {
    Processor(ProcessorSpec),
    GraphicsCard(GraphicsCardSpec),
    Ram(RamSpec),
    Storage(StorageSpec),
    Motherboard(MotherboardSpec),
    PowerSupply(PowerSupplySpec),
}

impl KindSpec {
    pub fn kind(&self) -> ComponentKind {
        match self {
            KindSpec::Processor(_) => ComponentKind::Processor,
            KindSpec::GraphicsCard(_) => ComponentKind::GraphicsCard,
            KindSpec::Ram(_) => ComponentKind::Ram,
            KindSpec::Storage(_) => ComponentKind::Storage,
            KindSpec::Motherboard(_) => ComponentKind::Motherboard,
            KindSpec::PowerSupply(_) => ComponentKind::PowerSupply,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessorSpec {
    /// Unset when the socket reference was deleted upstream.
    #[serde(default)]
    pub socket: Option<String>,
    #[serde(default)]
    pub core_count: i64,
    #[serde(default)]
    pub clock_mhz: i64,
    #[serde(default)]
    pub tdp_w: i64,
    #[serde(default)]
    pub smt: bool,
    #[serde(default)]
    pub bench_score: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphicsCardSpec {
    #[serde(default)]
    pub vram_gb: i64,
    #[serde(default)]
    pub tgp_w: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RamSpec {
    #[serde(default)]
    pub module_type: Option<String>,
    #[serde(default)]
    pub capacity_gb: i64,
    #[serde(default)]
    pub clock_mhz: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSpec {
    #[serde(default)]
    pub capacity_gb: i64,
    #[serde(default)]
    pub storage_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotherboardSpec {
    #[serde(default)]
    pub socket: Option<String>,
    #[serde(default)]
    pub form_factor: Option<String>,
    #[serde(default)]
    pub max_cpu_tdp_w: i64,
    #[serde(default)]
    pub sata_ports: i64,
    #[serde(default)]
    pub nvme_slots: i64,
    #[serde(default)]
    pub pcie_gen: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerSupplySpec {
    #[serde(default)]
    pub max_power_w: i64,
}

/// One component record as returned by the storage collaborator.
///
/// Common fields are shared by every kind; kind-specific fields live in the
/// tagged [`KindSpec`]. A price of zero means "unknown", a rating of zero
/// means "unrated".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawComponent {
    pub id: i64,
    pub name: String,
    pub manufacturer: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub rating: u8,
    pub date_added: NaiveDate,
    #[serde(flatten)]
    pub spec: KindSpec,
}

impl RawComponent {
    pub fn kind(&self) -> ComponentKind {
        self.spec.kind()
    }
}

/// The normalized, display-ready projection of a raw record, uniform across
/// kinds. Derived and rebuilt on every query, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalComponent {
    pub kind: ComponentKind,
    pub type_display: String,
    pub type_class: String,
    pub id: i64,
    pub name: String,
    pub manufacturer: String,
    pub description: String,
    pub price: f64,
    pub rating: u8,
    pub reviews_count: i64,
    pub icon: String,
}

/// The value class of a spec attribute, declared per [`crate::registry::SpecDef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Text,
    Number,
    Price,
    Boolean,
    Date,
}

/// One raw spec value, aligned with its schema entry.
///
/// `Missing` is the explicit "this optional field is unset" branch; it
/// formats as `N/A` and is never considered for best-value marking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SpecValue {
    Text(String),
    Number(f64),
    Price(f64),
    Bool(bool),
    Date(NaiveDate),
    Missing,
}

impl SpecValue {
    /// The numeric value, if this is a positive number or price.
    /// Missing, zero, and negative values are treated as unknown.
    pub fn positive_number(&self) -> Option<f64> {
        match self {
            SpecValue::Number(n) | SpecValue::Price(n) if *n > 0.0 => Some(*n),
            _ => None,
        }
    }
}

/// One formatted label/value pair for the detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecEntry {
    pub label: &'static str,
    pub value: String,
}

/// A kind's spec schema instantiated for one component, in declared order.
pub type SpecSet = Vec<SpecEntry>;

/// A published review as consumed from the review collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub title: String,
    pub summary: String,
    pub rating: u8,
    pub date: NaiveDate,
    pub kind: ComponentKind,
}

/// A search result drawn from either the component or the review scan,
/// normalized into one shape.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub description: String,
    pub url: String,
    pub price: Option<f64>,
    pub rating: Option<u8>,
    pub type_label: String,
    pub date: NaiveDate,
    /// A kind key for component hits, `"review"` for review hits.
    pub category: String,
    pub relevance: u32,
}
