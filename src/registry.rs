//! The catalog registry: fixed per-kind metadata and spec schemas.
//!
//! Every other module consults the registry instead of hardcoding
//! kind-specific data. The tables are static and immutable, so they are safe
//! for concurrent reads without locking. Because [`ComponentKind`] is a
//! closed enum, [`resolve`] is total — an unknown kind string is rejected
//! earlier, when parsing into the enum.

use crate::models::{ComponentKind, ValueKind};

/// One declared attribute of a kind's spec schema.
#[derive(Debug, Clone, Copy)]
pub struct SpecDef {
    pub label: &'static str,
    pub value_kind: ValueKind,
    /// Display unit appended to formatted numbers (e.g. "W", "MHz").
    pub unit: Option<&'static str>,
    /// Ordering for best-value marking in comparisons. `None` means the
    /// attribute has no declared ordering and is never marked.
    pub higher_is_better: Option<bool>,
}

const fn def(
    label: &'static str,
    value_kind: ValueKind,
    unit: Option<&'static str>,
    higher_is_better: Option<bool>,
) -> SpecDef {
    SpecDef {
        label,
        value_kind,
        unit,
        higher_is_better,
    }
}

/// Fixed registry data for one component kind.
#[derive(Debug)]
pub struct KindInfo {
    pub kind: ComponentKind,
    pub display_name: &'static str,
    pub css_class: &'static str,
    pub icon: &'static str,
    pub schema: &'static [SpecDef],
}

static PROCESSOR: KindInfo = KindInfo {
    kind: ComponentKind::Processor,
    display_name: "Processor",
    css_class: "bg-blue-100 text-blue-800",
    icon: "cpu",
    schema: &[
        def("Socket", ValueKind::Text, None, None),
        def("Cores", ValueKind::Number, None, Some(true)),
        def("Clock", ValueKind::Number, Some("MHz"), Some(true)),
        def("TDP", ValueKind::Number, Some("W"), Some(false)),
        def("SMT", ValueKind::Boolean, None, None),
        def("Benchmark score", ValueKind::Number, None, Some(true)),
    ],
};

static GRAPHICS_CARD: KindInfo = KindInfo {
    kind: ComponentKind::GraphicsCard,
    display_name: "Graphics card",
    css_class: "bg-green-100 text-green-800",
    icon: "gpu",
    schema: &[
        def("VRAM", ValueKind::Number, Some("GB"), Some(true)),
        def("TGP", ValueKind::Number, Some("W"), Some(false)),
    ],
};

static RAM: KindInfo = KindInfo {
    kind: ComponentKind::Ram,
    display_name: "RAM",
    css_class: "bg-purple-100 text-purple-800",
    icon: "ram",
    schema: &[
        def("Type", ValueKind::Text, None, None),
        def("Capacity", ValueKind::Number, Some("GB"), Some(true)),
        def("Clock", ValueKind::Number, Some("MHz"), Some(true)),
    ],
};

static STORAGE: KindInfo = KindInfo {
    kind: ComponentKind::Storage,
    display_name: "Storage",
    css_class: "bg-orange-100 text-orange-800",
    icon: "storage",
    schema: &[
        def("Capacity", ValueKind::Number, Some("GB"), Some(true)),
        def("Type", ValueKind::Text, None, None),
    ],
};

static MOTHERBOARD: KindInfo = KindInfo {
    kind: ComponentKind::Motherboard,
    display_name: "Motherboard",
    css_class: "bg-red-100 text-red-800",
    icon: "motherboard",
    schema: &[
        def("Socket", ValueKind::Text, None, None),
        def("Form factor", ValueKind::Text, None, None),
        def("Max CPU TDP", ValueKind::Number, Some("W"), Some(true)),
        def("SATA ports", ValueKind::Number, None, Some(true)),
        def("NVMe slots", ValueKind::Number, None, Some(true)),
        def("PCIe generation", ValueKind::Number, None, Some(true)),
    ],
};

static POWER_SUPPLY: KindInfo = KindInfo {
    kind: ComponentKind::PowerSupply,
    display_name: "Power supply",
    css_class: "bg-yellow-100 text-yellow-800",
    icon: "psu",
    schema: &[def("Max power", ValueKind::Number, Some("W"), Some(true))],
};

/// Resolve the registry entry for a kind.
pub fn resolve(kind: ComponentKind) -> &'static KindInfo {
    match kind {
        ComponentKind::Processor => &PROCESSOR,
        ComponentKind::GraphicsCard => &GRAPHICS_CARD,
        ComponentKind::Ram => &RAM,
        ComponentKind::Storage => &STORAGE,
        ComponentKind::Motherboard => &MOTHERBOARD,
        ComponentKind::PowerSupply => &POWER_SUPPLY,
    }
}
