//! The comparison selection set.
//!
//! A small ordered set of components picked for side-by-side comparison.
//! Three invariants hold after every operation, successful or not: at most
//! 3 entries, all entries share one kind, and no key appears twice. A
//! rejected insert leaves the set untouched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::models::{CanonicalComponent, ComponentKind};

/// Maximum number of components in one comparison.
pub const MAX_SELECTED: usize = 3;

/// Identity of a selected component: kind plus id. Ids are only unique
/// within a kind, so the kind is part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionKey {
    pub kind: ComponentKind,
    pub id: i64,
}

impl fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

impl FromStr for SelectionKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((kind, id)) = s.split_once(':') else {
            anyhow::bail!("expected kind:id, got '{}'", s);
        };
        let kind: ComponentKind = kind.parse().map_err(|e: CatalogError| anyhow::anyhow!(e))?;
        let id: i64 = id
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid component id: '{}'", id))?;
        Ok(SelectionKey { kind, id })
    }
}

/// Snapshot of one selected component, taken at insert time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub key: SelectionKey,
    pub name: String,
    pub manufacturer: String,
    pub price: f64,
}

/// The selection itself. Entries keep insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonSelection {
    entries: Vec<SelectionEntry>,
}

impl ComparisonSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The kind shared by all entries, or `None` when empty.
    pub fn kind(&self) -> Option<ComponentKind> {
        self.entries.first().map(|e| e.key.kind)
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: SelectionKey) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Add a component. Capacity is checked before kind, kind before
    /// duplicates, so the caller always sees the broadest violation first.
    pub fn insert(&mut self, component: &CanonicalComponent) -> Result<(), CatalogError> {
        let key = SelectionKey {
            kind: component.kind,
            id: component.id,
        };

        if self.entries.len() == MAX_SELECTED {
            return Err(CatalogError::CapacityExceeded);
        }
        if let Some(expected) = self.kind() {
            if expected != key.kind {
                return Err(CatalogError::KindMismatch {
                    expected,
                    found: key.kind,
                });
            }
        }
        if self.contains(key) {
            return Err(CatalogError::AlreadyPresent { key });
        }

        self.entries.push(SelectionEntry {
            key,
            name: component.name.clone(),
            manufacturer: component.manufacturer.clone(),
            price: component.price,
        });
        Ok(())
    }

    /// Remove one entry, returning its name for confirmation messages.
    pub fn remove(&mut self, key: SelectionKey) -> Result<String, CatalogError> {
        match self.entries.iter().position(|e| e.key == key) {
            Some(index) => Ok(self.entries.remove(index).name),
            None => Err(CatalogError::NotFound {
                kind: key.kind,
                id: key.id,
            }),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
