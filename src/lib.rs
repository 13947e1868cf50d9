//! # hwcat
//!
//! A hardware component catalog core.
//!
//! hwcat manages six kinds of PC components (processors, graphics cards,
//! RAM, storage, motherboards, power supplies), normalizing their uneven
//! per-kind records into one canonical shape, then filtering, sorting,
//! searching, and aligning them for side-by-side comparison. Storage is
//! pluggable; the shipped [`store::JsonStore`] reads a single JSON catalog
//! file.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────┐   ┌───────────────────────┐
//! │ ComponentStore│──▶│ Normalizer │──▶│ Pipeline / Search /   │
//! │ ReviewStore   │   │ + Registry │   │ Selection / Compare   │
//! └──────────────┘   └────────────┘   └──────────┬────────────┘
//!                                                │
//!                                          ┌─────▼─────┐
//!                                          │    CLI    │
//!                                          │  (hwcat)  │
//!                                          └───────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! hwcat list processor --sort price_asc
//! hwcat show processor 12
//! hwcat search "ryzen" --sort relevance
//! hwcat compare processor:12 processor:15
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`error`] | Catalog error types |
//! | [`models`] | Core data types |
//! | [`registry`] | Per-kind metadata and spec schemas |
//! | [`normalize`] | Raw-to-canonical normalization |
//! | [`pipeline`] | Filtering and sorting |
//! | [`search`] | Relevance search over components and reviews |
//! | [`selection`] | Comparison selection set |
//! | [`compare`] | Side-by-side comparison alignment |
//! | [`store`] | Storage collaborator traits and the JSON store |
//! | [`catalog`] | The facade tying everything together |

pub mod catalog;
pub mod compare;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod registry;
pub mod search;
pub mod selection;
pub mod store;
