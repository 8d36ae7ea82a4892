//! `menusearch-core`: search-and-navigation engine for menu search.
//!
//! Pure engine crate: receives catalog trees built from host snapshots,
//! returns ranked, grouped, capped results and a keyboard selection over
//! them. No terminal or UI dependencies.

pub mod catalog;
pub mod error;
pub mod highlight;
pub mod ledger;
pub mod navigation;
pub mod results;
pub mod scoring;
pub mod session;
pub mod tree;

pub use catalog::{load_catalog, load_catalog_or_empty, CatalogSnapshot, SnapshotItem};
pub use error::CatalogError;
pub use highlight::{BlinkSchedule, BlinkStep};
pub use ledger::{RecentlyUsed, RepeatAction};
pub use navigation::Navigator;
pub use results::{build, Position, ResultCap, ResultEntry, ResultGroup, ResultList, ScoredCandidate};
pub use scoring::{score, Query};
pub use session::{GroupCaps, InputEvent, KeyCommand, OutputEvent, SearchSession};
pub use tree::{Catalog, CatalogKind, CommandId, ControlId, ItemIdentity, NodeId};
