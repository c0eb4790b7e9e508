// crates/locsearch-core/src/lib.rs

//! locsearch-core
//! ==============
//!
//! In-memory location search over a bundled countries → states → cities
//! dataset, plus the layers a search box needs on top of it:
//!
//! - [`model`] — the normalized dataset and the [`LocationEntry`] result type
//! - [`loader`] — JSON / gzip / binary dataset loading with a process cache
//! - [`search`] — the ranked substring search engine
//! - [`suggest`] — debounced sessions and coordinate-bearing map suggestions
//! - [`input`] — the search-box state machine (panel, highlight, selection)
//! - [`map`] — viewport/marker synchronization for a selected entry
//!
//! The dataset is loaded once and never mutated; every search produces a
//! fresh, ranked, size-bounded `Vec<LocationEntry>`.

pub mod error;
pub mod input;
pub mod loader;
pub mod map;
pub mod model;
pub mod search;
pub mod suggest;
pub mod text;

#[doc(hidden)]
pub mod raw;

// Re-exports
pub use crate::error::{LocationError, Result};
pub use crate::input::{Key, PanelState, SearchInput};
pub use crate::map::{MapView, Marker, Viewport};
pub use crate::model::{
    City, Country, DatasetStats, GeoDataset, LocationEntry, LocationKind, State,
};
pub use crate::search::{DEFAULT_LIMIT, MIN_QUERY_LEN, SUGGESTION_LIMIT};
pub use crate::suggest::{Debouncer, LocationSource, SearchPhase, SearchSession};
pub use crate::text::{fold_key, fold_lower, NameMatch};
