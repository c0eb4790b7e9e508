// crates/locsearch-core/src/loader.rs

//! Dataset loading.
//!
//! Handles the physical layer (file I/O, gzip, binary cache) and
//! delegates parsing to the raw JSON types. Three on-disk forms are
//! accepted, picked by extension: `.bin` (bincode cache), `.gz`
//! (gzipped source JSON), anything else (plain source JSON).
//!
//! `GeoDataset::load()` memoizes the bundled dataset process-wide; the
//! dataset is immutable after that point and needs no locking.
//!
//! The bundled file is an excerpt of the dataset published at
//! [`DATA_REPO_URL`]; a full copy in the same JSON shape drops in via
//! [`GeoDataset::load_from_path`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use bincode::Options;
use flate2::read::GzDecoder;
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::error::{LocationError, Result};
use crate::model::{build_dataset, GeoDataset};

static DATASET_CACHE: OnceCell<GeoDataset> = OnceCell::new();

/// Upstream source of the reference dataset.
pub const DATA_REPO_URL: &str =
    "https://github.com/dr5hn/countries-states-cities-database";

/// Deserialization cap for the binary cache, against data bombs.
const BINARY_SIZE_LIMIT: u64 = 256 * 1024 * 1024;

fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(BINARY_SIZE_LIMIT)
        .allow_trailing_bytes()
}

impl GeoDataset {
    /// Directory holding the bundled dataset.
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    pub fn default_dataset_filename() -> &'static str {
        "locations.json.gz"
    }

    /// Load the bundled dataset, memoized for the process lifetime.
    pub fn load() -> Result<Self> {
        DATASET_CACHE
            .get_or_try_init(|| {
                Self::load_from_path(
                    Self::default_data_dir().join(Self::default_dataset_filename()),
                    None,
                )
            })
            .cloned()
    }

    /// Load the bundled dataset restricted to the given ISO2 codes.
    pub fn load_filtered_by_iso2(iso2: &[&str]) -> Result<Self> {
        Self::load_from_path(
            Self::default_data_dir().join(Self::default_dataset_filename()),
            Some(iso2),
        )
    }

    /// Load a dataset from `path`, optionally filtering countries by
    /// ISO2 code (case-insensitive).
    pub fn load_from_path(path: impl AsRef<Path>, filter: Option<&[&str]>) -> Result<Self> {
        let path = path.as_ref();
        let is_binary = path.extension().is_some_and(|e| e == "bin");

        let mut reader = Self::open_stream(path)?;
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;

        let mut dataset = if is_binary {
            Self::from_bytes(&data, None)?
        } else {
            build_dataset(serde_json::from_slice(&data)?)
        };
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            dataset.retain_iso2(filter);
        }

        let stats = dataset.stats();
        debug!(
            path = %path.display(),
            countries = stats.countries,
            states = stats.states,
            cities = stats.cities,
            "dataset loaded"
        );
        Ok(dataset)
    }

    /// Reconstruct a dataset from the binary cache format.
    pub fn from_bytes(data: &[u8], filter: Option<&[&str]>) -> Result<Self> {
        let mut dataset: Self = bincode_options().deserialize(data)?;
        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            dataset.retain_iso2(filter);
        }
        Ok(dataset)
    }

    /// Serialize into the binary cache format.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode_options().serialize(self)?)
    }

    /// Opens a file, buffers it, and wraps it in a gzip decoder when the
    /// filename says so. Callers never care about the compression.
    fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
        let file = File::open(path).map_err(|e| {
            LocationError::NotFound(format!("dataset not found at {}: {e}", path.display()))
        })?;
        let reader = BufReader::new(file);

        if path.to_string_lossy().ends_with(".gz") {
            Ok(Box::new(GzDecoder::new(reader)))
        } else {
            Ok(Box::new(reader))
        }
    }
}
