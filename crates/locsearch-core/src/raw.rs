// crates/locsearch-core/src/raw.rs
//
// Raw input shapes mirroring the external countries+states+cities JSON.
// NOTE: these types mirror the third-party dataset and may be subject to
// that dataset's license. They are deserialization-only and not exposed
// from the public API.

use serde::Deserialize;

/// Raw city structure as it comes from JSON.
#[derive(Debug, Deserialize)]
pub struct CityRaw {
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
}

/// Raw state / region structure from JSON.
#[derive(Debug, Deserialize)]
pub struct StateRaw {
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub iso2: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub cities: Vec<CityRaw>,
}

/// Raw country structure from JSON.
#[derive(Debug, Deserialize)]
pub struct CountryRaw {
    pub id: Option<i64>,
    pub name: String,
    pub iso2: String,
    #[serde(default)]
    pub iso3: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub states: Vec<StateRaw>,
}

pub type CountriesRaw = Vec<CountryRaw>;

/// Coordinates arrive as strings ("45.15", "", missing). Anything that
/// does not parse is "no coordinate", never zero.
pub(crate) fn parse_opt_f64(s: &Option<String>) -> Option<f64> {
    s.as_ref().and_then(|v| v.trim().parse::<f64>().ok())
}
