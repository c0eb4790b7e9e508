// crates/locsearch-core/src/model.rs

//! The normalized, immutable location dataset and the entry type that
//! search results are made of.

use serde::{Deserialize, Serialize};

use crate::raw::{parse_opt_f64, CountriesRaw};
use crate::text::NameMatch;

/// Discriminates an entry's place in the hierarchy.
///
/// Closed set: every consumer (zoom levels, labels) matches exhaustively,
/// so a new kind cannot silently fall through to a default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    Country,
    State,
    City,
    Region,
    Subregion,
}

impl LocationKind {
    /// Lowercase wire form, as used in entry ids.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::State => "state",
            Self::City => "city",
            Self::Region => "region",
            Self::Subregion => "subregion",
        }
    }

    /// Capitalized display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Country => "Country",
            Self::State => "State",
            Self::City => "City",
            Self::Region => "Region",
            Self::Subregion => "Subregion",
        }
    }
}

impl std::fmt::Display for LocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One searchable place, flattened out of the hierarchy.
///
/// `id` is stable and unique within the dataset: `country-{ISO2}`,
/// `state-{ISO2}-{CODE}`, `city-{ISO2}-{CODE}-{name}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub id: String,
    pub name: String,
    pub kind: LocationKind,
    pub country_code: Option<String>,
    pub state_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Human-readable ancestry ("State, Country") for display only;
    /// never consulted by search matching.
    pub parent: Option<String>,
}

impl LocationEntry {
    /// `(lat, lon)` when both coordinates are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

impl NameMatch for LocationEntry {
    fn name_str(&self) -> &str {
        &self.name
    }
}

/// A city in the normalized dataset.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A state / region within a country.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct State {
    pub name: String,
    /// ISO 3166-2 suffix, e.g. "BZ" for Buzău County. Falls back to the
    /// name in id derivation when the source omits it.
    pub code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub cities: Vec<City>,
}

/// A country entry in the normalized dataset.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub iso2: String,
    pub iso3: Option<String>,
    pub region: Option<String>,
    pub subregion: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub states: Vec<State>,
}

impl NameMatch for City {
    fn name_str(&self) -> &str {
        &self.name
    }
}

impl NameMatch for State {
    fn name_str(&self) -> &str {
        &self.name
    }
}

impl NameMatch for Country {
    fn name_str(&self) -> &str {
        &self.name
    }
}

impl Country {
    pub fn entry(&self) -> LocationEntry {
        LocationEntry {
            id: format!("country-{}", self.iso2),
            name: self.name.clone(),
            kind: LocationKind::Country,
            country_code: Some(self.iso2.clone()),
            state_code: None,
            latitude: self.latitude,
            longitude: self.longitude,
            parent: None,
        }
    }
}

impl State {
    /// Identifier segment used in ids: the ISO code when present,
    /// otherwise the state name.
    pub fn code_or_name(&self) -> &str {
        self.code.as_deref().unwrap_or(&self.name)
    }

    pub fn entry(&self, country: &Country) -> LocationEntry {
        LocationEntry {
            id: format!("state-{}-{}", country.iso2, self.code_or_name()),
            name: self.name.clone(),
            kind: LocationKind::State,
            country_code: Some(country.iso2.clone()),
            state_code: self.code.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            parent: Some(country.name.clone()),
        }
    }
}

impl City {
    pub fn entry(&self, country: &Country, state: &State) -> LocationEntry {
        LocationEntry {
            id: format!(
                "city-{}-{}-{}",
                country.iso2,
                state.code_or_name(),
                self.name
            ),
            name: self.name.clone(),
            kind: LocationKind::City,
            country_code: Some(country.iso2.clone()),
            state_code: state.code.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            parent: Some(format!("{}, {}", state.name, country.name)),
        }
    }
}

/// Simple aggregate statistics for the dataset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DatasetStats {
    pub countries: usize,
    pub states: usize,
    pub cities: usize,
}

/// Top-level dataset. Loaded once, read-only afterwards.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GeoDataset {
    pub countries: Vec<Country>,
}

impl GeoDataset {
    /// All countries in the dataset.
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn stats(&self) -> DatasetStats {
        let states = self.countries.iter().map(|c| c.states.len()).sum();
        let cities = self
            .countries
            .iter()
            .flat_map(|c| &c.states)
            .map(|s| s.cities.len())
            .sum();
        DatasetStats {
            countries: self.countries.len(),
            states,
            cities,
        }
    }

    /// Find a country by ISO2 code, case-insensitive (e.g. "RO", "us").
    pub fn find_country_by_iso2(&self, iso2: &str) -> Option<&Country> {
        self.countries
            .iter()
            .find(|c| c.iso2.eq_ignore_ascii_case(iso2.trim()))
    }

    /// Find a country by ISO2 or ISO3 code, case-insensitive.
    pub fn find_country_by_code(&self, code: &str) -> Option<&Country> {
        let code = code.trim();
        self.find_country_by_iso2(code).or_else(|| {
            self.countries
                .iter()
                .find(|c| c.iso3.as_deref().is_some_and(|s| s.eq_ignore_ascii_case(code)))
        })
    }

    /// Drop every country whose ISO2 code is not in `iso2`
    /// (case-insensitive). Used by the load-time filter.
    pub(crate) fn retain_iso2(&mut self, iso2: &[&str]) {
        self.countries
            .retain(|c| iso2.iter().any(|f| f.eq_ignore_ascii_case(&c.iso2)));
    }
}

/// Convert raw JSON data into a normalized [`GeoDataset`].
pub fn build_dataset(raw: CountriesRaw) -> GeoDataset {
    let countries = raw
        .into_iter()
        .map(|c| {
            let states = c
                .states
                .into_iter()
                .map(|s| {
                    let cities = s
                        .cities
                        .into_iter()
                        .map(|city| City {
                            name: city.name,
                            latitude: parse_opt_f64(&city.latitude),
                            longitude: parse_opt_f64(&city.longitude),
                        })
                        .collect();

                    State {
                        name: s.name,
                        code: s.iso2,
                        latitude: parse_opt_f64(&s.latitude),
                        longitude: parse_opt_f64(&s.longitude),
                        cities,
                    }
                })
                .collect();

            Country {
                name: c.name,
                iso2: c.iso2,
                iso3: c.iso3,
                region: c.region,
                subregion: c.subregion,
                latitude: parse_opt_f64(&c.latitude),
                longitude: parse_opt_f64(&c.longitude),
                states,
            }
        })
        .collect();

    GeoDataset { countries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn romania() -> Country {
        Country {
            name: "Romania".into(),
            iso2: "RO".into(),
            iso3: Some("ROU".into()),
            region: Some("Europe".into()),
            subregion: Some("Eastern Europe".into()),
            latitude: Some(46.0),
            longitude: Some(25.0),
            states: vec![State {
                name: "Buzău".into(),
                code: Some("BZ".into()),
                latitude: Some(45.15),
                longitude: Some(26.82),
                cities: vec![City {
                    name: "Buzău".into(),
                    latitude: Some(45.15),
                    longitude: Some(26.83),
                }],
            }],
        }
    }

    #[test]
    fn entry_ids_encode_ancestry() {
        let country = romania();
        let state = &country.states[0];
        let city = &state.cities[0];

        assert_eq!(country.entry().id, "country-RO");
        assert_eq!(state.entry(&country).id, "state-RO-BZ");
        assert_eq!(city.entry(&country, state).id, "city-RO-BZ-Buzău");
    }

    #[test]
    fn city_parent_is_state_comma_country() {
        let country = romania();
        let state = &country.states[0];
        let entry = state.cities[0].entry(&country, state);
        assert_eq!(entry.parent.as_deref(), Some("Buzău, Romania"));
        assert_eq!(entry.kind, LocationKind::City);
    }

    #[test]
    fn coordinates_require_both_axes() {
        let mut entry = romania().entry();
        assert!(entry.coordinates().is_some());
        entry.longitude = None;
        assert_eq!(entry.coordinates(), None);
    }

    #[test]
    fn country_lookup_is_case_insensitive() {
        let db = GeoDataset {
            countries: vec![romania()],
        };
        assert!(db.find_country_by_iso2("ro").is_some());
        assert!(db.find_country_by_code("rou").is_some());
        assert!(db.find_country_by_code("XX").is_none());
    }
}
