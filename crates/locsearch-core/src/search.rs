// crates/locsearch-core/src/search.rs

//! The ranked location search engine.
//!
//! One full scan over the dataset per query — countries, then states,
//! then cities — followed by one global rank-and-truncate. The limit is
//! applied only after ranking, so an early country match can never crowd
//! out a closer-ranked city found later in the scan.

use tracing::debug;

use crate::model::{Country, GeoDataset, LocationEntry, State};
use crate::text::{fold_lower, NameMatch};

/// Queries shorter than this (trimmed, in characters) return nothing
/// without scanning.
pub const MIN_QUERY_LEN: usize = 2;

/// Default result limit for plain searches.
pub const DEFAULT_LIMIT: usize = 10;

/// Result limit for the map-oriented suggestion variant.
pub const SUGGESTION_LIMIT: usize = 5;

/// Match quality, orthogonal to the entry's kind. Lower sorts first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum MatchTier {
    Exact,
    Prefix,
    Substring,
}

/// Tier of `name` against the already-folded query, `None` if the name
/// does not contain the query at all.
fn name_tier(name: &str, query: &str) -> Option<MatchTier> {
    let folded = fold_lower(name);
    if folded == query {
        Some(MatchTier::Exact)
    } else if folded.starts_with(query) {
        Some(MatchTier::Prefix)
    } else if folded.contains(query) {
        Some(MatchTier::Substring)
    } else {
        None
    }
}

fn code_contains(code: Option<&str>, query: &str) -> bool {
    code.is_some_and(|c| fold_lower(c).contains(query))
}

/// A scanned match awaiting the global sort.
struct Hit {
    tier: MatchTier,
    sort_key: String,
    entry: LocationEntry,
}

impl Hit {
    fn new(tier: MatchTier, entry: LocationEntry) -> Self {
        Self {
            tier,
            sort_key: crate::text::fold_key(&entry.name),
            entry,
        }
    }
}

impl GeoDataset {
    /// Ranked search across countries, states, and cities.
    ///
    /// Matching is case-insensitive substring containment on the name
    /// (and the ISO code, for countries and states). Ranking: exact name
    /// matches first, then prefix matches, then mid-string matches, ties
    /// broken lexicographically on the folded name. Pure function of
    /// `(query, limit)` against the immutable dataset.
    pub fn search(&self, query: &str, limit: usize) -> Vec<LocationEntry> {
        let q = fold_lower(query);
        if q.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }

        let mut hits: Vec<Hit> = Vec::new();

        // Countries: name or ISO2/ISO3 code.
        for country in &self.countries {
            let tier = name_tier(&country.name, &q).or_else(|| {
                (code_contains(Some(country.iso2.as_str()), &q)
                    || code_contains(country.iso3.as_deref(), &q))
                .then_some(MatchTier::Substring)
            });
            if let Some(tier) = tier {
                hits.push(Hit::new(tier, country.entry()));
            }
        }

        // States: name or ISO code.
        for country in &self.countries {
            for state in &country.states {
                let tier = name_tier(&state.name, &q).or_else(|| {
                    code_contains(state.code.as_deref(), &q).then_some(MatchTier::Substring)
                });
                if let Some(tier) = tier {
                    hits.push(Hit::new(tier, state.entry(country)));
                }
            }
        }

        // Cities: name only.
        for country in &self.countries {
            for state in &country.states {
                for city in &state.cities {
                    if let Some(tier) = name_tier(&city.name, &q) {
                        hits.push(Hit::new(tier, city.entry(country, state)));
                    }
                }
            }
        }

        // Stable sort: full ties keep scan order, so output is
        // deterministic for an unchanged dataset.
        hits.sort_by(|a, b| {
            a.tier
                .cmp(&b.tier)
                .then_with(|| a.sort_key.cmp(&b.sort_key))
                .then_with(|| a.entry.name.cmp(&b.entry.name))
        });
        hits.truncate(limit);

        debug!(query = %q, limit, results = hits.len(), "search complete");
        hits.into_iter().map(|h| h.entry).collect()
    }

    /// The country entry for an ISO2 code, if any.
    pub fn country_entry(&self, iso2: &str) -> Option<LocationEntry> {
        self.find_country_by_iso2(iso2).map(Country::entry)
    }

    /// The state entry for a country ISO2 code and state code, if any.
    pub fn state_entry(&self, iso2: &str, state_code: &str) -> Option<LocationEntry> {
        let country = self.find_country_by_iso2(iso2)?;
        self.find_state(country, state_code)
            .map(|s| s.entry(country))
    }

    /// Every country as an entry, in dataset order.
    pub fn country_entries(&self) -> Vec<LocationEntry> {
        self.countries.iter().map(Country::entry).collect()
    }

    /// Every state of a country as an entry; empty if the country is
    /// unknown.
    pub fn state_entries(&self, iso2: &str) -> Vec<LocationEntry> {
        match self.find_country_by_iso2(iso2) {
            Some(country) => country.states.iter().map(|s| s.entry(country)).collect(),
            None => Vec::new(),
        }
    }

    /// Every city of a state as an entry; empty if country or state is
    /// unknown.
    pub fn city_entries(&self, iso2: &str, state_code: &str) -> Vec<LocationEntry> {
        let Some(country) = self.find_country_by_iso2(iso2) else {
            return Vec::new();
        };
        match self.find_state(country, state_code) {
            Some(state) => state
                .cities
                .iter()
                .map(|c| c.entry(country, state))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Cities whose folded name contains the query, with their ancestry.
    /// Unranked scan used by the CLI `cities` listing.
    pub fn find_cities_by_substring(&self, substr: &str) -> Vec<(&crate::model::City, &State, &Country)> {
        let q = fold_lower(substr);
        let mut out = Vec::new();
        if q.is_empty() {
            return out;
        }
        for country in &self.countries {
            for state in &country.states {
                for city in &state.cities {
                    if fold_lower(&city.name).contains(&q) {
                        out.push((city, state, country));
                    }
                }
            }
        }
        out
    }

    /// Accent-insensitive state lookup by ISO code, falling back to the
    /// state name for datasets without codes.
    fn find_state<'a>(&self, country: &'a Country, state_code: &str) -> Option<&'a State> {
        country
            .states
            .iter()
            .find(|s| {
                s.code
                    .as_deref()
                    .is_some_and(|c| c.eq_ignore_ascii_case(state_code.trim()))
            })
            .or_else(|| country.states.iter().find(|s| s.is_named(state_code)))
    }
}
