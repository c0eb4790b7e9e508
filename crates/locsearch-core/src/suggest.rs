// crates/locsearch-core/src/suggest.rs

//! Debounced search sessions and map-ready suggestions.
//!
//! A [`SearchSession`] turns raw per-keystroke text into rate-limited
//! searches: raw changes re-arm a single trailing [`Debouncer`] timer,
//! and only the final pending value ever commits. Time is explicit —
//! callers pass `Instant`s into [`SearchSession::set_query`] and
//! [`SearchSession::poll`] — so there is no hidden clock and at most one
//! pending timer exists at any moment.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::error::Result;
use crate::model::{GeoDataset, LocationEntry, LocationKind};
use crate::search::{MIN_QUERY_LEN, SUGGESTION_LIMIT};

/// Default trailing-debounce window.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// Anything that can answer a ranked location search.
///
/// The in-memory [`GeoDataset`] is the canonical source; the trait is
/// the seam that lets a remote geocoding backend slot in later without
/// changing the session contract.
pub trait LocationSource {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<LocationEntry>>;
}

impl LocationSource for GeoDataset {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<LocationEntry>> {
        Ok(GeoDataset::search(self, query, limit))
    }
}

impl<S: LocationSource + ?Sized> LocationSource for &S {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<LocationEntry>> {
        (**self).search(query, limit)
    }
}

/// Single trailing-debounce timer: re-armed (never accumulated) on every
/// submit, cancelled on demand, committed by polling.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Arm (or re-arm) the timer with a new value. Any earlier pending
    /// value is discarded.
    pub fn submit(&mut self, value: impl Into<String>, now: Instant) {
        self.pending = Some((value.into(), now + self.delay));
    }

    /// Commit the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if self.pending.as_ref().is_some_and(|(_, due)| *due <= now) {
            self.pending.take().map(|(v, _)| v)
        } else {
            None
        }
    }

    /// Drop any pending value without committing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_DELAY)
    }
}

/// Observable lifecycle of one debounced search.
///
/// The in-memory engine resolves synchronously, but the phase is still
/// modeled as discrete transitions so a remote [`LocationSource`] with
/// real latency observes the same contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Loading,
    Done,
}

/// Debounced search state over a [`LocationSource`].
#[derive(Debug)]
pub struct SearchSession<S> {
    source: S,
    debouncer: Debouncer,
    limit: usize,
    /// When set, results are narrowed to coordinate-bearing entries
    /// after the search/limit step (map-suggestion variant).
    map_only: bool,
    phase: SearchPhase,
    committed_query: String,
    results: Vec<LocationEntry>,
    error: Option<String>,
}

impl<S: LocationSource> SearchSession<S> {
    /// General-purpose session with the given result limit.
    pub fn new(source: S, limit: usize) -> Self {
        Self {
            source,
            debouncer: Debouncer::default(),
            limit,
            map_only: false,
            phase: SearchPhase::Idle,
            committed_query: String::new(),
            results: Vec::new(),
            error: None,
        }
    }

    /// Map-suggestion variant: limit 5, entries without coordinates
    /// dropped after the search. May yield fewer than the limit; never
    /// compensates with coordinate-less entries.
    pub fn suggestions(source: S) -> Self {
        let mut session = Self::new(source, SUGGESTION_LIMIT);
        session.map_only = true;
        session
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.debouncer = Debouncer::new(delay);
        self
    }

    /// Record a raw query change. The same minimum-length gate as the
    /// engine applies here: below two trimmed characters the session
    /// clears immediately and arms no timer, so the two layers can never
    /// disagree about "query too short".
    pub fn set_query(&mut self, query: &str, now: Instant) {
        if query.trim().chars().count() < MIN_QUERY_LEN {
            self.debouncer.cancel();
            self.results.clear();
            self.error = None;
            self.phase = SearchPhase::Idle;
            self.committed_query.clear();
            return;
        }
        self.debouncer.submit(query, now);
    }

    /// Drive the debounce timer. Returns `true` when a search ran.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(query) = self.debouncer.poll(now) else {
            return false;
        };
        self.run_search(&query);
        true
    }

    fn run_search(&mut self, query: &str) {
        self.phase = SearchPhase::Loading;
        self.error = None;
        trace!(query, limit = self.limit, map_only = self.map_only, "session search");

        match self.source.search(query, self.limit) {
            Ok(mut results) => {
                if self.map_only {
                    results.retain(|e| e.coordinates().is_some());
                }
                self.results = results;
            }
            Err(err) => {
                // Degrades to the empty-results display; the error is
                // surfaced as a message, never rethrown.
                self.error = Some(err.to_string());
                self.results.clear();
            }
        }
        self.committed_query = query.to_string();
        self.phase = SearchPhase::Done;
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// `true` while a committed-but-unresolved search is outstanding or
    /// a timer is still pending.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending() || self.phase == SearchPhase::Loading
    }

    pub fn results(&self) -> &[LocationEntry] {
        &self.results
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// Results narrowed to one kind, preserving rank order.
    pub fn results_of_kind(&self, kind: LocationKind) -> impl Iterator<Item = &LocationEntry> {
        self.results.iter().filter(move |e| e.kind == kind)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The query of the most recently resolved search.
    pub fn committed_query(&self) -> &str {
        &self.committed_query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LocationError;
    use crate::model::{City, Country, GeoDataset, State};

    fn dataset() -> GeoDataset {
        GeoDataset {
            countries: vec![Country {
                name: "Romania".into(),
                iso2: "RO".into(),
                iso3: Some("ROU".into()),
                region: None,
                subregion: None,
                latitude: Some(45.94),
                longitude: Some(24.96),
                states: vec![State {
                    name: "Buzău".into(),
                    code: Some("BZ".into()),
                    latitude: None,
                    longitude: None,
                    cities: vec![City {
                        name: "Buzău".into(),
                        latitude: Some(45.15),
                        longitude: Some(26.83),
                    }],
                }],
            }],
        }
    }

    struct FailingSource;

    impl LocationSource for FailingSource {
        fn search(&self, _query: &str, _limit: usize) -> Result<Vec<LocationEntry>> {
            Err(LocationError::Search("backend unavailable".into()))
        }
    }

    #[test]
    fn debouncer_commits_only_the_final_value() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.submit("b", t0);
        debouncer.submit("bu", t0 + Duration::from_millis(100));
        debouncer.submit("buz", t0 + Duration::from_millis(200));

        // First deadline would have fired by now, but it was re-armed.
        assert_eq!(debouncer.poll(t0 + Duration::from_millis(400)), None);
        assert_eq!(
            debouncer.poll(t0 + Duration::from_millis(500)),
            Some("buz".to_string())
        );
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn rapid_changes_coalesce_into_one_search() {
        let t0 = Instant::now();
        let db = dataset();
        let mut session = SearchSession::new(&db, 10);

        session.set_query("bu", t0);
        session.set_query("buz", t0 + Duration::from_millis(50));
        session.set_query("buză", t0 + Duration::from_millis(100));

        let mut searches = 0;
        for ms in (0..=1000).step_by(50) {
            if session.poll(t0 + Duration::from_millis(ms)) {
                searches += 1;
            }
        }
        assert_eq!(searches, 1);
        assert_eq!(session.committed_query(), "buză");
    }

    #[test]
    fn short_query_clears_without_searching() {
        let t0 = Instant::now();
        let db = dataset();
        let mut session = SearchSession::new(&db, 10);

        session.set_query("bu", t0);
        assert!(session.poll(t0 + DEBOUNCE_DELAY));
        assert!(session.has_results());

        session.set_query("b", t0 + Duration::from_millis(400));
        assert!(session.results().is_empty());
        assert_eq!(session.phase(), SearchPhase::Idle);
        // The elapsed debounce window commits nothing.
        assert!(!session.poll(t0 + Duration::from_secs(2)));
    }

    #[test]
    fn suggestions_drop_entries_without_coordinates() {
        let t0 = Instant::now();
        let db = dataset();
        let mut session = SearchSession::suggestions(&db);

        session.set_query("buz", t0);
        session.poll(t0 + DEBOUNCE_DELAY);

        // The Buzău *state* has no coordinates and is filtered out; the
        // country and city survive.
        assert!(session.has_results());
        for entry in session.results() {
            assert!(entry.coordinates().is_some());
        }
        assert!(!session.results().iter().any(|e| e.id == "state-RO-BZ"));
    }

    #[test]
    fn suggestions_are_a_subset_of_plain_search() {
        let t0 = Instant::now();
        let db = dataset();
        let mut session = SearchSession::suggestions(&db);
        session.set_query("buz", t0);
        session.poll(t0 + DEBOUNCE_DELAY);

        let plain = crate::model::GeoDataset::search(&db, "buz", SUGGESTION_LIMIT);
        for entry in session.results() {
            assert!(plain.iter().any(|p| p.id == entry.id));
        }
    }

    #[test]
    fn grouping_by_kind_preserves_rank_order() {
        let t0 = Instant::now();
        let db = dataset();
        let mut session = SearchSession::new(&db, 10);
        session.set_query("bu", t0);
        session.poll(t0 + DEBOUNCE_DELAY);

        let all = session.results();
        for kind in [
            LocationKind::Country,
            LocationKind::State,
            LocationKind::City,
        ] {
            let grouped: Vec<_> = session.results_of_kind(kind).map(|e| &e.id).collect();
            let expected: Vec<_> = all
                .iter()
                .filter(|e| e.kind == kind)
                .map(|e| &e.id)
                .collect();
            assert_eq!(grouped, expected);
        }
        // Every result lands in exactly one group.
        let total: usize = [LocationKind::Country, LocationKind::State, LocationKind::City]
            .into_iter()
            .map(|k| session.results_of_kind(k).count())
            .sum();
        assert_eq!(total, all.len());
    }

    #[test]
    fn failing_source_surfaces_an_error_state() {
        let t0 = Instant::now();
        let mut session = SearchSession::new(FailingSource, 10);

        session.set_query("buz", t0);
        assert!(session.poll(t0 + DEBOUNCE_DELAY));

        assert!(session.results().is_empty());
        assert_eq!(session.error(), Some("search failed: backend unavailable"));
        assert_eq!(session.phase(), SearchPhase::Done);
    }
}
