//! End-to-end flow: keystrokes → debounce → suggestions → selection →
//! map focus, over the bundled dataset.

use std::time::{Duration, Instant};

use locsearch_core::map::zoom_for;
use locsearch_core::suggest::DEBOUNCE_DELAY;
use locsearch_core::{
    GeoDataset, Key, LocationKind, MapView, PanelState, SearchInput, SearchSession,
    SUGGESTION_LIMIT,
};

fn dataset() -> GeoDataset {
    GeoDataset::load().expect("bundled dataset")
}

#[test]
fn suggestions_are_coordinate_bearing_subsets_of_search() {
    let db = dataset();
    let t0 = Instant::now();

    for query in ["bu", "ge", "paris", "versailles", "br"] {
        let mut session = SearchSession::suggestions(&db);
        session.set_query(query, t0);
        session.poll(t0 + DEBOUNCE_DELAY);

        let plain = db.search(query, SUGGESTION_LIMIT);
        assert!(session.results().len() <= SUGGESTION_LIMIT);
        for entry in session.results() {
            assert!(entry.coordinates().is_some(), "{} lacks coordinates", entry.id);
            assert!(
                plain.iter().any(|p| p.id == entry.id),
                "{} not in plain search",
                entry.id
            );
        }
    }
}

#[test]
fn coordinate_filter_never_backfills_the_limit() {
    let db = dataset();
    let t0 = Instant::now();

    // Versailles is the only "versailles" match and has no coordinates:
    // the suggestion list is simply empty, not topped up.
    let mut session = SearchSession::suggestions(&db);
    session.set_query("versailles", t0);
    session.poll(t0 + DEBOUNCE_DELAY);
    assert!(session.results().is_empty());
    assert!(session.error().is_none());
}

#[test]
fn typing_selecting_and_focusing_the_map() {
    let db = dataset();
    let t0 = Instant::now();
    let mut input = SearchInput::new(&db);
    let mut map = MapView::default();

    // The user types "buz" one keystroke at a time.
    let mut now = t0;
    for (i, prefix) in ["b", "bu", "buz"].iter().enumerate() {
        now = t0 + Duration::from_millis(60 * i as u64);
        input.type_text(prefix, now);
        input.tick(now);
    }
    assert_eq!(input.panel(), PanelState::Loading);

    // Debounce settles: exactly one search ran, for the final text.
    now += DEBOUNCE_DELAY;
    input.tick(now);
    assert_eq!(input.panel(), PanelState::Results);

    // Keyboard-select the city of Buzău.
    let city_index = input
        .suggestions()
        .iter()
        .position(|e| e.kind == LocationKind::City && e.name == "Buzău")
        .expect("Buzău city suggested");
    for _ in 0..=city_index {
        input.key(Key::ArrowDown, now);
    }
    let selected = input.key(Key::Enter, now).expect("selection committed");
    assert_eq!(input.text(), "Buzău");
    assert_eq!(input.panel(), PanelState::Closed);

    // The map recenters with city-tier zoom and exactly one marker.
    assert!(map.focus(&selected));
    assert_eq!(map.viewport().zoom, zoom_for(LocationKind::City));
    assert_eq!(map.viewport().center, (45.15, 26.83333));
    let marker = map.marker().expect("one marker");
    assert_eq!(marker.title, "Buzău");
    assert!(marker.description.contains("Romania"));
    let first_marker_id = marker.id.clone();

    // A second selection replaces, never accumulates.
    input.type_text("paris", now);
    now += DEBOUNCE_DELAY;
    input.tick(now);
    let paris = input.click(0, now).expect("Paris committed");
    assert!(map.focus(&paris));
    assert_eq!(map.marker().unwrap().title, "Paris");
    assert!(map.marker_by_id(&first_marker_id).is_none());
}

#[test]
fn selection_zoom_depends_on_kind() {
    let db = dataset();
    let mut map = MapView::default();

    let country = db.country_entry("RO").unwrap();
    let state = db.state_entry("RO", "BZ").unwrap();

    map.focus(&country);
    let country_zoom = map.viewport().zoom;
    map.focus(&state);
    let state_zoom = map.viewport().zoom;

    assert!(country_zoom < state_zoom);
    assert_eq!(country_zoom, zoom_for(LocationKind::Country));
}
