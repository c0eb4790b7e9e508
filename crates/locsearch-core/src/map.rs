// crates/locsearch-core/src/map.rs

//! Map viewport/marker synchronization for selected locations.
//!
//! The rendering surface itself is an external collaborator; this module
//! owns the state it renders from: a center + zoom viewport and at most
//! one marker, replaced (never accumulated) on each selection.

use serde::{Deserialize, Serialize};

use crate::model::{LocationEntry, LocationKind};

/// Brașov, Romania — the platform's home viewport.
pub const DEFAULT_CENTER: (f64, f64) = (45.6427, 25.5887);
pub const DEFAULT_ZOOM: u8 = 8;

/// Zoom level for a selected entry, coarser for larger areas. The
/// country < state < city ordering is load-bearing; the numbers are
/// presentation choices.
pub fn zoom_for(kind: LocationKind) -> u8 {
    match kind {
        LocationKind::Country => 6,
        LocationKind::State => 8,
        LocationKind::City => 12,
        LocationKind::Region | LocationKind::Subregion => 10,
    }
}

/// What the map is currently looking at.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// `(lat, lon)`.
    pub center: (f64, f64),
    pub zoom: u8,
}

/// A single pin on the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    /// `(lat, lon)`.
    pub position: (f64, f64),
    pub title: String,
    pub description: String,
}

/// Map state: one viewport, at most one marker.
#[derive(Clone, Debug)]
pub struct MapView {
    viewport: Viewport,
    marker: Option<Marker>,
}

impl MapView {
    pub fn new(center: (f64, f64), zoom: u8) -> Self {
        Self {
            viewport: Viewport { center, zoom },
            marker: None,
        }
    }

    /// Recenter on a selected entry and replace the marker.
    ///
    /// Entries without coordinates are a no-op (suggestion consumers
    /// filter those out, but the map does not assume its caller did).
    /// Returns `true` when the view changed.
    pub fn focus(&mut self, entry: &LocationEntry) -> bool {
        let Some(position) = entry.coordinates() else {
            return false;
        };
        self.viewport = Viewport {
            center: position,
            zoom: zoom_for(entry.kind),
        };
        self.marker = Some(Marker {
            id: entry.id.clone(),
            position,
            title: entry.name.clone(),
            description: entry
                .parent
                .clone()
                .unwrap_or_else(|| entry.kind.label().to_string()),
        });
        true
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }

    /// Marker-click event from the rendering surface, resolved by id.
    pub fn marker_by_id(&self, id: &str) -> Option<&Marker> {
        self.marker.as_ref().filter(|m| m.id == id)
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER, DEFAULT_ZOOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(kind: LocationKind, coords: Option<(f64, f64)>) -> LocationEntry {
        LocationEntry {
            id: format!("{}-X", kind.as_str()),
            name: "Somewhere".into(),
            kind,
            country_code: Some("RO".into()),
            state_code: None,
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
            parent: None,
        }
    }

    #[test]
    fn zoom_is_monotonic_across_the_hierarchy() {
        assert!(zoom_for(LocationKind::Country) < zoom_for(LocationKind::State));
        assert!(zoom_for(LocationKind::State) < zoom_for(LocationKind::City));
    }

    #[test]
    fn focus_recenters_and_places_one_marker() {
        let mut map = MapView::default();
        let city = entry(LocationKind::City, Some((45.15, 27.83)));

        assert!(map.focus(&city));
        assert_eq!(map.viewport().center, (45.15, 27.83));
        assert_eq!(map.viewport().zoom, zoom_for(LocationKind::City));
        assert_eq!(map.marker().unwrap().id, "city-X");
    }

    #[test]
    fn focus_replaces_the_previous_marker() {
        let mut map = MapView::default();
        map.focus(&entry(LocationKind::City, Some((45.15, 27.83))));
        map.focus(&entry(LocationKind::Country, Some((46.0, 25.0))));

        let marker = map.marker().unwrap();
        assert_eq!(marker.id, "country-X");
        assert!(map.marker_by_id("city-X").is_none());
        assert!(map.marker_by_id("country-X").is_some());
    }

    #[test]
    fn missing_coordinates_are_a_no_op() {
        let mut map = MapView::default();
        let before = map.viewport();

        assert!(!map.focus(&entry(LocationKind::State, None)));
        assert_eq!(map.viewport(), before);
        assert!(map.marker().is_none());
    }

    #[test]
    fn marker_description_falls_back_to_the_kind_label() {
        let mut map = MapView::default();
        let mut e = entry(LocationKind::City, Some((1.0, 2.0)));
        map.focus(&e);
        assert_eq!(map.marker().unwrap().description, "City");

        e.parent = Some("Buzău, Romania".into());
        map.focus(&e);
        assert_eq!(map.marker().unwrap().description, "Buzău, Romania");
    }
}
