// crates/locsearch-core/src/input.rs

//! The search-box state machine.
//!
//! [`SearchInput`] owns the text value, the open/closed suggestion
//! panel, the keyboard highlight, and a debounced suggestion session.
//! It is UI-toolkit agnostic: the host feeds it keystrokes, focus/blur
//! events and clock ticks, renders from its accessors, and receives the
//! committed [`LocationEntry`] as a return value.

use std::time::{Duration, Instant};

use crate::model::LocationEntry;
use crate::search::MIN_QUERY_LEN;
use crate::suggest::{LocationSource, SearchPhase, SearchSession};

/// Grace window after blur before the panel closes, long enough for a
/// pointer click on a suggestion to land first.
pub const BLUR_GRACE: Duration = Duration::from_millis(150);

/// Suggestion panel state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    /// Open, search not yet resolved.
    Loading,
    /// Open with at least one suggestion.
    Results,
    /// Open, resolved, nothing found ("No locations found").
    NoResults,
}

/// Keys the input reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// A text input with a keyboard-navigable suggestion panel.
#[derive(Debug)]
pub struct SearchInput<S> {
    session: SearchSession<S>,
    text: String,
    panel: PanelState,
    /// `None` means "no highlight": the input text itself is the
    /// implied selection.
    highlight: Option<usize>,
    focused: bool,
    blur_deadline: Option<Instant>,
    focus_in_panel: bool,
}

impl<S: LocationSource> SearchInput<S> {
    /// A fresh, closed input over the map-suggestion session (limit 5,
    /// coordinate-bearing entries only).
    pub fn new(source: S) -> Self {
        Self {
            session: SearchSession::suggestions(source),
            text: String::new(),
            panel: PanelState::Closed,
            highlight: None,
            focused: false,
            blur_deadline: None,
            focus_in_panel: false,
        }
    }

    /// Initial text supplied by the caller; the panel stays closed.
    pub fn with_value(mut self, value: &str, now: Instant) -> Self {
        self.set_text(value, now);
        self
    }

    fn eligible(&self) -> bool {
        self.text.trim().chars().count() >= MIN_QUERY_LEN
    }

    /// A user keystroke changed the text. Eligible text opens the panel
    /// in `Loading` immediately, without waiting for the debounce.
    pub fn type_text(&mut self, text: &str, now: Instant) {
        self.text = text.to_string();
        self.highlight = None;
        self.session.set_query(text, now);
        self.panel = if self.eligible() {
            PanelState::Loading
        } else {
            PanelState::Closed
        };
    }

    /// Externally-controlled value push: updates text and the session
    /// without opening the panel.
    pub fn set_text(&mut self, text: &str, now: Instant) {
        self.text = text.to_string();
        self.session.set_query(text, now);
        if !self.eligible() {
            self.panel = PanelState::Closed;
            self.highlight = None;
        }
    }

    /// Focus entered the input. Reopens the panel in its last known
    /// state; only re-triggers a search when the resolved results are
    /// stale for the current text.
    pub fn focus(&mut self, now: Instant) {
        self.focused = true;
        self.blur_deadline = None;
        self.focus_in_panel = false;
        if !self.eligible() || self.panel != PanelState::Closed {
            return;
        }
        let fresh = self.session.phase() == SearchPhase::Done
            && self.session.committed_query() == self.text;
        self.panel = if fresh {
            self.resolved_panel()
        } else {
            self.session.set_query(&self.text, now);
            PanelState::Loading
        };
    }

    /// Focus left the input: arm the grace timer instead of closing
    /// outright, so a click on a suggestion still registers.
    pub fn blur(&mut self, now: Instant) {
        self.focused = false;
        self.focus_in_panel = false;
        self.blur_deadline = Some(now + BLUR_GRACE);
    }

    /// Focus landed inside the suggestion panel; the pending blur-close
    /// is abandoned.
    pub fn focus_moved_to_panel(&mut self) {
        self.focus_in_panel = true;
    }

    /// Drive pending timers: commits the debounced search and applies a
    /// matured blur-close. Call whenever the host's clock advances.
    pub fn tick(&mut self, now: Instant) {
        if self.session.poll(now) && self.panel != PanelState::Closed {
            self.panel = self.resolved_panel();
            self.highlight = None;
        }
        if let Some(deadline) = self.blur_deadline {
            if now >= deadline {
                self.blur_deadline = None;
                if !self.focus_in_panel {
                    self.close_panel();
                }
            }
        }
    }

    /// Keyboard input. Returns the committed entry on Enter.
    pub fn key(&mut self, key: Key, now: Instant) -> Option<LocationEntry> {
        match key {
            Key::ArrowDown => {
                if self.panel == PanelState::Results {
                    if let Some(last) = self.session.results().len().checked_sub(1) {
                        self.highlight = Some(match self.highlight {
                            None => 0,
                            Some(i) => (i + 1).min(last),
                        });
                    }
                }
                None
            }
            Key::ArrowUp => {
                if self.panel == PanelState::Results {
                    self.highlight = match self.highlight {
                        Some(0) | None => None,
                        Some(i) => Some(i - 1),
                    };
                }
                None
            }
            Key::Enter => match (self.panel, self.highlight) {
                (PanelState::Results, Some(i)) => self.commit(i, now),
                _ => None,
            },
            Key::Escape => {
                self.close_panel();
                self.focused = false;
                None
            }
        }
    }

    /// Pointer selection of a listed entry; identical effect to
    /// Enter-on-highlighted, regardless of the current highlight.
    pub fn click(&mut self, index: usize, now: Instant) -> Option<LocationEntry> {
        if self.panel == PanelState::Results {
            self.commit(index, now)
        } else {
            None
        }
    }

    /// Pointer hover moves the highlight.
    pub fn hover(&mut self, index: usize) {
        if self.panel == PanelState::Results && index < self.session.results().len() {
            self.highlight = Some(index);
        }
    }

    /// Explicit clear control: empties the text, closes the panel, and
    /// returns focus to the input.
    pub fn clear(&mut self, now: Instant) {
        self.text.clear();
        self.session.set_query("", now);
        self.close_panel();
        self.focused = true;
        self.blur_deadline = None;
    }

    fn commit(&mut self, index: usize, now: Instant) -> Option<LocationEntry> {
        let entry = self.session.results().get(index)?.clone();
        self.text = entry.name.clone();
        self.session.set_query(&entry.name, now);
        self.close_panel();
        self.focused = false;
        Some(entry)
    }

    fn close_panel(&mut self) {
        self.panel = PanelState::Closed;
        self.highlight = None;
    }

    fn resolved_panel(&self) -> PanelState {
        if self.session.has_results() {
            PanelState::Results
        } else {
            PanelState::NoResults
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Suggestions currently backing the panel, in rank order.
    pub fn suggestions(&self) -> &[LocationEntry] {
        self.session.results()
    }

    pub fn is_loading(&self) -> bool {
        self.panel == PanelState::Loading
    }
}
