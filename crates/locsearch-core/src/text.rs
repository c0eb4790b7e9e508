// crates/locsearch-core/src/text.rs

//! Text normalization for matching and collation.
//!
//! Two folds with two jobs:
//! - [`fold_lower`] is the *matching* key: trim + lowercase. Search
//!   containment is defined on this form, so "Buzău" matches "buz" but
//!   not "buzau".
//! - [`fold_key`] is the *collation* key: transliterated to ASCII and
//!   lowercased, so "Brașov" and "Brasov" sort next to each other and
//!   code lookups tolerate accents.

use deunicode::deunicode;

/// Trimmed, lower-cased form used for substring matching.
pub fn fold_lower(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Accent-insensitive, case-insensitive key used for sorting and
/// name-equality lookups.
pub fn fold_key(s: &str) -> String {
    deunicode(s.trim()).to_lowercase()
}

/// `true` if `a` and `b` are equal after [`fold_key`] normalization.
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// Name-based matching helpers for types that expose a canonical
/// display name.
///
/// # Examples
/// ```
/// use locsearch_core::text::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Łódź").is_named("lodz"));
/// assert!(Place("Zürich").name_contains("zuri"));
/// ```
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;

    /// Accent-insensitive and case-insensitive name equality.
    #[inline]
    fn is_named(&self, q: &str) -> bool {
        equals_folded(self.name_str(), q)
    }

    /// Accent-insensitive and case-insensitive substring match.
    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        fold_key(self.name_str()).contains(&fold_key(q))
    }
}
