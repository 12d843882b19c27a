//! Attraction recoding
//!
//! The single mapping from raw attraction-existence values onto the two
//! canonical labels. Anything outside the recognized set stays unlabeled.

use crate::dataset::{AttractionLabel, RawAttraction};

/// Map a raw attraction value to its canonical label.
///
/// Recognized values:
/// - `true`, `1`, `"exists"` → [`AttractionLabel::Exists`]
/// - `false`, `0`, `"does not exist"` → [`AttractionLabel::DoesNotExist`]
///
/// Text matching ignores case and surrounding whitespace. Every other value,
/// including a missing cell, returns `None`.
pub fn recode_attraction(raw: &RawAttraction) -> Option<AttractionLabel> {
    match raw {
        RawAttraction::Bool(true) => Some(AttractionLabel::Exists),
        RawAttraction::Bool(false) => Some(AttractionLabel::DoesNotExist),
        RawAttraction::Number(n) if *n == 1.0 => Some(AttractionLabel::Exists),
        RawAttraction::Number(n) if *n == 0.0 => Some(AttractionLabel::DoesNotExist),
        RawAttraction::Number(_) => None,
        RawAttraction::Text(text) => {
            let text = text.trim();
            if text.eq_ignore_ascii_case("exists") {
                Some(AttractionLabel::Exists)
            } else if text.eq_ignore_ascii_case("does not exist") {
                Some(AttractionLabel::DoesNotExist)
            } else {
                None
            }
        }
        RawAttraction::Missing => None,
    }
}
