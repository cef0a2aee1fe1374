//! Utterance parsing and normalization.
//!
//! Utterances embed slot references with the `{example value:=>slotName}`
//! syntax, e.g. `"add {milk:=>Item} to the list"`. This module extracts
//! those references, folds text for accent-insensitive comparison, and
//! reduces utterances to a canonical short form used for duplicate
//! detection.

use deunicode::deunicode;
use regex::Regex;
use std::sync::OnceLock;

/// One slot reference inside an utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotReference {
    /// Example value spoken in the utterance.
    pub value: String,
    /// Slot name the value is bound to.
    pub name: String,
}

fn slot_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{([^{}]*?):=>([^{}]+?)\}").expect("slot reference pattern is valid")
    })
}

/// Extract all slot references from an utterance, in order of appearance.
pub fn slot_references(utterance: &str) -> Vec<SlotReference> {
    slot_pattern()
        .captures_iter(utterance)
        .map(|caps| SlotReference {
            value: caps[1].trim().to_string(),
            name: caps[2].trim().to_string(),
        })
        .collect()
}

/// Fold text for comparison: transliterate to ASCII and lowercase.
///
/// Mirrors how slot values are matched by the host NLU: `Mönchengladbach`
/// and `monchengladbach` compare equal.
pub fn fold(text: &str) -> String {
    deunicode(text).to_lowercase()
}

/// Reduce an utterance to its canonical short form.
///
/// Slot references collapse to `{slotName}`, the text is folded, and runs of
/// whitespace become single spaces. Two utterances with equal short forms
/// differ only in example values or spelling noise.
pub fn short_form(utterance: &str) -> String {
    let collapsed = slot_pattern().replace_all(utterance, |caps: &regex::Captures<'_>| {
        format!("{{{}}}", caps[2].trim())
    });
    fold(&collapsed)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
