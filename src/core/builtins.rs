//! Builtin entity identifiers.
//!
//! Slot types under the `snips/` namespace are resolved by the host NLU
//! engine, not declared in dialog templates, so cross-referencing skips them.

/// Identifiers of the builtin entities the host NLU resolves on its own.
pub const BUILTIN_ENTITIES: &[&str] = &[
    "snips/amountOfMoney",
    "snips/city",
    "snips/country",
    "snips/date",
    "snips/datePeriod",
    "snips/datetime",
    "snips/duration",
    "snips/musicAlbum",
    "snips/musicArtist",
    "snips/musicTrack",
    "snips/number",
    "snips/ordinal",
    "snips/percentage",
    "snips/region",
    "snips/temperature",
    "snips/time",
    "snips/timePeriod",
];

/// Check whether a slot type name refers to a builtin entity.
pub fn is_builtin(slot_type: &str) -> bool {
    BUILTIN_ENTITIES.contains(&slot_type)
}
