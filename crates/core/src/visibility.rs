//! Revision visibility bits and the counter adjustments they imply.
//!
//! The host stores a small bitmask per revision describing which parts of it
//! are suppressed. Only [`DELETED_USER`] matters for contributor counts: a
//! revision whose editor identity is hidden no longer counts toward that
//! editor's tally.

/// Revision text hidden.
pub const DELETED_TEXT: i16 = 0b0001;
/// Editor identity hidden.
pub const DELETED_USER: i16 = 0b0010;
/// Edit summary hidden.
pub const DELETED_COMMENT: i16 = 0b0100;
/// Suppression applies to administrators too.
pub const DELETED_RESTRICTED: i16 = 0b1000;

/// Whether the editor identity is visible under `bits`.
pub fn user_visible(bits: i16) -> bool {
    bits & DELETED_USER == 0
}

/// How a visibility change affects the editor's contributor count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityChange {
    /// Identity went from visible to hidden: decrement.
    Hidden,
    /// Identity went from hidden to visible: increment.
    Revealed,
    /// Identity bit did not change.
    Unchanged,
}

impl IdentityChange {
    /// Classify a change from `old_bits` to `new_bits`.
    pub fn between(old_bits: i16, new_bits: i16) -> Self {
        match (user_visible(old_bits), user_visible(new_bits)) {
            (true, false) => Self::Hidden,
            (false, true) => Self::Revealed,
            _ => Self::Unchanged,
        }
    }

    /// The counter delta this change requires.
    pub fn delta(self) -> i32 {
        match self {
            Self::Hidden => -1,
            Self::Revealed => 1,
            Self::Unchanged => 0,
        }
    }
}
