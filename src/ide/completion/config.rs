//! Per-session completion switches.

/// Which extra candidate sources a session consults.
///
/// Derived from how many times the user invoked completion in a row: the
/// second invocation widens the search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompletionSessionConfiguration {
    /// Offer declarations that are not imported into the file.
    pub complete_non_imported_declarations: bool,
    /// Offer declarations the visibility rules would hide.
    pub complete_non_accessible_declarations: bool,
}

impl CompletionSessionConfiguration {
    /// Invocation count at which both switches turn on.
    pub const SECOND_INVOCATION: u32 = 2;

    pub fn from_invocation_count(invocation_count: u32) -> Self {
        let widened = invocation_count >= Self::SECOND_INVOCATION;
        Self {
            complete_non_imported_declarations: widened,
            complete_non_accessible_declarations: widened,
        }
    }
}
