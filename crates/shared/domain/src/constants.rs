//! Domain-level constants.

// =============================================================================
// Presentation
// =============================================================================

/// Placeholder shown for a detail field the user record does not carry
pub const NOT_AVAILABLE: &str = "N/A";

/// Separator between the parts of a formatted address
pub const ADDRESS_SEPARATOR: &str = ", ";

/// Prefix added to a username when shown as a handle
pub const HANDLE_PREFIX: &str = "@";
