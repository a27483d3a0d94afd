//! Asset business logic.
//!
//! Validation of create/update payloads and the derived status flags shown on
//! every asset response. Nothing here depends on the database crate; callers
//! pass stored values in and persist the validated result.

pub mod status;
pub mod validation;

/// Maximum length of an asset name, in characters.
pub const MAX_NAME_LENGTH: usize = 200;
