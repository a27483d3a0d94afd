//! Validation of asset create/update payloads.
//!
//! Request bodies arrive as an [`AssetPayload`] with every field optional and
//! timestamps still as strings, so that a malformed timestamp becomes a
//! field-level error instead of a body rejection. Validation produces a fully
//! resolved [`AssetFields`] ready to be written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::error::{CoreError, FieldErrors, NON_FIELD_ERRORS};
use crate::types::Timestamp;

const REQUIRED: &str = "This field is required.";
const BLANK: &str = "This field may not be blank.";
const BAD_DATETIME: &str =
    "Datetime has wrong format. Use RFC 3339 with a zone designator, e.g. 2025-01-01T10:00:00Z.";
const BAD_ORDER: &str = "Service time must be before expiration time";

/// Raw asset request body for create, full update and partial update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AssetPayload {
    #[validate(length(
        max = 200,
        message = "Ensure this field has no more than 200 characters."
    ))]
    pub name: Option<String>,
    /// Outer `None`: key absent, keep the stored value. `Some(None)`: explicit
    /// `null`, clear it.
    #[serde(default, deserialize_with = "present_or_null")]
    pub description: Option<Option<String>>,
    pub service_time: Option<String>,
    pub expiration_time: Option<String>,
    pub is_serviced: Option<bool>,
}

/// A validated, fully resolved set of writable asset fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFields {
    pub name: String,
    pub description: Option<String>,
    pub service_time: Timestamp,
    pub expiration_time: Timestamp,
    pub is_serviced: bool,
}

/// How an update payload is applied to the stored asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// `PUT`: name and both timestamps must be present.
    Full,
    /// `PATCH`: omitted fields keep their stored value.
    Partial,
}

/// Validate a create payload. Name and both timestamps are required;
/// `is_serviced` defaults to `false`.
pub fn validate_create(payload: AssetPayload) -> Result<AssetFields, CoreError> {
    resolve(payload, None, UpdateMode::Full)
}

/// Validate an update payload against the currently stored values.
///
/// The ordering invariant is checked on the merged result, so a partial
/// update that only moves `service_time` past the stored `expiration_time`
/// is rejected. `description` and `is_serviced` keep their stored values
/// when omitted, in either mode.
pub fn validate_update(
    payload: AssetPayload,
    current: &AssetFields,
    mode: UpdateMode,
) -> Result<AssetFields, CoreError> {
    resolve(payload, Some(current), mode)
}

/// Parse an RFC 3339 timestamp and normalise it to UTC.
pub fn parse_timestamp(value: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Deserialize a present key as `Some(value)`, mapping `null` to `Some(None)`.
/// Combined with `#[serde(default)]`, an absent key stays `None`.
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

fn resolve(
    payload: AssetPayload,
    base: Option<&AssetFields>,
    mode: UpdateMode,
) -> Result<AssetFields, CoreError> {
    // Fallback for the required fields; a full update must supply them.
    let required_base = match mode {
        UpdateMode::Full => None,
        UpdateMode::Partial => base,
    };

    // Length is checked on the value that will be stored.
    let mut payload = payload;
    payload.name = payload.name.map(|name| name.trim().to_string());

    let mut errors = match payload.validate() {
        Ok(()) => FieldErrors::new(),
        Err(e) => FieldErrors::from(e),
    };

    let name = match payload.name {
        Some(name) if name.is_empty() => {
            errors.add("name", "blank", BLANK);
            None
        }
        Some(name) => Some(name),
        None => required_base.map(|b| b.name.clone()),
    };
    if name.is_none() && errors.get("name").is_none() {
        errors.add("name", "required", REQUIRED);
    }

    let service_time = resolve_timestamp(
        "service_time",
        payload.service_time.as_deref(),
        required_base.map(|b| b.service_time),
        &mut errors,
    );
    let expiration_time = resolve_timestamp(
        "expiration_time",
        payload.expiration_time.as_deref(),
        required_base.map(|b| b.expiration_time),
        &mut errors,
    );

    if let (Some(service), Some(expiration)) = (service_time, expiration_time) {
        if service >= expiration {
            errors.add(NON_FIELD_ERRORS, "invalid_order", BAD_ORDER);
        }
    }

    errors.into_result()?;

    // Every branch that leaves one of these `None` records an error above.
    match (name, service_time, expiration_time) {
        (Some(name), Some(service_time), Some(expiration_time)) => Ok(AssetFields {
            name,
            description: match payload.description {
                Some(description) => description,
                None => base.and_then(|b| b.description.clone()),
            },
            service_time,
            expiration_time,
            is_serviced: payload
                .is_serviced
                .or_else(|| base.map(|b| b.is_serviced))
                .unwrap_or(false),
        }),
        _ => Err(CoreError::Internal(
            "asset validation produced no errors but left fields unresolved".into(),
        )),
    }
}

fn resolve_timestamp(
    field: &str,
    raw: Option<&str>,
    fallback: Option<Timestamp>,
    errors: &mut FieldErrors,
) -> Option<Timestamp> {
    match raw {
        Some(value) => {
            let parsed = parse_timestamp(value);
            if parsed.is_none() {
                errors.add(field, "invalid", BAD_DATETIME);
            }
            parsed
        }
        None => {
            if fallback.is_none() {
                errors.add(field, "required", REQUIRED);
            }
            fallback
        }
    }
}
