//! Derived, read-only status flags reported alongside every asset.

use serde::Serialize;

use crate::types::Timestamp;

/// Live status of an asset relative to `now`.
///
/// These flags are recomputed on every read and are independent of the
/// notification/violation log, which records historical facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssetStatus {
    /// `now` is past the expiration time.
    pub is_expired: bool,
    /// `now` is past the service time and the asset has not been serviced.
    pub is_service_overdue: bool,
}

/// Compute the status flags for an asset at `now`.
pub fn evaluate_status(
    service_time: Timestamp,
    expiration_time: Timestamp,
    is_serviced: bool,
    now: Timestamp,
) -> AssetStatus {
    AssetStatus {
        is_expired: now > expiration_time,
        is_service_overdue: now > service_time && !is_serviced,
    }
}
