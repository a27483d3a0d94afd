//! Check engine evaluation.
//!
//! Decides which notifications and violations an asset warrants at a given
//! instant. Deduplication is NOT done here: the caller writes every finding
//! with an insert-if-absent keyed on `(asset, type)` and reports only the rows
//! that were actually created via [`CheckReportBuilder`].

use std::fmt;

use chrono::{Duration, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Default lead time for service reminders, in minutes.
pub const DEFAULT_REMINDER_WINDOW_MINUTES: i64 = 15;

/// Kinds of notification the check engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// Service is due within the reminder window.
    Service,
}

impl NotificationType {
    /// Value stored in the `notifications.notification_type` column.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Service => "service",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of violation the check engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    /// Service time passed without the asset being serviced.
    NotServiced,
    /// Expiration time passed.
    Expired,
}

impl ViolationType {
    /// Value stored in the `violations.violation_type` column.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotServiced => "not_serviced",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The asset attributes the check engine looks at.
#[derive(Debug, Clone, Copy)]
pub struct CheckSubject<'a> {
    pub name: &'a str,
    pub service_time: Timestamp,
    pub expiration_time: Timestamp,
    pub is_serviced: bool,
}

/// A record the check engine wants to exist for an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    Notification {
        kind: NotificationType,
        message: String,
        /// The deadline the notification is about.
        at: Timestamp,
    },
    Violation {
        kind: ViolationType,
        description: String,
        /// The deadline that was missed.
        at: Timestamp,
    },
}

/// Evaluate one asset at `now`.
///
/// Serviced assets produce nothing. Otherwise:
/// - service reminder when `now <= service_time <= now + window`;
/// - `not_serviced` when `now > service_time`;
/// - `expired` when `now > expiration_time`, in addition to `not_serviced`.
pub fn evaluate(subject: &CheckSubject<'_>, now: Timestamp, window: Duration) -> Vec<Finding> {
    let mut findings = Vec::new();
    if subject.is_serviced {
        return findings;
    }

    if now <= subject.service_time && subject.service_time - now <= window {
        findings.push(Finding::Notification {
            kind: NotificationType::Service,
            message: service_reminder_message(subject.name, subject.service_time),
            at: subject.service_time,
        });
    }

    if now > subject.service_time {
        findings.push(Finding::Violation {
            kind: ViolationType::NotServiced,
            description: service_overdue_description(subject.name, subject.service_time),
            at: subject.service_time,
        });
    }

    if now > subject.expiration_time {
        findings.push(Finding::Violation {
            kind: ViolationType::Expired,
            description: expired_description(subject.name, subject.expiration_time),
            at: subject.expiration_time,
        });
    }

    findings
}

/// Render a timestamp for human-readable messages (`2025-01-01T10:00:00Z`).
pub fn format_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn service_reminder_message(name: &str, service_time: Timestamp) -> String {
    format!(
        "Service reminder: Asset \"{name}\" needs service at {}",
        format_timestamp(service_time)
    )
}

pub fn service_overdue_description(name: &str, service_time: Timestamp) -> String {
    format!(
        "Service overdue: Asset \"{name}\" was due for service at {}",
        format_timestamp(service_time)
    )
}

pub fn expired_description(name: &str, expiration_time: Timestamp) -> String {
    format!(
        "Asset expired: Asset \"{name}\" expired at {}",
        format_timestamp(expiration_time)
    )
}

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

/// Summary returned by a check run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub notifications_created: usize,
    pub violations_created: usize,
    pub message: String,
    pub details: CheckDetails,
}

/// Per-record detail of what a check run created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckDetails {
    pub notifications: Vec<NotificationDetail>,
    pub violations: Vec<ViolationDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationDetail {
    pub asset: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub time: Timestamp,
}

/// Violation detail. Exactly one of `due_time` / `expired_time` is set,
/// depending on `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationDetail {
    pub asset: String,
    #[serde(rename = "type")]
    pub kind: ViolationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_time: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_time: Option<Timestamp>,
}

/// Accumulates newly created records into a [`CheckReport`].
#[derive(Debug, Default)]
pub struct CheckReportBuilder {
    details: CheckDetails,
}

impl CheckReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finding that resulted in a new row.
    pub fn record(&mut self, asset_name: &str, finding: &Finding) {
        match *finding {
            Finding::Notification { kind, at, .. } => {
                self.details.notifications.push(NotificationDetail {
                    asset: asset_name.to_string(),
                    kind,
                    time: at,
                });
            }
            Finding::Violation { kind, at, .. } => {
                let (due_time, expired_time) = match kind {
                    ViolationType::NotServiced => (Some(at), None),
                    ViolationType::Expired => (None, Some(at)),
                };
                self.details.violations.push(ViolationDetail {
                    asset: asset_name.to_string(),
                    kind,
                    due_time,
                    expired_time,
                });
            }
        }
    }

    pub fn build(self) -> CheckReport {
        let notifications_created = self.details.notifications.len();
        let violations_created = self.details.violations.len();
        CheckReport {
            notifications_created,
            violations_created,
            message: format!(
                "Check completed. Created {notifications_created} notifications and {violations_created} violations."
            ),
            details: self.details,
        }
    }
}
