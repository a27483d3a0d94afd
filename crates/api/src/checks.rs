//! Check run orchestration.
//!
//! Evaluation lives in [`assetwatch_core::checks`]; this module feeds it the
//! unserviced assets and persists the findings. The whole run shares one
//! transaction, and inserts are keyed on `(asset, type)` so concurrent or
//! repeated runs never create duplicates.

use assetwatch_core::checks::{evaluate, CheckReport, CheckReportBuilder, CheckSubject, Finding};
use assetwatch_core::types::Timestamp;
use assetwatch_db::repositories::{AssetRepo, NotificationRepo, ViolationRepo};
use sqlx::PgPool;

/// Run all checks as of `now`.
///
/// Only rows actually inserted by this run are counted in the report.
pub async fn run_checks(
    pool: &PgPool,
    now: Timestamp,
    window: chrono::Duration,
) -> Result<CheckReport, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let assets = AssetRepo::list_unserviced(&mut *tx).await?;
    let mut report = CheckReportBuilder::new();

    for asset in &assets {
        let subject = CheckSubject {
            name: &asset.name,
            service_time: asset.service_time,
            expiration_time: asset.expiration_time,
            is_serviced: asset.is_serviced,
        };

        for finding in evaluate(&subject, now, window) {
            let created = match &finding {
                Finding::Notification { kind, message, .. } => {
                    NotificationRepo::create_if_absent(&mut *tx, asset.id, *kind, message).await?
                }
                Finding::Violation {
                    kind, description, ..
                } => ViolationRepo::create_if_absent(&mut *tx, asset.id, *kind, description).await?,
            };

            if let Some(record_id) = created {
                tracing::debug!(asset_id = asset.id, record_id, ?finding, "Check record created");
                report.record(&asset.name, &finding);
            }
        }
    }

    tx.commit().await?;

    let report = report.build();
    tracing::info!(
        scanned = assets.len(),
        notifications_created = report.notifications_created,
        violations_created = report.violations_created,
        "Check run completed",
    );
    Ok(report)
}
