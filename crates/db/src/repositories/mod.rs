//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods used inside a check
//! run take `&mut PgConnection` instead so they share its transaction.

pub mod asset_repo;
pub mod notification_repo;
pub mod violation_repo;

pub use asset_repo::AssetRepo;
pub use notification_repo::NotificationRepo;
pub use violation_repo::ViolationRepo;
