//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` params struct for list filtering and pagination

pub mod asset;
pub mod notification;
pub mod violation;
