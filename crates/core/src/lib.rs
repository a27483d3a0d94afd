//! Domain logic for the asset service tracker.
//!
//! Pure functions and types only: nothing in this crate touches the database
//! or the network. Callers in `assetwatch-db` and `assetwatch-api` pass data
//! in and persist the results.

pub mod assets;
pub mod checks;
pub mod error;
pub mod pagination;
pub mod types;
