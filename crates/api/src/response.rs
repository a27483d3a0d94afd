//! Shared response envelopes.

use assetwatch_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::Serialize;

/// One page of a list endpoint.
///
/// `limit` and `offset` echo the values actually applied after clamping;
/// `count` is the total number of matching rows.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub count: i64,
    pub limit: i64,
    pub offset: i64,
    pub results: Vec<T>,
}

impl<T: Serialize> Page<T> {
    pub fn new(count: i64, limit: Option<i64>, offset: Option<i64>, results: Vec<T>) -> Self {
        Self {
            count,
            limit: clamp_limit(limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
            offset: clamp_offset(offset),
            results,
        }
    }
}
