//! Shared response envelope.

use serde::Serialize;

/// Standard `{ "data": T }` envelope for resource reads and writes.
///
/// Auth and bulk-sync endpoints return their own top-level shapes instead.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
