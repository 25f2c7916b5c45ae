//! Small response bodies shared by the write endpoints.

use serde::Serialize;

/// The body returned by endpoints that only report success, e.g. deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuccessResponse {
    /// Always `true`, failures are reported through [crate::Error].
    pub success: bool,
}

impl SuccessResponse {
    /// A successful response.
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// The body returned by the batch upsert endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SavedResponse {
    /// Always `true`, failures are reported through [crate::Error].
    pub success: bool,
    /// The number of rows written.
    pub count: usize,
}

impl SavedResponse {
    /// A successful response for `count` rows.
    pub fn saved(count: usize) -> Self {
        Self {
            success: true,
            count,
        }
    }
}
