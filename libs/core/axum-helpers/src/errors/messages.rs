//! Fixed messages shared by the HTTP helpers.

/// Body of the router fallback for unknown paths
pub const ROUTE_NOT_FOUND: &str = "not found";

/// Rejection message when a request body cannot be decoded
pub const INVALID_PAYLOAD: &str = "invalid request payload";
