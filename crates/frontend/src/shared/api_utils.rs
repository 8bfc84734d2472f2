//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Join an API base and a path
///
/// An empty base keeps the URL relative to the current origin.
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::api_url;
/// assert_eq!(api_url("http://127.0.0.1:3000/", "/api/dashboard-data"), "http://127.0.0.1:3000/api/dashboard-data");
/// assert_eq!(api_url("", "api/dashboard-data"), "/api/dashboard-data");
/// ```
pub fn api_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}
