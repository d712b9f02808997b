//! Typed clients for each resource family of the API.
//!
//! Each handle is a thin layer over the shared transport: path builders,
//! wire DTOs, and one-line applications of the paginated lister.

pub mod accounts;
pub mod alerts;
pub mod dirpools;
pub mod events;
pub mod notifications;
pub mod probes;
pub mod rrsets;
pub mod tasks;
pub mod zones;

/// Append the standard list query parameters to a collection path.
///
/// With a query string: `?sort=NAME&query=<escaped>&offset=N`, otherwise just
/// `?offset=N`.
pub(crate) fn query_path(base: &str, query: &str, offset: u64) -> String {
    if query.is_empty() {
        format!("{base}?offset={offset}")
    } else {
        format!(
            "{base}?sort=NAME&query={}&offset={offset}",
            urlencoding::encode(query)
        )
    }
}
