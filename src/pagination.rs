//! Offset-based pagination shared by every list-style endpoint.
//!
//! Each list response embeds a `queryInfo`/`resultInfo` pair; walking all
//! pages and retrying server errors is the same algorithm everywhere, so it
//! lives here once as [`select_all`] instead of being repeated per resource.

use serde::{Deserialize, Serialize};

use crate::config::RetryPolicy;
use crate::error::{ClientError, Result};

/// Echo of the query a list request was answered for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryInfo {
    pub q: String,
    pub sort: String,
    pub reverse: bool,
    pub limit: i64,
}

/// List-position metadata embedded in every index response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResultInfo {
    pub total_count: u64,
    pub offset: u64,
    pub returned_count: u64,
}

impl ResultInfo {
    /// Whether pages remain after this one.
    pub fn has_more(&self) -> bool {
        self.offset + self.returned_count < self.total_count
    }

    /// Offset of the page after this one.
    pub fn next_offset(&self) -> u64 {
        self.offset + self.returned_count
    }
}

/// Result of a full paginated walk.
///
/// Partial results are returned **alongside** the error: when a walk fails
/// midway, `items` holds every page accumulated before the failure and
/// `error` the reason the walk stopped. Check `error` before treating
/// `items` as complete.
#[derive(Debug)]
pub struct ListOutcome<T> {
    /// Items accumulated so far, complete only when `error` is `None`.
    pub items: Vec<T>,
    /// The failure that ended the walk early, if any.
    pub error: Option<ClientError>,
}

impl<T> ListOutcome<T> {
    fn complete(items: Vec<T>) -> Self {
        Self { items, error: None }
    }

    fn partial(items: Vec<T>, error: ClientError) -> Self {
        Self {
            items,
            error: Some(error),
        }
    }

    /// Discard partial results, converting to a plain `Result`.
    pub fn into_result(self) -> Result<Vec<T>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.items),
        }
    }
}

/// Walk all pages of a list endpoint, accumulating items.
///
/// `fetch_page` is the single-page primitive: given an offset it returns one
/// page of items plus the cursor describing where that page sits. Pages are
/// fetched strictly in sequence. A server-class failure (5xx, or poll
/// exhaustion on a deferred call) is retried at the **same** offset after
/// `policy.backoff`, up to `policy.max_attempts` total failed fetches; any
/// other failure, or running out of attempts, ends the walk with whatever
/// was accumulated.
pub(crate) async fn select_all<T, F, Fut>(policy: &RetryPolicy, mut fetch_page: F) -> ListOutcome<T>
where
    F: FnMut(u64) -> Fut,
    Fut: Future<Output = Result<(Vec<T>, ResultInfo)>>,
{
    let mut items = Vec::new();
    let mut offset = 0;
    let mut failed = 0u32;

    loop {
        match fetch_page(offset).await {
            Ok((page, info)) => {
                log::debug!(
                    "page at offset {offset}: {} returned, {} total",
                    info.returned_count,
                    info.total_count
                );
                items.extend(page);
                if !info.has_more() {
                    return ListOutcome::complete(items);
                }
                offset = info.next_offset();
            }
            Err(err) if err.is_server_error() => {
                failed += 1;
                if failed >= policy.max_attempts {
                    return ListOutcome::partial(items, err);
                }
                log::warn!(
                    "server error at offset {offset} (attempt {failed}/{}), retrying in {:.1}s: {err}",
                    policy.max_attempts,
                    policy.backoff.as_secs_f32()
                );
                tokio::time::sleep(policy.backoff).await;
            }
            Err(err) => return ListOutcome::partial(items, err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(offset: u64, returned: u64, total: u64) -> ResultInfo {
        ResultInfo {
            total_count: total,
            offset,
            returned_count: returned,
        }
    }

    #[test]
    fn has_more_mid_list() {
        assert!(info(0, 100, 250).has_more());
        assert_eq!(info(0, 100, 250).next_offset(), 100);
    }

    #[test]
    fn has_more_exact_boundary() {
        assert!(!info(200, 50, 250).has_more());
    }

    #[test]
    fn has_more_empty_list() {
        assert!(!info(0, 0, 0).has_more());
    }

    #[test]
    fn result_info_decodes_camel_case() {
        let ri: ResultInfo =
            serde_json::from_str(r#"{"totalCount":7,"offset":2,"returnedCount":5}"#)
                .expect("valid resultInfo");
        assert_eq!(ri, info(2, 5, 7));
    }

    #[test]
    fn result_info_missing_fields_default_to_zero() {
        let ri: ResultInfo = serde_json::from_str("{}").expect("empty object");
        assert_eq!(ri, ResultInfo::default());
    }

    #[test]
    fn query_info_decodes() {
        let qi: QueryInfo =
            serde_json::from_str(r#"{"q":"name:foo","sort":"NAME","reverse":false,"limit":100}"#)
                .expect("valid queryInfo");
        assert_eq!(qi.q, "name:foo");
        assert_eq!(qi.limit, 100);
    }

    #[test]
    fn into_result_keeps_complete_items() {
        let outcome = ListOutcome::complete(vec![1, 2, 3]);
        assert_eq!(outcome.into_result().expect("complete"), vec![1, 2, 3]);
    }

    #[test]
    fn into_result_drops_partial_items() {
        let outcome = ListOutcome::partial(
            vec![1],
            ClientError::Network {
                detail: "refused".into(),
            },
        );
        assert!(outcome.into_result().is_err());
    }
}
