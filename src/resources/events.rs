//! Scheduled pool event resources.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::query_path;
use super::rrsets::RRSetKey;
use crate::client::Core;
use crate::error::Result;
use crate::pagination::{self, ListOutcome, QueryInfo, ResultInfo};

/// A scheduled state change for a pool record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventInfo {
    pub id: String,
    pub pool_record: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    pub repeat: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    pub notify: String,
}

/// One page of an event index response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventPage {
    pub events: Vec<EventInfo>,
    pub query_info: QueryInfo,
    pub result_info: ResultInfo,
}

fn event_path(rrset: &RRSetKey, guid: &str) -> String {
    format!("{}/{}", rrset.events_uri(), urlencoding::encode(guid))
}

/// Access to the event API of a record set.
pub struct Events {
    pub(crate) core: Arc<Core>,
}

impl Events {
    /// All events for a record set matching `query`, walking all pages.
    pub async fn select_all(&self, rrset: &RRSetKey, query: &str) -> ListOutcome<EventInfo> {
        pagination::select_all(&self.core.list_retry, |offset| {
            self.page(rrset, query, offset)
        })
        .await
    }

    /// One page of the event index.
    pub async fn select_page(
        &self,
        rrset: &RRSetKey,
        query: &str,
        offset: u64,
    ) -> Result<EventPage> {
        let path = query_path(&rrset.events_uri(), query, offset);
        self.core.transport.get_json(&path).await
    }

    async fn page(
        &self,
        rrset: &RRSetKey,
        query: &str,
        offset: u64,
    ) -> Result<(Vec<EventInfo>, ResultInfo)> {
        let page = self.select_page(rrset, query, offset).await?;
        Ok((page.events, page.result_info))
    }

    /// One event by id.
    pub async fn find(&self, rrset: &RRSetKey, guid: &str) -> Result<EventInfo> {
        self.core.transport.get_json(&event_path(rrset, guid)).await
    }

    /// Schedule a new event.
    pub async fn create(&self, rrset: &RRSetKey, event: &EventInfo) -> Result<()> {
        self.core.transport.post(&rrset.events_uri(), event).await
    }

    /// Replace an event by id.
    pub async fn update(&self, rrset: &RRSetKey, guid: &str, event: &EventInfo) -> Result<()> {
        self.core.transport.put(&event_path(rrset, guid), event).await
    }

    /// Delete an event by id.
    pub async fn delete(&self, rrset: &RRSetKey, guid: &str) -> Result<()> {
        self.core.transport.delete(&event_path(rrset, guid)).await
    }
}
