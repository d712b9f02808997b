//! Probe alert resources.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::rrsets::RRSetKey;
use crate::client::Core;
use crate::error::Result;
use crate::pagination::{self, ListOutcome, QueryInfo, ResultInfo};

/// An alert raised by a probe against a pool record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeAlert {
    pub pool_record: String,
    pub probe_type: String,
    pub probe_status: String,
    pub alert_date: DateTime<Utc>,
    // the wire misspells this field
    #[serde(rename = "failoverOccured")]
    pub failover_occurred: bool,
    pub owner_name: String,
    pub status: String,
}

/// One page of an alert index response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProbeAlertPage {
    pub alerts: Vec<ProbeAlert>,
    pub query_info: QueryInfo,
    pub result_info: ResultInfo,
}

/// Access to the probe-alert API of a record set.
pub struct Alerts {
    pub(crate) core: Arc<Core>,
}

impl Alerts {
    /// All alerts for a record set, walking all pages.
    pub async fn select_all(&self, rrset: &RRSetKey) -> ListOutcome<ProbeAlert> {
        pagination::select_all(&self.core.list_retry, |offset| self.page(rrset, offset)).await
    }

    /// One page of the alert index.
    pub async fn select_page(&self, rrset: &RRSetKey, offset: u64) -> Result<ProbeAlertPage> {
        let path = format!("{}?offset={offset}", rrset.alerts_uri());
        self.core.transport.get_json(&path).await
    }

    async fn page(&self, rrset: &RRSetKey, offset: u64) -> Result<(Vec<ProbeAlert>, ResultInfo)> {
        let page = self.select_page(rrset, offset).await?;
        Ok((page.alerts, page.result_info))
    }
}
