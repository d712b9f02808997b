//! Email notification resources.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::query_path;
use super::rrsets::RRSetKey;
use crate::client::Core;
use crate::error::Result;
use crate::pagination::{self, ListOutcome, QueryInfo, ResultInfo};

/// Which conditions trigger a notification for one pool record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationInfo {
    pub probe: bool,
    pub record: bool,
    pub scheduled: bool,
}

/// Notification settings attached to one pool record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPoolRecord {
    pub pool_record: String,
    pub notification: NotificationInfo,
}

/// An email subscription to pool-record notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Notification {
    pub email: String,
    pub pool_records: Vec<NotificationPoolRecord>,
}

/// The identifiers of one notification subscription.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotificationKey {
    pub rrset: RRSetKey,
    pub email: String,
}

impl NotificationKey {
    /// Resource path, with the email address percent-escaped.
    pub fn uri(&self) -> String {
        format!(
            "{}/{}",
            self.rrset.notifications_uri(),
            urlencoding::encode(&self.email)
        )
    }
}

/// One page of a notification index response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPage {
    pub notifications: Vec<Notification>,
    pub query_info: QueryInfo,
    pub result_info: ResultInfo,
}

/// Access to the notification API of a record set.
pub struct Notifications {
    pub(crate) core: Arc<Core>,
}

impl Notifications {
    /// All subscriptions for a record set matching `query`, walking all pages.
    pub async fn select_all(&self, rrset: &RRSetKey, query: &str) -> ListOutcome<Notification> {
        pagination::select_all(&self.core.list_retry, |offset| {
            self.page(rrset, query, offset)
        })
        .await
    }

    /// One page of the notification index.
    pub async fn select_page(
        &self,
        rrset: &RRSetKey,
        query: &str,
        offset: u64,
    ) -> Result<NotificationPage> {
        let path = query_path(&rrset.notifications_uri(), query, offset);
        self.core.transport.get_json(&path).await
    }

    async fn page(
        &self,
        rrset: &RRSetKey,
        query: &str,
        offset: u64,
    ) -> Result<(Vec<Notification>, ResultInfo)> {
        let page = self.select_page(rrset, query, offset).await?;
        Ok((page.notifications, page.result_info))
    }

    /// One subscription by key.
    pub async fn find(&self, key: &NotificationKey) -> Result<Notification> {
        self.core.transport.get_json(&key.uri()).await
    }

    /// Create a subscription.
    pub async fn create(&self, key: &NotificationKey, notification: &Notification) -> Result<()> {
        self.core.transport.post(&key.uri(), notification).await
    }

    /// Replace a subscription.
    pub async fn update(&self, key: &NotificationKey, notification: &Notification) -> Result<()> {
        self.core.transport.put(&key.uri(), notification).await
    }

    /// Delete a subscription.
    pub async fn delete(&self, key: &NotificationKey) -> Result<()> {
        self.core.transport.delete(&key.uri()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::zones::ZoneKey;

    #[test]
    fn key_uri_escapes_email() {
        let key = NotificationKey {
            rrset: RRSetKey {
                zone: ZoneKey::from("example.com."),
                rrtype: "A".to_owned(),
                owner: "www".to_owned(),
            },
            email: "ops+dns@example.com".to_owned(),
        };
        assert_eq!(
            key.uri(),
            "zones/example.com./rrsets/A/www/notifications/ops%2Bdns%40example.com"
        );
    }

    #[test]
    fn notification_round_trips() {
        let body = r#"{"email":"ops@example.com","poolRecords":[{"poolRecord":"198.51.100.1","notification":{"probe":true,"record":false,"scheduled":true}}]}"#;
        let notification: Notification = serde_json::from_str(body).expect("valid notification");
        assert!(notification.pool_records[0].notification.probe);
        assert!(!notification.pool_records[0].notification.record);
        assert_eq!(
            serde_json::to_string(&notification).expect("serializable"),
            body
        );
    }
}
