//! Account-level directional groups, split into geo and source-IP kinds.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::accounts::AccountKey;
use super::query_path;
use crate::client::Core;
use crate::error::Result;
use crate::pagination::{self, ListOutcome, QueryInfo, ResultInfo};

/// An IP range, CIDR block, or single address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A named set of geographic territory codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoGroup {
    pub name: String,
    pub description: String,
    pub codes: Vec<String>,
}

/// A named set of source-IP ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpGroup {
    pub name: String,
    pub description: String,
    pub ips: Vec<IpAddress>,
}

/// The kind of a directional group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolKind {
    Geo,
    Ip,
}

impl PoolKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Geo => "geo",
            Self::Ip => "ip",
        }
    }
}

impl fmt::Display for PoolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The identifiers of one directional group under an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectionalPoolKey {
    pub account: AccountKey,
    pub kind: PoolKind,
    pub name: String,
}

impl DirectionalPoolKey {
    /// Resource path; an empty name addresses the collection.
    pub fn uri(&self) -> String {
        if self.name.is_empty() {
            format!("{}/dirgroups/{}", self.account.uri(), self.kind)
        } else {
            format!(
                "{}/dirgroups/{}/{}",
                self.account.uri(),
                self.kind,
                urlencoding::encode(&self.name)
            )
        }
    }

    /// Collection path with list query parameters.
    pub fn query_uri(&self, query: &str, offset: u64) -> String {
        query_path(&self.uri(), query, offset)
    }
}

fn collection_key(account: &AccountKey, kind: PoolKind) -> DirectionalPoolKey {
    DirectionalPoolKey {
        account: account.clone(),
        kind,
        name: String::new(),
    }
}

fn item_key(account: &AccountKey, kind: PoolKind, name: &str) -> DirectionalPoolKey {
    DirectionalPoolKey {
        account: account.clone(),
        kind,
        name: name.to_owned(),
    }
}

/// One page of a geo group index response.
///
/// The service reports the account name under the `zoneName` key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeoGroupPage {
    #[serde(rename = "zoneName")]
    pub account_name: String,
    pub geo_groups: Vec<GeoGroup>,
    pub query_info: QueryInfo,
    pub result_info: ResultInfo,
}

/// One page of an IP group index response.
///
/// The service reports the account name under the `zoneName` key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IpGroupPage {
    #[serde(rename = "zoneName")]
    pub account_name: String,
    pub ip_groups: Vec<IpGroup>,
    pub query_info: QueryInfo,
    pub result_info: ResultInfo,
}

/// Access to the directional-pool group APIs.
pub struct DirectionalPools {
    pub(crate) core: Arc<Core>,
}

impl DirectionalPools {
    /// Geo group operations.
    pub fn geos(&self) -> GeoGroups {
        GeoGroups {
            core: Arc::clone(&self.core),
        }
    }

    /// Source-IP group operations.
    pub fn ips(&self) -> IpGroups {
        IpGroups {
            core: Arc::clone(&self.core),
        }
    }
}

/// Access to account-level geo directional groups.
pub struct GeoGroups {
    core: Arc<Core>,
}

impl GeoGroups {
    /// All geo groups under `account` matching `query`, walking all pages.
    pub async fn select_all(&self, account: &AccountKey, query: &str) -> ListOutcome<GeoGroup> {
        pagination::select_all(&self.core.list_retry, |offset| {
            self.page(account, query, offset)
        })
        .await
    }

    /// One page of the geo group index.
    pub async fn select_page(
        &self,
        account: &AccountKey,
        query: &str,
        offset: u64,
    ) -> Result<GeoGroupPage> {
        let path = collection_key(account, PoolKind::Geo).query_uri(query, offset);
        self.core.transport.get_json(&path).await
    }

    async fn page(
        &self,
        account: &AccountKey,
        query: &str,
        offset: u64,
    ) -> Result<(Vec<GeoGroup>, ResultInfo)> {
        let page = self.select_page(account, query, offset).await?;
        Ok((page.geo_groups, page.result_info))
    }

    /// One geo group by name.
    pub async fn find(&self, account: &AccountKey, name: &str) -> Result<GeoGroup> {
        let path = item_key(account, PoolKind::Geo, name).uri();
        self.core.transport.get_json(&path).await
    }

    /// Create a geo group; the path derives from the group's own name.
    pub async fn create(&self, account: &AccountKey, group: &GeoGroup) -> Result<()> {
        let path = item_key(account, PoolKind::Geo, &group.name).uri();
        self.core.transport.post(&path, group).await
    }

    /// Replace a geo group.
    pub async fn update(&self, account: &AccountKey, group: &GeoGroup) -> Result<()> {
        let path = item_key(account, PoolKind::Geo, &group.name).uri();
        self.core.transport.put(&path, group).await
    }

    /// Delete a geo group by name.
    pub async fn delete(&self, account: &AccountKey, name: &str) -> Result<()> {
        let path = item_key(account, PoolKind::Geo, name).uri();
        self.core.transport.delete(&path).await
    }
}

/// Access to account-level source-IP directional groups.
pub struct IpGroups {
    core: Arc<Core>,
}

impl IpGroups {
    /// All IP groups under `account` matching `query`, walking all pages.
    pub async fn select_all(&self, account: &AccountKey, query: &str) -> ListOutcome<IpGroup> {
        pagination::select_all(&self.core.list_retry, |offset| {
            self.page(account, query, offset)
        })
        .await
    }

    /// One page of the IP group index.
    pub async fn select_page(
        &self,
        account: &AccountKey,
        query: &str,
        offset: u64,
    ) -> Result<IpGroupPage> {
        let path = collection_key(account, PoolKind::Ip).query_uri(query, offset);
        self.core.transport.get_json(&path).await
    }

    async fn page(
        &self,
        account: &AccountKey,
        query: &str,
        offset: u64,
    ) -> Result<(Vec<IpGroup>, ResultInfo)> {
        let page = self.select_page(account, query, offset).await?;
        Ok((page.ip_groups, page.result_info))
    }

    /// One IP group by name.
    pub async fn find(&self, account: &AccountKey, name: &str) -> Result<IpGroup> {
        let path = item_key(account, PoolKind::Ip, name).uri();
        self.core.transport.get_json(&path).await
    }

    /// Create an IP group; the path derives from the group's own name.
    pub async fn create(&self, account: &AccountKey, group: &IpGroup) -> Result<()> {
        let path = item_key(account, PoolKind::Ip, &group.name).uri();
        self.core.transport.post(&path, group).await
    }

    /// Replace an IP group.
    pub async fn update(&self, account: &AccountKey, group: &IpGroup) -> Result<()> {
        let path = item_key(account, PoolKind::Ip, &group.name).uri();
        self.core.transport.put(&path, group).await
    }

    /// Delete an IP group by name.
    pub async fn delete(&self, account: &AccountKey, name: &str) -> Result<()> {
        let path = item_key(account, PoolKind::Ip, name).uri();
        self.core.transport.delete(&path).await
    }
}
