//! Record-set resources, including the polymorphic pool profiles.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::dirpools::IpAddress;
use super::zones::ZoneKey;
use crate::client::Core;
use crate::error::{ClientError, Result};
use crate::pagination::{self, ListOutcome, QueryInfo, ResultInfo};

/// One record set: an owner name, a record type, a TTL and its record data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RRSet {
    pub owner_name: String,
    pub rrtype: String,
    pub ttl: u32,
    pub rdata: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<PoolProfileSource>,
}

/// The identifiers of one record set within a zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RRSetKey {
    pub zone: ZoneKey,
    pub rrtype: String,
    pub owner: String,
}

impl RRSetKey {
    /// Resource path for this record set, all segments percent-escaped.
    pub fn uri(&self) -> String {
        format!(
            "{}/rrsets/{}/{}",
            self.zone.uri(),
            urlencoding::encode(&self.rrtype),
            urlencoding::encode(&self.owner)
        )
    }

    pub fn alerts_uri(&self) -> String {
        format!("{}/alerts", self.uri())
    }

    pub fn events_uri(&self) -> String {
        format!("{}/events", self.uri())
    }

    pub fn notifications_uri(&self) -> String {
        format!("{}/notifications", self.uri())
    }

    pub fn probes_uri(&self) -> String {
        format!("{}/probes", self.uri())
    }
}

/// Raw pool-profile JSON, kept undecoded until [`resolve`](Self::resolve).
///
/// The wire shape is selected by the trailing segment of the `@context`
/// schema URL. Resolution is explicit so an unrecognized schema surfaces as
/// a typed error instead of slipping through as raw data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolProfileSource(serde_json::Value);

impl PoolProfileSource {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// The `@context` schema URL, if one is declared.
    pub fn context(&self) -> Option<&str> {
        self.0.get("@context").and_then(serde_json::Value::as_str)
    }

    /// The raw profile JSON.
    pub fn raw(&self) -> &serde_json::Value {
        &self.0
    }

    /// Decode into the typed profile named by `@context`.
    pub fn resolve(&self) -> Result<PoolProfile> {
        let context = self.context().unwrap_or_default();
        let schema = context.rsplit('/').next().unwrap_or_default();
        match schema {
            "DirPool.jsonschema" => Ok(PoolProfile::Dir(self.decode()?)),
            "RDPool.jsonschema" => Ok(PoolProfile::Rd(self.decode()?)),
            "SBPool.jsonschema" => Ok(PoolProfile::Sb(self.decode()?)),
            "TCPool.jsonschema" => Ok(PoolProfile::Tc(self.decode()?)),
            _ => Err(ClientError::UnknownProfileType {
                context: context.to_owned(),
            }),
        }
    }

    fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.0.clone()).map_err(|err| ClientError::Decode {
            detail: err.to_string(),
            body: self.0.to_string(),
        })
    }
}

/// A typed pool profile, one variant per known `@context` schema.
#[derive(Debug, Clone, PartialEq)]
pub enum PoolProfile {
    Dir(DirPoolProfile),
    Rd(RdPoolProfile),
    Sb(SbPoolProfile),
    Tc(TcPoolProfile),
}

/// Resource-distribution pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RdPoolProfile {
    #[serde(rename = "@context")]
    pub context: String,
    pub order: String,
    pub description: String,
}

/// Geographic territory selector for a directional pool entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeoInfo {
    pub name: String,
    pub is_account_level: bool,
    pub codes: Vec<String>,
}

/// Source-IP selector for a directional pool entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IpInfo {
    pub name: String,
    pub is_account_level: bool,
    pub ips: Vec<IpAddress>,
}

/// Routing data for one rdata entry of a directional pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DirRdataInfo {
    pub all_non_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_info: Option<IpInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_info: Option<GeoInfo>,
}

/// Directional pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DirPoolProfile {
    #[serde(rename = "@context")]
    pub context: String,
    pub description: String,
    pub conflict_resolve: String,
    pub rdata_info: Vec<DirRdataInfo>,
    pub no_response: DirRdataInfo,
}

/// Probe-driven state for one rdata entry of a site-backer or traffic
/// controller pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SbRdataInfo {
    pub state: String,
    pub run_probes: bool,
    pub priority: i64,
    pub failover_delay: i64,
    pub threshold: i64,
    pub weight: i64,
}

/// Backup record served when pool members are down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackupRecord {
    pub rdata: String,
    pub failover_delay: i64,
}

/// Site-backer pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SbPoolProfile {
    #[serde(rename = "@context")]
    pub context: String,
    pub description: String,
    pub run_probes: bool,
    pub act_on_probes: bool,
    pub order: String,
    pub max_active: i64,
    pub max_served: i64,
    pub rdata_info: Vec<SbRdataInfo>,
    pub backup_records: Vec<BackupRecord>,
}

/// Traffic-controller pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TcPoolProfile {
    #[serde(rename = "@context")]
    pub context: String,
    pub description: String,
    pub run_probes: bool,
    pub act_on_probes: bool,
    #[serde(rename = "maxToLB")]
    pub max_to_lb: i64,
    pub rdata_info: Vec<SbRdataInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_record: Option<BackupRecord>,
}

/// One page of a record-set index response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RRSetPage {
    pub zone_name: String,
    pub rrsets: Vec<RRSet>,
    pub query_info: QueryInfo,
    pub result_info: ResultInfo,
}

fn list_path(zone: &ZoneKey, owner: &str, rrtype: &str) -> String {
    let rrtype = if rrtype.is_empty() { "ANY" } else { rrtype };
    let mut path = format!("{}/rrsets/{}", zone.uri(), urlencoding::encode(rrtype));
    if !owner.is_empty() {
        path.push('/');
        path.push_str(&urlencoding::encode(owner));
    }
    path
}

fn record_path(zone: &ZoneKey, rrset: &RRSet) -> String {
    RRSetKey {
        zone: zone.clone(),
        rrtype: rrset.rrtype.clone(),
        owner: rrset.owner_name.clone(),
    }
    .uri()
}

/// Access to the record-set APIs of a zone.
pub struct RRSets {
    pub(crate) core: Arc<Core>,
}

impl RRSets {
    /// Every record set matching `owner` and `rrtype`, walking all pages.
    ///
    /// Empty `rrtype` selects `ANY`; empty `owner` selects the whole zone.
    pub async fn select_all(&self, zone: &ZoneKey, owner: &str, rrtype: &str) -> ListOutcome<RRSet> {
        pagination::select_all(&self.core.list_retry, |offset| {
            self.page(zone, owner, rrtype, offset)
        })
        .await
    }

    /// One page of the record-set index.
    pub async fn select_page(
        &self,
        zone: &ZoneKey,
        owner: &str,
        rrtype: &str,
        offset: u64,
    ) -> Result<RRSetPage> {
        let path = format!("{}?offset={offset}", list_path(zone, owner, rrtype));
        self.core.transport.get_json(&path).await
    }

    async fn page(
        &self,
        zone: &ZoneKey,
        owner: &str,
        rrtype: &str,
        offset: u64,
    ) -> Result<(Vec<RRSet>, ResultInfo)> {
        let page = self.select_page(zone, owner, rrtype, offset).await?;
        Ok((page.rrsets, page.result_info))
    }

    /// Create a record set in `zone`; the path derives from the record's own
    /// type and owner name.
    pub async fn create(&self, zone: &ZoneKey, rrset: &RRSet) -> Result<()> {
        self.core.transport.post(&record_path(zone, rrset), rrset).await
    }

    /// Replace a record set in `zone`.
    pub async fn update(&self, zone: &ZoneKey, rrset: &RRSet) -> Result<()> {
        self.core.transport.put(&record_path(zone, rrset), rrset).await
    }

    /// Delete a record set by key.
    pub async fn delete(&self, key: &RRSetKey) -> Result<()> {
        self.core.transport.delete(&key.uri()).await
    }
}
