//! Probe resources, including the type-keyed detail schemas.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::rrsets::RRSetKey;
use crate::client::Core;
use crate::error::{ClientError, Result};
use crate::pagination::QueryInfo;

/// Warning/critical/fail thresholds for one measured quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeLimits {
    pub warning: i64,
    pub critical: i64,
    pub fail: i64,
}

type LimitMap = HashMap<String, ProbeLimits>;

/// One HTTP request performed by an HTTP probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpTransaction {
    pub method: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmitted_data: Option<String>,
    pub follow_redirects: bool,
    pub limits: LimitMap,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpProbeDetails {
    pub transactions: Vec<HttpTransaction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_limits: Option<ProbeLimits>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PingProbeDetails {
    pub packets: i64,
    pub packet_size: i64,
    pub limits: LimitMap,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FtpProbeDetails {
    pub port: i64,
    pub passive_mode: bool,
    pub username: String,
    pub password: String,
    pub path: String,
    pub limits: LimitMap,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TcpProbeDetails {
    pub port: i64,
    #[serde(rename = "controlip")]
    pub control_ip: String,
    pub limits: LimitMap,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmtpProbeDetails {
    pub port: i64,
    pub limits: LimitMap,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmtpSendProbeDetails {
    pub port: i64,
    pub from: String,
    pub to: String,
    pub message: String,
    pub limits: LimitMap,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DnsProbeDetails {
    pub port: i64,
    pub tcp_only: bool,
    #[serde(rename = "type")]
    pub record_type: String,
    pub owner_name: String,
    pub limits: LimitMap,
}

/// Typed probe details, one variant per known probe `type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeDetails {
    Http(HttpProbeDetails),
    Ping(PingProbeDetails),
    Ftp(FtpProbeDetails),
    Tcp(TcpProbeDetails),
    Smtp(SmtpProbeDetails),
    SmtpSend(SmtpSendProbeDetails),
    Dns(DnsProbeDetails),
}

/// Raw probe-detail JSON, kept undecoded until [`resolve`](Self::resolve).
///
/// The detail schema is named by the sibling `type` field of the probe, not
/// by anything inside the detail object itself, so resolution takes the
/// declared type as a parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbeDetailsSource(serde_json::Value);

impl ProbeDetailsSource {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// The raw detail JSON.
    pub fn raw(&self) -> &serde_json::Value {
        &self.0
    }

    /// Decode into the schema named by `declared_type` (case-insensitive).
    pub fn resolve(&self, declared_type: &str) -> Result<ProbeDetails> {
        match declared_type.to_ascii_uppercase().as_str() {
            "HTTP" => Ok(ProbeDetails::Http(self.decode()?)),
            "PING" => Ok(ProbeDetails::Ping(self.decode()?)),
            "FTP" => Ok(ProbeDetails::Ftp(self.decode()?)),
            "TCP" => Ok(ProbeDetails::Tcp(self.decode()?)),
            "SMTP" => Ok(ProbeDetails::Smtp(self.decode()?)),
            "SMTP_SEND" => Ok(ProbeDetails::SmtpSend(self.decode()?)),
            "DNS" => Ok(ProbeDetails::Dns(self.decode()?)),
            _ => Err(ClientError::UnknownProbeType {
                probe_type: declared_type.to_owned(),
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

/// A probe attached to a record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProbeInfo {
    pub id: String,
    pub pool_record: String,
    #[serde(rename = "type")]
    pub probe_type: String,
    pub interval: String,
    pub agents: Vec<String>,
    pub threshold: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ProbeDetailsSource>,
}

impl ProbeInfo {
    /// Typed view of `details`, keyed by this probe's declared `type`.
    pub fn resolve_details(&self) -> Result<Option<ProbeDetails>> {
        match &self.details {
            Some(source) => Ok(Some(source.resolve(&self.probe_type)?)),
            None => Ok(None),
        }
    }
}

/// Probe index response body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProbeList {
    pub probes: Vec<ProbeInfo>,
    pub query_info: QueryInfo,
}

fn probe_path(rrset: &RRSetKey, guid: &str) -> String {
    format!("{}/{}", rrset.probes_uri(), urlencoding::encode(guid))
}

/// Access to the probe API of a record set.
pub struct Probes {
    pub(crate) core: Arc<Core>,
}

impl Probes {
    /// All probes for a record set matching `query`. This endpoint is not
    /// paginated by the service.
    pub async fn list(&self, rrset: &RRSetKey, query: &str) -> Result<Vec<ProbeInfo>> {
        let path = if query.is_empty() {
            rrset.probes_uri()
        } else {
            format!(
                "{}?sort=NAME&query={}",
                rrset.probes_uri(),
                urlencoding::encode(query)
            )
        };
        let list: ProbeList = self.core.transport.get_json(&path).await?;
        Ok(list.probes)
    }

    /// One probe by id.
    pub async fn find(&self, rrset: &RRSetKey, guid: &str) -> Result<ProbeInfo> {
        self.core.transport.get_json(&probe_path(rrset, guid)).await
    }

    /// Attach a new probe.
    pub async fn create(&self, rrset: &RRSetKey, probe: &ProbeInfo) -> Result<()> {
        self.core.transport.post(&rrset.probes_uri(), probe).await
    }

    /// Replace a probe by id.
    pub async fn update(&self, rrset: &RRSetKey, guid: &str, probe: &ProbeInfo) -> Result<()> {
        self.core.transport.put(&probe_path(rrset, guid), probe).await
    }

    /// Delete a probe by id.
    pub async fn delete(&self, rrset: &RRSetKey, guid: &str) -> Result<()> {
        self.core.transport.delete(&probe_path(rrset, guid)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_http_details() {
        let source = ProbeDetailsSource::new(serde_json::json!({
            "transactions": [{
                "method": "GET",
                "url": "https://www.example.com/health",
                "followRedirects": true,
                "limits": {"run": {"warning": 5, "critical": 8, "fail": 10}}
            }]
        }));
        let Ok(ProbeDetails::Http(http)) = source.resolve("HTTP") else {
            panic!("expected HTTP details");
        };
        assert_eq!(http.transactions.len(), 1);
        assert!(http.transactions[0].follow_redirects);
        assert_eq!(http.transactions[0].limits["run"].fail, 10);
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let source = ProbeDetailsSource::new(serde_json::json!({"packets": 3, "packetSize": 56}));
        let Ok(ProbeDetails::Ping(ping)) = source.resolve("ping") else {
            panic!("expected PING details");
        };
        assert_eq!(ping.packets, 3);
        assert_eq!(ping.packet_size, 56);
    }

    #[test]
    fn resolve_smtp_send_fields() {
        let source = ProbeDetailsSource::new(serde_json::json!({
            "port": 25,
            "from": "probe@example.com",
            "to": "ops@example.com",
            "message": "ping"
        }));
        let Ok(ProbeDetails::SmtpSend(smtp)) = source.resolve("SMTP_SEND") else {
            panic!("expected SMTP_SEND details");
        };
        assert_eq!(smtp.to, "ops@example.com");
        assert_eq!(smtp.message, "ping");
    }

    #[test]
    fn resolve_unknown_type_is_a_typed_error() {
        let source = ProbeDetailsSource::new(serde_json::json!({}));
        assert!(matches!(
            source.resolve("GOPHER"),
            Err(ClientError::UnknownProbeType { probe_type }) if probe_type == "GOPHER"
        ));
    }

    #[test]
    fn probe_info_resolves_by_declared_type() {
        let probe: ProbeInfo = serde_json::from_str(
            r#"{
                "id": "p1",
                "poolRecord": "198.51.100.1",
                "type": "DNS",
                "interval": "FIVE_MINUTES",
                "agents": ["NEW_YORK"],
                "threshold": 2,
                "details": {"port": 53, "tcpOnly": false, "type": "A", "ownerName": "www"}
            }"#,
        )
        .expect("valid probe");
        let Ok(Some(ProbeDetails::Dns(dns))) = probe.resolve_details() else {
            panic!("expected DNS details");
        };
        assert_eq!(dns.port, 53);
        assert_eq!(dns.record_type, "A");
    }

    #[test]
    fn probe_info_without_details_resolves_to_none() {
        let probe = ProbeInfo {
            probe_type: "PING".to_owned(),
            ..ProbeInfo::default()
        };
        assert!(matches!(probe.resolve_details(), Ok(None)));
    }
}
