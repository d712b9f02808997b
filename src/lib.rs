//! Async, typed client for the UltraDNS REST management API.
//!
//! A [`Client`] is built by exchanging credentials for a bearer token, then
//! hands out thin per-resource handles. Deferred operations (`202 Accepted`
//! plus a task id) are resolved transparently by polling the tasks API, and
//! every list-style call walks the service's offset pagination with bounded
//! retries on server errors.
//!
//! Calls are plain futures: dropping one cancels it promptly, including any
//! pending poll or retry sleep. Per-call deadlines compose with
//! [`tokio::time::timeout`] on top of the client-level request timeouts.
//!
//! ```no_run
//! use ultradns_client::{Client, DEFAULT_TEST_BASE_URL};
//! use ultradns_client::resources::zones::ZoneKey;
//!
//! # async fn demo() -> ultradns_client::Result<()> {
//! let client = Client::connect("user", "password", DEFAULT_TEST_BASE_URL).await?;
//!
//! let zone = ZoneKey::from("example.com.");
//! let rrsets = client.rrsets().select_all(&zone, "", "ANY").await.into_result()?;
//! for rrset in rrsets {
//!     println!("{} {} {:?}", rrset.owner_name, rrset.rrtype, rrset.rdata);
//! }
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod config;
mod error;
mod pagination;
pub mod resources;
mod transport;

pub use client::{Client, DEFAULT_LIVE_BASE_URL, DEFAULT_TEST_BASE_URL};
pub use config::{ClientConfig, RetryPolicy};
pub use error::{ClientError, ErrorInfo, Result};
pub use pagination::{ListOutcome, QueryInfo, ResultInfo};
