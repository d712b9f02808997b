//! Client construction and the per-resource accessors.

use std::sync::Arc;

use crate::auth;
use crate::config::{ClientConfig, RetryPolicy};
use crate::error::{ClientError, Result};
use crate::resources::accounts::Accounts;
use crate::resources::alerts::Alerts;
use crate::resources::dirpools::DirectionalPools;
use crate::resources::events::Events;
use crate::resources::notifications::Notifications;
use crate::resources::probes::Probes;
use crate::resources::rrsets::RRSets;
use crate::resources::tasks::Tasks;
use crate::transport::Transport;

/// Production API endpoint.
pub const DEFAULT_LIVE_BASE_URL: &str = "https://restapi.ultradns.com/";
/// Customer-testing API endpoint.
pub const DEFAULT_TEST_BASE_URL: &str = "https://test-restapi.ultradns.com/";

/// State shared by every resource handle.
#[derive(Debug)]
pub(crate) struct Core {
    pub(crate) transport: Transport,
    pub(crate) list_retry: RetryPolicy,
    refresh_token: String,
}

/// An authenticated handle to the API.
///
/// Cloning is cheap and clones share the same connection pool and token.
/// Construction performs the password grant; a [`Client`] always holds a
/// non-empty access token. Tokens are not refreshed automatically.
#[derive(Debug, Clone)]
pub struct Client {
    core: Arc<Core>,
}

impl Client {
    /// Authenticate against `base_url` with default configuration.
    pub async fn connect(username: &str, password: &str, base_url: &str) -> Result<Self> {
        Self::connect_with_config(username, password, base_url, ClientConfig::default()).await
    }

    /// Authenticate against `base_url` with explicit configuration.
    pub async fn connect_with_config(
        username: &str,
        password: &str,
        base_url: &str,
        config: ClientConfig,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| ClientError::Network {
                detail: err.to_string(),
            })?;

        let tokens = auth::password_grant(&http, base_url, username, password).await?;
        let transport = Transport::new(http, base_url.to_owned(), tokens.access, &config);

        Ok(Self {
            core: Arc::new(Core {
                transport,
                list_retry: config.list_retry,
                refresh_token: tokens.refresh,
            }),
        })
    }

    /// The refresh token from the initial grant. Stored for completeness,
    /// never used by the client itself.
    pub fn refresh_token(&self) -> &str {
        &self.core.refresh_token
    }

    pub fn accounts(&self) -> Accounts {
        Accounts {
            core: Arc::clone(&self.core),
        }
    }

    pub fn alerts(&self) -> Alerts {
        Alerts {
            core: Arc::clone(&self.core),
        }
    }

    pub fn directional_pools(&self) -> DirectionalPools {
        DirectionalPools {
            core: Arc::clone(&self.core),
        }
    }

    pub fn events(&self) -> Events {
        Events {
            core: Arc::clone(&self.core),
        }
    }

    pub fn notifications(&self) -> Notifications {
        Notifications {
            core: Arc::clone(&self.core),
        }
    }

    pub fn probes(&self) -> Probes {
        Probes {
            core: Arc::clone(&self.core),
        }
    }

    pub fn rrsets(&self) -> RRSets {
        RRSets {
            core: Arc::clone(&self.core),
        }
    }

    pub fn tasks(&self) -> Tasks {
        Tasks {
            core: Arc::clone(&self.core),
        }
    }
}
