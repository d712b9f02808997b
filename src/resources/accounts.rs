//! Account resources.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::Core;
use crate::error::Result;
use crate::pagination::ResultInfo;

/// An account visible to the authenticated user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Account {
    pub account_name: String,
    pub account_holder_user_name: String,
    pub owner_user_name: String,
    pub number_of_users: i64,
    pub number_of_groups: i64,
    pub account_type: String,
}

/// The string identifier of an [`Account`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountKey(pub String);

impl AccountKey {
    /// Resource path for this account, with the name percent-escaped.
    pub fn uri(&self) -> String {
        format!("accounts/{}", urlencoding::encode(&self.0))
    }
}

impl From<&str> for AccountKey {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for AccountKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Account index response body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountPage {
    pub accounts: Vec<Account>,
    pub result_info: ResultInfo,
}

/// Access to the accounts API.
pub struct Accounts {
    pub(crate) core: Arc<Core>,
}

impl Accounts {
    /// All accounts the credentials can see. Not paginated by the service.
    pub async fn select(&self) -> Result<Vec<Account>> {
        let page: AccountPage = self.core.transport.get_json("accounts").await?;
        Ok(page.accounts)
    }

    /// One account by key.
    pub async fn find(&self, key: &AccountKey) -> Result<Account> {
        self.core.transport.get_json(&key.uri()).await
    }

    /// Delete an account by key.
    pub async fn delete(&self, key: &AccountKey) -> Result<()> {
        self.core.transport.delete(&key.uri()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_uri_escapes_name() {
        assert_eq!(AccountKey::from("team a").uri(), "accounts/team%20a");
    }

    #[test]
    fn account_decodes_camel_case() {
        let account: Account = serde_json::from_str(
            r#"{"accountName":"teamrocket","accountHolderUserName":"jessie","ownerUserName":"james","numberOfUsers":2,"numberOfGroups":1,"accountType":"ORGANIZATION"}"#,
        )
        .expect("valid account");
        assert_eq!(account.account_name, "teamrocket");
        assert_eq!(account.number_of_users, 2);
        assert_eq!(account.account_type, "ORGANIZATION");
    }
}
