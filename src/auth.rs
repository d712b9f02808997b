//! Password-grant token exchange.

use serde::Deserialize;

use crate::error::{ClientError, Result};

/// The tokens issued by one password grant.
pub(crate) struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Wire shape of a token response.
///
/// The service emits every field under two casings, often both in the same
/// payload, so each is decoded into its own slot and the accessors take
/// whichever is present. A serde alias would reject the duplicated keys.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AuthResponse {
    #[serde(rename = "access_token")]
    access_token: Option<String>,
    #[serde(rename = "accessToken")]
    access_token_camel: Option<String>,
    #[serde(rename = "refresh_token")]
    refresh_token: Option<String>,
    #[serde(rename = "refreshToken")]
    refresh_token_camel: Option<String>,
    #[serde(rename = "token_type")]
    token_type: Option<String>,
    #[serde(rename = "tokenType")]
    token_type_camel: Option<String>,
    #[serde(rename = "expires_in")]
    expires_in: Option<String>,
    #[serde(rename = "expiresIn")]
    expires_in_camel: Option<String>,
}

fn pick<'a>(snake: Option<&'a str>, camel: Option<&'a str>) -> Option<&'a str> {
    snake
        .filter(|v| !v.is_empty())
        .or_else(|| camel.filter(|v| !v.is_empty()))
}

impl AuthResponse {
    fn access_token(&self) -> Option<&str> {
        pick(self.access_token.as_deref(), self.access_token_camel.as_deref())
    }

    fn refresh_token(&self) -> Option<&str> {
        pick(self.refresh_token.as_deref(), self.refresh_token_camel.as_deref())
    }

    fn token_type(&self) -> Option<&str> {
        pick(self.token_type.as_deref(), self.token_type_camel.as_deref())
    }

    fn expires_in(&self) -> Option<&str> {
        pick(self.expires_in.as_deref(), self.expires_in_camel.as_deref())
    }
}

/// Exchange credentials for an access/refresh token pair.
pub(crate) async fn password_grant(
    http: &reqwest::Client,
    base_url: &str,
    username: &str,
    password: &str,
) -> Result<TokenPair> {
    let url = format!("{}/v1/authorization/token", base_url.trim_end_matches('/'));
    log::debug!("POST {url}: requesting access token");

    let res = http
        .post(&url)
        .form(&[
            ("grant_type", "password"),
            ("username", username),
            ("password", password),
        ])
        .send()
        .await?;
    let status = res.status();
    let body = res.bytes().await?;

    if !status.is_success() {
        return Err(ClientError::api(status.as_u16(), "POST", &url, &body));
    }

    let auth: AuthResponse =
        serde_json::from_slice(&body).map_err(|err| ClientError::Decode {
            detail: err.to_string(),
            body: String::from_utf8_lossy(&body).into_owned(),
        })?;

    let access = auth.access_token().ok_or_else(|| ClientError::Auth {
        detail: "token endpoint returned no access token".to_owned(),
    })?;
    log::debug!(
        "token exchange ok: type {}, expires in {}s",
        auth.token_type().unwrap_or("unknown"),
        auth.expires_in().unwrap_or("unknown")
    );

    Ok(TokenPair {
        access: access.to_owned(),
        refresh: auth.refresh_token().unwrap_or_default().to_owned(),
    })
}
