//! Google Sheets-backed [`RecordStore`].
//!
//! Authenticates with a service-account OAuth flow: an RS256-signed
//! assertion is exchanged for a short-lived access token, which is cached
//! and reused until shortly before it expires.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::SheetsConfig;
use crate::error::{ConfigError, StoreError};
use crate::{RecordStore, Table};

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Bound on every store API call; a hung call is an error, not a wait.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Lifetime requested for the OAuth assertion.
const ASSERTION_TTL_SECS: i64 = 3600;

/// Refresh the cached token this long before it actually expires.
const TOKEN_EXPIRY_SLACK_SECS: i64 = 60;

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: i64,
}

impl CachedToken {
    fn is_fresh(&self, now: i64) -> bool {
        self.expires_at - TOKEN_EXPIRY_SLACK_SECS > now
    }
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

/// Client for the Google Sheets v4 API.
pub struct SheetsStore {
    http: reqwest::Client,
    config: SheetsConfig,
    encoding_key: EncodingKey,
    token: Mutex<Option<CachedToken>>,
}

impl SheetsStore {
    /// Build the store client from validated configuration.
    ///
    /// Parses the private key once so a malformed key fails here, at
    /// startup, instead of on the first append.
    pub fn new(config: SheetsConfig) -> Result<Self, ConfigError> {
        let encoding_key =
            EncodingKey::from_rsa_pem(config.private_key.as_bytes()).map_err(|e| {
                ConfigError::Invalid {
                    field: "private key",
                    reason: e.to_string(),
                }
            })?;

        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| ConfigError::Invalid {
                field: "http client",
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            config,
            encoding_key,
            token: Mutex::new(None),
        })
    }

    /// Return a valid access token, fetching a fresh one when the cache is
    /// empty or near expiry.
    ///
    /// The lock is not held across the token exchange. Concurrent callers
    /// racing through a cold start may each fetch a token; any valid token
    /// works, so the last writer wins.
    async fn access_token(&self) -> Result<String, StoreError> {
        let now = Utc::now().timestamp();
        {
            let cached = self.token.lock().await;
            if let Some(token) = cached.as_ref() {
                if token.is_fresh(now) {
                    return Ok(token.access_token.clone());
                }
            }
        }

        let token = self.fetch_token(now).await?;
        let access_token = token.access_token.clone();
        *self.token.lock().await = Some(token);
        Ok(access_token)
    }

    /// Exchange an RS256-signed assertion for an access token.
    async fn fetch_token(&self, now: i64) -> Result<CachedToken, StoreError> {
        let claims = AssertionClaims {
            iss: &self.config.service_account_email,
            scope: SHEETS_SCOPE,
            aud: TOKEN_URL,
            iat: now,
            exp: now + ASSERTION_TTL_SECS,
        };
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| StoreError::Auth(e.to_string()))?;

        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(StoreError::Auth(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Auth(e.to_string()))?;

        tracing::debug!(expires_in = token.expires_in, "Store access token refreshed");

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: now + token.expires_in,
        })
    }

    /// Create the tab for `table` if the spreadsheet does not have it yet.
    ///
    /// Best-effort maintenance: failures are logged and swallowed. A tab
    /// that is genuinely missing still surfaces as an append failure, which
    /// is reported normally.
    pub async fn ensure_table(&self, table: Table) {
        if let Err(e) = self.try_ensure_table(table).await {
            tracing::warn!(tab = table.tab_name(), error = %e, "ensure_table failed, continuing");
        }
    }

    async fn try_ensure_table(&self, table: Table) -> Result<(), StoreError> {
        let token = self.access_token().await?;
        let url = format!("{API_BASE}/{}", self.config.spreadsheet_id);

        let response = self
            .http
            .get(&url)
            .query(&[("fields", "sheets.properties.title")])
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let meta: SpreadsheetMeta = response
            .json()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        if meta
            .sheets
            .iter()
            .any(|s| s.properties.title == table.tab_name())
        {
            return Ok(());
        }

        let body = serde_json::json!({
            "requests": [{
                "addSheet": { "properties": { "title": table.tab_name() } }
            }]
        });
        let response = self
            .http
            .post(format!("{url}:batchUpdate"))
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(StoreError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(tab = table.tab_name(), "Created missing store tab");
        Ok(())
    }
}

#[async_trait]
impl RecordStore for SheetsStore {
    async fn append(&self, table: Table, row: Vec<String>) -> Result<(), StoreError> {
        let token = self.access_token().await?;
        let url = format!(
            "{API_BASE}/{}/values/{}!A:Z:append",
            self.config.spreadsheet_id,
            table.tab_name()
        );
        let body = serde_json::json!({ "values": [row] });

        let response = self
            .http
            .post(&url)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(tab = table.tab_name(), "Row appended");
            Ok(())
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            tracing::warn!(
                status = status.as_u16(),
                tab = table.tab_name(),
                body = %body,
                "Append rejected by store API"
            );
            Err(StoreError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}
