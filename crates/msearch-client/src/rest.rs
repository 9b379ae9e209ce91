use async_trait::async_trait;
use serde_json::{Map, Value};

use msearch_core::config::ClientConfig;
use msearch_core::error::{SettingsError, SettingsResult};
use msearch_core::setting::SettingUpdate;
use msearch_core::store::SettingsStore;

/// Header carrying the host's authentication token.
pub const TOKEN_HEADER: &str = "Girder-Token";

/// Settings store backed by the host REST API.
pub struct RestSettingsStore {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl RestSettingsStore {
    pub fn new(config: &ClientConfig) -> SettingsResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SettingsError::Config(format!("Cannot build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.header(TOKEN_HEADER, token),
            None => builder,
        }
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> SettingsResult<reqwest::Response> {
        let resp = builder
            .send()
            .await
            .map_err(|e| SettingsError::Connection(e.into()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.bytes().await.unwrap_or_default();
        let message = rejection_message(status, &body);
        tracing::warn!(status = status.as_u16(), %message, "request rejected");
        Err(SettingsError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json(&self, builder: reqwest::RequestBuilder) -> SettingsResult<Value> {
        let resp = self.send(builder).await?;
        resp.json()
            .await
            .map_err(|e| SettingsError::Decode(e.to_string()))
    }
}

/// Human-readable text for a failed request: the body's `message` field,
/// or the status line when there is none.
fn rejection_message(status: reqwest::StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {status}"))
}

#[async_trait]
impl SettingsStore for RestSettingsStore {
    async fn get_settings(&self, keys: &[&str]) -> SettingsResult<Map<String, Value>> {
        let list = serde_json::to_string(keys).map_err(anyhow::Error::from)?;
        tracing::debug!(%list, "GET system/setting");

        let body = self
            .send_json(
                self.request(reqwest::Method::GET, "system/setting")
                    .query(&[("list", list)]),
            )
            .await?;

        match body {
            Value::Object(map) => Ok(map),
            other => Err(SettingsError::Decode(format!(
                "expected an object of settings, got {other}"
            ))),
        }
    }

    async fn put_settings(&self, updates: &[SettingUpdate]) -> SettingsResult<()> {
        let list = serde_json::to_string(updates).map_err(anyhow::Error::from)?;
        tracing::debug!(count = updates.len(), "PUT system/setting");

        self.send(
            self.request(reqwest::Method::PUT, "system/setting")
                .form(&[("list", list)]),
        )
        .await?;
        Ok(())
    }

    async fn get_default(&self) -> SettingsResult<Value> {
        tracing::debug!("GET resource/mongo_search/allowed?default=true");
        self.send_json(
            self.request(reqwest::Method::GET, "resource/mongo_search/allowed")
                .query(&[("default", true)]),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_field_is_used_verbatim() {
        let msg = rejection_message(
            reqwest::StatusCode::BAD_REQUEST,
            br#"{"message": "Only user, item are valid keywords", "type": "validation"}"#,
        );
        assert_eq!(msg, "Only user, item are valid keywords");
    }

    #[test]
    fn falls_back_to_status_without_message() {
        let msg = rejection_message(reqwest::StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        assert_eq!(msg, "HTTP 502 Bad Gateway");

        let msg = rejection_message(reqwest::StatusCode::FORBIDDEN, br#"{"error": 1}"#);
        assert_eq!(msg, "HTTP 403 Forbidden");
    }

    #[test]
    fn urls_join_without_double_slashes() {
        let config = ClientConfig {
            api_url: "http://h/api/v1/".into(),
            ..ClientConfig::default()
        };
        let store = RestSettingsStore::new(&config).unwrap();
        assert_eq!(store.url("system/setting"), "http://h/api/v1/system/setting");
        assert_eq!(store.url("/resource/mongo_search/allowed"), "http://h/api/v1/resource/mongo_search/allowed");
    }
}
