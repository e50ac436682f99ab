use crate::domain::model::{FortuneEnvelope, SubmitPayload};
use crate::domain::ports::{ConfigProvider, FortuneApi};
use crate::utils::error::{FetchError, FortuneError, Result};
use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::{Client, Response};
use std::sync::Arc;
use url::Url;

/// 以 reqwest 實作的後端 API。
///
/// 兩個端點都從同一個 base URL 組出來，cookie jar 只對這個來源送出 cookie，
/// 相當於瀏覽器的 `credentials: 'same-origin'`。
pub struct HttpFortuneApi {
    client: Client,
    fetch_url: Url,
    submit_url: Url,
}

impl HttpFortuneApi {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let base = Url::parse(config.base_url()).map_err(|e| {
            FortuneError::InvalidConfigValueError {
                field: "base_url".to_string(),
                value: config.base_url().to_string(),
                reason: e.to_string(),
            }
        })?;

        let fetch_url = join_endpoint(&base, "fetch_path", config.fetch_path())?;
        let submit_url = join_endpoint(&base, "submit_path", config.submit_path())?;

        let jar = Jar::default();
        if let Some(cookie) = config.session_cookie() {
            jar.add_cookie_str(cookie, &base);
        }

        let client = Client::builder().cookie_provider(Arc::new(jar)).build()?;

        Ok(Self {
            client,
            fetch_url,
            submit_url,
        })
    }

    pub fn fetch_url(&self) -> &Url {
        &self.fetch_url
    }

    pub fn submit_url(&self) -> &Url {
        &self.submit_url
    }

    async fn read_fortune(response: Response) -> std::result::Result<String, FetchError> {
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(FetchError::from_status(status));
        }

        let body = response.bytes().await?;
        let envelope: FortuneEnvelope = serde_json::from_slice(&body)?;
        Ok(envelope.fortune.text)
    }
}

fn join_endpoint(base: &Url, field: &str, path: &str) -> Result<Url> {
    base.join(path)
        .map_err(|e| FortuneError::InvalidConfigValueError {
            field: field.to_string(),
            value: path.to_string(),
            reason: e.to_string(),
        })
}

#[async_trait]
impl FortuneApi for HttpFortuneApi {
    async fn fetch_fortune(&self) -> std::result::Result<String, FetchError> {
        tracing::debug!("Making API request to: {}", self.fetch_url);
        let response = self.client.get(self.fetch_url.clone()).send().await?;
        Self::read_fortune(response).await
    }

    async fn submit_fortune(&self, text: &str) -> std::result::Result<String, FetchError> {
        tracing::debug!("Submitting fortune to: {}", self.submit_url);
        let payload = SubmitPayload {
            fortune: text.to_string(),
        };

        // .json() 會設定 Content-Type: application/json
        let response = self
            .client
            .post(self.submit_url.clone())
            .json(&payload)
            .send()
            .await?;
        Self::read_fortune(response).await
    }
}
