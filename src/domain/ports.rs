use crate::utils::error::FetchError;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn fetch_path(&self) -> &str;
    fn submit_path(&self) -> &str;

    /// 預先放進 cookie jar 的 session cookie，例如 `_app_session=...`
    fn session_cookie(&self) -> Option<&str> {
        None
    }
}

/// 後端 API 的抽象，成功時回傳 `fortune.text`
#[async_trait]
pub trait FortuneApi: Send + Sync {
    async fn fetch_fortune(&self) -> Result<String, FetchError>;
    async fn submit_fortune(&self, text: &str) -> Result<String, FetchError>;
}
