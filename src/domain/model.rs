use serde::{Deserialize, Serialize};

/// 元件狀態，只存在記憶體中
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FortuneState {
    pub current_fortune: String,
    pub draft: String,
}

/// `{ "fortune": { "text": ..., ... } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FortuneEnvelope {
    pub fortune: FortuneRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FortuneRecord {
    pub text: String,
    // 後端可能附帶 id、時間戳等欄位
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitPayload {
    pub fortune: String,
}
