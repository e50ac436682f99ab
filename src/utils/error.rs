use thiserror::Error;

/// 單次 fetch / submit 失敗的原因
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{status} ({reason})")]
    Status { status: u16, reason: String },

    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("{0}")]
    Malformed(#[from] serde_json::Error),

    #[error("request aborted: {reason}")]
    Aborted { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Http,
    Network,
    Malformed,
    Aborted,
}

impl FetchError {
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Status { .. } => FetchErrorKind::Http,
            FetchError::Network(_) => FetchErrorKind::Network,
            FetchError::Malformed(_) => FetchErrorKind::Malformed,
            FetchError::Aborted { .. } => FetchErrorKind::Aborted,
        }
    }
}

#[derive(Error, Debug)]
pub enum FortuneError {
    #[error("HTTP client error: {0}")]
    ClientError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl FortuneError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            FortuneError::ClientError(_) => "無法建立 HTTP 客戶端".to_string(),
            FortuneError::IoError(e) => format!("檔案讀取失敗: {}", e),
            FortuneError::TomlError(_) => "設定檔格式錯誤".to_string(),
            FortuneError::ConfigError { message } => format!("設定錯誤: {}", message),
            FortuneError::InvalidConfigValueError { field, reason, .. } => {
                format!("設定值 {} 無效: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FortuneError::ClientError(_) => "Check TLS configuration and try again",
            FortuneError::IoError(_) => "Check that the config file exists and is readable",
            FortuneError::TomlError(_) => "Fix the TOML syntax in the config file",
            FortuneError::ConfigError { .. } | FortuneError::InvalidConfigValueError { .. } => {
                "Check --base-url or the [api] section of the config file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FortuneError>;
