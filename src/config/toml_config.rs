use crate::config::{DEFAULT_FETCH_PATH, DEFAULT_SUBMIT_PATH};
use crate::core::ConfigProvider;
use crate::utils::error::{FortuneError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: ApiConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub fetch_path: Option<String>,
    pub submit_path: Option<String>,
    pub session_cookie: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${FORTUNE_API})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FortuneError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 命令列指定的 session cookie 優先於設定檔
    pub fn override_session_cookie(&mut self, cookie: Option<&str>) {
        if let Some(cookie) = cookie {
            self.api.session_cookie = Some(cookie.to_string());
        }
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .and_then(LogFormat::parse)
            .unwrap_or_default()
    }
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.api.base_url
    }

    fn fetch_path(&self) -> &str {
        self.api.fetch_path.as_deref().unwrap_or(DEFAULT_FETCH_PATH)
    }

    fn submit_path(&self) -> &str {
        self.api.submit_path.as_deref().unwrap_or(DEFAULT_SUBMIT_PATH)
    }

    fn session_cookie(&self) -> Option<&str> {
        self.api.session_cookie.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;
        validation::validate_endpoint_path("api.fetch_path", self.fetch_path())?;
        validation::validate_endpoint_path("api.submit_path", self.submit_path())?;

        if let Some(logging) = &self.logging {
            if let Some(level) = &logging.level {
                if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
                    return Err(FortuneError::InvalidConfigValueError {
                        field: "logging.level".to_string(),
                        value: level.clone(),
                        reason: format!("Valid levels: {}", LOG_LEVELS.join(", ")),
                    });
                }
            }

            if let Some(format) = &logging.format {
                if LogFormat::parse(format).is_none() {
                    return Err(FortuneError::InvalidConfigValueError {
                        field: "logging.format".to_string(),
                        value: format.clone(),
                        reason: "Valid formats: compact, json".to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}
