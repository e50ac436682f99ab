use anyhow::Context;
use clap::Parser;
use fortune_client::core::ConfigProvider;
use fortune_client::utils::logger::{self, LogFormat};
use fortune_client::utils::validation::Validate;
use fortune_client::{CliConfig, FortuneError, HttpFortuneApi, TerminalHost, TomlConfig};

struct Settings {
    provider: Box<dyn ConfigProvider>,
    log_level: Option<String>,
    log_format: LogFormat,
}

fn load_settings(cli: &CliConfig) -> Result<Settings, FortuneError> {
    let cli_format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    match &cli.config {
        Some(path) => {
            let mut file = TomlConfig::from_file(path)?;
            file.override_session_cookie(cli.session_cookie.as_deref());
            file.validate()?;
            let log_format = if cli.json_logs {
                LogFormat::Json
            } else {
                file.log_format()
            };
            Ok(Settings {
                log_level: file.log_level().map(str::to_string),
                log_format,
                provider: Box::new(file),
            })
        }
        None => {
            cli.validate()?;
            Ok(Settings {
                provider: Box::new(cli.clone()),
                log_level: None,
                log_format: cli_format,
            })
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入並驗證配置
    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, settings.log_level.as_deref(), settings.log_format);

    tracing::info!("Starting fortune-client against {}", settings.provider.base_url());
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let api = HttpFortuneApi::new(&*settings.provider)
        .context("failed to build HTTP client")?;
    tracing::debug!("Fetch endpoint: {}", api.fetch_url());
    tracing::debug!("Submit endpoint: {}", api.submit_url());

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    TerminalHost::new(api)
        .run(stdin, stdout)
        .await
        .context("terminal session failed")?;

    Ok(())
}
