pub mod toml_config;

pub const DEFAULT_FETCH_PATH: &str = "/api/fortune.json";
pub const DEFAULT_SUBMIT_PATH: &str = "/api/fortune";

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::{DEFAULT_FETCH_PATH, DEFAULT_SUBMIT_PATH};
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "fortune-client")]
    #[command(about = "Show a random fortune and submit new ones")]
    pub struct CliConfig {
        #[arg(long, default_value = "http://localhost:3000")]
        pub base_url: String,

        #[arg(long, help = "TOML config file; overrides --base-url")]
        pub config: Option<PathBuf>,

        #[arg(long, help = "Session cookie sent with every request, e.g. _app_session=...; overrides the config file")]
        pub session_cookie: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,
    }

    impl ConfigProvider for CliConfig {
        fn base_url(&self) -> &str {
            &self.base_url
        }

        fn fetch_path(&self) -> &str {
            DEFAULT_FETCH_PATH
        }

        fn submit_path(&self) -> &str {
            DEFAULT_SUBMIT_PATH
        }

        fn session_cookie(&self) -> Option<&str> {
            self.session_cookie.as_deref()
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_url("base_url", &self.base_url)
        }
    }

}
