use core_config::{
    AppInfo, ConfigError, FromEnv, app_info, env_or_default, env_parse, server::ServerConfig,
};

pub use core_config::Environment;

/// Port the gateway listens on unless `PORT` says otherwise
pub const DEFAULT_PORT: u16 = 8080;

/// Where requests are forwarded to
#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    /// Base URL of the ShareIt server, without a trailing slash
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Environment variables:
/// - `SHAREIT_SERVER_URL` (default `http://localhost:9090`)
/// - `SHAREIT_SERVER_TIMEOUT_SECS` (default 30)
impl FromEnv for UpstreamConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = env_or_default("SHAREIT_SERVER_URL", "http://localhost:9090");

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs: env_parse("SHAREIT_SERVER_TIMEOUT_SECS", "30")?,
        })
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub upstream: UpstreamConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            server: ServerConfig::from_env_with_port(DEFAULT_PORT)?,
            environment: Environment::from_env(),
            upstream: UpstreamConfig::from_env()?,
        })
    }
}
