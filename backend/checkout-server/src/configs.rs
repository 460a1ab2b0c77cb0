use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use common_utils::consts;

use crate::{error::ConfigurationError, logger::config::Log};

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Config {
    pub common: Common,
    pub server: Server,
    pub metrics: MetricsServer,
    pub log: Log,
    #[serde(default)]
    pub gateways: Gateways,
}

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Common {
    pub environment: String,
}

/// Address of the checkout HTTP API.
#[derive(Clone, serde::Deserialize, Debug)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

/// Address of the prometheus scrape endpoint.
#[derive(Clone, serde::Deserialize, Debug)]
pub struct MetricsServer {
    pub host: String,
    pub port: u16,
}

/// Gateways the merchant has switched on, as raw identifiers.
#[derive(Clone, serde::Deserialize, Debug, Default)]
pub struct Gateways {
    #[serde(default)]
    pub enabled: Vec<String>,
}

impl Config {
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::new_with_config_path(None)
    }

    /// Reads `explicit_config_path`, or `config/<profile>.toml` when none is given, then
    /// applies `PAYGATE__SECTION__KEY` environment overrides. A missing file is not an error.
    pub fn new_with_config_path(
        explicit_config_path: Option<PathBuf>,
    ) -> Result<Self, config::ConfigError> {
        let env = consts::Env::current_env();
        let path = explicit_config_path.unwrap_or_else(|| Self::default_path(env));

        let raw = config::Config::builder()
            // the build profile decides, files cannot override it
            .set_override("env", env.to_string())?
            .add_source(config::File::from(path).required(false))
            .add_source(Self::env_overrides())
            .build()?;

        #[allow(clippy::print_stderr)]
        let config: Self = serde_path_to_error::deserialize(raw).map_err(|error| {
            eprintln!("Unable to deserialize application configuration: {error}");
            error.into_inner()
        })?;

        config.validate()?;

        Ok(config)
    }

    /// `config/<profile>.toml` at the workspace root.
    pub fn default_path(env: consts::Env) -> PathBuf {
        config_directory().join(env.config_path())
    }

    fn env_overrides() -> config::Environment {
        config::Environment::with_prefix(consts::CONFIG_ENV_PREFIX)
            .try_parsing(true)
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("gateways.enabled")
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        match self.common.environment.as_str() {
            "development" | "production" => {}
            other => {
                return Err(config::ConfigError::Message(format!(
                    "Invalid environment '{other}'. Must be 'development' or 'production'"
                )));
            }
        }

        if self.server.host == self.metrics.host && self.server.port == self.metrics.port {
            return Err(config::ConfigError::Message(format!(
                "Checkout and metrics servers cannot share {}:{}",
                self.server.host, self.server.port
            )));
        }

        Ok(())
    }
}

impl Server {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigurationError> {
        Ok(SocketAddr::new(self.host.parse()?, self.port))
    }
}

impl MetricsServer {
    pub async fn tcp_listener(&self) -> Result<tokio::net::TcpListener, ConfigurationError> {
        let loc = format!("{}:{}", self.host, self.port);

        tracing::info!(loc = %loc, "binding the metrics server");

        Ok(tokio::net::TcpListener::bind(loc).await?)
    }
}

/// Crate runs resolve against the workspace; a deployed binary reads `./config`.
fn config_directory() -> PathBuf {
    std::env::var_os("CARGO_MANIFEST_DIR").map_or_else(
        || PathBuf::from("config"),
        |manifest_dir| Path::new(&manifest_dir).join("../../config"),
    )
}
