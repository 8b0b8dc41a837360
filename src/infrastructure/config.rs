use anyhow::Context;
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageSettings {
    /// JSON file the chart table is snapshotted to; memory only when unset
    pub snapshot_path: Option<String>,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

/// Defaults, then `config/charts.*` if present, then `CHARTS__*` env vars.
pub fn load_service_config() -> anyhow::Result<ServiceConfig> {
    build_config(config::File::with_name("config/charts").required(false))
}

fn build_config<S>(file: S) -> anyhow::Result<ServiceConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .add_source(file)
        .add_source(config::Environment::with_prefix("CHARTS").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
