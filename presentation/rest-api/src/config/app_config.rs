use super::database_config::StorageConfig;
use super::{cors_config, resilience_config, server_config::ServerConfig};
use persistence::resilience::ResilienceConfig;
use poem::middleware::Cors;

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub storage: StorageConfig,
    pub resilience: ResilienceConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            server: ServerConfig::from_env(),
            cors: cors_config::init_cors(),
            storage: StorageConfig::from_env()?,
            resilience: resilience_config::from_env(),
        })
    }
}
