use serde::Deserialize;
use showroom_platform_shared::DEFAULT_CONFIG_CACHE_TTL;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Base URL of the hosted document database REST endpoint.
    pub document_api_url: String,
    pub document_api_key: String,
    /// Base URL of the object storage management endpoint.
    pub storage_api_url: String,
    /// Base URL under which uploaded objects are publicly reachable.
    pub storage_public_url: String,
    /// Static bearer token gating the admin surface. Identity itself is
    /// the hosted platform's concern.
    pub admin_api_token: String,
    pub config_cache_ttl_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("config_cache_ttl_secs", DEFAULT_CONFIG_CACHE_TTL.as_secs() as i64)?
            .add_source(config::Environment::default())
            .build()?;

        config.try_deserialize()
    }
}
