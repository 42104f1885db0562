use serde::Deserialize;

/// Settings for the `comanda` binary, read from `config/settings.toml`
/// plus `COMANDA__*` environment overrides (e.g. `COMANDA__SERVER__PORT`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub orders_csv: String,
    pub credentials: String,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: None,
            port: 3000,
            orders_csv: "data/orders.csv".to_string(),
            credentials: "config/users.json".to_string(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("config/settings").required(false))
            .add_source(config::Environment::with_prefix("COMANDA").separator("__"))
            .build()?
            .try_deserialize()
    }
}
