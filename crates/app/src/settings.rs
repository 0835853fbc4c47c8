//! Application settings.
//!
//! Read from an optional `settings.toml` in the working directory, then
//! overridden by `HOLOCRON__<SECTION>__<KEY>` environment variables
//! (e.g. `HOLOCRON__AUTH__SECRET`).
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Auth {
    pub secret: String,
    pub token_ttl_secs: i64,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub auth: Auth,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_file("settings")
    }

    fn from_file(name: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.port", 3000)?
            .set_default("server.database", "memory")?
            .set_default("auth.token_ttl_secs", engine::DEFAULT_TOKEN_TTL_SECS)?
            .add_source(File::with_name(name).required(false))
            .add_source(Environment::with_prefix("HOLOCRON").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_is_mandatory() {
        let result = Settings::from_file("does-not-exist");
        assert!(result.is_err());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = std::env::temp_dir().join(format!("holocron-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        std::fs::write(
            &path,
            "[server]\nport = 8080\ndatabase = { sqlite = \"holocron.db\" }\n\n[auth]\nsecret = \"s3cret\"\n",
        )
        .unwrap();

        let settings = Settings::from_file(path.to_str().unwrap()).unwrap();

        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.server.port, 8080);
        assert!(matches!(settings.server.database, Database::Sqlite(ref p) if p == "holocron.db"));
        assert_eq!(settings.auth.secret, "s3cret");
        assert_eq!(settings.auth.token_ttl_secs, engine::DEFAULT_TOKEN_TTL_SECS);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
