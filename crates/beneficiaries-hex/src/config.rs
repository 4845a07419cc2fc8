use serde::Deserialize;
use std::env;

pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server_port: String,
    pub database_url: Option<String>,
    pub cors_allowed_origins: Vec<String>,
    pub environment: String,
    pub api_docs_enabled: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let server_port = lookup("SERVER_PORT").unwrap_or_else(|| "3000".into());
        server_port
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("invalid SERVER_PORT {server_port:?}: {e}"))?;

        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());

        let cors_allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(raw) => parse_origins(&raw),
            None => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        let environment = lookup("APP_ENV").unwrap_or_else(|| "production".into());
        let api_docs_enabled = match lookup("API_DOCS_ENABLED") {
            Some(flag) => parse_flag(&flag)
                .ok_or_else(|| anyhow::anyhow!("invalid API_DOCS_ENABLED {flag:?}"))?,
            None => environment.eq_ignore_ascii_case("development"),
        };

        Ok(Self {
            server_port,
            database_url,
            cors_allowed_origins,
            environment,
            api_docs_enabled,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
