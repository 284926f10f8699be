use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;

const DEV_DATABASE_URL: &str = "sqlite://database/source/movies.db?mode=rwc";
const TEST_DATABASE_URL: &str = "sqlite::memory:";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Environment {
    Testing,
    Developing,
}

impl Environment {
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("testing") => Environment::Testing,
            _ => Environment::Developing,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub addr: SocketAddr,
    pub database_url: String,
    pub movies_csv: PathBuf,
    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_flag(std::env::var("ENVIRONMENT").ok().as_deref());
        let mut config = Self::for_environment(environment);

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "8000".to_string()).parse().context("PORT")?;
        config.addr = format!("{host}:{port}").parse().context("HOST/PORT")?;

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database_url = url;
        }
        if let Ok(path) = std::env::var("MOVIES_CSV") {
            config.movies_csv = PathBuf::from(path);
        }
        if let Ok(prefix) = std::env::var("API_PREFIX") {
            config.api_prefix = normalize_prefix(&prefix);
        }

        Ok(config)
    }

    pub fn for_environment(environment: Environment) -> Self {
        let database_url = match environment {
            Environment::Testing => TEST_DATABASE_URL,
            Environment::Developing => DEV_DATABASE_URL,
        };

        Self {
            environment,
            addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            database_url: database_url.to_string(),
            movies_csv: PathBuf::from("database/seed_data/imdb_movies.csv"),
            api_prefix: "/theater".to_string(),
        }
    }
}

/// Leading slash, no trailing slash; `""` mounts at the root.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() { String::new() } else { format!("/{trimmed}") }
}
