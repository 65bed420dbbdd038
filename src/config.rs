use std::env;

use axum::http::HeaderValue;

/// Where announcements and teachers are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Process-local maps; data is lost on restart. Teachers come from `SEED_TEACHERS`.
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(anyhow::anyhow!("Unknown STORE backend: {s}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    /// `None` allows any origin.
    pub cors_allowed_origin: Option<HeaderValue>,
    /// Usernames registered as teachers when running on the memory store.
    pub seed_teachers: Vec<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let store: StoreBackend = env::var("STORE")
            .unwrap_or_else(|_| "postgres".into())
            .parse()?;

        let database_url = match store {
            StoreBackend::Postgres => Some(required("DATABASE_URL")?),
            StoreBackend::Memory => env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
        };

        let cors_allowed_origin = match env::var("CORS_ALLOWED_ORIGIN").ok().filter(|s| !s.is_empty()) {
            Some(origin) => Some(
                origin
                    .parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS_ALLOWED_ORIGIN {origin:?}: {e}"))?,
            ),
            None => None,
        };

        Ok(Self {
            store,
            database_url,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".into())
                .parse()?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,
            cors_allowed_origin,
            seed_teachers: env::var("SEED_TEACHERS")
                .map(|v| split_list(&v))
                .unwrap_or_default(),
        })
    }

    /// Settings for an in-process server backed by the memory store.
    pub fn memory(seed_teachers: Vec<String>) -> Self {
        Self {
            store: StoreBackend::Memory,
            database_url: None,
            database_max_connections: 1,
            host: "127.0.0.1".into(),
            port: 0,
            cors_allowed_origin: None,
            seed_teachers,
        }
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).map_err(|_| anyhow::anyhow!("Missing required env var: {}", key))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_parse() {
        assert_eq!("postgres".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert_eq!("Memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("mongo".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_split_list_skips_blanks() {
        assert_eq!(split_list(" teacher1, ,teacher2,"), vec!["teacher1", "teacher2"]);
        assert!(split_list("").is_empty());
    }
}
