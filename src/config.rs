use std::env;
use std::str::FromStr;

use dotenvy::dotenv;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    File,
    Memory,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub data_dir: String,
    pub store_backend: StoreBackend,
    pub cache_ttl_secs: u64,

    // Rate limiting
    pub rate_write_per_min: u32,
    pub rate_read_per_min: u32,

    pub api_prefix: String,

    pub log_dir: String,
    pub log_level: tracing::Level,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parses `key`, falling back to `default` when unset or malformed.
fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            eprintln!("Ignoring malformed {key}={raw:?}, using default");
            default
        }),
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let store_backend = match var_or("STORE_BACKEND", "file").to_lowercase().as_str() {
            "memory" => StoreBackend::Memory,
            _ => StoreBackend::File,
        };

        Self {
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:8080"),
            data_dir: var_or("DATA_DIR", "data"),
            store_backend,
            cache_ttl_secs: parsed_or("CACHE_TTL_SECS", 300),

            rate_write_per_min: parsed_or("RATE_WRITE_PER_MIN", 120),
            rate_read_per_min: parsed_or("RATE_READ_PER_MIN", 1000),

            api_prefix: var_or("API_PREFIX", "/api"),

            log_dir: var_or("LOG_DIR", "logs"),
            log_level: parsed_or("LOG_LEVEL", tracing::Level::DEBUG),
        }
    }
}
