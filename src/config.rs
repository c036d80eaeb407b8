use crate::error::{EtlError, Result};
use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_RAW_DIR: &str = "../data/raw";
pub const DEFAULT_STAGED_PATH: &str = "../data/staged/nasa_cleaned.csv";
pub const DEFAULT_TABLE: &str = "nasa_apod";
pub const DEFAULT_BATCH_SIZE: usize = 20;
pub const DEFAULT_BATCH_PAUSE_MS: u64 = 500;

/// Endpoint + key for the remote SQL RPC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub url: String,
    pub key: String,
}

/// Paths and tuning for both stages.
#[derive(Debug, Clone)]
pub struct Config {
    pub raw_dir: PathBuf,
    pub staged_path: PathBuf,
    pub table: String,
    pub batch_size: usize,
    pub batch_pause: Duration,
    remote: Option<RemoteConfig>,
}

impl Config {
    /// Defaults for everything except the two paths. No remote endpoint.
    pub fn new(raw_dir: impl Into<PathBuf>, staged_path: impl Into<PathBuf>) -> Self {
        Self {
            raw_dir: raw_dir.into(),
            staged_path: staged_path.into(),
            table: DEFAULT_TABLE.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            batch_pause: Duration::from_millis(DEFAULT_BATCH_PAUSE_MS),
            remote: None,
        }
    }

    /// Read `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self> {
        check_dotenv(dotenvy::dotenv())?;
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::new(
            lookup("APOD_RAW_DIR").unwrap_or_else(|| DEFAULT_RAW_DIR.to_string()),
            lookup("APOD_STAGED_PATH").unwrap_or_else(|| DEFAULT_STAGED_PATH.to_string()),
        );
        if let Some(table) = lookup("APOD_TABLE") {
            cfg.table = table;
        }
        if let Some(raw) = lookup("APOD_BATCH_SIZE") {
            let size: usize = parse_number("APOD_BATCH_SIZE", &raw)?;
            if size == 0 {
                return Err(EtlError::Config("APOD_BATCH_SIZE must be at least 1".into()));
            }
            cfg.batch_size = size;
        }
        if let Some(raw) = lookup("APOD_BATCH_PAUSE_MS") {
            cfg.batch_pause = Duration::from_millis(parse_number("APOD_BATCH_PAUSE_MS", &raw)?);
        }
        if let (Some(url), Some(key)) = (lookup("SUPABASE_URL"), lookup("SUPABASE_KEY")) {
            cfg.remote = Some(RemoteConfig { url, key });
        }
        Ok(cfg)
    }

    pub fn with_remote(mut self, url: impl Into<String>, key: impl Into<String>) -> Self {
        self.remote = Some(RemoteConfig {
            url: url.into(),
            key: key.into(),
        });
        self
    }

    /// Only the load stage needs credentials, so they are checked lazily.
    pub fn remote(&self) -> Result<&RemoteConfig> {
        self.remote
            .as_ref()
            .ok_or_else(|| EtlError::Config("SUPABASE_URL and SUPABASE_KEY must both be set".into()))
    }
}

/// A missing `.env` is normal in deployed runs; a malformed one is not.
fn check_dotenv<T>(loaded: dotenvy::Result<T>) -> Result<()> {
    match loaded {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(EtlError::Config(format!("cannot read .env: {e}"))),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| EtlError::Config(format!("{key} is not a valid number: {raw:?}")))
}
