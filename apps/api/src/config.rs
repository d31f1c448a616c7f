use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 4000;
/// 5 MiB, enough for any real resume.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_JOB_TTL_SECS: u32 = 60 * 60;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    /// Idle time after which finished or failed jobs are evicted.
    pub job_ttl_secs: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            port: match lookup("PORT") {
                Some(v) => v.parse::<u16>().context("PORT must be a valid port number")?,
                None => DEFAULT_PORT,
            },
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_upload_bytes: match lookup("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a positive integer")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
            job_ttl_secs: match lookup("JOB_TTL_SECS") {
                Some(v) => v
                    .parse::<u32>()
                    .context("JOB_TTL_SECS must be a non-negative integer")?,
                None => DEFAULT_JOB_TTL_SECS,
            },
        })
    }

    pub fn job_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::from(self.job_ttl_secs))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            job_ttl_secs: DEFAULT_JOB_TTL_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(config.job_ttl(), chrono::Duration::hours(1));
    }

    #[test]
    fn test_values_are_read() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "8081"),
            ("RUST_LOG", "debug"),
            ("MAX_UPLOAD_BYTES", "1024"),
            ("JOB_TTL_SECS", "90"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8081);
        assert_eq!(config.rust_log, "debug");
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.job_ttl_secs, 90);
    }

    #[test]
    fn test_bad_port_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_negative_job_ttl_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("JOB_TTL_SECS", "-5")])).unwrap_err();
        assert!(err.to_string().contains("JOB_TTL_SECS"));
    }
}
