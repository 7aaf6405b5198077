use anyhow::{Context, Result};

const DEFAULT_MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub max_file_size: usize,
    /// Absent key means the completion service is not configured and chat
    /// answers degrade to verbatim matches.
    pub openai_api_key: Option<String>,
    /// Absent SMTP settings mean email sends are logged without a transport.
    pub smtp: Option<SmtpConfig>,
    pub rust_log: String,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            max_file_size: std::env::var("MAX_FILE_SIZE")
                .unwrap_or_else(|_| DEFAULT_MAX_FILE_SIZE.to_string())
                .parse::<usize>()
                .context("MAX_FILE_SIZE must be a byte count")?,
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            smtp: SmtpConfig::from_env()?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl SmtpConfig {
    /// SMTP is optional as a whole; once SMTP_HOST is set, the remaining
    /// credentials are required.
    fn from_env() -> Result<Option<Self>> {
        let Ok(host) = std::env::var("SMTP_HOST") else {
            return Ok(None);
        };

        Ok(Some(SmtpConfig {
            host,
            port: std::env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse::<u16>()
                .context("SMTP_PORT must be a valid port number")?,
            user: require_env("SMTP_USER")?,
            pass: require_env("SMTP_PASS")?,
            from: require_env("SMTP_FROM")?,
        }))
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
