use std::path::PathBuf;

use rand::RngExt;

const SECRET_KEY_LEN: usize = 50;
const SECRET_KEY_CHARSET: &[u8] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Connection URL. `DATABASE_URL` wins; otherwise derived from `DEBUG`.
    pub database_url: String,
    /// HMAC key for access tokens and confirmation codes. Env var: `SECRET_KEY`.
    pub secret_key: String,
    /// `true` when `SECRET_KEY` was absent and a random key was generated.
    pub secret_key_generated: bool,
    pub debug: bool,
    /// Space-separated `ALLOWED_HOSTS`. The first entry goes into confirmation mails.
    pub allowed_hosts: Vec<String>,
    pub mail_from: String,
    /// HTTP relay endpoint. Mail is written to `mail_file_path` when unset.
    pub mail_relay_url: Option<String>,
    pub mail_file_path: PathBuf,
    /// TCP port to listen on (default 8000). Env var: `API_PORT`.
    pub api_port: u16,
    /// `LOG_FORMAT=json` switches to structured output.
    pub log_json: bool,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_owned());
        let debug = var("DEBUG").is_some_and(|v| is_truthy(&v));

        let database_url = var("DATABASE_URL").unwrap_or_else(|| {
            if debug {
                format!("sqlite://{}?mode=rwc", get("SQLITE_PATH", "yamdb.sqlite3"))
            } else {
                format!(
                    "postgres://{}:{}@{}:{}/{}",
                    get("POSTGRES_USER", "postgres"),
                    get("POSTGRES_PASSWORD", "postgres"),
                    get("POSTGRES_HOST", "db"),
                    get("POSTGRES_PORT", "5432"),
                    get("POSTGRES_DB", "postgres"),
                )
            }
        });

        let (secret_key, secret_key_generated) = match var("SECRET_KEY") {
            Some(key) if !key.is_empty() => (key, false),
            _ => (generate_secret_key(), true),
        };

        let allowed_hosts: Vec<String> = get("ALLOWED_HOSTS", "localhost")
            .split_whitespace()
            .map(str::to_owned)
            .collect();

        Self {
            database_url,
            secret_key,
            secret_key_generated,
            debug,
            allowed_hosts,
            mail_from: get("MAIL_FROM", "yamdb@example.com"),
            mail_relay_url: var("MAIL_RELAY_URL").filter(|v| !v.is_empty()),
            mail_file_path: PathBuf::from(get("MAIL_FILE_PATH", "sent_emails")),
            api_port: var("API_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            log_json: var("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
        }
    }

    /// Host used in links sent by mail.
    pub fn public_host(&self) -> &str {
        self.allowed_hosts
            .first()
            .map(String::as_str)
            .unwrap_or("localhost")
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn generate_secret_key() -> String {
    let mut rng = rand::rng();
    (0..SECRET_KEY_LEN)
        .map(|_| SECRET_KEY_CHARSET[rng.random_range(0..SECRET_KEY_CHARSET.len())] as char)
        .collect()
}
