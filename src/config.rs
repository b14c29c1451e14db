use std::env;

use anyhow::Context;

/// Placeholder secrets that ship in templates and tutorials.
const INSECURE_SECRETS: &[&str] = &[
    "secret",
    "secret123",
    "mysecret",
    "changeme",
    "change_me",
    "jwt_secret",
    "your_jwt_secret",
];

const MIN_SECRET_LEN: usize = 32;
const RECOMMENDED_SECRET_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub cors_extra_origins: Vec<String>,

    pub jwt_secret: String,
    pub jwt_access_ttl_secs: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Finding {
    pub severity: Severity,
    pub key: &'static str,
    pub message: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 20)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_or("PORT", 5000)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            cors_extra_origins: env::var("CORS_EXTRA_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),

            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_access_ttl_secs: parse_or("JWT_ACCESS_TTL_SECS", 86_400)?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Sanity checks on values that parse but are unsafe to run with.
    pub fn audit(&self) -> Vec<Finding> {
        let mut findings = Vec::new();

        let secret = self.jwt_secret.trim();
        if INSECURE_SECRETS
            .iter()
            .any(|s| s.eq_ignore_ascii_case(secret))
        {
            findings.push(Finding {
                severity: Severity::Error,
                key: "JWT_SECRET",
                message: "uses a well-known placeholder value".into(),
            });
        } else if secret.len() < MIN_SECRET_LEN {
            findings.push(Finding {
                severity: Severity::Error,
                key: "JWT_SECRET",
                message: format!(
                    "is too weak ({} chars, at least {MIN_SECRET_LEN} required)",
                    secret.len()
                ),
            });
        } else if secret.len() < RECOMMENDED_SECRET_LEN {
            findings.push(Finding {
                severity: Severity::Warning,
                key: "JWT_SECRET",
                message: format!(
                    "is acceptable ({} chars) but {RECOMMENDED_SECRET_LEN}+ is recommended",
                    secret.len()
                ),
            });
        }

        if self.database_url.contains('<') || self.database_url.contains("CHANGE_ME") {
            findings.push(Finding {
                severity: Severity::Warning,
                key: "DATABASE_URL",
                message: "looks like it still contains placeholder values".into(),
            });
        }

        if self
            .frontend_url
            .parse::<axum::http::HeaderValue>()
            .is_err()
        {
            findings.push(Finding {
                severity: Severity::Error,
                key: "FRONTEND_URL",
                message: "is not a valid origin header value".into(),
            });
        }

        findings
    }
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number")),
        Err(_) => Ok(default),
    }
}
