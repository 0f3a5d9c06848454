use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub upstream_api_url: String,
    pub upstream_timeout_secs: u64,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub login_path: String,
    pub frontend_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            upstream_api_url: env::var("UPSTREAM_API_URL")?
                .trim_end_matches('/')
                .to_string(),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BACKEND_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            jwt_secret: env::var("JWT_SECRET")?,
            login_path: env::var("LOGIN_PATH").unwrap_or_else(|_| "/login".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "https://localhost:5173".to_string()),
        })
    }

    /// Upstream request timeout; `None` when set to zero.
    pub fn upstream_timeout(&self) -> Option<Duration> {
        (self.upstream_timeout_secs > 0).then(|| Duration::from_secs(self.upstream_timeout_secs))
    }
}
