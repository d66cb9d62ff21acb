use std::env;

pub const MAX_TOKEN_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let token_ttl_minutes = token_ttl_minutes(env::var("TOKEN_TTL_MINUTES").ok().as_deref());
        Ok(Self {
            port,
            database_url,
            host,
            jwt_secret,
            token_ttl_minutes,
        })
    }
}

/// Tokens default to one hour and live at most [`MAX_TOKEN_TTL_MINUTES`].
pub fn token_ttl_minutes(raw: Option<&str>) -> i64 {
    raw.and_then(|m| m.trim().parse::<i64>().ok())
        .filter(|m| *m > 0)
        .map(|m| m.min(MAX_TOKEN_TTL_MINUTES))
        .unwrap_or(60)
}
