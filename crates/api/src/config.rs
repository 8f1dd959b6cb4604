use crate::auth::token::TokenConfig;

/// Bootstrap SuperAdmin credentials, seeded on first startup.
#[derive(Debug, Clone)]
pub struct SuperAdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SuperAdminSeed {
    /// Load seed credentials from environment variables.
    ///
    /// | Env Var               | Default           |
    /// |-----------------------|-------------------|
    /// | `SUPERADMIN_NAME`     | `Super Admin`     |
    /// | `SUPERADMIN_EMAIL`    | `admin@gmail.com` |
    /// | `SUPERADMIN_PASSWORD` | `12345`           |
    ///
    /// The defaults mirror the development seed; production deployments are
    /// expected to override all three.
    pub fn from_env() -> Self {
        Self {
            name: std::env::var("SUPERADMIN_NAME").unwrap_or_else(|_| "Super Admin".into()),
            email: std::env::var("SUPERADMIN_EMAIL").unwrap_or_else(|_| "admin@gmail.com".into()),
            password: std::env::var("SUPERADMIN_PASSWORD").unwrap_or_else(|_| "12345".into()),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the token secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Token configuration (secret, expiry).
    pub token: TokenConfig,
    /// Bootstrap SuperAdmin credentials.
    pub super_admin: SuperAdminSeed,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// # Panics
    ///
    /// Panics if `PORT` or `REQUEST_TIMEOUT_SECS` fail to parse, or if
    /// `JWT_SECRET` is unset (see [`TokenConfig::from_env`]).
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            token: TokenConfig::from_env(),
            super_admin: SuperAdminSeed::from_env(),
        }
    }
}
