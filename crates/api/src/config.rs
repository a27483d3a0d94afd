use assetwatch_core::checks::DEFAULT_REMINDER_WINDOW_MINUTES;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on post-shutdown cleanup, in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// How far ahead of `service_time` a reminder is created (default: `15`).
    pub reminder_window_minutes: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `HOST`                    | `0.0.0.0`                  |
    /// | `PORT`                    | `3000`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`   | `30`                       |
    /// | `REMINDER_WINDOW_MINUTES` | `15`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
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

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let reminder_window_minutes =
            parse_reminder_window(std::env::var("REMINDER_WINDOW_MINUTES").ok().as_deref())
                .unwrap_or_else(|e| panic!("{e}"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            reminder_window_minutes,
        }
    }

    /// The reminder window as a duration.
    ///
    /// Values outside chrono's range saturate instead of panicking;
    /// [`ServerConfig::from_env`] already rejects them at startup.
    pub fn reminder_window(&self) -> chrono::Duration {
        chrono::Duration::try_minutes(self.reminder_window_minutes)
            .unwrap_or(chrono::Duration::MAX)
    }
}

/// Parse `REMINDER_WINDOW_MINUTES`.
///
/// Unset means the default. The value must be a non-negative integer that
/// fits in a [`chrono::Duration`].
pub fn parse_reminder_window(raw: Option<&str>) -> Result<i64, String> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_REMINDER_WINDOW_MINUTES);
    };
    let minutes: i64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("REMINDER_WINDOW_MINUTES must be a valid i64: {e}"))?;
    if minutes < 0 {
        return Err(format!(
            "REMINDER_WINDOW_MINUTES must not be negative, got {minutes}"
        ));
    }
    if chrono::Duration::try_minutes(minutes).is_none() {
        return Err(format!(
            "REMINDER_WINDOW_MINUTES is out of range, got {minutes}"
        ));
    }
    Ok(minutes)
}
