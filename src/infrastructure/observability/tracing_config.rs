/// Logging configuration resolved from the environment.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
}

impl TracingConfig {
    pub fn from_env() -> Self {
        Self {
            environment: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            json_format: matches!(
                std::env::var("LOG_FORMAT").map(|v| v.to_lowercase()).as_deref(),
                Ok("json")
            ),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
