use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub personas_path: PathBuf,

    pub maps_api_key: String,
    pub llm_api_key: String,
    pub llm_model: String,

    pub spreadsheet_id: String,
    pub sheet_name: String,
    /// Bearer token for the spreadsheet API. Optional so tests and dry
    /// runs can target an unauthenticated mock server.
    pub sheets_access_token: Option<String>,

    pub daily_send_cap: usize,

    pub http_timeout_secs: u64,
    pub user_agent: String,
    /// Pause between prospects during enrichment, for upstream rate limits.
    pub inter_request_delay_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,

    // Overridable so wiremock tests can point every client at localhost.
    pub places_base_url: String,
    pub pagespeed_base_url: String,
    pub llm_base_url: String,
    pub sheets_base_url: String,

    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub sender_email: Option<String>,

    /// Reserved for the external web UI; loaded but unused here.
    pub web_secret_key: Option<String>,
}

impl AppConfig {
    /// Whether the SMTP transport is fully configured for sending.
    #[must_use]
    pub fn smtp_ready(&self) -> bool {
        self.smtp_username.is_some() && self.smtp_password.is_some() && self.sender_email.is_some()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("personas_path", &self.personas_path)
            .field("maps_api_key", &"[redacted]")
            .field("llm_api_key", &"[redacted]")
            .field("llm_model", &self.llm_model)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("sheet_name", &self.sheet_name)
            .field(
                "sheets_access_token",
                &self.sheets_access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("daily_send_cap", &self.daily_send_cap)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("places_base_url", &self.places_base_url)
            .field("pagespeed_base_url", &self.pagespeed_base_url)
            .field("llm_base_url", &self.llm_base_url)
            .field("sheets_base_url", &self.sheets_base_url)
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field(
                "smtp_password",
                &self.smtp_password.as_ref().map(|_| "[redacted]"),
            )
            .field("sender_email", &self.sender_email)
            .field(
                "web_secret_key",
                &self.web_secret_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
