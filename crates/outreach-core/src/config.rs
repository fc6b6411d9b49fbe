use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u16 = |var: &str, default: &str| -> Result<u16, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u16>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let maps_api_key = require("OUTREACH_MAPS_API_KEY")?;
    let llm_api_key = require("OUTREACH_LLM_API_KEY")?;
    let spreadsheet_id = require("OUTREACH_SPREADSHEET_ID")?;

    let env = parse_environment(&or_default("OUTREACH_ENV", "development"));
    let log_level = or_default("OUTREACH_LOG_LEVEL", "info");
    let personas_path = PathBuf::from(or_default(
        "OUTREACH_PERSONAS_PATH",
        "./config/personas.yaml",
    ));

    let llm_model = or_default("OUTREACH_LLM_MODEL", "gpt-4-turbo-preview");
    let sheet_name = or_default("OUTREACH_SHEET_NAME", "Sheet1");
    let sheets_access_token = lookup("OUTREACH_SHEETS_ACCESS_TOKEN").ok();

    let daily_send_cap = parse_usize("OUTREACH_DAILY_SEND_CAP", "10")?;

    let http_timeout_secs = parse_u64("OUTREACH_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("OUTREACH_USER_AGENT", "outreach/0.1 (prospect-pipeline)");
    let inter_request_delay_ms = parse_u64("OUTREACH_INTER_REQUEST_DELAY_MS", "1000")?;
    let max_retries = parse_u32("OUTREACH_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("OUTREACH_RETRY_BACKOFF_BASE_SECS", "5")?;

    let places_base_url = or_default("OUTREACH_PLACES_BASE_URL", "https://maps.googleapis.com");
    let pagespeed_base_url = or_default("OUTREACH_PAGESPEED_BASE_URL", "https://www.googleapis.com");
    let llm_base_url = or_default("OUTREACH_LLM_BASE_URL", "https://api.openai.com");
    let sheets_base_url = or_default("OUTREACH_SHEETS_BASE_URL", "https://sheets.googleapis.com");

    let smtp_server = or_default("OUTREACH_SMTP_SERVER", "smtp.gmail.com");
    let smtp_port = parse_u16("OUTREACH_SMTP_PORT", "587")?;
    let smtp_username = lookup("OUTREACH_SMTP_USERNAME").ok();
    let smtp_password = lookup("OUTREACH_SMTP_PASSWORD").ok();
    let sender_email = lookup("OUTREACH_SENDER_EMAIL").ok();

    let web_secret_key = lookup("OUTREACH_WEB_SECRET_KEY").ok();

    Ok(AppConfig {
        env,
        log_level,
        personas_path,
        maps_api_key,
        llm_api_key,
        llm_model,
        spreadsheet_id,
        sheet_name,
        sheets_access_token,
        daily_send_cap,
        http_timeout_secs,
        user_agent,
        inter_request_delay_ms,
        max_retries,
        retry_backoff_base_secs,
        places_base_url,
        pagespeed_base_url,
        llm_base_url,
        sheets_base_url,
        smtp_server,
        smtp_port,
        smtp_username,
        smtp_password,
        sender_email,
        web_secret_key,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("OUTREACH_MAPS_API_KEY", "maps-key");
        m.insert("OUTREACH_LLM_API_KEY", "llm-key");
        m.insert("OUTREACH_SPREADSHEET_ID", "sheet-id-123");
        m
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("unknown"), Environment::Development);
        assert_eq!(parse_environment("production"), Environment::Production);
        assert_eq!(parse_environment("test"), Environment::Test);
    }

    #[test]
    fn build_app_config_fails_without_maps_api_key() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "OUTREACH_MAPS_API_KEY"),
            "expected MissingEnvVar(OUTREACH_MAPS_API_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_llm_api_key() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("OUTREACH_MAPS_API_KEY", "maps-key");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "OUTREACH_LLM_API_KEY"),
            "expected MissingEnvVar(OUTREACH_LLM_API_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_spreadsheet_id() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("OUTREACH_MAPS_API_KEY", "maps-key");
        map.insert("OUTREACH_LLM_API_KEY", "llm-key");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "OUTREACH_SPREADSHEET_ID"),
            "expected MissingEnvVar(OUTREACH_SPREADSHEET_ID), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_all_required_vars() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.sheet_name, "Sheet1");
        assert_eq!(cfg.daily_send_cap, 10);
        assert_eq!(cfg.http_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "outreach/0.1 (prospect-pipeline)");
        assert_eq!(cfg.inter_request_delay_ms, 1000);
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.retry_backoff_base_secs, 5);
        assert_eq!(cfg.smtp_server, "smtp.gmail.com");
        assert_eq!(cfg.smtp_port, 587);
        assert!(cfg.smtp_username.is_none());
        assert!(cfg.web_secret_key.is_none());
        assert!(!cfg.smtp_ready());
    }

    #[test]
    fn daily_send_cap_override() {
        let mut map = full_env();
        map.insert("OUTREACH_DAILY_SEND_CAP", "25");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.daily_send_cap, 25);
    }

    #[test]
    fn daily_send_cap_invalid() {
        let mut map = full_env();
        map.insert("OUTREACH_DAILY_SEND_CAP", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "OUTREACH_DAILY_SEND_CAP"),
            "expected InvalidEnvVar(OUTREACH_DAILY_SEND_CAP), got: {result:?}"
        );
    }

    #[test]
    fn smtp_port_invalid() {
        let mut map = full_env();
        map.insert("OUTREACH_SMTP_PORT", "99999");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "OUTREACH_SMTP_PORT"),
            "expected InvalidEnvVar(OUTREACH_SMTP_PORT), got: {result:?}"
        );
    }

    #[test]
    fn smtp_ready_when_fully_configured() {
        let mut map = full_env();
        map.insert("OUTREACH_SMTP_USERNAME", "user");
        map.insert("OUTREACH_SMTP_PASSWORD", "pass");
        map.insert("OUTREACH_SENDER_EMAIL", "me@example.com");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.smtp_ready());
    }

    #[test]
    fn base_url_overrides_are_honored() {
        let mut map = full_env();
        map.insert("OUTREACH_PLACES_BASE_URL", "http://127.0.0.1:4001");
        map.insert("OUTREACH_LLM_BASE_URL", "http://127.0.0.1:4002");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.places_base_url, "http://127.0.0.1:4001");
        assert_eq!(cfg.llm_base_url, "http://127.0.0.1:4002");
        assert_eq!(cfg.sheets_base_url, "https://sheets.googleapis.com");
    }

    #[test]
    fn debug_redacts_secrets() {
        let mut map = full_env();
        map.insert("OUTREACH_SMTP_PASSWORD", "hunter2");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("maps-key"));
        assert!(!debug.contains("llm-key"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[redacted]"));
    }
}
