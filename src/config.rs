use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use tracing::debug;

use crate::error::AppError;

pub const DEFAULT_API_URL: &str = "https://tally-expert-backend-vxo2.vercel.app/api";
pub const DEFAULT_CERT_PREFIX: &str = "TEC";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_url: String,
    pub token_file: PathBuf,
    pub export_dir: PathBuf,
    pub cert_prefix: String,
    pub timeout: Duration,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let api_url: String = load("CERTDESK_API_URL", DEFAULT_API_URL)?;
        let token_file: PathBuf = load("CERTDESK_TOKEN_FILE", ".certdesk/token")?;
        let export_dir: PathBuf = load("CERTDESK_EXPORT_DIR", ".")?;
        let cert_prefix: String = load("CERTDESK_CERT_PREFIX", DEFAULT_CERT_PREFIX)?;
        let timeout_secs: u64 = load("CERTDESK_TIMEOUT_SECS", "30")?;

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "CERTDESK_API_URL must be an http(s) URL, got '{}'",
                api_url
            )));
        }

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token_file,
            export_dir,
            cert_prefix,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Config pointing at `api_url` with every other setting defaulted.
    pub fn for_api(api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token_file: PathBuf::from(".certdesk/token"),
            export_dir: PathBuf::from("."),
            cert_prefix: DEFAULT_CERT_PREFIX.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

fn load<T: FromStr>(key: &str, default: &str) -> Result<T, AppError>
where
    T::Err: Display,
{
    let raw = match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            debug!("{key} not set, using default: {default}");
            default.to_string()
        }
    };

    raw.trim()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid {key} value '{raw}': {e}")))
}
