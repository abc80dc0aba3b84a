//! Server configuration loaded from the environment (and `.env`).

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::document::common::{get_public_dir, get_static_dir};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 60;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:8080,http://127.0.0.1:8080";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Directory with the landing page and the form script.
    pub public_dir: PathBuf,
    /// XSLT stylesheet producing XSL-FO from the `<matricula>` document.
    pub stylesheet_path: PathBuf,
    /// Root under which each conversion gets its own temporary directory.
    pub work_dir: PathBuf,
    pub xsltproc_bin: String,
    /// Extra arguments passed to `xsltproc` before the pipeline's own.
    pub xsltproc_args: Vec<String>,
    pub fop_bin: String,
    /// Extra arguments passed to `fop` before the pipeline's own.
    pub fop_args: Vec<String>,
    /// Upper bound for a single external tool run.
    pub tool_timeout: Duration,
    /// Reject programs, years and modules that are not in the catalog.
    pub validate_catalog: bool,
    /// Reject submissions with empty personal data fields.
    pub require_fields: bool,
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            public_dir: get_public_dir().to_path_buf(),
            stylesheet_path: get_static_dir().join("matricula.xsl"),
            work_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/uploads")),
            xsltproc_bin: "xsltproc".to_string(),
            xsltproc_args: Vec::new(),
            fop_bin: "fop".to_string(),
            fop_args: Vec::new(),
            tool_timeout: Duration::from_secs(DEFAULT_TOOL_TIMEOUT_SECS),
            validate_catalog: true,
            require_fields: true,
            allowed_origins: split_origins(DEFAULT_ALLOWED_ORIGINS),
        }
    }
}

impl AppConfig {
    /// Load configuration from `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = parse_value("PORT", &port)?;
        }
        if let Some(dir) = lookup("PUBLIC_DIR") {
            config.public_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup("XSLT_STYLESHEET") {
            config.stylesheet_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("WORK_DIR") {
            config.work_dir = PathBuf::from(dir);
        }
        if let Some(bin) = lookup("XSLTPROC_BIN") {
            config.xsltproc_bin = bin;
        }
        if let Some(args) = lookup("XSLTPROC_ARGS") {
            config.xsltproc_args = split_args(&args);
        }
        if let Some(bin) = lookup("FOP_BIN") {
            config.fop_bin = bin;
        }
        if let Some(args) = lookup("FOP_ARGS") {
            config.fop_args = split_args(&args);
        }
        if let Some(secs) = lookup("TOOL_TIMEOUT_SECS") {
            let secs: u64 = parse_value("TOOL_TIMEOUT_SECS", &secs)?;
            if secs == 0 {
                return Err(invalid("TOOL_TIMEOUT_SECS", "0"));
            }
            config.tool_timeout = Duration::from_secs(secs);
        }
        if let Some(flag) = lookup("VALIDATE_CATALOG") {
            config.validate_catalog = parse_flag("VALIDATE_CATALOG", &flag)?;
        }
        if let Some(flag) = lookup("REQUIRE_FIELDS") {
            config.require_fields = parse_flag("REQUIRE_FIELDS", &flag)?;
        }
        if let Some(origins) = lookup("CORS_ALLOWED_ORIGINS") {
            config.allowed_origins = split_origins(&origins);
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn split_args(value: &str) -> Vec<String> {
    value.split_whitespace().map(str::to_string).collect()
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
