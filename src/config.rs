use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub db_path: Option<String>,

    #[serde(default)]
    pub session_secret: Option<String>,

    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    #[serde(default)]
    pub tls_cert: Option<String>,

    #[serde(default)]
    pub tls_key: Option<String>,

    #[serde(default)]
    pub debug: bool,
}

fn default_port() -> u16 {
    4000
}

fn default_static_dir() -> String {
    "public".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            db_path: None,
            session_secret: None,
            static_dir: default_static_dir(),
            tls_cert: None,
            tls_key: None,
            debug: false,
        }
    }
}

/// Get the directory containing the executable
pub fn exe_dir() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().context("failed to get executable path")?;
    exe_path
        .parent()
        .map(|p| p.to_path_buf())
        .ok_or_else(|| anyhow::anyhow!("executable has no parent directory"))
}

/// Generate template config.toml if it doesn't exist
fn generate_template_config(config_path: &PathBuf) -> Result<()> {
    let template = r#"# Studio Booking Server Configuration
#
# This file configures the booking intake API server.
# Environment variables override these settings:
#   - STUDIO_PORT
#   - STUDIO_DB_PATH
#   - STUDIO_SESSION_SECRET
#   - STUDIO_STATIC_DIR
#   - STUDIO_TLS_CERT
#   - STUDIO_TLS_KEY
#   - STUDIO_DEBUG

# Listen port (the server binds 0.0.0.0)
port = 4000

# Database file path. Required: the server refuses to start if neither
# this setting nor STUDIO_DB_PATH provides one.
# db_path = "/var/lib/studio/bookings.db"

# Directory served at the site root (index.html and assets)
static_dir = "public"

# Optional TLS certificate and key paths
# tls_cert = "path/to/cert.pem"
# tls_key = "path/to/key.pem"

# Enable debug mode to log all incoming booking submissions
debug = false
"#;

    std::fs::write(config_path, template)
        .with_context(|| format!("failed to write template config to {}", config_path.display()))?;

    println!("Generated template config file: {}", config_path.display());
    Ok(())
}

/// Load config from config.toml in the same directory as the executable.
/// Generates a template file if it doesn't exist.
pub fn load_config() -> Result<Config> {
    let exe_dir = exe_dir()?;
    let config_path = exe_dir.join("config.toml");

    if config_path.exists() {
        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))?;
        Ok(config)
    } else {
        // Auto-generate template config file
        generate_template_config(&config_path)?;
        Ok(Config::default())
    }
}

/// Resolve the database path from the environment or the config file.
/// There is no fallback default: a missing or empty path is a fatal
/// startup error, checked before any network or storage operation.
pub fn require_db_path(cfg: &Config) -> Result<String> {
    std::env::var("STUDIO_DB_PATH")
        .ok()
        .or_else(|| cfg.db_path.clone())
        .filter(|p| !p.trim().is_empty())
        .context("database path is not set; provide STUDIO_DB_PATH or db_path in config.toml")
}
