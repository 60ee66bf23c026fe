//! Server configuration
//!
//! Parsed from command-line flags, each of which can also be set through a
//! `STUDENT_SCORE_*` environment variable.

use std::path::PathBuf;

use clap::Parser;

/// Student score prediction server
#[derive(Parser, Debug, Clone)]
#[command(name = "student-score-server")]
#[command(version)]
#[command(about = "HTTP API serving the student math score model")]
pub struct Cli {
    /// Host to bind to
    #[arg(long, env = "STUDENT_SCORE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "STUDENT_SCORE_PORT", default_value = "8000")]
    pub port: u16,

    /// Model artifact to load instead of searching the default locations
    #[arg(long, env = "STUDENT_SCORE_MODEL_PATH")]
    pub model_path: Option<PathBuf>,

    /// Refuse to start if the model cannot be loaded
    #[arg(long, env = "STUDENT_SCORE_REQUIRE_MODEL")]
    pub require_model: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub model_path: Option<PathBuf>,
    pub require_model: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            model_path: None,
            require_model: false,
        }
    }
}

impl ServerConfig {
    /// `host:port`, resolved by the listener at bind time
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            model_path: cli.model_path,
            require_model: cli.require_model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["student-score-server"]).unwrap();
        let config = ServerConfig::from(cli);
        assert_eq!(config.port, 8000);
        assert!(!config.require_model);
        assert!(config.model_path.is_none());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "student-score-server",
            "--host",
            "127.0.0.1",
            "--port",
            "9100",
            "--model-path",
            "/srv/model.json",
            "--require-model",
        ])
        .unwrap();
        let config = ServerConfig::from(cli);
        assert_eq!(config.bind_addr(), "127.0.0.1:9100");
        assert_eq!(config.model_path, Some(PathBuf::from("/srv/model.json")));
        assert!(config.require_model);
    }
}
