//! Configuration module for the blog backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Some(LogFormat::Text),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON document holding every post
    pub data_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let data_path = env::var("BLOG_DATA_PATH")
            .unwrap_or_else(|_| "./blogs.json".to_string())
            .into();

        let bind_addr = env::var("BLOG_BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
            .parse()
            .expect("Invalid BLOG_BIND_ADDR format");

        let log_level = env::var("BLOG_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = env::var("BLOG_LOG_FORMAT")
            .ok()
            .and_then(|s| LogFormat::from_str(&s))
            .unwrap_or(LogFormat::Text);

        Self {
            data_path,
            bind_addr,
            log_level,
            log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::Mutex;

    // Tests in this module mutate the process environment.
    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn clear_env() {
        env::remove_var("BLOG_DATA_PATH");
        env::remove_var("BLOG_BIND_ADDR");
        env::remove_var("BLOG_LOG_LEVEL");
        env::remove_var("BLOG_LOG_FORMAT");
    }

    #[test]
    fn test_default_config() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();

        let config = Config::from_env();

        assert_eq!(config.data_path, PathBuf::from("./blogs.json"));
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8000");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_config_overrides() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_env();
        env::set_var("BLOG_DATA_PATH", "/tmp/posts.json");
        env::set_var("BLOG_BIND_ADDR", "127.0.0.1:9001");
        env::set_var("BLOG_LOG_LEVEL", "debug");
        env::set_var("BLOG_LOG_FORMAT", "JSON");

        let config = Config::from_env();
        clear_env();

        assert_eq!(config.data_path, PathBuf::from("/tmp/posts.json"));
        assert_eq!(config.bind_addr.port(), 9001);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_log_format_falls_back_to_text() {
        assert_eq!(LogFormat::from_str("xml"), None);
        assert_eq!(LogFormat::from_str(" pretty "), Some(LogFormat::Text));
    }
}
