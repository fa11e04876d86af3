use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Host settings used to qualify bare usernames.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub domain: Option<String>,
    pub authdomain: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub allow_cancel: bool,
    pub external_auth_url: Option<String>,
    pub popup_command: String,
    pub room: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            allow_cancel: true,
            external_auth_url: None,
            popup_command: "xdg-open".to_string(),
            room: "lobby".to_string(),
        }
    }
}

/// Settings for the built-in simulated connection service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub accounts: BTreeMap<String, String>,
    pub step_latency_ms: u64,
    pub unreachable: bool,
    /// Accounts whose credentials are valid but which may not join.
    pub denied: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let mut accounts = BTreeMap::new();
        accounts.insert("alice@auth.meet.example.org".to_string(), "p@ss".to_string());
        Self {
            accounts,
            step_latency_ms: 700,
            unreachable: false,
            denied: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub hosts: HostConfig,
    pub auth: AuthConfig,
    pub service: ServiceConfig,
    /// Message overrides keyed by translation key.
    pub messages: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            hosts: HostConfig {
                domain: Some("meet.example.org".to_string()),
                authdomain: Some("auth.meet.example.org".to_string()),
            },
            auth: AuthConfig::default(),
            service: ServiceConfig::default(),
            messages: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(raw)?;
        Ok(config)
    }

    /// Parsed `log_level`. Callers fall back to info on error, once a logger can report it.
    pub fn log_level(&self) -> Result<log::LevelFilter> {
        self.log_level
            .parse()
            .with_context(|| format!("unknown log level '{}'", self.log_level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [hosts]
            domain = "conf.example.net"
            "#,
        )
        .unwrap();
        assert_eq!(config.hosts.domain.as_deref(), Some("conf.example.net"));
        assert_eq!(config.hosts.authdomain, None);
        assert!(config.auth.allow_cancel);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn load_reads_accounts_and_messages() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            log_level = "debug"
            [auth]
            allow_cancel = false
            room = "standup"
            [service]
            denied = ["mallory@example.org"]
            [service.accounts]
            "bob@example.org" = "hunter2"
            [messages]
            "dialog.Ok" = "Sign in"
            "#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.log_level().unwrap(), log::LevelFilter::Debug);
        assert!(!config.auth.allow_cancel);
        assert_eq!(config.auth.room, "standup");
        assert_eq!(config.service.accounts.get("bob@example.org").map(String::as_str), Some("hunter2"));
        assert_eq!(config.messages.get("dialog.Ok").map(String::as_str), Some("Sign in"));
        assert_eq!(config.service.denied, vec!["mallory@example.org".to_string()]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn bad_log_level_is_reported() {
        let config = AppConfig {
            log_level: "chatty".to_string(),
            ..AppConfig::default()
        };
        let err = config.log_level().unwrap_err();
        assert!(err.to_string().contains("chatty"));
    }
}
