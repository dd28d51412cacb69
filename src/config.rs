use anyhow::Result;
use clap::Parser;
use serde::Deserialize;
use serde_yaml;
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bookmarks-api")]
#[command(about = "Runs the bookmarks api service", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bookmarks-api")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

/// Deployment mode. Only changes how unhandled faults are rendered.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Production,
    #[default]
    Development,
}

#[derive(Debug, Deserialize, Clone)]
pub struct App {
    port: u16,
    #[serde(default)]
    pub environment: Environment,
    api_token: String,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    path: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    auth_token: Option<String>,
}

fn default_database_path() -> String {
    "bookmarks.db".to_string()
}

impl App {
    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub fn get_api_token(&self) -> &str {
        &self.api_token
    }
}

impl DatabaseConfig {
    pub fn get_path(&self) -> &str {
        &self.path
    }

    /// Remote endpoint and token, when both are set to something non-empty.
    pub fn remote(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref().filter(|s| !s.trim().is_empty())?;
        let token = self.auth_token.as_deref().filter(|s| !s.trim().is_empty())?;
        Some((url, token))
    }
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub app: App,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Config {
    pub fn new(path: &str) -> Result<Self> {
        let yaml_str = fs::read_to_string(path)?;
        Config::parse(&yaml_str)
    }

    pub fn parse(yaml_str: &str) -> Result<Self> {
        let yaml_with_env = Config::substitute_env_vars(yaml_str)?;
        let config: Config = serde_yaml::from_str(&yaml_with_env)?;
        if config.app.api_token.trim().is_empty() {
            anyhow::bail!("app.api_token must not be empty");
        }
        Ok(config)
    }

    fn substitute_env_vars(yaml_str: &str) -> Result<String> {
        let mut result = yaml_str.to_string();
        let mut offset = 0;

        while let Some(start) = result[offset..].find("${") {
            let actual_start = offset + start;
            if let Some(end) = result[actual_start..].find("}") {
                let var_name = &result[actual_start + 2..actual_start + end];

                // ${VAR:-default}
                let env_value = if let Some(default_start) = var_name.find(":-") {
                    let actual_var = &var_name[..default_start];
                    let default_val = &var_name[default_start + 2..];
                    env::var(actual_var).unwrap_or_else(|_| default_val.to_string())
                } else {
                    env::var(var_name).unwrap_or_else(|_| {
                        tracing::warn!("environment variable '{}' not found", var_name);
                        String::new()
                    })
                };

                result.replace_range(actual_start..actual_start + end + 1, &env_value);
                offset = actual_start + env_value.len();
            } else {
                break;
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_defaults_for_unset_vars() {
        let out = Config::substitute_env_vars("token: ${BOOKMARKS_API_TEST_UNSET_VAR:-fallback}").unwrap();
        assert_eq!(out, "token: fallback");
    }

    #[test]
    fn unset_var_without_default_becomes_empty() {
        let out = Config::substitute_env_vars("url: \"${BOOKMARKS_API_TEST_UNSET_VAR}\"").unwrap();
        assert_eq!(out, "url: \"\"");
    }

    #[test]
    fn parses_full_config() {
        let cfg = Config::parse(
            r#"
app:
  port: 8000
  environment: production
  api_token: secret
database:
  path: data.db
  url: ${BOOKMARKS_API_TEST_UNSET_VAR:-}
  auth_token: ""
"#,
        )
        .unwrap();

        assert_eq!(cfg.app.get_port(), 8000);
        assert_eq!(cfg.app.environment, Environment::Production);
        assert_eq!(cfg.app.get_api_token(), "secret");
        assert_eq!(cfg.database.get_path(), "data.db");
        assert!(cfg.database.remote().is_none());
    }

    #[test]
    fn defaults_to_development_and_local_database() {
        let cfg = Config::parse("app:\n  port: 9000\n  api_token: abc\n").unwrap();
        assert_eq!(cfg.app.environment, Environment::Development);
        assert_eq!(cfg.database.get_path(), "bookmarks.db");
    }

    #[test]
    fn remote_requires_url_and_token() {
        let cfg = Config::parse(
            "app:\n  port: 1\n  api_token: t\ndatabase:\n  url: libsql://example.turso.io\n  auth_token: tok\n",
        )
        .unwrap();
        assert_eq!(cfg.database.remote(), Some(("libsql://example.turso.io", "tok")));
    }

    #[test]
    fn rejects_empty_api_token() {
        let err = Config::parse("app:\n  port: 8000\n  api_token: \"${BOOKMARKS_API_TEST_UNSET_VAR:-}\"\n")
            .unwrap_err();
        assert!(err.to_string().contains("api_token"));
    }
}
