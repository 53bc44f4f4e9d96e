use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub neo4j: Neo4jConfig,
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
    #[serde(skip)]
    pub debug_logs: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Neo4jConfig {
    #[serde(default = "default_neo4j_uri")]
    pub uri: String,
    #[serde(default = "default_neo4j_user")]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_neo4j_database")]
    pub database: String,
    #[serde(alias = "maxconnections", default = "default_max_connections")]
    pub max_connections: usize,
    #[serde(alias = "fetchsize", default = "default_fetch_size")]
    pub fetch_size: usize,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: default_neo4j_uri(),
            user: default_neo4j_user(),
            password: String::new(),
            database: default_neo4j_database(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        }
    }
}

/// Bounds applied to every list query.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PagingConfig {
    #[serde(alias = "defaultlimit", default = "default_limit")]
    pub default_limit: u64,
    #[serde(alias = "maxlimit", default = "default_max_limit")]
    pub max_limit: u64,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_port() -> String {
    "3000".to_string()
}

fn default_neo4j_uri() -> String {
    "127.0.0.1:7687".to_string()
}

fn default_neo4j_user() -> String {
    "neo4j".to_string()
}

fn default_neo4j_database() -> String {
    "neo4j".to_string()
}

fn default_max_connections() -> usize {
    16
}

fn default_fetch_size() -> usize {
    500
}

fn default_limit() -> u64 {
    6
}

fn default_max_limit() -> u64 {
    100
}

fn default_query_timeout_secs() -> u64 {
    30
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(&content).map_err(|e| match e {
            ConfigError::ParseError(_, e) => ConfigError::ParseError(path.to_string(), e),
            other => other,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::ParseError("<inline>".to_string(), e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.paging.max_limit == 0 {
            return Err(ConfigError::Invalid("paging.max_limit must be positive".to_string()));
        }
        if self.paging.default_limit == 0 || self.paging.default_limit > self.paging.max_limit {
            return Err(ConfigError::Invalid(format!(
                "paging.default_limit must be between 1 and {}",
                self.paging.max_limit
            )));
        }
        if self.query_timeout_secs == 0 {
            return Err(ConfigError::Invalid("query_timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config.listen.port, "3000");
        assert_eq!(config.neo4j.user, "neo4j");
        assert_eq!(config.paging.default_limit, 6);
        assert_eq!(config.paging.max_limit, 100);
        assert_eq!(config.query_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_parse_full_document() {
        let yaml = r#"
listen:
  address: 0.0.0.0
  port: "8080"
neo4j:
  uri: neo4j://graph:7687
  user: reader
  password: secret
  database: movies
  maxconnections: 4
paging:
  default_limit: 10
  max_limit: 50
query_timeout_secs: 5
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.listen.address.as_deref(), Some("0.0.0.0"));
        assert_eq!(config.neo4j.uri, "neo4j://graph:7687");
        assert_eq!(config.neo4j.database, "movies");
        assert_eq!(config.neo4j.max_connections, 4);
        assert_eq!(config.neo4j.fetch_size, 500);
        assert_eq!(config.paging.default_limit, 10);
        assert_eq!(config.query_timeout_secs, 5);
    }

    #[test]
    fn test_rejects_default_limit_above_max() {
        let yaml = "paging:\n  default_limit: 20\n  max_limit: 10\n";
        assert!(matches!(Config::from_yaml(yaml), Err(ConfigError::Invalid(_))));
    }
}
