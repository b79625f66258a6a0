use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::SqlWrapperError;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_USERNAME: &str = "root";
pub const DEFAULT_PASSWORD: &str = "";
pub const DEFAULT_DATABASE: &str = "";
pub const DEFAULT_PORT: u16 = 3306;

/// Connection settings; any field left unset falls back to its default when
/// the connection is opened.
///
/// ```rust
/// use sql_wrapper::ConnectionConfig;
///
/// let cfg = ConnectionConfig::new().database("app.db").port(3307);
/// let resolved = cfg.resolve();
/// assert_eq!(resolved.host, "localhost");
/// assert_eq!(resolved.port, 3307);
/// ```
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default, alias = "user")]
    pub username: Option<String>,
    #[serde(default, alias = "pass")]
    pub password: Option<String>,
    #[serde(default, alias = "name")]
    pub database: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
}

impl ConnectionConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Fill every unset field with its default.
    #[must_use]
    pub fn resolve(&self) -> ResolvedConfig {
        ResolvedConfig {
            host: self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_string()),
            username: self
                .username
                .clone()
                .unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            password: self
                .password
                .clone()
                .unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
            database: self
                .database
                .clone()
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            port: self.port.unwrap_or(DEFAULT_PORT),
        }
    }

    /// Read one environment section of a credentials document such as
    /// `{"development": {"host": "...", "user": "...", "pass": "...", "name": "...", "port": 3306}}`.
    ///
    /// # Errors
    /// Returns `SqlWrapperError::ConfigError` if the document is malformed or the
    /// environment is missing.
    pub fn from_credentials_json(json: &str, environment: &str) -> Result<Self, SqlWrapperError> {
        let mut sections: HashMap<String, ConnectionConfig> = serde_json::from_str(json)
            .map_err(|e| SqlWrapperError::ConfigError(format!("invalid credentials: {e}")))?;
        sections.remove(environment).ok_or_else(|| {
            SqlWrapperError::ConfigError(format!(
                "credentials have no '{environment}' section"
            ))
        })
    }

    /// File-backed variant of [`ConnectionConfig::from_credentials_json`].
    ///
    /// # Errors
    /// Returns `SqlWrapperError::ConfigError` if the file cannot be read or parsed.
    pub fn from_credentials_file(
        path: impl AsRef<Path>,
        environment: &str,
    ) -> Result<Self, SqlWrapperError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            SqlWrapperError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_credentials_json(&json, environment)
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .field("port", &self.port)
            .finish()
    }
}

/// Connection settings with defaults applied, handed to a [`crate::Connector`].
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub database: String,
    pub port: u16,
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("port", &self.port)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_unset_fields() {
        let resolved = ConnectionConfig::new().resolve();
        assert_eq!(resolved.host, "localhost");
        assert_eq!(resolved.username, "root");
        assert_eq!(resolved.password, "");
        assert_eq!(resolved.database, "");
        assert_eq!(resolved.port, 3306);
    }

    #[test]
    fn explicit_fields_win() {
        let resolved = ConnectionConfig::new()
            .host("db.internal")
            .username("app")
            .password("secret")
            .database("accounts")
            .port(3307)
            .resolve();
        assert_eq!(resolved.host, "db.internal");
        assert_eq!(resolved.username, "app");
        assert_eq!(resolved.password, "secret");
        assert_eq!(resolved.database, "accounts");
        assert_eq!(resolved.port, 3307);
    }

    #[test]
    fn reads_credentials_section() {
        let json = r#"{
            "development": {"host": "127.0.0.1", "user": "dev", "pass": "pw", "name": "login", "port": 3306},
            "production": {"host": "db", "user": "prod"}
        }"#;
        let cfg = ConnectionConfig::from_credentials_json(json, "development").unwrap();
        assert_eq!(cfg.username.as_deref(), Some("dev"));
        assert_eq!(cfg.password.as_deref(), Some("pw"));
        assert_eq!(cfg.database.as_deref(), Some("login"));

        let prod = ConnectionConfig::from_credentials_json(json, "production").unwrap();
        assert_eq!(prod.resolve().port, 3306);
        assert_eq!(prod.resolve().database, "");
    }

    #[test]
    fn missing_section_is_config_error() {
        let err = ConnectionConfig::from_credentials_json("{}", "development").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }

    #[test]
    fn debug_redacts_password() {
        let cfg = ConnectionConfig::new().password("hunter2");
        assert!(!format!("{cfg:?}").contains("hunter2"));
        assert!(!format!("{:?}", cfg.resolve()).contains("hunter2"));
    }
}
