use {
  super::*,
  crate::database::{ConnectionConfigError, DEFAULT_POSTGRES_PORT},
  std::io,
};

/// Database settings loaded from a JSON file.
///
/// The layout matches the indexing plugin's own config file, so the same file
/// can be handed to both processes. Keys this service does not use are ignored,
/// except `use_ssl`: connections are plaintext only, so a config asking for TLS
/// is refused rather than silently downgraded.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct Config {
  /// Space separated `key=value` connection string. When set, the individual
  /// fields below are ignored.
  pub connection_str: Option<String>,
  pub host: Option<String>,
  pub user: Option<String>,
  /// Defaults to 5432.
  pub port: Option<u16>,
  pub password: Option<String>,
  pub dbname: Option<String>,
  pub use_ssl: Option<bool>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("failed to read config file `{path}`")]
  Read { path: PathBuf, source: io::Error },

  #[error("config file `{path}` is not in the JSON format expected")]
  Json {
    path: PathBuf,
    source: serde_json::Error,
  },

  #[error("\"connection_str\", or \"host\" and \"user\" must be specified")]
  MissingConnection,

  #[error("\"use_ssl\" is set but TLS connections are not supported")]
  TlsUnsupported,

  #[error("invalid \"connection_str\"")]
  ConnectionStr(#[from] ConnectionConfigError),
}

impl Config {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.into(),
      source,
    })?;

    serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
      path: path.into(),
      source,
    })
  }

  pub fn connection_config(&self) -> Result<ConnectionConfig, ConfigError> {
    if self.use_ssl == Some(true) {
      return Err(ConfigError::TlsUnsupported);
    }

    if let Some(connection_str) = &self.connection_str {
      return Ok(connection_str.parse()?);
    }

    match (&self.host, &self.user) {
      (Some(host), Some(user)) => Ok(ConnectionConfig {
        host: host.clone(),
        port: self.port.unwrap_or(DEFAULT_POSTGRES_PORT),
        user: user.clone(),
        password: self.password.clone(),
        dbname: self.dbname.clone(),
        application_name: None,
        connect_timeout: None,
      }),
      _ => Err(ConfigError::MissingConnection),
    }
  }
}

#[cfg(test)]
mod tests {
  use {super::*, pretty_assertions::assert_eq, std::io::Write};

  fn config(json: &str) -> Config {
    serde_json::from_str(json).unwrap()
  }

  #[test]
  fn connection_str_is_parsed() {
    let config = config(r#"{"connection_str": "host=localhost user=solana port=5433"}"#);

    assert_eq!(
      config.connection_config().unwrap(),
      ConnectionConfig {
        host: "localhost".into(),
        port: 5433,
        user: "solana".into(),
        password: None,
        dbname: None,
        application_name: None,
        connect_timeout: None,
      }
    );
  }

  #[test]
  fn connection_str_wins_over_fields() {
    let config = config(
      r#"{"connection_str": "host=primary user=solana", "host": "replica", "user": "other"}"#,
    );

    let connection = config.connection_config().unwrap();
    assert_eq!(connection.host, "primary");
    assert_eq!(connection.user, "solana");
  }

  #[test]
  fn host_and_user_fields_default_the_port() {
    let config = config(r#"{"host": "postgres", "user": "solana", "dbname": "solana"}"#);

    let connection = config.connection_config().unwrap();
    assert_eq!(connection.port, 5432);
    assert_eq!(connection.dbname.as_deref(), Some("solana"));
  }

  #[test]
  fn plugin_config_keys_are_ignored() {
    let config = config(
      r#"{
        "libpath": "/solana/target/release/libgeyser_plugin_postgres.so",
        "connection_str": "host=localhost user=solana port=5432",
        "threads": 20,
        "batch_size": 20,
        "panic_on_db_errors": true
      }"#,
    );

    assert_eq!(config.connection_config().unwrap().host, "localhost");
  }

  #[test]
  fn missing_host_or_user_is_an_error() {
    assert!(matches!(
      config(r#"{"host": "postgres"}"#).connection_config(),
      Err(ConfigError::MissingConnection)
    ));
    assert!(matches!(
      config("{}").connection_config(),
      Err(ConfigError::MissingConnection)
    ));
  }

  #[test]
  fn malformed_connection_str_is_an_error() {
    let err = config(r#"{"connection_str": "host localhost"}"#)
      .connection_config()
      .unwrap_err();

    assert_eq!(err.to_string(), "invalid \"connection_str\"");
    assert_eq!(
      std::error::Error::source(&err).unwrap().to_string(),
      "malformed pair `host`, expected `key=value`"
    );
  }

  #[test]
  fn use_ssl_is_refused() {
    let err = config(
      r#"{
        "connection_str": "host=localhost user=solana",
        "use_ssl": true,
        "server_ca": "/certs/ca.pem",
        "client_cert": "/certs/client.pem",
        "client_key": "/certs/client.key"
      }"#,
    )
    .connection_config()
    .unwrap_err();

    assert!(matches!(err, ConfigError::TlsUnsupported));
  }

  #[test]
  fn use_ssl_false_connects_in_plaintext() {
    let config = config(r#"{"host": "postgres", "user": "solana", "use_ssl": false}"#);

    assert_eq!(config.connection_config().unwrap().host, "postgres");
  }

  #[test]
  fn load_reports_missing_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("missing.json");

    assert!(matches!(Config::load(&path), Err(ConfigError::Read { .. })));
  }

  #[test]
  fn load_reports_invalid_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "connection_str = \"host=localhost\"").unwrap();

    assert!(matches!(
      Config::load(file.path()),
      Err(ConfigError::Json { .. })
    ));
  }

  #[test]
  fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"connection_str": "host=localhost user=solana"}}"#).unwrap();

    assert_eq!(
      Config::load(file.path()).unwrap(),
      Config {
        connection_str: Some("host=localhost user=solana".into()),
        ..Default::default()
      }
    );
  }
}
