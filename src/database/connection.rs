use super::*;

pub const DEFAULT_POSTGRES_PORT: u16 = 5432;

/// Validated PostgreSQL connection parameters.
///
/// Parsed from a space separated `key=value` connection string with
/// [`FromStr`], or assembled from individual settings.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
  pub host: String,
  pub port: u16,
  pub user: String,
  pub password: Option<String>,
  pub dbname: Option<String>,
  pub application_name: Option<String>,
  pub connect_timeout: Option<Duration>,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionConfigError {
  #[error("malformed pair `{0}`, expected `key=value`")]
  MalformedPair(String),

  #[error("empty key in `{0}`")]
  EmptyKey(String),

  #[error("empty value for `{0}`")]
  EmptyValue(String),

  #[error("unknown key `{0}`")]
  UnknownKey(String),

  #[error("duplicate key `{0}`")]
  DuplicateKey(String),

  #[error("invalid port `{0}`")]
  InvalidPort(String),

  #[error("invalid connect_timeout `{0}`, expected whole seconds")]
  InvalidConnectTimeout(String),

  #[error("`{0}` must be specified")]
  Missing(&'static str),
}

impl FromStr for ConnectionConfig {
  type Err = ConnectionConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut host = None;
    let mut port = None;
    let mut user = None;
    let mut password = None;
    let mut dbname = None;
    let mut application_name = None;
    let mut connect_timeout = None;

    for pair in s.split_whitespace() {
      let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| ConnectionConfigError::MalformedPair(pair.into()))?;

      if key.is_empty() {
        return Err(ConnectionConfigError::EmptyKey(pair.into()));
      }

      if value.is_empty() {
        return Err(ConnectionConfigError::EmptyValue(key.into()));
      }

      let slot = match key {
        "host" => &mut host,
        "port" => &mut port,
        "user" => &mut user,
        "password" => &mut password,
        "dbname" => &mut dbname,
        "application_name" => &mut application_name,
        "connect_timeout" => &mut connect_timeout,
        _ => return Err(ConnectionConfigError::UnknownKey(key.into())),
      };

      if slot.replace(value).is_some() {
        return Err(ConnectionConfigError::DuplicateKey(key.into()));
      }
    }

    let port = match port {
      Some(port) => port
        .parse::<u16>()
        .ok()
        .filter(|port| *port != 0)
        .ok_or_else(|| ConnectionConfigError::InvalidPort(port.into()))?,
      None => DEFAULT_POSTGRES_PORT,
    };

    let connect_timeout = connect_timeout
      .map(|timeout| {
        timeout
          .parse::<u64>()
          .map(Duration::from_secs)
          .map_err(|_| ConnectionConfigError::InvalidConnectTimeout(timeout.into()))
      })
      .transpose()?;

    Ok(Self {
      host: host.ok_or(ConnectionConfigError::Missing("host"))?.into(),
      port,
      user: user.ok_or(ConnectionConfigError::Missing("user"))?.into(),
      password: password.map(String::from),
      dbname: dbname.map(String::from),
      application_name: application_name.map(String::from),
      connect_timeout,
    })
  }
}

impl ConnectionConfig {
  pub(crate) fn postgres_config(&self) -> tokio_postgres::Config {
    let mut config = tokio_postgres::Config::new();
    config.host(&self.host).port(self.port).user(&self.user);

    if let Some(password) = &self.password {
      config.password(password);
    }

    if let Some(dbname) = &self.dbname {
      config.dbname(dbname);
    }

    if let Some(application_name) = &self.application_name {
      config.application_name(application_name);
    }

    if let Some(connect_timeout) = self.connect_timeout {
      config.connect_timeout(connect_timeout);
    }

    config
  }
}

// Never prints the password.
impl Display for ConnectionConfig {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "host={} port={} user={}", self.host, self.port, self.user)?;

    if let Some(dbname) = &self.dbname {
      write!(f, " dbname={dbname}")?;
    }

    Ok(())
  }
}

impl fmt::Debug for ConnectionConfig {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.debug_struct("ConnectionConfig")
      .field("host", &self.host)
      .field("port", &self.port)
      .field("user", &self.user)
      .field("password", &self.password.as_ref().map(|_| "<redacted>"))
      .field("dbname", &self.dbname)
      .field("application_name", &self.application_name)
      .field("connect_timeout", &self.connect_timeout)
      .finish()
  }
}
