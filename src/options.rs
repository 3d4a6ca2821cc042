use {super::*, crate::database::DEFAULT_POSTGRES_PORT};

const DEFAULT_POSTGRES_HOST: &str = "postgres";

#[derive(Clone, Debug, Parser)]
pub(crate) struct Options {
  #[arg(
    long,
    help = "Load the database connection from JSON config file <CONFIG>. Takes precedence over the POSTGRES_* variables."
  )]
  pub(crate) config: Option<PathBuf>,
  #[arg(
    long,
    env = "POSTGRES_HOST",
    default_value = DEFAULT_POSTGRES_HOST,
    help = "Connect to PostgreSQL on <POSTGRES_HOST>."
  )]
  pub(crate) postgres_host: String,
  #[arg(
    long,
    env = "POSTGRES_PORT",
    default_value_t = DEFAULT_POSTGRES_PORT,
    help = "Connect to PostgreSQL on port <POSTGRES_PORT>."
  )]
  pub(crate) postgres_port: u16,
  #[arg(long, env = "POSTGRES_DB", help = "Read inscriptions from database <POSTGRES_DB>.")]
  pub(crate) postgres_db: Option<String>,
  #[arg(long, env = "POSTGRES_USER", help = "Authenticate as <POSTGRES_USER>.")]
  pub(crate) postgres_user: Option<String>,
  #[arg(
    long,
    env = "POSTGRES_PASSWORD",
    hide_env_values = true,
    help = "Authenticate with <POSTGRES_PASSWORD>."
  )]
  pub(crate) postgres_password: Option<String>,
  #[arg(long, default_value = "info", help = "Log at <LOG_LEVEL> and above.")]
  pub(crate) log_level: log::LevelFilter,
  #[arg(long, help = "Also write rotated log files to <LOG_DIR>.")]
  pub(crate) log_dir: Option<PathBuf>,
}

impl Options {
  pub(crate) fn connection_config(&self) -> Result<ConnectionConfig> {
    if let Some(path) = &self.config {
      let config = Config::load(path)?;
      return config
        .connection_config()
        .with_context(|| format!("invalid connection settings in `{}`", path.display()));
    }

    Ok(ConnectionConfig {
      host: self.postgres_host.clone(),
      port: self.postgres_port,
      user: required_env("POSTGRES_USER", &self.postgres_user)?,
      password: Some(required_env("POSTGRES_PASSWORD", &self.postgres_password)?),
      dbname: Some(required_env("POSTGRES_DB", &self.postgres_db)?),
      application_name: None,
      connect_timeout: None,
    })
  }
}

fn required_env(name: &str, value: &Option<String>) -> Result<String> {
  value
    .clone()
    .filter(|value| !value.is_empty())
    .ok_or_else(|| anyhow!("{name} must be set when no --config file is given"))
}
