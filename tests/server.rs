use super::*;

#[test]
fn help_lists_server_subcommand() {
  CommandBuilder::new("--help")
    .stdout_regex(".*server.*Run the inscriptions JSON API server.*")
    .run();
}

#[test]
fn missing_database_environment_fails_at_startup() {
  CommandBuilder::new("server")
    .expected_exit_code(1)
    .stderr_regex(".*error: POSTGRES_USER must be set when no --config file is given\n")
    .run();
}

#[test]
fn partial_database_environment_names_missing_variable() {
  CommandBuilder::new("server")
    .env("POSTGRES_USER", "indexer")
    .env("POSTGRES_PASSWORD", "secret")
    .expected_exit_code(1)
    .stderr_regex(".*error: POSTGRES_DB must be set when no --config file is given\n")
    .run();
}

#[test]
fn missing_config_file_fails_at_startup() {
  CommandBuilder::new("--config missing.json server")
    .expected_exit_code(1)
    .stderr_regex(".*error: failed to read config file `missing.json`\nbecause: .*")
    .run();
}

#[test]
fn config_file_must_be_json() {
  CommandBuilder::new("--config config.yaml server")
    .write("config.yaml", "connection_str: host=localhost user=indexer")
    .expected_exit_code(1)
    .stderr_regex(".*error: config file `config.yaml` is not in the JSON format expected\nbecause: .*")
    .run();
}

#[test]
fn malformed_connection_str_fails_at_startup() {
  CommandBuilder::new("--config config.json server")
    .write("config.json", r#"{"connection_str": "host localhost user=indexer"}"#)
    .expected_exit_code(1)
    .stderr_regex(
      ".*error: invalid connection settings in `config.json`\n\
       because: invalid \"connection_str\"\n\
       because: malformed pair `host`, expected `key=value`\n",
    )
    .run();
}

#[test]
fn unknown_connection_str_key_fails_at_startup() {
  CommandBuilder::new("--config config.json server")
    .write(
      "config.json",
      r#"{"connection_str": "host=localhost user=indexer sslmode=require"}"#,
    )
    .expected_exit_code(1)
    .stderr_regex(".*because: invalid \"connection_str\"\nbecause: unknown key `sslmode`\n")
    .run();
}

#[test]
fn use_ssl_config_is_refused() {
  CommandBuilder::new("--config config.json server")
    .write(
      "config.json",
      r#"{"connection_str": "host=localhost user=indexer", "use_ssl": true}"#,
    )
    .expected_exit_code(1)
    .stderr_regex(
      ".*error: invalid connection settings in `config.json`\n\
       because: \"use_ssl\" is set but TLS connections are not supported\n",
    )
    .run();
}

#[test]
fn unreachable_database_fails_at_startup() {
  let port = unused_port();

  CommandBuilder::new("--config config.json server --address 127.0.0.1")
    .write(
      "config.json",
      format!(
        r#"{{"connection_str": "host=127.0.0.1 port={port} user=indexer password=hunter2 connect_timeout=5"}}"#
      ),
    )
    .env("PORT", &unused_port().to_string())
    .expected_exit_code(1)
    .stderr_regex(format!(
      ".*error: error connecting to the PostgreSQL database \\(host=127.0.0.1 port={port} user=indexer\\)\nbecause: .*"
    ))
    .run();
}

#[test]
fn database_password_is_not_printed() {
  let port = unused_port();

  let output = CommandBuilder::new("--config config.json server")
    .write(
      "config.json",
      format!(
        r#"{{"connection_str": "host=127.0.0.1 port={port} user=indexer password=hunter2 connect_timeout=5"}}"#
      ),
    )
    .command()
    .output()
    .unwrap();

  assert_eq!(output.status.code(), Some(1));
  assert!(!str::from_utf8(&output.stderr).unwrap().contains("hunter2"));
}
