#![no_main]

use {inscription_rpc::database::ConnectionConfig, libfuzzer_sys::fuzz_target};

fuzz_target!(|input: &str| {
  if let Ok(config) = input.parse::<ConnectionConfig>() {
    assert!(!config.host.is_empty());
    assert!(!config.user.is_empty());
    assert_ne!(config.port, 0);

    let reparsed = config
      .to_string()
      .parse::<ConnectionConfig>()
      .expect("rendered connection string must parse");
    assert_eq!(reparsed.host, config.host);
    assert_eq!(reparsed.port, config.port);
    assert_eq!(reparsed.user, config.user);
  }
});
