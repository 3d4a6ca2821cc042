use super::*;

pub mod server;

#[derive(Debug, Parser)]
pub(crate) enum Subcommand {
  #[command(about = "Run the inscriptions JSON API server")]
  Server(server::Server),
}

impl Subcommand {
  pub(crate) fn run(self, options: Options) -> Result {
    match self {
      Self::Server(server) => {
        let handle = axum_server::Handle::new();
        LISTENERS
          .lock()
          .map_err(|err| anyhow!("listener registry poisoned: {err}"))?
          .push(handle.clone());
        server.run(options, handle)
      }
    }
  }
}
