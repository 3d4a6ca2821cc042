#![allow(clippy::result_large_err)]
#![deny(
  clippy::cast_lossless,
  clippy::cast_possible_truncation,
  clippy::cast_possible_wrap,
  clippy::cast_sign_loss
)]

use {
  self::{
    arguments::Arguments,
    config::Config,
    database::{
      ConnectionConfig, Database, Inscription, InscriptionReader, Page, PageError,
    },
    options::Options,
    subcommand::Subcommand,
  },
  anyhow::{anyhow, Context, Error},
  chrono::NaiveDateTime,
  clap::Parser,
  serde::{Deserialize, Serialize, Serializer},
  std::{
    env,
    fmt::{self, Display, Formatter},
    fs,
    net::ToSocketAddrs,
    path::{Path, PathBuf},
    process,
    str::FromStr,
    sync::{
      atomic::{self, AtomicBool},
      Arc, Mutex,
    },
    time::Duration,
  },
  tokio::runtime::Runtime,
};

mod arguments;
pub mod config;
pub mod custom_serde;
pub mod database;
mod logger;
mod options;
pub mod subcommand;

type Result<T = (), E = Error> = std::result::Result<T, E>;

static SHUTTING_DOWN: AtomicBool = AtomicBool::new(false);
static LISTENERS: Mutex<Vec<axum_server::Handle>> = Mutex::new(Vec::new());

fn shutdown_listeners() {
  match LISTENERS.lock() {
    Ok(listeners) => listeners
      .iter()
      .for_each(|handle| handle.graceful_shutdown(Some(Duration::from_millis(100)))),
    Err(err) => log::warn!("listener registry poisoned: {err}"),
  }
}

pub fn main() {
  let args = Arguments::parse();

  if let Err(err) = logger::init(args.options.log_level, args.options.log_dir.as_deref()) {
    eprintln!("error: failed to initialize logger: {err:#}");
    process::exit(1);
  }

  if let Err(err) = ctrlc::set_handler(move || {
    if SHUTTING_DOWN.fetch_or(true, atomic::Ordering::Relaxed) {
      process::exit(1);
    }

    eprintln!("Shutting down gracefully. Press <CTRL-C> again to shutdown immediately.");

    shutdown_listeners();
  }) {
    eprintln!("error: failed to set <CTRL-C> handler: {err}");
    process::exit(1);
  }

  if let Err(err) = args.run() {
    log::error!("{err:#}");
    eprintln!("error: {err}");
    err
      .chain()
      .skip(1)
      .for_each(|cause| eprintln!("because: {cause}"));
    if env::var_os("RUST_BACKTRACE")
      .map(|val| val == "1")
      .unwrap_or_default()
    {
      eprintln!("{}", err.backtrace());
    }

    process::exit(1);
  }
}
