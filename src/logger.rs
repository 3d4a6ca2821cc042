use {
  super::*,
  log::LevelFilter,
  log4rs::{
    append::{
      console::{ConsoleAppender, Target},
      rolling_file::{
        policy::compound::{
          roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger, CompoundPolicy,
        },
        RollingFileAppender,
      },
    },
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Handle,
  },
};

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {h({l:<5})} {M}: {m}{n}";
const LOG_FILE: &str = "inscription-rpc.log";
const LOG_ARCHIVE: &str = "inscription-rpc.{}.log.gz";
const LOG_FILE_SIZE: u64 = 100 * 1024 * 1024;
const LOG_ARCHIVE_COUNT: u32 = 10;

pub(crate) fn init(level: LevelFilter, log_dir: Option<&Path>) -> Result<Handle> {
  let config = config(level, log_dir)?;
  log4rs::init_config(config).context("failed to install logger")
}

fn config(level: LevelFilter, log_dir: Option<&Path>) -> Result<log4rs::Config> {
  let stderr = ConsoleAppender::builder()
    .target(Target::Stderr)
    .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
    .build();

  let mut builder = log4rs::Config::builder()
    .appender(Appender::builder().build("stderr", Box::new(stderr)));
  let mut root = Root::builder().appender("stderr");

  if let Some(log_dir) = log_dir {
    fs::create_dir_all(log_dir)
      .with_context(|| format!("failed to create log dir `{}`", log_dir.display()))?;

    let roller = FixedWindowRoller::builder()
      .build(
        &log_dir.join(LOG_ARCHIVE).to_string_lossy(),
        LOG_ARCHIVE_COUNT,
      )
      .map_err(|err| anyhow!("invalid log archive pattern: {err}"))?;

    let policy = CompoundPolicy::new(
      Box::new(SizeTrigger::new(LOG_FILE_SIZE)),
      Box::new(roller),
    );

    let file = RollingFileAppender::builder()
      .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
      .build(log_dir.join(LOG_FILE), Box::new(policy))
      .with_context(|| format!("failed to open log file in `{}`", log_dir.display()))?;

    builder = builder.appender(Appender::builder().build("file", Box::new(file)));
    root = root.appender("file");
  }

  builder
    .build(root.build(level))
    .context("invalid logger config")
}
