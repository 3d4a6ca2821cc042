use {
  super::*,
  tokio_postgres::{Client, NoTls, Statement},
};

mod bytea;
mod connection;
mod inscription;

pub use self::{
  bytea::ByteaText,
  connection::{ConnectionConfig, ConnectionConfigError, DEFAULT_POSTGRES_PORT},
  inscription::{Inscription, InscriptionReader, Page, PageError, DEFAULT_PAGE_SIZE},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("error connecting to the PostgreSQL database ({target})")]
  Connect {
    target: String,
    source: tokio_postgres::Error,
  },

  #[error("error preparing the inscriptions query, is the schema in place?")]
  Schema(#[source] tokio_postgres::Error),

  #[error("inscriptions query failed")]
  Query(#[from] tokio_postgres::Error),
}

/// The process wide PostgreSQL session.
///
/// Opened once at startup and shared by every request. The driver pipelines
/// concurrent queries over the one connection, so no locking is needed.
pub struct Database {
  client: Client,
  select_inscriptions_page: Statement,
}

impl Database {
  pub async fn connect(config: &ConnectionConfig) -> Result<Self, Error> {
    log::info!("Connecting to PostgreSQL: {config}");

    let (client, connection) =
      config
        .postgres_config()
        .connect(NoTls)
        .await
        .map_err(|source| Error::Connect {
          target: config.to_string(),
          source,
        })?;

    tokio::spawn(async move {
      if let Err(err) = connection.await {
        log::error!("PostgreSQL connection closed: {err}");
      }
    });

    let database = Self::with_client(client).await?;

    log::info!("Connected to PostgreSQL.");

    Ok(database)
  }

  async fn with_client(client: Client) -> Result<Self, Error> {
    let select_inscriptions_page = client
      .prepare(inscription::SELECT_INSCRIPTIONS_PAGE)
      .await
      .map_err(Error::Schema)?;

    Ok(Self {
      client,
      select_inscriptions_page,
    })
  }
}
