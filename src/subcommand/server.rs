use {
  self::{
    api::ApiResult,
    error::ApiError,
    response::{ApiInscriptionPage, ApiResponse},
  },
  super::*,
  axum::{
    extract::{Extension, Query},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
  },
  tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
  },
};

mod api;
mod error;
mod inscription;
mod response;

const DEFAULT_HTTP_PORT: u16 = 3000;

#[derive(Debug, Parser, Clone)]
pub struct Server {
  #[arg(
    long,
    default_value = "0.0.0.0",
    help = "Listen on <ADDRESS> for incoming requests."
  )]
  address: String,
  #[arg(
    long,
    env = "PORT",
    default_value_t = DEFAULT_HTTP_PORT,
    help = "Listen on <HTTP_PORT> for incoming HTTP requests."
  )]
  http_port: u16,
}

impl Server {
  pub(crate) fn run(self, options: Options, handle: axum_server::Handle) -> Result {
    Runtime::new()?.block_on(async {
      let connection = options.connection_config()?;
      let database = Database::connect(&connection).await?;

      let reader: Arc<dyn InscriptionReader> = Arc::new(database);
      let router = Self::router(reader);

      let addr = (self.address.as_str(), self.http_port)
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| anyhow!("failed to get socket addrs"))?;

      log::info!("Listening on http://{addr}");

      axum_server::Server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .with_context(|| format!("server on {addr} failed"))?;

      Ok::<(), Error>(())
    })
  }

  pub(crate) fn router(reader: Arc<dyn InscriptionReader>) -> Router {
    Router::new()
      .route("/inscriptions", get(inscription::inscriptions))
      .route("/inscriptions/", get(inscription::inscriptions))
      .route("/api/v1/inscriptions", get(inscription::api_inscriptions))
      .route("/api-docs/openapi.json", get(api::openapi))
      .route("/status", get(|| async { "OK" }))
      .layer(Extension(reader))
      .layer(
        CorsLayer::new()
          .allow_methods([Method::GET])
          .allow_origin(Any),
      )
      .layer(CompressionLayer::new())
  }
}
