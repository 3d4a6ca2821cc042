use {super::*, utoipa::OpenApi};

pub(crate) type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

#[derive(OpenApi)]
#[openapi(
  info(description = "Read-only access to indexed inscription writes"),
  paths(inscription::inscriptions, inscription::api_inscriptions),
  components(schemas(
    Inscription,
    inscription::InscriptionPage,
    ApiInscriptionPage,
    ApiError
  )),
  tags((name = "inscriptions", description = "Inscriptions ordered by last update, newest first"))
)]
pub(crate) struct ApiDoc;

pub(crate) async fn openapi() -> Json<utoipa::openapi::OpenApi> {
  Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn documents_inscription_routes() {
    let doc = ApiDoc::openapi();

    assert!(doc.paths.paths.contains_key("/inscriptions"));
    assert!(doc.paths.paths.contains_key("/api/v1/inscriptions"));
  }

  #[test]
  fn documents_inscription_schema() {
    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

    assert!(doc["components"]["schemas"]["Inscription"]["properties"]["updated_on"].is_object());
    assert!(doc["components"]["schemas"]["ApiError"].is_object());
  }
}
