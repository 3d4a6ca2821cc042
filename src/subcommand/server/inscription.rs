use {
  super::*,
  axum::extract::rejection::QueryRejection,
  utoipa::{IntoParams, ToSchema},
};

#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub(crate) struct Pagination {
  /// Zero based page index. Defaults to 0.
  pub page_index: Option<u64>,
  /// Inscriptions per page. Defaults to 20.
  pub page_size: Option<u64>,
}

impl TryFrom<Pagination> for Page {
  type Error = PageError;

  fn try_from(pagination: Pagination) -> Result<Self, Self::Error> {
    Page::new(
      pagination.page_index.unwrap_or(0),
      pagination.page_size.unwrap_or(database::DEFAULT_PAGE_SIZE),
    )
  }
}

fn page(query: Result<Query<Pagination>, QueryRejection>) -> Result<Page, ApiError> {
  let Query(pagination) = query?;
  Ok(Page::try_from(pagination)?)
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InscriptionPage {
  #[schema(format = "uint64")]
  pub page_index: u64,
  #[schema(format = "uint64")]
  pub page_size: u64,
  pub inscriptions: Vec<Inscription>,
}

// /inscriptions
#[utoipa::path(
  get,
  path = "/inscriptions",
  tag = "inscriptions",
  operation_id = "get inscriptions by page",
  params(Pagination),
  responses(
    (status = 200, description = "Obtain one page of inscriptions, newest first.", body = [Inscription]),
    (status = 400, description = "Bad query.", body = ApiError, example = json!(&ApiError::bad_request("bad request"))),
    (status = 500, description = "Internal server error.", body = ApiError, example = json!(&ApiError::internal("internal error"))),
  )
)]
pub(crate) async fn inscriptions(
  Extension(reader): Extension<Arc<dyn InscriptionReader>>,
  query: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Vec<Inscription>>, ApiError> {
  let page = page(query)?;
  log::debug!("rpc: get inscriptions: {page}");

  let inscriptions = reader.inscriptions_by_page(page).await?;
  log::debug!("rpc: get inscriptions: {page} -> {} rows", inscriptions.len());

  Ok(Json(inscriptions))
}

// /api/v1/inscriptions
#[utoipa::path(
  get,
  path = "/api/v1/inscriptions",
  tag = "inscriptions",
  operation_id = "get inscriptions page",
  params(Pagination),
  responses(
    (status = 200, description = "Obtain one page of inscriptions, newest first.", body = ApiInscriptionPage),
    (status = 400, description = "Bad query.", body = ApiError, example = json!(&ApiError::bad_request("bad request"))),
    (status = 500, description = "Internal server error.", body = ApiError, example = json!(&ApiError::internal("internal error"))),
  )
)]
pub(crate) async fn api_inscriptions(
  Extension(reader): Extension<Arc<dyn InscriptionReader>>,
  query: Result<Query<Pagination>, QueryRejection>,
) -> ApiResult<InscriptionPage> {
  let page = page(query)?;
  log::debug!("rpc: get api_inscriptions: {page}");

  let inscriptions = reader.inscriptions_by_page(page).await?;
  log::debug!(
    "rpc: get api_inscriptions: {page} -> {} rows",
    inscriptions.len()
  );

  Ok(Json(ApiResponse::ok(InscriptionPage {
    page_index: page.index(),
    page_size: page.size(),
    inscriptions,
  })))
}
