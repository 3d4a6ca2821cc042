use {
  super::*,
  axum::extract::rejection::QueryRejection,
  serde::ser::SerializeStruct,
  utoipa::ToSchema,
};

#[repr(i32)]
#[derive(Debug, ToSchema)]
pub(crate) enum ApiError {
  /// Internal server error.
  #[schema(example = json!(&ApiError::internal("internal error")))]
  Internal(String) = 1,

  /// Bad request.
  #[schema(example = json!(&ApiError::bad_request("bad request")))]
  BadRequest(String) = 2,
}

impl ApiError {
  pub(crate) fn code(&self) -> i32 {
    match self {
      Self::Internal(_) => 1,
      Self::BadRequest(_) => 2,
    }
  }

  pub(crate) fn internal<S: ToString>(message: S) -> Self {
    Self::Internal(message.to_string())
  }

  pub(crate) fn bad_request<S: ToString>(message: S) -> Self {
    Self::BadRequest(message.to_string())
  }
}

impl Serialize for ApiError {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("ApiError", 2)?;
    match self {
      ApiError::Internal(msg) | ApiError::BadRequest(msg) => {
        state.serialize_field("code", &self.code())?;
        state.serialize_field("message", &msg)?;
        state.end()
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status_code = match &self {
      Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
      Self::BadRequest(_) => StatusCode::BAD_REQUEST,
    };

    (status_code, Json(self)).into_response()
  }
}

// Driver errors can carry server messages and host details, so they are
// logged and the response only carries the canonical reason.
impl From<database::Error> for ApiError {
  fn from(error: database::Error) -> Self {
    log::error!("error serving request: {:#}", Error::from(error));
    Self::internal(
      StatusCode::INTERNAL_SERVER_ERROR
        .canonical_reason()
        .unwrap_or_default(),
    )
  }
}

impl From<PageError> for ApiError {
  fn from(error: PageError) -> Self {
    Self::bad_request(error)
  }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self {
    Self::bad_request(rejection.body_text())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_serialize_api_error() {
    let api_error = ApiError::internal("internal error");
    let json = serde_json::to_string(&api_error).unwrap();
    assert_eq!(json, r#"{"code":1,"message":"internal error"}"#);

    let api_error = ApiError::bad_request("bad request");
    let json = serde_json::to_string(&api_error).unwrap();
    assert_eq!(json, r#"{"code":2,"message":"bad request"}"#);
  }

  #[test]
  fn status_codes() {
    assert_eq!(
      ApiError::internal("boom").into_response().status(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
      ApiError::bad_request("nope").into_response().status(),
      StatusCode::BAD_REQUEST
    );
  }

  #[test]
  fn page_errors_are_bad_requests() {
    assert!(matches!(
      ApiError::from(PageError::EmptyPage),
      ApiError::BadRequest(message) if message == "pageSize must be at least 1"
    ));
  }

  #[test]
  fn query_rejections_are_bad_requests() {
    let uri = "/inscriptions?pageSize=ten".parse().unwrap();
    let rejection = Query::<inscription::Pagination>::try_from_uri(&uri).unwrap_err();

    assert!(matches!(ApiError::from(rejection), ApiError::BadRequest(_)));
  }

  #[tokio::test]
  async fn database_errors_hide_driver_details() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
      .unwrap()
      .local_addr()
      .unwrap()
      .port();

    let config = ConnectionConfig {
      host: "127.0.0.1".into(),
      port,
      user: "indexer".into(),
      password: Some("hunter2".into()),
      dbname: None,
      application_name: None,
      connect_timeout: Some(Duration::from_secs(5)),
    };

    let error = Database::connect(&config).await.err().unwrap();
    assert!(error.to_string().contains("127.0.0.1"));

    let api_error = ApiError::from(error);
    assert!(matches!(
      &api_error,
      ApiError::Internal(message) if message == "Internal Server Error"
    ));
    assert_eq!(
      serde_json::to_string(&api_error).unwrap(),
      r#"{"code":1,"message":"Internal Server Error"}"#
    );
  }
}
