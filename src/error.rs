use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("Bad request: {0}")]
  BadRequest(String),

  #[error("No store matches the api key")]
  Unauthorized,

  #[error("{0}")]
  NotFound(#[from] NotFound),

  #[error("Database error: {0}")]
  Database(#[from] sea_orm::DbErr),

  #[error("Internal error: {0}")]
  Internal(String),
}

/// Every way a lookup or conditional write can match zero rows.
#[derive(Debug, thiserror::Error)]
pub enum NotFound {
  #[error("Redemption code `{0}` not found")]
  Code(String),
  #[error("No eligible submission for account `{0}`")]
  Account(String),
  #[error("Coupon `{0}` not found or already redeemed")]
  Coupon(String),
  #[error("Submission `{0}` not found or not accepted")]
  Submission(String),
}

impl Error {
  pub fn missing_params() -> Self {
    Self::BadRequest("request missing a required parameter".into())
  }

  pub fn status(&self) -> StatusCode {
    match self {
      Error::BadRequest(_) => StatusCode::BAD_REQUEST,
      Error::Unauthorized => StatusCode::UNAUTHORIZED,
      Error::NotFound(_) => StatusCode::NOT_FOUND,
      Error::Database(_) | Error::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
