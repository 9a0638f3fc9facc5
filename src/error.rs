use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use sea_orm::DbErr;

/// Rejections produced while reading or checking promotion input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Validation {
  #[error("Invalid promotion: body of request contained bad or no data")]
  BadData,
  #[error("Invalid promotion: missing {0}")]
  Missing(&'static str),
  #[error("Invalid attribute: {0}")]
  Attribute(String),
  #[error("Invalid promotion: `{field}` {reason}")]
  Field { field: &'static str, reason: String },
  #[error("Discount cannot exceed 100%")]
  DiscountTooLarge,
  #[error("amount must be greater than 0")]
  NonPositiveAmount,
}

impl Validation {
  pub fn field(field: &'static str, reason: impl Into<String>) -> Self {
    Self::Field { field, reason: reason.into() }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] Validation),
  #[error("Promotion with id '{0}' was not found")]
  NotFound(i32),
  #[error("No active promotion for product '{0}'")]
  NoActivePromotion(i32),
  #[error("Database error: {0}")]
  Db(#[from] DbErr),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, code) = match &self {
      Error::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
      Error::NotFound(_) | Error::NoActivePromotion(_) => {
        (StatusCode::NOT_FOUND, "NOT_FOUND")
      }
      Error::Db(err) => {
        tracing::error!(error = %err, "Database error");
        let body = json::json!({
          "error": "An internal error occurred",
          "code": "INTERNAL_ERROR",
        });
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
      }
    };

    let body = json::json!({
      "error": self.to_string(),
      "code": code,
    });

    (status, Json(body)).into_response()
  }
}
