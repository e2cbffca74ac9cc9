//! Request extractors
//!
//! [`ValidatedJson`] replaces `axum::Json` for request bodies: a body that
//! does not parse is a 400 `bad_request`, and a body that parses but fails
//! its `validator` rules is a 400 `validation_error` with field details.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{ApiError, ApiResult};

/// JSON body that has been deserialized and validated
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// Parses a numeric path id
///
/// `kind` names the resource in the error, e.g. `"pet"` gives
/// "Invalid pet ID".
pub fn parse_id(raw: &str, kind: &str) -> ApiResult<i64> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid {} ID", kind)))
}
