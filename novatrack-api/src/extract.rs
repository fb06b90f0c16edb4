/// Request extractors with product error mapping
///
/// Axum's stock `Json` rejection answers a malformed body with a 422 and
/// serde's raw error text. The product contract has no 422: anything that
/// fails to deserialize is a 400 rendered through [`ApiError`] like every
/// other bad request. This wrapper delegates extraction to `axum::Json` and
/// only swaps the rejection.

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON body extractor whose rejection is an [`ApiError::BadRequest`]
#[derive(Debug, Clone)]
pub struct Json<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    axum::Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("Request body rejected: {}", rejection);
                ApiError::BadRequest("Datos inválidos".to_string())
            })?;

        Ok(Self(value))
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
