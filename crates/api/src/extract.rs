//! Request extractors that report body failures in the API error shape.

use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use helio_core::error::CoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::AppError;

/// JSON body extractor and response wrapper.
///
/// Extraction failures (malformed JSON, missing fields, wrong content
/// type) become a 400 `VALIDATION_ERROR` instead of axum's default 422,
/// keeping body-shape errors on the same footing as the handlers' own
/// validation. As a response it behaves exactly like [`axum::Json`].
#[derive(Debug, Clone, Copy)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Json(value)),
            Err(rejection) => Err(AppError::Core(CoreError::Validation(rejection.body_text()))),
        }
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
