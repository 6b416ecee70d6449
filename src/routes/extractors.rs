//! Custom Axum extractors

use axum::{
    async_trait,
    extract::{Form, FromRequest, Json, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// Accepts a request body as either JSON or form-urlencoded, dispatching
/// on the Content-Type header. Browser form posts and API clients land in
/// the same handler.
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if content_type.starts_with("application/json") {
            let Json(data) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| e.into_response())?;
            return Ok(Self(data));
        }

        let Form(data) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| e.into_response())?;
        Ok(Self(data))
    }
}
