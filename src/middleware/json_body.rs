use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::NambiError;

/// JSON body extractor for the public routes.
///
/// Unlike `axum::Json` it does not insist on a `content-type` header, treats
/// an empty body as `{}` and turns every parse failure into a 400
/// `Validation` error with the serde message. Bodies over the router's
/// limit stay 413.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = NambiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| match rejection.status() {
                StatusCode::PAYLOAD_TOO_LARGE => {
                    NambiError::PayloadTooLarge(rejection.body_text())
                }
                _ => NambiError::Validation(rejection.body_text()),
            })?;

        let payload: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(payload)
            .map(JsonBody)
            .map_err(|e| NambiError::Validation(format!("invalid JSON body: {e}")))
    }
}
