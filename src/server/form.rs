//! Decoding of URL-encoded form submissions.
//!
//! [`PostForm`] wraps axum's `Form` extractor. Failures caused by the client (wrong content
//! type, unreadable body, malformed encoding, unparseable field values) become a 400 through
//! [`Error::BadRequest`]. A target type whose fields cannot be decoded from flat key/value
//! pairs at all (nested structs, maps, sequences) is a server bug, so that failure becomes an
//! [`Error::InternalError`] and is logged at error level with a 500 response.

use axum::extract::{rejection::FormRejection, Form, FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::server::{error::Error, validator::Validated};

pub struct PostForm<T>(pub T);

impl<T, S> FromRequest<S> for PostForm<T>
where
    T: DeserializeOwned + Validated,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<T>::from_request(req, state).await {
            Ok(Form(value)) => Ok(Self(value)),
            Err(rejection) if is_target_shape_error(&rejection) => {
                let reason = rejection.body_text();
                tracing::error!(
                    "Form target {} cannot be decoded from a flat form: {}",
                    std::any::type_name::<T>(),
                    reason
                );

                Err(Error::InternalError(reason))
            }
            Err(rejection) => Err(Error::BadRequest(describe(&rejection))),
        }
    }
}

fn describe(rejection: &FormRejection) -> String {
    format!("{} ({})", rejection.body_text(), rejection.status())
}

/// True when decoding failed because a field's type can never come from a urlencoded value.
fn is_target_shape_error(rejection: &FormRejection) -> bool {
    const COMPOUND_EXPECTATIONS: [&str; 5] = [
        "expected struct",
        "expected a map",
        "expected map",
        "expected a sequence",
        "expected sequence",
    ];

    match rejection {
        FormRejection::FailedToDeserializeForm(_)
        | FormRejection::FailedToDeserializeFormBody(_) => {
            let text = rejection.body_text();
            text.contains("invalid type")
                && COMPOUND_EXPECTATIONS
                    .iter()
                    .any(|expected| text.contains(expected))
        }
        _ => false,
    }
}
