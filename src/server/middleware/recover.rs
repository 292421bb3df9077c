//! Panic recovery.

use std::{any::Any, panic::AssertUnwindSafe};

use axum::{
    extract::Request,
    http::{header::CONNECTION, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures::FutureExt;

use crate::server::error::ClientError;

/// Converts a panic anywhere downstream into a 500 response.
///
/// The response asks the client to close the connection since the handler's state at the
/// time of the panic is unknown.
pub async fn recover_panic(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            tracing::error!(
                method = %method,
                uri = %uri,
                "Recovered from panic: {}",
                panic_message(panic.as_ref())
            );

            let mut response = ClientError(StatusCode::INTERNAL_SERVER_ERROR).into_response();
            response
                .headers_mut()
                .insert(CONNECTION, HeaderValue::from_static("close"));

            response
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}
