//! Per-request access logging.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};

use crate::server::error::ServerFault;

/// Logs every request at info level and the cause of any 500 at error level.
///
/// The remote address is only known when the server was started with connect info.
pub async fn log_request(request: Request, next: Next) -> Response {
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    let method = request.method().clone();
    let uri = request.uri().clone();

    tracing::info!(
        remote_addr = %remote_addr,
        version = ?request.version(),
        method = %method,
        uri = %uri,
        "Received request"
    );

    let response = next.run(request).await;

    if let Some(ServerFault(cause)) = response.extensions().get::<ServerFault>() {
        tracing::error!(method = %method, uri = %uri, "Internal server error: {}", cause);
    }

    response
}
