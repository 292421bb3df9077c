use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use snippetbox::server::middleware::chain;
use snippetbox_test_utils::prelude::*;
use tower::ServiceExt;

use crate::util::client::TestClient;

async fn explode() -> &'static str {
    panic!("handler exploded")
}

#[tokio::test]
/// Expect a panic behind the standard chain to become a 500 that closes the connection while
/// the router keeps serving
async fn standard_chain_recovers_panics() {
    let router = chain::standard::<()>().then(
        Router::new()
            .route("/explode", get(explode))
            .route("/fine", get(|| async { "fine" })),
    );

    let resp = router
        .clone()
        .oneshot(Request::builder().uri("/explode").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.headers().get("connection").unwrap(), "close");

    let resp = router
        .oneshot(Request::builder().uri("/fine").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
/// Expect unknown paths to get a 404 with security headers
async fn unknown_path_is_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let mut client = TestClient::new(&test)?;

    let resp = client.get("/no/such/page").await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(resp.headers.contains_key("content-security-policy"));

    Ok(())
}
