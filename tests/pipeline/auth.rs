use axum::http::StatusCode;
use snippetbox_test_utils::prelude::*;

use crate::util::client::{TestClient, CSRF_COOKIE, SESSION_COOKIE};

#[tokio::test]
/// Expect a 303 to the login page for a protected route with no cookies
async fn protected_route_redirects_anonymous() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let mut client = TestClient::new(&test)?;

    let resp = client.get("/snippet/create").await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/user/login"));

    Ok(())
}

#[tokio::test]
/// Expect protected pages to be served uncacheable once logged in
async fn protected_route_serves_authenticated() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user("Alice", "alice@example.com", TEST_PASSWORD)
        .build()
        .await?;
    let mut client = TestClient::new(&test)?;

    let login = client.login("alice@example.com", TEST_PASSWORD).await;
    assert_eq!(login.status, StatusCode::SEE_OTHER);
    assert_eq!(login.location(), Some("/snippet/create"));

    let resp = client.get("/snippet/create").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.headers.get("cache-control").unwrap(), "no-store");
    let page = resp.page();
    assert_eq!(page.page, "create");
    assert!(page.data.is_authenticated);
    assert_eq!(page.data.form.unwrap()["expires"], 365);

    Ok(())
}

#[tokio::test]
/// Expect login to rotate both the session token and the CSRF token, and the old session
/// token to stop granting access
async fn login_rotates_tokens() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user("Alice", "alice@example.com", TEST_PASSWORD)
        .build()
        .await?;
    let mut client = TestClient::new(&test)?;

    client.get("/user/login").await;
    let session_before = client.cookie(SESSION_COOKIE).unwrap();
    let csrf_before = client.cookie(CSRF_COOKIE).unwrap();

    client
        .post_form(
            "/user/login",
            &[("email", "alice@example.com"), ("password", TEST_PASSWORD)],
        )
        .await;

    let session_after = client.cookie(SESSION_COOKIE).unwrap();
    assert_ne!(session_after, session_before);
    assert_ne!(client.cookie(CSRF_COOKIE).unwrap(), csrf_before);

    let mut stale = client.fork();
    stale.set_cookie(SESSION_COOKIE, &session_before);
    let resp = stale.get("/snippet/create").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);

    Ok(())
}

#[tokio::test]
/// Expect logout to rotate the session token, clear the user and flash a message
async fn logout_rotates_and_clears() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_snippet_tables()
        .with_user("Alice", "alice@example.com", TEST_PASSWORD)
        .build()
        .await?;
    let mut client = TestClient::new(&test)?;
    client.login("alice@example.com", TEST_PASSWORD).await;
    let session_before = client.cookie(SESSION_COOKIE).unwrap();

    let resp = client.post_form("/user/logout", &[]).await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/"));
    assert_ne!(client.cookie(SESSION_COOKIE).unwrap(), session_before);

    let home = client.get("/").await.page();
    assert!(!home.data.is_authenticated);
    assert_eq!(
        home.data.flash.as_deref(),
        Some("You've been logged out successfully!")
    );

    let mut stale = client.fork();
    stale.set_cookie(SESSION_COOKIE, &session_before);
    assert_eq!(stale.get("/snippet/create").await.status, StatusCode::SEE_OTHER);

    Ok(())
}

#[tokio::test]
/// Expect unknown email and wrong password to fail with identical responses
async fn login_failures_are_indistinguishable() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user("Alice", "alice@example.com", TEST_PASSWORD)
        .build()
        .await?;
    let mut client = TestClient::new(&test)?;
    client.get("/user/login").await;

    let unknown = client
        .post_form(
            "/user/login",
            &[("email", "nobody@example.com"), ("password", TEST_PASSWORD)],
        )
        .await;
    let wrong = client
        .post_form(
            "/user/login",
            &[("email", "alice@example.com"), ("password", "wrong password")],
        )
        .await;

    assert_eq!(unknown.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(wrong.status, StatusCode::UNPROCESSABLE_ENTITY);

    let unknown_form = unknown.page().data.form.unwrap();
    let wrong_form = wrong.page().data.form.unwrap();
    assert_eq!(unknown_form["validation"], wrong_form["validation"]);
    assert_eq!(
        wrong_form["validation"]["non_field_errors"][0],
        "Email or password is incorrect"
    );
    assert!(wrong_form.get("password").is_none());

    Ok(())
}

#[tokio::test]
/// Expect a session whose user was deleted to be treated as anonymous and cleaned up
async fn deleted_user_is_unauthenticated() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_snippet_tables()
        .build()
        .await?;
    let user = test
        .user()
        .insert_user("Alice", "alice@example.com", TEST_PASSWORD)
        .await?;
    let mut client = TestClient::new(&test)?;
    client.login("alice@example.com", TEST_PASSWORD).await;

    test.user().delete_user(user.id).await?;

    let resp = client.get("/snippet/create").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/user/login"));

    let home = client.get("/").await.page();
    assert!(!home.data.is_authenticated);

    Ok(())
}

#[tokio::test]
/// Expect logging in again while signed in to succeed and rotate the session again
async fn relogin_while_authenticated() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user("Alice", "alice@example.com", TEST_PASSWORD)
        .build()
        .await?;
    let mut client = TestClient::new(&test)?;
    client.login("alice@example.com", TEST_PASSWORD).await;
    let first_session = client.cookie(SESSION_COOKIE).unwrap();

    let resp = client
        .post_form(
            "/user/login",
            &[("email", "alice@example.com"), ("password", TEST_PASSWORD)],
        )
        .await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_ne!(client.cookie(SESSION_COOKIE).unwrap(), first_session);
    assert_eq!(client.get("/snippet/create").await.status, StatusCode::OK);

    Ok(())
}

#[tokio::test]
/// Expect a storage failure while resolving the session's user to produce a generic 500
async fn resolver_storage_failure_is_server_error() -> Result<(), TestError> {
    use sea_orm::ConnectionTrait;

    let test = TestBuilder::new()
        .with_user("Alice", "alice@example.com", TEST_PASSWORD)
        .with_snippet_tables()
        .build()
        .await?;
    let mut client = TestClient::new(&test)?;
    client.login("alice@example.com", TEST_PASSWORD).await;

    test.db.execute_unprepared("DROP TABLE users").await?;

    let resp = client.get("/").await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = serde_json::from_slice(&resp.body).unwrap();
    assert_eq!(body, serde_json::json!({ "error": "Internal Server Error" }));

    Ok(())
}
