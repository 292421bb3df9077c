use axum::http::StatusCode;
use snippetbox_test_utils::prelude::*;

use crate::util::client::TestClient;

#[tokio::test]
/// Expect the signup flash on the next page only
async fn signup_flash_is_delivered_once() -> Result<(), TestError> {
    let test = TestBuilder::new().with_user_tables().build().await?;
    let mut client = TestClient::new(&test)?;
    client.get("/user/signup").await;

    let resp = client
        .post_form(
            "/user/signup",
            &[("name", "Bob"), ("email", "bob@example.com"), ("password", "pa55word!")],
        )
        .await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/user/login"));

    let first = client.get("/user/login").await.page();
    let second = client.get("/user/login").await.page();

    assert_eq!(
        first.data.flash.as_deref(),
        Some("Your signup was successful. Please log in.")
    );
    assert!(second.data.flash.is_none());

    Ok(())
}

#[tokio::test]
/// Expect the snippet flash on the redirected view page
async fn snippet_flash_follows_redirect() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_snippet_tables()
        .with_user("Alice", "alice@example.com", TEST_PASSWORD)
        .build()
        .await?;
    let mut client = TestClient::new(&test)?;
    client.login("alice@example.com", TEST_PASSWORD).await;

    let resp = client
        .post_form(
            "/snippet/create",
            &[("title", "O snail"), ("content", "Climb Mount Fuji"), ("expires", "7")],
        )
        .await;
    let location = resp.location().unwrap().to_string();

    let view = client.get(&location).await;

    assert_eq!(view.status, StatusCode::OK);
    let page = view.page();
    assert_eq!(page.page, "view");
    assert_eq!(page.data.flash.as_deref(), Some("Snippet successfully created!"));
    assert_eq!(page.data.snippet.unwrap().title, "O snail");

    Ok(())
}
