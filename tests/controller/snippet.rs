use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use snippetbox::server::{
    controller::snippet::{home, snippet_create, snippet_create_post, snippet_view},
    error::Error,
    form::PostForm,
    model::{app::AppState, auth::Authentication, form::SnippetCreateForm},
};
use snippetbox_test_utils::prelude::*;

use super::csrf;

#[tokio::test]
/// Expect the home page to list live snippets only
async fn home_lists_live_snippets() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_snippet("Live", "Content", 7)
        .with_snippet("Expired", "Content", -1)
        .build()
        .await?;
    let state: AppState = test.to_app_state()?;

    let resp = home(
        State(state),
        test.session.clone(),
        Authentication::anonymous(),
        csrf(),
    )
    .await;

    assert!(resp.is_ok());
    let resp = resp.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
/// Expect NotFound for ids that are not positive integers
async fn view_rejects_malformed_ids() -> Result<(), TestError> {
    let test = TestBuilder::new().with_snippet_tables().build().await?;
    let state: AppState = test.to_app_state()?;

    for id in ["abc", "0", "-3", "1.5", ""] {
        let result = snippet_view(
            State(state.clone()),
            test.session.clone(),
            Authentication::anonymous(),
            csrf(),
            Path(id.to_string()),
        )
        .await;

        assert!(matches!(result, Err(Error::NotFound)), "id {id:?}");
    }

    Ok(())
}

#[tokio::test]
/// Expect NotFound for an expired snippet
async fn view_hides_expired_snippet() -> Result<(), TestError> {
    let test = TestBuilder::new().with_snippet_tables().build().await?;
    let snippet = test.snippet().insert_snippet("Old", "Content", -1).await?;
    let state: AppState = test.to_app_state()?;

    let result = snippet_view(
        State(state),
        test.session.clone(),
        Authentication::anonymous(),
        csrf(),
        Path(snippet.id.to_string()),
    )
    .await;

    assert!(matches!(result, Err(Error::NotFound)));

    Ok(())
}

#[tokio::test]
async fn create_renders_blank_form() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let result = snippet_create(test.session.clone(), Authentication::user(1), csrf()).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
/// Expect 422 and no snippet for an invalid submission
async fn create_post_rejects_invalid_form() -> Result<(), TestError> {
    let test = TestBuilder::new().with_snippet_tables().build().await?;
    let state: AppState = test.to_app_state()?;
    let form = SnippetCreateForm {
        title: String::new(),
        content: "Content".to_string(),
        expires: 30,
        ..Default::default()
    };

    let result = snippet_create_post(
        State(state),
        test.session.clone(),
        Authentication::user(1),
        csrf(),
        PostForm(form),
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(test.count(entity::prelude::Snippet).await?, 0);

    Ok(())
}

#[tokio::test]
/// Expect a 303 to the new snippet's page for a valid submission
async fn create_post_redirects_to_snippet() -> Result<(), TestError> {
    let test = TestBuilder::new().with_snippet_tables().build().await?;
    let state: AppState = test.to_app_state()?;
    let form = SnippetCreateForm {
        title: "O snail".to_string(),
        content: "Climb Mount Fuji".to_string(),
        expires: 365,
        ..Default::default()
    };

    let result = snippet_create_post(
        State(state),
        test.session.clone(),
        Authentication::user(1),
        csrf(),
        PostForm(form),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("location").unwrap(), "/snippet/view/1");

    Ok(())
}

#[tokio::test]
/// Expect a database error when required tables are not present
async fn home_fails_when_tables_missing() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let state: AppState = test.to_app_state()?;

    let result = home(
        State(state),
        test.session.clone(),
        Authentication::anonymous(),
        csrf(),
    )
    .await;

    assert!(matches!(result, Err(Error::DbErr(_))));

    Ok(())
}
