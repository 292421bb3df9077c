use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::{
    model::page::TemplateData,
    server::{
        data::snippet::SnippetRepository,
        error::Error,
        form::PostForm,
        model::{
            app::AppState,
            auth::Authentication,
            form::SnippetCreateForm,
            session::{csrf::CsrfToken, flash::SessionFlash},
        },
        validator::Validated,
        view::{render, CREATE_PAGE, HOME_PAGE, VIEW_PAGE},
    },
};

pub async fn home(
    State(state): State<AppState>,
    session: Session,
    auth: Authentication,
    csrf: CsrfToken,
) -> Result<Response, Error> {
    let snippets = SnippetRepository::new(&state.db).latest().await?;

    let mut data = TemplateData::new(&session, &auth, &csrf).await?;
    data.snippets = snippets.into_iter().map(Into::into).collect();

    Ok(render(StatusCode::OK, HOME_PAGE, data))
}

/// Shows one snippet. Ids that are not positive integers are treated as unknown.
pub async fn snippet_view(
    State(state): State<AppState>,
    session: Session,
    auth: Authentication,
    csrf: CsrfToken,
    Path(id): Path<String>,
) -> Result<Response, Error> {
    let id = match id.parse::<i32>() {
        Ok(id) if id >= 1 => id,
        _ => return Err(Error::NotFound),
    };

    let snippet = SnippetRepository::new(&state.db)
        .get(id)
        .await?
        .ok_or(Error::NotFound)?;

    let mut data = TemplateData::new(&session, &auth, &csrf).await?;
    data.snippet = Some(snippet.into());

    Ok(render(StatusCode::OK, VIEW_PAGE, data))
}

pub async fn snippet_create(
    session: Session,
    auth: Authentication,
    csrf: CsrfToken,
) -> Result<Response, Error> {
    let data = TemplateData::new(&session, &auth, &csrf)
        .await?
        .with_form(&SnippetCreateForm::blank())?;

    Ok(render(StatusCode::OK, CREATE_PAGE, data))
}

pub async fn snippet_create_post(
    State(state): State<AppState>,
    session: Session,
    auth: Authentication,
    csrf: CsrfToken,
    PostForm(mut form): PostForm<SnippetCreateForm>,
) -> Result<Response, Error> {
    form.validate();

    if !form.is_valid() {
        let data = TemplateData::new(&session, &auth, &csrf)
            .await?
            .with_form(&form)?;

        return Ok(render(StatusCode::UNPROCESSABLE_ENTITY, CREATE_PAGE, data));
    }

    let snippet = SnippetRepository::new(&state.db)
        .create(&form.title, &form.content, form.expires)
        .await?;

    SessionFlash::put(&session, "Snippet successfully created!").await?;

    Ok(Redirect::to(&format!("/snippet/view/{}", snippet.id)).into_response())
}
