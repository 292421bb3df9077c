use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::{
    model::page::TemplateData,
    server::{
        error::{auth::AuthError, Error},
        form::PostForm,
        middleware::auth::LOGIN_PATH,
        model::{
            app::AppState,
            auth::Authentication,
            form::{UserLoginForm, UserSignupForm},
            session::{
                csrf::{CsrfToken, SessionCsrfToken},
                flash::SessionFlash,
                user::SessionUserId,
            },
        },
        service::auth::AuthService,
        validator::Validated,
        view::{render, LOGIN_PAGE, SIGNUP_PAGE},
    },
};

/// Where a successful login lands.
pub const AFTER_LOGIN_PATH: &str = "/snippet/create";

pub async fn user_signup(
    session: Session,
    auth: Authentication,
    csrf: CsrfToken,
) -> Result<Response, Error> {
    let data = TemplateData::new(&session, &auth, &csrf)
        .await?
        .with_form(&UserSignupForm::default())?;

    Ok(render(StatusCode::OK, SIGNUP_PAGE, data))
}

pub async fn user_signup_post(
    State(state): State<AppState>,
    session: Session,
    auth: Authentication,
    csrf: CsrfToken,
    PostForm(mut form): PostForm<UserSignupForm>,
) -> Result<Response, Error> {
    form.validate(&state.settings.email_rx);

    if form.is_valid() {
        let auth_service = AuthService::new(&state.db, &state.settings);

        match auth_service
            .signup(&form.name, &form.email, &form.password)
            .await
        {
            Ok(_) => {
                SessionFlash::put(&session, "Your signup was successful. Please log in.").await?;

                return Ok(Redirect::to(LOGIN_PATH).into_response());
            }
            Err(Error::AuthError(AuthError::DuplicateEmail)) => form
                .validation_mut()
                .add_field_error("email", "Email address is already in use"),
            Err(err) => return Err(err),
        }
    }

    let data = TemplateData::new(&session, &auth, &csrf)
        .await?
        .with_form(&form)?;

    Ok(render(StatusCode::UNPROCESSABLE_ENTITY, SIGNUP_PAGE, data))
}

pub async fn user_login(
    session: Session,
    auth: Authentication,
    csrf: CsrfToken,
) -> Result<Response, Error> {
    let data = TemplateData::new(&session, &auth, &csrf)
        .await?
        .with_form(&UserLoginForm::default())?;

    Ok(render(StatusCode::OK, LOGIN_PAGE, data))
}

/// Signs a user in.
///
/// The session token and CSRF token are both replaced before the user id is stored, so a
/// token observed before login cannot be used to act as the user. Logging in while already
/// signed in is a fresh login.
pub async fn user_login_post(
    State(state): State<AppState>,
    session: Session,
    auth: Authentication,
    csrf: CsrfToken,
    PostForm(mut form): PostForm<UserLoginForm>,
) -> Result<Response, Error> {
    form.validate(&state.settings.email_rx);

    if form.is_valid() {
        let auth_service = AuthService::new(&state.db, &state.settings);

        match auth_service.authenticate(&form.email, &form.password).await? {
            Some(user_id) => {
                session.cycle_id().await?;
                SessionCsrfToken::regenerate(&session).await?;
                SessionUserId::insert(&session, user_id).await?;

                tracing::debug!(user_id, "User logged in");

                return Ok(Redirect::to(AFTER_LOGIN_PATH).into_response());
            }
            None => form
                .validation_mut()
                .add_non_field_error("Email or password is incorrect"),
        }
    }

    let data = TemplateData::new(&session, &auth, &csrf)
        .await?
        .with_form(&form)?;

    Ok(render(StatusCode::UNPROCESSABLE_ENTITY, LOGIN_PAGE, data))
}

pub async fn user_logout_post(session: Session) -> Result<Response, Error> {
    session.cycle_id().await?;
    let user_id = SessionUserId::remove(&session).await?;
    SessionCsrfToken::regenerate(&session).await?;

    SessionFlash::put(&session, "You've been logged out successfully!").await?;

    tracing::debug!(user_id, "User logged out");

    Ok(Redirect::to("/").into_response())
}
