//! Page rendering.
//!
//! Pages are rendered as a JSON view-model naming the template and carrying its data. A
//! template engine can consume the same model without changes to the handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Datelike, Utc};
use serde::Serialize;
use tower_sessions::Session;

use crate::{
    model::{
        page::{PageDto, TemplateData},
        snippet::SnippetDto,
    },
    server::{
        error::Error,
        model::{
            auth::Authentication,
            db::SnippetModel,
            session::{csrf::CsrfToken, flash::SessionFlash},
        },
    },
};

pub const HOME_PAGE: &str = "home";
pub const VIEW_PAGE: &str = "view";
pub const CREATE_PAGE: &str = "create";
pub const SIGNUP_PAGE: &str = "signup";
pub const LOGIN_PAGE: &str = "login";

impl TemplateData {
    /// Collects the data every page shows, consuming any pending flash message.
    pub async fn new(
        session: &Session,
        auth: &Authentication,
        csrf: &CsrfToken,
    ) -> Result<Self, Error> {
        Ok(Self {
            current_year: Utc::now().year(),
            flash: SessionFlash::pop(session).await?,
            is_authenticated: auth.is_authenticated(),
            csrf_token: csrf.0.clone(),
            ..Default::default()
        })
    }

    pub fn with_form<F: Serialize>(mut self, form: &F) -> Result<Self, Error> {
        self.form = Some(serde_json::to_value(form)?);
        Ok(self)
    }
}

impl From<SnippetModel> for SnippetDto {
    fn from(snippet: SnippetModel) -> Self {
        Self {
            id: snippet.id,
            title: snippet.title,
            content: snippet.content,
            created: snippet.created,
            expires: snippet.expires,
        }
    }
}

/// Renders `page` with `data` under the given status.
pub fn render(status: StatusCode, page: &str, data: TemplateData) -> Response {
    (
        status,
        Json(PageDto {
            page: page.to_string(),
            data,
        }),
    )
        .into_response()
}
