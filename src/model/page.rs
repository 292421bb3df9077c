use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::snippet::SnippetDto;

/// A rendered page: the template name and the data handed to it.
#[derive(Serialize, Deserialize)]
pub struct PageDto {
    pub page: String,
    pub data: TemplateData,
}

/// Data available to every page.
///
/// `form` holds the submitted form with its validation errors when a page is re-rendered
/// after a failed submission. Passwords are never serialized into it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TemplateData {
    pub current_year: i32,
    pub flash: Option<String>,
    pub is_authenticated: bool,
    pub csrf_token: String,
    pub form: Option<Value>,
    pub snippet: Option<SnippetDto>,
    pub snippets: Vec<SnippetDto>,
}
