use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetDto {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub created: NaiveDateTime,
    pub expires: NaiveDateTime,
}
