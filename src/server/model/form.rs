//! Submitted form types.
//!
//! Each form is decoded from the request body by [`PostForm`](crate::server::form::PostForm)
//! and owns the [`ValidationResult`] its `validate` method fills in. Passwords are never
//! serialized back into a rendered page.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::server::validator::{
    matches, max_chars, min_chars, not_blank, permitted_value, Validated, ValidationResult,
};

const BLANK: &str = "This field cannot be blank";

pub const PERMITTED_EXPIRY_DAYS: [i32; 3] = [1, 7, 365];
pub const MIN_PASSWORD_CHARS: usize = 8;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SnippetCreateForm {
    pub title: String,
    pub content: String,
    pub expires: i32,
    #[serde(skip_deserializing)]
    pub validation: ValidationResult,
}

impl SnippetCreateForm {
    /// The blank form shown on `GET /snippet/create`.
    pub fn blank() -> Self {
        Self {
            expires: 365,
            ..Default::default()
        }
    }

    pub fn validate(&mut self) {
        let v = &mut self.validation;

        v.check_field(not_blank(&self.title), "title", BLANK);
        v.check_field(
            max_chars(&self.title, 100),
            "title",
            "This field cannot be more than 100 characters long",
        );
        v.check_field(not_blank(&self.content), "content", BLANK);
        v.check_field(
            permitted_value(self.expires, &PERMITTED_EXPIRY_DAYS),
            "expires",
            "This field must equal 1, 7 or 365",
        );
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UserSignupForm {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_deserializing)]
    pub validation: ValidationResult,
}

impl UserSignupForm {
    pub fn validate(&mut self, email_rx: &Regex) {
        let v = &mut self.validation;

        v.check_field(not_blank(&self.name), "name", BLANK);
        v.check_field(not_blank(&self.email), "email", BLANK);
        v.check_field(
            matches(&self.email, email_rx),
            "email",
            "This field must be a valid email address",
        );
        v.check_field(not_blank(&self.password), "password", BLANK);
        v.check_field(
            min_chars(&self.password, MIN_PASSWORD_CHARS),
            "password",
            "This field must be at least 8 characters long",
        );
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct UserLoginForm {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_deserializing)]
    pub validation: ValidationResult,
}

impl UserLoginForm {
    pub fn validate(&mut self, email_rx: &Regex) {
        let v = &mut self.validation;

        v.check_field(not_blank(&self.email), "email", BLANK);
        v.check_field(
            matches(&self.email, email_rx),
            "email",
            "This field must be a valid email address",
        );
        v.check_field(not_blank(&self.password), "password", BLANK);
    }
}

macro_rules! impl_validated {
    ($($form:ty),+ $(,)?) => {
        $(
            impl Validated for $form {
                fn validation(&self) -> &ValidationResult {
                    &self.validation
                }

                fn validation_mut(&mut self) -> &mut ValidationResult {
                    &mut self.validation
                }
            }
        )+
    };
}

impl_validated!(SnippetCreateForm, UserSignupForm, UserLoginForm);
