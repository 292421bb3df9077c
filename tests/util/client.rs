//! In-process HTTP client for driving the full router.
//!
//! Requests go through `tower::ServiceExt::oneshot`, so every middleware runs exactly as it
//! would behind a listener. Cookies set by responses are kept in a jar and sent back, and
//! form posts carry the jar's CSRF token unless a test asks otherwise.

use std::collections::HashMap;

use axum::{
    body::{Body, Bytes},
    http::{
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        HeaderMap, Method, Request, StatusCode,
    },
    Router,
};
use snippetbox::{
    model::page::PageDto,
    server::{middleware::session::session_layer, model::app::AppState, router::routes},
};
use snippetbox_test_utils::prelude::*;
use tower::ServiceExt;

pub const CSRF_COOKIE: &str = "csrf_token";
pub const SESSION_COOKIE: &str = "session";

pub struct TestClient {
    router: Router,
    cookies: HashMap<String, String>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn page(&self) -> PageDto {
        serde_json::from_slice(&self.body).expect("response body is not a page view-model")
    }

    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl TestClient {
    pub fn new(test: &TestContext) -> Result<Self, TestError> {
        let state: AppState = test.to_app_state()?;
        let router = routes(state, session_layer(test.store.clone(), false));

        Ok(Self {
            router,
            cookies: HashMap::new(),
        })
    }

    /// A second client sharing the same server state but with an empty cookie jar.
    pub fn fork(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookies: HashMap::new(),
        }
    }

    pub fn cookie(&self, name: &str) -> Option<String> {
        self.cookies.get(name).cloned()
    }

    pub fn set_cookie(&mut self, name: &str, value: &str) {
        self.cookies.insert(name.to_string(), value.to_string());
    }

    pub fn remove_cookie(&mut self, name: &str) {
        self.cookies.remove(name);
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, HeaderMap::new()).await
    }

    /// Posts a urlencoded form with the jar's CSRF token added as `csrf_token`.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let mut fields = fields.to_vec();
        let token = self.cookie(CSRF_COOKIE).unwrap_or_default();
        fields.push(("csrf_token", &token));

        self.post_form_raw(uri, &fields).await
    }

    /// Posts a urlencoded form exactly as given.
    pub async fn post_form_raw(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        self.send(Method::POST, uri, Some(encode_form(fields)), HeaderMap::new())
            .await
    }

    pub async fn send(
        &mut self,
        method: Method,
        uri: &str,
        form: Option<String>,
        headers: HeaderMap,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        if !self.cookies.is_empty() {
            let cookie_header = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(COOKIE, cookie_header);
        }
        for (name, value) in headers.iter() {
            builder = builder.header(name, value);
        }

        let body = match form {
            Some(form) => {
                builder = builder.header(CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form)
            }
            None => Body::empty(),
        };

        let resp = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        for value in resp.headers().get_all(SET_COOKIE) {
            self.store_cookie(value.to_str().unwrap());
        }

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    fn store_cookie(&mut self, set_cookie: &str) {
        let mut attributes = set_cookie.split(';').map(str::trim);
        let Some((name, value)) = attributes.next().and_then(|pair| pair.split_once('=')) else {
            return;
        };

        let removed = value.is_empty()
            || attributes.any(|attr| attr.eq_ignore_ascii_case("max-age=0"));
        if removed {
            self.cookies.remove(name);
        } else {
            self.cookies.insert(name.to_string(), value.to_string());
        }
    }

    /// Logs in through the login form, leaving the jar holding an authenticated session.
    pub async fn login(&mut self, email: &str, password: &str) -> TestResponse {
        self.get("/user/login").await;
        self.post_form("/user/login", &[("email", email), ("password", password)])
            .await
    }
}

fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{}={}", encode(name), encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            b' ' => encoded.push('+'),
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}
