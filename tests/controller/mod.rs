//! Handlers called directly with extracted values, outside the middleware pipeline.

mod snippet;

use snippetbox::server::model::session::csrf::CsrfToken;

fn csrf() -> CsrfToken {
    CsrfToken("test-token".to_string())
}
