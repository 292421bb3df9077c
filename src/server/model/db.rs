//! Database model type aliases.
//!
//! Short names for the sea-orm entity models used by the repositories and controllers, so
//! signatures do not need to spell out the `entity` crate paths.

/// A registered account.
///
/// # Fields (from `entity::user::Model`)
/// - `id` - Primary key, the value stored in the session after login
/// - `name` - Display name given at signup
/// - `email` - Unique login email
/// - `hashed_password` - bcrypt hash of the account password
/// - `created` - Timestamp when the account was created
pub type UserModel = entity::user::Model;

/// A shared text snippet.
///
/// # Fields (from `entity::snippet::Model`)
/// - `id` - Primary key used in `/snippet/view/{id}`
/// - `title` - Short title, at most 100 characters
/// - `content` - Snippet body
/// - `created` - Timestamp when the snippet was created
/// - `expires` - Timestamp after which the snippet is no longer served
pub type SnippetModel = entity::snippet::Model;
