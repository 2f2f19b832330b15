pub mod auth;

pub use auth::{auth_middleware, require_admin, AuthUser, CurrentUser};
