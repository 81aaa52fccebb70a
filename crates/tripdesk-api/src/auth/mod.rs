pub mod jwt;
pub mod middleware;
pub mod models;

pub use middleware::{require_auth, AuthConfig};
pub use models::AuthUser;
