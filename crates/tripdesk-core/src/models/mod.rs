pub mod auth;
pub mod trip;

pub use auth::Claims;
pub use trip::{Trip, UploadedImage};
