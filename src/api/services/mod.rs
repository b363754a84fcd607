pub mod auth;
pub mod bookmarks;
pub mod health;
pub mod helpers;
pub mod redirect;
pub mod routes;
pub mod types;

pub use routes::{api_v1_routes, configure_routes};
