pub mod auth;
pub mod request_id;

pub use auth::{AuthenticatedUser, BearerAuth, extract_bearer_token};
pub use request_id::{RequestId, RequestIdMiddleware};
