//! Service layer for business logic
//!
//! HTTP handlers stay thin: they parse input, call one of these services and
//! shape the result.

pub mod auth_service;
pub mod bookmark_service;
pub mod short_code;
pub mod user_service;

pub use auth_service::{AuthService, LoginResult, UserProfile};
pub use bookmark_service::{
    BookmarkList, BookmarkService, PageMeta, UpdateBookmarkRequest, clamp_pagination,
};
pub use short_code::{CodeGenerator, CodeRegistry, SHORT_CODE_LENGTH, ShortCodeAllocator};
pub use user_service::{RegisterRequest, UserService};
