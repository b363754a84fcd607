pub mod bookmark;
pub mod user;

pub use bookmark::Entity as BookmarkEntity;
pub use user::Entity as UserEntity;
