use sea_orm::ActiveValue::{NotSet, Set};

use crate::storage::{Bookmark, NewBookmark, NewUser, User};
use migration::entities::{bookmark, user};

pub fn model_to_bookmark(model: bookmark::Model) -> Bookmark {
    Bookmark {
        id: model.id,
        url: model.url,
        short_url: model.short_url,
        body: model.body,
        visits: model.visits.max(0),
        user_id: model.user_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn model_to_user(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password: model.password,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// 新书签：id 由数据库分配，visits 从 0 开始
pub fn new_bookmark_to_active_model(
    new: &NewBookmark,
    now: chrono::DateTime<chrono::Utc>,
) -> bookmark::ActiveModel {
    bookmark::ActiveModel {
        id: NotSet,
        body: Set(new.body.clone()),
        url: Set(new.url.clone()),
        short_url: Set(new.short_url.clone()),
        visits: Set(0),
        user_id: Set(new.user_id),
        created_at: Set(now),
        updated_at: Set(None),
    }
}

pub fn new_user_to_active_model(
    new: &NewUser,
    now: chrono::DateTime<chrono::Utc>,
) -> user::ActiveModel {
    user::ActiveModel {
        id: NotSet,
        username: Set(new.username.clone()),
        email: Set(new.email.clone()),
        password: Set(new.password_hash.clone()),
        created_at: Set(now),
        updated_at: Set(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::ActiveValue;

    #[test]
    fn test_model_to_bookmark() {
        let now = Utc::now();
        let model = bookmark::Model {
            id: 7,
            body: "notes".to_string(),
            url: "https://example.com".to_string(),
            short_url: "aZ3".to_string(),
            visits: 12,
            user_id: 2,
            created_at: now,
            updated_at: None,
        };

        let bookmark = model_to_bookmark(model);
        assert_eq!(bookmark.id, 7);
        assert_eq!(bookmark.short_url, "aZ3");
        assert_eq!(bookmark.visits, 12);
        assert_eq!(bookmark.user_id, 2);
        assert_eq!(bookmark.created_at, now);
        assert!(bookmark.updated_at.is_none());
    }

    #[test]
    fn test_new_bookmark_starts_with_zero_visits() {
        let new = NewBookmark {
            user_id: 1,
            url: "https://example.com".to_string(),
            body: String::new(),
            short_url: "q1W".to_string(),
        };

        let active = new_bookmark_to_active_model(&new, Utc::now());
        assert_eq!(active.visits, ActiveValue::Set(0));
        assert_eq!(active.id, ActiveValue::NotSet);
        assert_eq!(active.updated_at, ActiveValue::Set(None));
        assert_eq!(active.short_url, ActiveValue::Set("q1W".to_string()));
    }

    #[test]
    fn test_model_to_user_keeps_hash() {
        let model = user::Model {
            id: 1,
            username: "alice".to_string(),
            email: "a@x.io".to_string(),
            password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            created_at: Utc::now(),
            updated_at: None,
        };

        let user = model_to_user(model);
        assert_eq!(user.username, "alice");
        assert!(user.password.starts_with("$argon2"));
    }
}
