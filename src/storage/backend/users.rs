//! 用户表读写

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter};
use tracing::{error, info};

use super::converters::{model_to_user, new_user_to_active_model};
use super::{SeaOrmStorage, is_unique_violation, retry};
use crate::errors::{Result, ShortmarkError};
use crate::storage::{NewUser, User};

use migration::entities::user;

impl SeaOrmStorage {
    /// 插入用户；username/email 唯一索引冲突返回 Conflict
    pub async fn insert_user(&self, new: &NewUser) -> Result<User> {
        let db = &self.db;
        let active = new_user_to_active_model(new, Utc::now());

        let model = retry::with_retry("insert_user", self.retry_config, || {
            let active = active.clone();
            async move { active.insert(db).await }
        })
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ShortmarkError::conflict("Username or email is taken")
            } else {
                error!("Failed to insert user: {}", e);
                ShortmarkError::database_operation(format!("Failed to insert user: {}", e))
            }
        })?;

        info!("User created: id={}", model.id);
        Ok(model_to_user(model))
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let condition = Condition::all().add(user::Column::Email.eq(email));
        self.find_user_where(condition, "find_user_by_email").await
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let condition = Condition::all().add(user::Column::Username.eq(username));
        self.find_user_where(condition, "find_user_by_username")
            .await
    }

    pub async fn find_user_by_id(&self, id: i32) -> Result<Option<User>> {
        let db = &self.db;
        let model = retry::with_retry("find_user_by_id", self.retry_config, || async {
            user::Entity::find_by_id(id).one(db).await
        })
        .await?;
        Ok(model.map(model_to_user))
    }

    async fn find_user_where(
        &self,
        condition: Condition,
        operation_name: &str,
    ) -> Result<Option<User>> {
        let db = &self.db;
        let model = retry::with_retry(operation_name, self.retry_config, || {
            let condition = condition.clone();
            async move { user::Entity::find().filter(condition).one(db).await }
        })
        .await?;
        Ok(model.map(model_to_user))
    }
}
