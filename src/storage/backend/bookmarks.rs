//! 书签表读写
//!
//! 所有按 id 的读写都把 `user_id` 放进同一条语句的 WHERE 条件，
//! 不属于调用者的书签与不存在的书签表现一致。

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, ExprTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use tracing::{debug, error, info};

use super::converters::{model_to_bookmark, new_bookmark_to_active_model};
use super::{SeaOrmStorage, is_unique_violation, retry};
use crate::errors::{Result, ShortmarkError};
use crate::storage::{Bookmark, BookmarkPage, NewBookmark};

use migration::entities::bookmark;

/// 书签字段修改（None 表示保持原值）
#[derive(Debug, Clone, Default)]
pub struct BookmarkChanges {
    pub url: Option<String>,
    pub body: Option<String>,
}

fn map_write_error(operation: &str, err: sea_orm::DbErr) -> ShortmarkError {
    if is_unique_violation(&err) {
        ShortmarkError::conflict("Bookmark with this url already exists")
    } else {
        error!("{} failed: {}", operation, err);
        ShortmarkError::database_operation(format!("{} failed: {}", operation, err))
    }
}

impl SeaOrmStorage {
    pub async fn short_url_exists(&self, code: &str) -> Result<bool> {
        let db = &self.db;
        let count = retry::with_retry("short_url_exists", self.retry_config, || async {
            bookmark::Entity::find()
                .filter(bookmark::Column::ShortUrl.eq(code))
                .count(db)
                .await
        })
        .await?;
        Ok(count > 0)
    }

    /// url 是否已被书签占用；`exclude_id` 用于更新时排除自身
    pub async fn url_exists(&self, url: &str, exclude_id: Option<i32>) -> Result<bool> {
        let db = &self.db;
        let count = retry::with_retry("url_exists", self.retry_config, || async {
            let mut query = bookmark::Entity::find().filter(bookmark::Column::Url.eq(url));
            if let Some(id) = exclude_id {
                query = query.filter(bookmark::Column::Id.ne(id));
            }
            query.count(db).await
        })
        .await?;
        Ok(count > 0)
    }

    /// 插入书签；url 或 short_url 唯一索引冲突返回 Conflict
    pub async fn insert_bookmark(&self, new: &NewBookmark) -> Result<Bookmark> {
        let db = &self.db;
        let active = new_bookmark_to_active_model(new, Utc::now());

        let model = retry::with_retry("insert_bookmark", self.retry_config, || {
            let active = active.clone();
            async move { active.insert(db).await }
        })
        .await
        .map_err(|e| map_write_error("insert_bookmark", e))?;

        info!(
            "Bookmark created: id={} short_url={} user_id={}",
            model.id, model.short_url, model.user_id
        );
        Ok(model_to_bookmark(model))
    }

    pub async fn find_owned_bookmark(&self, user_id: i32, id: i32) -> Result<Option<Bookmark>> {
        Ok(self
            .find_owned_model(user_id, id)
            .await?
            .map(model_to_bookmark))
    }

    async fn find_owned_model(&self, user_id: i32, id: i32) -> Result<Option<bookmark::Model>> {
        let db = &self.db;
        let model = retry::with_retry("find_owned_bookmark", self.retry_config, || async {
            bookmark::Entity::find()
                .filter(bookmark::Column::Id.eq(id))
                .filter(bookmark::Column::UserId.eq(user_id))
                .one(db)
                .await
        })
        .await?;
        Ok(model)
    }

    /// 按 id 升序分页；`page` 从 1 开始
    pub async fn list_owned_bookmarks(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<BookmarkPage> {
        let db = &self.db;
        let (models, total) =
            retry::with_retry("list_owned_bookmarks", self.retry_config, || async {
                let paginator = bookmark::Entity::find()
                    .filter(bookmark::Column::UserId.eq(user_id))
                    .order_by_asc(bookmark::Column::Id)
                    .paginate(db, per_page);
                let total = paginator.num_items().await?;
                let models = paginator.fetch_page(page.saturating_sub(1)).await?;
                Ok::<_, sea_orm::DbErr>((models, total))
            })
            .await?;

        debug!(
            "Listed {} of {} bookmarks for user {} (page {}, per_page {})",
            models.len(),
            total,
            user_id,
            page,
            per_page
        );
        Ok(BookmarkPage {
            items: models.into_iter().map(model_to_bookmark).collect(),
            total,
        })
    }

    /// 修改书签 url/body；short_url 与 visits 不变
    pub async fn update_owned_bookmark(
        &self,
        user_id: i32,
        id: i32,
        changes: BookmarkChanges,
    ) -> Result<Option<Bookmark>> {
        let db = &self.db;
        let Some(current) = self.find_owned_model(user_id, id).await? else {
            return Ok(None);
        };

        let mut active: bookmark::ActiveModel = current.into();
        if let Some(url) = changes.url {
            active.url = Set(url);
        }
        if let Some(body) = changes.body {
            active.body = Set(body);
        }
        active.updated_at = Set(Some(Utc::now()));

        let model = retry::with_retry("update_owned_bookmark", self.retry_config, || {
            let active = active.clone();
            async move { active.update(db).await }
        })
        .await
        .map_err(|e| map_write_error("update_owned_bookmark", e))?;

        info!("Bookmark updated: id={} user_id={}", model.id, user_id);
        Ok(Some(model_to_bookmark(model)))
    }

    /// 删除书签；返回是否删除了记录
    pub async fn delete_owned_bookmark(&self, user_id: i32, id: i32) -> Result<bool> {
        let db = &self.db;
        let result = retry::with_retry("delete_owned_bookmark", self.retry_config, || async {
            bookmark::Entity::delete_many()
                .filter(bookmark::Column::Id.eq(id))
                .filter(bookmark::Column::UserId.eq(user_id))
                .exec(db)
                .await
        })
        .await
        .map_err(|e| map_write_error("delete_owned_bookmark", e))?;

        if result.rows_affected == 0 {
            return Ok(false);
        }
        info!("Bookmark deleted: id={} user_id={}", id, user_id);
        Ok(true)
    }

    /// visits + 1 并返回目标 url
    pub async fn resolve_and_visit(&self, code: &str) -> Result<Option<String>> {
        let db = &self.db;
        let result = retry::with_retry("resolve_and_visit", self.retry_config, || async {
            bookmark::Entity::update_many()
                .col_expr(
                    bookmark::Column::Visits,
                    Expr::col(bookmark::Column::Visits).add(1),
                )
                .filter(bookmark::Column::ShortUrl.eq(code))
                .exec(db)
                .await
        })
        .await
        .map_err(|e| map_write_error("resolve_and_visit", e))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let url = retry::with_retry("resolve_url", self.retry_config, || async {
            bookmark::Entity::find()
                .select_only()
                .column(bookmark::Column::Url)
                .filter(bookmark::Column::ShortUrl.eq(code))
                .into_tuple::<String>()
                .one(db)
                .await
        })
        .await?;
        Ok(url)
    }
}
