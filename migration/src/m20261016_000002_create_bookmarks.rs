use sea_orm_migration::prelude::*;

use crate::m20261016_000001_create_users::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookmark::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookmark::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Bookmark::Body)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    // 768 字符：MySQL utf8mb4 唯一索引上限 3072 字节
                    .col(ColumnDef::new(Bookmark::Url).string_len(768).not_null())
                    .col(ColumnDef::new(Bookmark::ShortUrl).string_len(3).not_null())
                    .col(
                        ColumnDef::new(Bookmark::Visits)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Bookmark::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(Bookmark::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookmark::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookmarks_user_id")
                            .from(Bookmark::Table, Bookmark::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bookmarks_url")
                    .table(Bookmark::Table)
                    .col(Bookmark::Url)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bookmarks_short_url")
                    .table(Bookmark::Table)
                    .col(Bookmark::ShortUrl)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 列表查询按 user_id 过滤
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bookmarks_user_id")
                    .table(Bookmark::Table)
                    .col(Bookmark::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_bookmarks_user_id")
                    .table(Bookmark::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_bookmarks_short_url")
                    .table(Bookmark::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_bookmarks_url")
                    .table(Bookmark::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Bookmark::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Bookmark {
    #[sea_orm(iden = "bookmarks")]
    Table,
    Id,
    Body,
    Url,
    ShortUrl,
    Visits,
    UserId,
    CreatedAt,
    UpdatedAt,
}
