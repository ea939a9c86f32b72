use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, FromRow)]
pub struct Item {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

#[derive(Debug)]
pub struct NewItem {
    pub title: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub is_active: bool,
}

impl Item {
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Item>, AppError> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, title, description, price, is_active, created_at, updated_at
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(item)
    }

    pub async fn list(db: &PgPool, limit: i64, offset: i64) -> Result<Vec<Item>, AppError> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, title, description, price, is_active, created_at, updated_at
            FROM items
            ORDER BY created_at
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(items)
    }

    pub async fn insert(db: &PgPool, new: &NewItem) -> Result<Item, AppError> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (title, description, price, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, price, is_active, created_at, updated_at
            "#,
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.price)
        .bind(new.is_active)
        .fetch_one(db)
        .await?;
        Ok(item)
    }

    pub async fn update(db: &PgPool, item: &Item) -> Result<Item, AppError> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET title = $2, description = $3, price = $4, is_active = $5, updated_at = now()
            WHERE id = $1
            RETURNING id, title, description, price, is_active, created_at, updated_at
            "#,
        )
        .bind(item.id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.price)
        .bind(item.is_active)
        .fetch_one(db)
        .await?;
        Ok(item)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
