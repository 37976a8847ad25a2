use sqlx::SqliteConnection;

use crate::{
    db_types::{MenuItem, MenuItemUpdate, NewMenuItem},
    traits::{DeleteResult, UpdateResult},
};

pub async fn fetch_all(conn: &mut SqliteConnection) -> Result<Vec<MenuItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM menu ORDER BY id").fetch_all(conn).await
}

pub async fn fetch_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<MenuItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM menu WHERE id = $1").bind(id).fetch_optional(conn).await
}

pub async fn insert(item: NewMenuItem, conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO menu (name, category, price, recipe, image) VALUES ($1, $2, $3, $4, $5)")
        .bind(item.name)
        .bind(item.category)
        .bind(item.price)
        .bind(item.recipe)
        .bind(item.image)
        .execute(conn)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Overwrites the item's fields. Run inside a transaction: the item is read first so that an update that changes
/// nothing reports a zero `modified_count`.
pub async fn update(id: i64, update: MenuItemUpdate, conn: &mut SqliteConnection) -> Result<UpdateResult, sqlx::Error> {
    let Some(existing) = fetch_by_id(id, &mut *conn).await? else {
        return Ok(UpdateResult::new(0, 0));
    };
    let unchanged = existing.name == update.name &&
        existing.category == update.category &&
        existing.price == update.price &&
        existing.recipe == update.recipe &&
        existing.image == update.image;
    if unchanged {
        return Ok(UpdateResult::new(1, 0));
    }
    let result =
        sqlx::query("UPDATE menu SET name = $1, category = $2, price = $3, recipe = $4, image = $5 WHERE id = $6")
            .bind(update.name)
            .bind(update.category)
            .bind(update.price)
            .bind(update.recipe)
            .bind(update.image)
            .bind(id)
            .execute(conn)
            .await?;
    Ok(UpdateResult::new(1, result.rows_affected()))
}

pub async fn delete(id: i64, conn: &mut SqliteConnection) -> Result<DeleteResult, sqlx::Error> {
    let result = sqlx::query("DELETE FROM menu WHERE id = $1").bind(id).execute(conn).await?;
    Ok(DeleteResult::new(result.rows_affected()))
}
