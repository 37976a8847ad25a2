//! Cart entries.
//!
//! Bulk operations take a list of ids and build an `IN (...)` clause. An empty list never reaches the database.
use log::*;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::{
    db_types::{CartEntry, NewCartEntry},
    traits::{CartOwner, DeleteResult},
};

pub async fn insert(entry: NewCartEntry, conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO carts (email, menu_id, name, image, price) VALUES ($1, $2, $3, $4, $5)")
        .bind(entry.email)
        .bind(entry.menu_id)
        .bind(entry.name)
        .bind(entry.image)
        .bind(entry.price)
        .execute(conn)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn fetch_for_email(email: &str, conn: &mut SqliteConnection) -> Result<Vec<CartEntry>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM carts WHERE email = $1 ORDER BY id").bind(email).fetch_all(conn).await
}

pub async fn delete(id: i64, conn: &mut SqliteConnection) -> Result<DeleteResult, sqlx::Error> {
    let result = sqlx::query("DELETE FROM carts WHERE id = $1").bind(id).execute(conn).await?;
    Ok(DeleteResult::new(result.rows_affected()))
}

fn push_id_list(qb: &mut QueryBuilder<'_, Sqlite>, ids: &[i64]) {
    qb.push("(");
    let mut values = qb.separated(", ");
    ids.iter().for_each(|id| {
        values.push_bind(*id);
    });
    qb.push(")");
}

pub async fn fetch_owners(ids: &[i64], conn: &mut SqliteConnection) -> Result<Vec<CartOwner>, sqlx::Error> {
    if ids.is_empty() {
        return Ok(vec![]);
    }
    let mut qb = QueryBuilder::new("SELECT id, email FROM carts WHERE id IN ");
    push_id_list(&mut qb, ids);
    qb.build_query_as().fetch_all(conn).await
}

/// Deletes the cart entries in `ids` that belong to `email`.
pub async fn purge(email: &str, ids: &[i64], conn: &mut SqliteConnection) -> Result<DeleteResult, sqlx::Error> {
    if ids.is_empty() {
        return Ok(DeleteResult::new(0));
    }
    let mut qb = QueryBuilder::new("DELETE FROM carts WHERE email = ");
    qb.push_bind(email);
    qb.push(" AND id IN ");
    push_id_list(&mut qb, ids);
    let result = qb.build().execute(conn).await?;
    trace!("🗃️ Purged {} of {} cart entries for {email}", result.rows_affected(), ids.len());
    Ok(DeleteResult::new(result.rows_affected()))
}
