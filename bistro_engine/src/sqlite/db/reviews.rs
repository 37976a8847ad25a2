use sqlx::SqliteConnection;

use crate::db_types::Review;

pub async fn fetch_all(conn: &mut SqliteConnection) -> Result<Vec<Review>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM reviews ORDER BY id").fetch_all(conn).await
}

/// Reviews are curated outside of the web API, so this is only used to seed the database.
pub async fn insert(name: &str, details: &str, rating: f64, conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO reviews (name, details, rating) VALUES ($1, $2, $3)")
        .bind(name)
        .bind(details)
        .bind(rating)
        .execute(conn)
        .await?;
    Ok(result.last_insert_rowid())
}
