use sqlx::SqliteConnection;

use crate::traits::Stats;

pub async fn fetch_stats(conn: &mut SqliteConnection) -> Result<Stats, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM users) AS users,
            (SELECT COUNT(*) FROM menu) AS menu_items,
            (SELECT COUNT(*) FROM payments) AS orders,
            (SELECT CAST(COALESCE(SUM(price), 0) AS REAL) FROM payments) AS revenue
        "#,
    )
    .fetch_one(conn)
    .await
}
