//! Principals (user accounts) and their roles.
//!
//! Generally clients should never call these methods directly, and prefer to use the [`AccountManagement`] and
//! [`AuthManagement`] trait methods that are implemented on the [`SqliteDatabase`] struct instead.
//!
//! [`AccountManagement`]: crate::traits::AccountManagement
//! [`AuthManagement`]: crate::traits::AuthManagement
//! [`SqliteDatabase`]: crate::SqliteDatabase
use log::*;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewUser, Role, UserAccount},
    traits::{DeleteResult, InsertUserResult, UpdateResult},
};

/// Inserts the principal unless one with the same email already exists. The existing record is never modified.
pub async fn insert_if_absent(user: NewUser, conn: &mut SqliteConnection) -> Result<InsertUserResult, sqlx::Error> {
    let result = sqlx::query(
        r#"
            INSERT INTO users (email, name, photo_url) VALUES ($1, $2, $3)
            ON CONFLICT(email) DO NOTHING
        "#,
    )
    .bind(&user.email)
    .bind(&user.name)
    .bind(&user.photo_url)
    .execute(&mut *conn)
    .await?;
    if result.rows_affected() == 1 {
        let id = result.last_insert_rowid();
        debug!("🗃️ New user {} saved with id {id}", user.email);
        return Ok(InsertUserResult::Inserted(id));
    }
    let id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE email = $1").bind(&user.email).fetch_one(conn).await?;
    trace!("🗃️ User {} already exists with id {id}", user.email);
    Ok(InsertUserResult::AlreadyExists(id))
}

pub async fn fetch_by_email(email: &str, conn: &mut SqliteConnection) -> Result<Option<UserAccount>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE email = $1").bind(email).fetch_optional(conn).await
}

pub async fn fetch_all(conn: &mut SqliteConnection) -> Result<Vec<UserAccount>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users ORDER BY id").fetch_all(conn).await
}

pub async fn delete(id: i64, conn: &mut SqliteConnection) -> Result<DeleteResult, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1").bind(id).execute(conn).await?;
    Ok(DeleteResult::new(result.rows_affected()))
}

pub async fn role_for_email(email: &str, conn: &mut SqliteConnection) -> Result<Option<Role>, sqlx::Error> {
    sqlx::query_scalar("SELECT role FROM users WHERE email = $1").bind(email).fetch_optional(conn).await
}

/// Sets the role of the principal. Run this inside a transaction, since the current role is read before it is
/// changed so that no-op updates can be reported as such.
pub async fn assign_role(id: i64, role: Role, conn: &mut SqliteConnection) -> Result<UpdateResult, sqlx::Error> {
    let current: Option<Role> =
        sqlx::query_scalar("SELECT role FROM users WHERE id = $1").bind(id).fetch_optional(&mut *conn).await?;
    match current {
        None => Ok(UpdateResult::new(0, 0)),
        Some(r) if r == role => Ok(UpdateResult::new(1, 0)),
        Some(_) => {
            let result =
                sqlx::query("UPDATE users SET role = $1 WHERE id = $2").bind(role).bind(id).execute(conn).await?;
            info!("🗃️ User #{id} now has the role '{role}'");
            Ok(UpdateResult::new(1, result.rows_affected()))
        },
    }
}
