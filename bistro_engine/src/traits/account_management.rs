use thiserror::Error;

use crate::{
    db_types::{NewUser, UserAccount},
    traits::{DeleteResult, InsertUserResult},
};

#[derive(Debug, Clone, Error)]
pub enum AccountApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("User error constructing query: {0}")]
    QueryError(String),
}

impl From<sqlx::Error> for AccountApiError {
    fn from(e: sqlx::Error) -> Self {
        AccountApiError::DatabaseError(e.to_string())
    }
}

/// The `AccountManagement` trait defines behaviour for registering and managing principals (user accounts).
///
/// The email address is the business key for a principal. A backend must never store two principals with the same
/// email.
#[allow(async_fn_in_trait)]
pub trait AccountManagement {
    /// Stores the new principal if no principal with the same email exists yet. New principals always get the
    /// `Regular` role. An existing principal is left untouched and its id is returned as
    /// [`InsertUserResult::AlreadyExists`].
    async fn insert_user_if_absent(&self, user: NewUser) -> Result<InsertUserResult, AccountApiError>;

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, AccountApiError>;

    async fn fetch_users(&self) -> Result<Vec<UserAccount>, AccountApiError>;

    async fn delete_user(&self, user_id: i64) -> Result<DeleteResult, AccountApiError>;
}
