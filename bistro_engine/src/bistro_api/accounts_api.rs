//! Unifies API for registering and managing principals.
use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewUser, UserAccount},
    traits::{AccountApiError, AccountManagement, DeleteResult, InsertUserResult},
};

/// The `AccountApi` provides a unified API for principals (user accounts).
pub struct AccountApi<B> {
    db: B,
}

impl<B: Debug> Debug for AccountApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccountApi ({:?})", self.db)
    }
}

impl<B> AccountApi<B>
where B: AccountManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Registers a principal on first sign-in. Registering an email that is already known does nothing, and is
    /// reported as [`InsertUserResult::AlreadyExists`].
    pub async fn register(&self, user: NewUser) -> Result<InsertUserResult, AccountApiError> {
        if user.email.trim().is_empty() {
            return Err(AccountApiError::QueryError("An email address is required to register".into()));
        }
        let result = self.db.insert_user_if_absent(user).await?;
        trace!("Registration result: {result:?}");
        Ok(result)
    }

    pub async fn users(&self) -> Result<Vec<UserAccount>, AccountApiError> {
        self.db.fetch_users().await
    }

    pub async fn user_by_email(&self, email: &str) -> Result<Option<UserAccount>, AccountApiError> {
        self.db.fetch_user_by_email(email).await
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<DeleteResult, AccountApiError> {
        self.db.delete_user(user_id).await
    }
}
