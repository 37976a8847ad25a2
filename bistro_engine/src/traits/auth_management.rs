use thiserror::Error;

use crate::{db_types::Role, traits::UpdateResult};

#[derive(Debug, Clone, Error)]
pub enum AuthApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("The stored role '{0}' is not recognised")]
    InvalidRole(String),
}

impl From<sqlx::Error> for AuthApiError {
    fn from(e: sqlx::Error) -> Self {
        AuthApiError::DatabaseError(e.to_string())
    }
}

/// The `AuthManagement` trait defines behaviour for resolving and changing principals' roles.
///
/// Authentication itself is stateless and happens at the server level. Authorisation for admin-only operations needs
/// exactly one lookup per request: [`fetch_role_for_email`].
#[allow(async_fn_in_trait)]
pub trait AuthManagement {
    /// Fetches the stored role for the principal with the given email. If the principal does not exist, the request
    /// still succeeds and returns `None`.
    async fn fetch_role_for_email(&self, email: &str) -> Result<Option<Role>, AuthApiError>;

    /// Sets the role for the principal with the given id. Absent principals are reported as a zero `matched_count`.
    /// Assigning the role a principal already has is a no-op, reported as a zero `modified_count`.
    async fn assign_role(&self, user_id: i64, role: Role) -> Result<UpdateResult, AuthApiError>;
}
