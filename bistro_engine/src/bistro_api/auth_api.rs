use std::fmt::Debug;

use log::*;

use crate::{
    db_types::Role,
    traits::{AuthApiError, AuthManagement, UpdateResult},
};

/// The role resolver. `AuthApi` answers "is this principal an administrator?" with a single store lookup.
pub struct AuthApi<B> {
    db: B,
}

impl<B: Debug> Debug for AuthApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthApi ({:?})", self.db)
    }
}

impl<B> AuthApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> AuthApi<B>
where B: AuthManagement
{
    /// The role of the principal with the given email. Unknown principals have the `Regular` role.
    pub async fn role_for_email(&self, email: &str) -> Result<Role, AuthApiError> {
        let role = self.db.fetch_role_for_email(email).await?;
        Ok(role.unwrap_or_default())
    }

    /// `true` iff the stored role for `email` is `Admin`. An unknown principal is not an error; it is simply not an
    /// admin.
    pub async fn is_admin(&self, email: &str) -> Result<bool, AuthApiError> {
        let role = self.role_for_email(email).await?;
        trace!("🔐️ {email} has role {role}");
        Ok(role == Role::Admin)
    }

    /// Grants the admin role to the principal with the given id. Roles are never implicitly demoted.
    pub async fn promote_to_admin(&self, user_id: i64) -> Result<UpdateResult, AuthApiError> {
        let result = self.db.assign_role(user_id, Role::Admin).await?;
        if result.modified_count > 0 {
            info!("🔐️ User #{user_id} has been promoted to admin");
        }
        Ok(result)
    }
}
