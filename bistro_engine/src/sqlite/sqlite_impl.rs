//! `SqliteDatabase` is a concrete implementation of a Bistro engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the storage traits defined in the
//! [`crate::traits`] module.
use std::fmt::Debug;

use log::*;
use sqlx::{migrate, SqlitePool};

use super::db::{carts, menu, new_pool, payments, reviews, stats, users};
use crate::{
    db_types::{
        CartEntry,
        MenuItem,
        MenuItemUpdate,
        NewCartEntry,
        NewMenuItem,
        NewPayment,
        NewUser,
        Payment,
        Review,
        Role,
        UserAccount,
    },
    traits::{
        AccountApiError,
        AccountManagement,
        AuthApiError,
        AuthManagement,
        CartApiError,
        CartManagement,
        CartOwner,
        CatalogApiError,
        CatalogManagement,
        DeleteResult,
        InsertUserResult,
        PaymentGatewayDatabase,
        PaymentGatewayError,
        ReportingError,
        ReportingManagement,
        Stats,
        UpdateResult,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl AuthManagement for SqliteDatabase {
    async fn fetch_role_for_email(&self, email: &str) -> Result<Option<Role>, AuthApiError> {
        let mut conn = self.pool.acquire().await?;
        let role = users::role_for_email(email, &mut conn).await?;
        Ok(role)
    }

    async fn assign_role(&self, user_id: i64, role: Role) -> Result<UpdateResult, AuthApiError> {
        let mut tx = self.pool.begin().await?;
        let result = users::assign_role(user_id, role, &mut tx).await?;
        tx.commit().await?;
        Ok(result)
    }
}

impl AccountManagement for SqliteDatabase {
    async fn insert_user_if_absent(&self, user: NewUser) -> Result<InsertUserResult, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let result = users::insert_if_absent(user, &mut conn).await?;
        Ok(result)
    }

    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<UserAccount>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let user = users::fetch_by_email(email, &mut conn).await?;
        Ok(user)
    }

    async fn fetch_users(&self) -> Result<Vec<UserAccount>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let users = users::fetch_all(&mut conn).await?;
        Ok(users)
    }

    async fn delete_user(&self, user_id: i64) -> Result<DeleteResult, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        let result = users::delete(user_id, &mut conn).await?;
        debug!("🗃️ Deleted {} user(s) with id {user_id}", result.deleted_count);
        Ok(result)
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn fetch_menu(&self) -> Result<Vec<MenuItem>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let items = menu::fetch_all(&mut conn).await?;
        Ok(items)
    }

    async fn fetch_menu_item(&self, id: i64) -> Result<Option<MenuItem>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let item = menu::fetch_by_id(id, &mut conn).await?;
        Ok(item)
    }

    async fn insert_menu_item(&self, item: NewMenuItem) -> Result<i64, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let name = item.name.clone();
        let id = menu::insert(item, &mut conn).await?;
        debug!("🗃️ Menu item '{name}' saved with id {id}");
        Ok(id)
    }

    async fn update_menu_item(&self, id: i64, update: MenuItemUpdate) -> Result<UpdateResult, CatalogApiError> {
        let mut tx = self.pool.begin().await?;
        let result = menu::update(id, update, &mut tx).await?;
        tx.commit().await?;
        Ok(result)
    }

    async fn delete_menu_item(&self, id: i64) -> Result<DeleteResult, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let result = menu::delete(id, &mut conn).await?;
        Ok(result)
    }

    async fn fetch_reviews(&self) -> Result<Vec<Review>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let reviews = reviews::fetch_all(&mut conn).await?;
        Ok(reviews)
    }
}

impl CartManagement for SqliteDatabase {
    async fn insert_cart_entry(&self, entry: NewCartEntry) -> Result<i64, CartApiError> {
        let mut conn = self.pool.acquire().await?;
        let id = carts::insert(entry, &mut conn).await?;
        Ok(id)
    }

    async fn fetch_cart_for_email(&self, email: &str) -> Result<Vec<CartEntry>, CartApiError> {
        let mut conn = self.pool.acquire().await?;
        let entries = carts::fetch_for_email(email, &mut conn).await?;
        Ok(entries)
    }

    async fn delete_cart_entry(&self, id: i64) -> Result<DeleteResult, CartApiError> {
        let mut conn = self.pool.acquire().await?;
        let result = carts::delete(id, &mut conn).await?;
        Ok(result)
    }
}

impl PaymentGatewayDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn fetch_cart_owners(&self, ids: &[i64]) -> Result<Vec<CartOwner>, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        let owners = carts::fetch_owners(ids, &mut conn).await?;
        Ok(owners)
    }

    async fn insert_payment(&self, payment: NewPayment) -> Result<(Payment, bool), PaymentGatewayError> {
        let mut tx = self.pool.begin().await?;
        let (payment, inserted) = payments::idempotent_insert(payment, &mut tx).await?;
        tx.commit().await?;
        if inserted {
            debug!("🗃️ Payment #{} for transaction {} has been saved in the DB", payment.id, payment.transaction_id);
        }
        Ok((payment, inserted))
    }

    async fn purge_cart_entries(&self, email: &str, ids: &[i64]) -> Result<DeleteResult, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        let result = carts::purge(email, ids, &mut conn).await?;
        Ok(result)
    }

    async fn mark_payment_settled(&self, payment_id: i64) -> Result<Payment, PaymentGatewayError> {
        let mut tx = self.pool.begin().await?;
        let payment = payments::mark_settled(payment_id, &mut tx).await?;
        tx.commit().await?;
        Ok(payment)
    }

    async fn fetch_pending_payments(&self) -> Result<Vec<Payment>, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        let pending = payments::fetch_pending(&mut conn).await?;
        Ok(pending)
    }

    async fn fetch_payments_for_email(&self, email: &str) -> Result<Vec<Payment>, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        let payments = payments::fetch_for_email(email, &mut conn).await?;
        Ok(payments)
    }
}

impl ReportingManagement for SqliteDatabase {
    async fn fetch_stats(&self) -> Result<Stats, ReportingError> {
        let mut conn = self.pool.acquire().await?;
        let stats = stats::fetch_stats(&mut conn).await?;
        Ok(stats)
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("🗃️ Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Brings the schema up to date. Safe to call on every start-up.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Migrations complete");
        Ok(())
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
