use thiserror::Error;

use crate::{
    db_types::{MenuItem, MenuItemUpdate, NewMenuItem, Review},
    traits::{DeleteResult, UpdateResult},
};

#[derive(Debug, Clone, Error)]
pub enum CatalogApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Invalid menu item: {0}")]
    InvalidMenuItem(String),
}

impl From<sqlx::Error> for CatalogApiError {
    fn from(e: sqlx::Error) -> Self {
        CatalogApiError::DatabaseError(e.to_string())
    }
}

/// The `CatalogManagement` trait defines behaviour for the restaurant's menu and its reviews.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    async fn fetch_menu(&self) -> Result<Vec<MenuItem>, CatalogApiError>;

    /// Fetches a single menu item. An unknown id is not an error and returns `None`.
    async fn fetch_menu_item(&self, id: i64) -> Result<Option<MenuItem>, CatalogApiError>;

    /// Stores a new menu item and returns its id.
    async fn insert_menu_item(&self, item: NewMenuItem) -> Result<i64, CatalogApiError>;

    /// Overwrites every client-editable field of the menu item.
    async fn update_menu_item(&self, id: i64, update: MenuItemUpdate) -> Result<UpdateResult, CatalogApiError>;

    async fn delete_menu_item(&self, id: i64) -> Result<DeleteResult, CatalogApiError>;

    async fn fetch_reviews(&self) -> Result<Vec<Review>, CatalogApiError>;
}
