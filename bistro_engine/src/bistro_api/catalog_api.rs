use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{MenuItem, MenuItemUpdate, NewMenuItem, Review},
    traits::{CatalogApiError, CatalogManagement, DeleteResult, InsertResult, UpdateResult},
};

/// Menu and review access.
pub struct CatalogApi<B> {
    db: B,
}

impl<B: Debug> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi ({:?})", self.db)
    }
}

fn validate_item(item: &NewMenuItem) -> Result<(), CatalogApiError> {
    if item.name.trim().is_empty() {
        return Err(CatalogApiError::InvalidMenuItem("name cannot be empty".into()));
    }
    if !item.price.is_finite() || item.price < 0.0 {
        return Err(CatalogApiError::InvalidMenuItem(format!("{} is not a valid price", item.price)));
    }
    Ok(())
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn menu(&self) -> Result<Vec<MenuItem>, CatalogApiError> {
        self.db.fetch_menu().await
    }

    pub async fn menu_item(&self, id: i64) -> Result<Option<MenuItem>, CatalogApiError> {
        self.db.fetch_menu_item(id).await
    }

    pub async fn add_menu_item(&self, item: NewMenuItem) -> Result<InsertResult, CatalogApiError> {
        validate_item(&item)?;
        let id = self.db.insert_menu_item(item).await?;
        info!("Menu item #{id} added");
        Ok(InsertResult::new(id))
    }

    pub async fn update_menu_item(&self, id: i64, update: MenuItemUpdate) -> Result<UpdateResult, CatalogApiError> {
        validate_item(&update)?;
        self.db.update_menu_item(id, update).await
    }

    pub async fn delete_menu_item(&self, id: i64) -> Result<DeleteResult, CatalogApiError> {
        self.db.delete_menu_item(id).await
    }

    pub async fn reviews(&self) -> Result<Vec<Review>, CatalogApiError> {
        self.db.fetch_reviews().await
    }
}
