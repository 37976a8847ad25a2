use std::fmt::Debug;

use crate::{
    db_types::{CartEntry, NewCartEntry},
    traits::{CartApiError, CartManagement, DeleteResult, InsertResult},
};

pub struct CartApi<B> {
    db: B,
}

impl<B: Debug> Debug for CartApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CartApi ({:?})", self.db)
    }
}

impl<B> CartApi<B>
where B: CartManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn add(&self, entry: NewCartEntry) -> Result<InsertResult, CartApiError> {
        let id = self.db.insert_cart_entry(entry).await?;
        Ok(InsertResult::new(id))
    }

    pub async fn cart_for_email(&self, email: &str) -> Result<Vec<CartEntry>, CartApiError> {
        self.db.fetch_cart_for_email(email).await
    }

    pub async fn remove(&self, id: i64) -> Result<DeleteResult, CartApiError> {
        self.db.delete_cart_entry(id).await
    }
}
