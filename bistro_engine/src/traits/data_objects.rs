use bistro_common::Cents;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Acknowledges a newly stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: i64,
}

impl InsertResult {
    pub fn new(inserted_id: i64) -> Self {
        Self { acknowledged: true, inserted_id }
    }
}

/// Removal of a record that does not exist is reported as a zero count rather than an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self { acknowledged: true, deleted_count }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl UpdateResult {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self { acknowledged: true, matched_count, modified_count }
    }
}

/// The result of registering a principal. Registration never overwrites an existing record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertUserResult {
    Inserted(i64),
    AlreadyExists(i64),
}

/// The owner of a single cart entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CartOwner {
    pub id: i64,
    pub email: String,
}

/// Dashboard figures. Derived on request, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub users: i64,
    pub menu_items: i64,
    pub orders: i64,
    pub revenue: f64,
}

/// A confirmable payment handle created by the payment provider. Only the client secret leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntentHandle {
    pub id: String,
    pub client_secret: String,
    pub amount: Cents,
    pub currency: String,
}
