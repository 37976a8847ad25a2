//! Data types that are persisted by the storage backends.
//!
//! All types serialize with camelCase keys, since that is what the web client sends and expects.
use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "sqlite")]
use sqlx::{sqlite::SqliteRow, Row};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------        Role         ---------------------------------------------------------
/// A principal is either a regular customer or an administrator. A missing role is read as `Regular`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Regular,
    Admin,
}

#[derive(Debug, Clone, Error)]
#[error("Invalid role: {0}")]
pub struct RoleParseError(String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regular" => Ok(Self::Regular),
            "admin" => Ok(Self::Admin),
            s => Err(RoleParseError(s.to_string())),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Regular => write!(f, "regular"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

//--------------------------------------    UserAccount      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "photoURL", alias = "photoUrl")]
    pub photo_url: Option<String>,
}

impl NewUser {
    pub fn new<S: Into<String>>(email: S) -> Self {
        Self { email: email.into(), ..Default::default() }
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_photo_url<S: Into<String>>(mut self, url: S) -> Self {
        self.photo_url = Some(url.into());
        self
    }
}

//--------------------------------------      MenuItem       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub recipe: String,
    pub image: String,
}

/// The fields of a menu item that a client supplies. Also used for updates, which overwrite every field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub recipe: String,
    #[serde(default)]
    pub image: String,
}

pub type MenuItemUpdate = NewMenuItem;

impl NewMenuItem {
    pub fn new<S1: Into<String>, S2: Into<String>>(name: S1, category: S2, price: f64) -> Self {
        Self { name: name.into(), category: category.into(), price, ..Default::default() }
    }

    pub fn with_recipe<S: Into<String>>(mut self, recipe: S) -> Self {
        self.recipe = recipe.into();
        self
    }

    pub fn with_image<S: Into<String>>(mut self, image: S) -> Self {
        self.image = image.into();
        self
    }
}

//--------------------------------------       Review        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub name: String,
    pub details: String,
    pub rating: f64,
}

//--------------------------------------     CartEntry       ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub id: i64,
    pub email: String,
    pub menu_id: i64,
    pub name: String,
    pub image: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartEntry {
    pub email: String,
    pub menu_id: i64,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub price: f64,
}

impl NewCartEntry {
    pub fn new<S1: Into<String>, S2: Into<String>>(email: S1, menu_id: i64, name: S2, price: f64) -> Self {
        Self { email: email.into(), menu_id, name: name.into(), image: String::default(), price }
    }
}

//--------------------------------------  SettlementStatus   ---------------------------------------------------------
/// A payment is `Pending` from the moment it is recorded until the cart entries it pays for have been purged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum SettlementStatus {
    #[default]
    Pending,
    Settled,
}

impl Display for SettlementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettlementStatus::Pending => write!(f, "pending"),
            SettlementStatus::Settled => write!(f, "settled"),
        }
    }
}

//--------------------------------------      Payment        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub email: String,
    pub price: f64,
    pub transaction_id: String,
    pub cart_ids: Vec<i64>,
    pub menu_item_ids: Vec<i64>,
    pub settlement: SettlementStatus,
    pub date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn is_settled(&self) -> bool {
        self.settlement == SettlementStatus::Settled
    }
}

#[cfg(feature = "sqlite")]
fn id_list(row: &SqliteRow, column: &str) -> Result<Vec<i64>, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    serde_json::from_str(&raw)
        .map_err(|e| sqlx::Error::ColumnDecode { index: column.to_string(), source: Box::new(e) })
}

// The id sets are stored as JSON arrays, so the row mapping is written out by hand.
#[cfg(feature = "sqlite")]
impl<'r> FromRow<'r, SqliteRow> for Payment {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            price: row.try_get("price")?,
            transaction_id: row.try_get("transaction_id")?,
            cart_ids: id_list(row, "cart_ids")?,
            menu_item_ids: id_list(row, "menu_item_ids")?,
            settlement: row.try_get("settlement")?,
            date: row.try_get("date")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// The settlement payload a client posts once the card payment has been confirmed by the payment provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub email: String,
    pub price: f64,
    pub transaction_id: String,
    pub cart_ids: Vec<i64>,
    #[serde(default)]
    pub menu_item_ids: Vec<i64>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl NewPayment {
    pub fn new<S1, S2>(email: S1, price: f64, transaction_id: S2, cart_ids: Vec<i64>) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self {
            email: email.into(),
            price,
            transaction_id: transaction_id.into(),
            cart_ids,
            menu_item_ids: vec![],
            date: None,
        }
    }

    pub fn with_menu_item_ids(mut self, ids: Vec<i64>) -> Self {
        self.menu_item_ids = ids;
        self
    }
}
