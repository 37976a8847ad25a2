use chrono::Utc;
use log::*;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewPayment, Payment},
    traits::PaymentGatewayError,
};

/// Inserts the payment as `pending`, unless a payment with the same transaction id already exists, in which case
/// the existing record is returned. The boolean is `true` when a new record was written.
pub async fn idempotent_insert(
    payment: NewPayment,
    conn: &mut SqliteConnection,
) -> Result<(Payment, bool), PaymentGatewayError> {
    let cart_ids =
        serde_json::to_string(&payment.cart_ids).map_err(|e| PaymentGatewayError::EncodingError(e.to_string()))?;
    let menu_item_ids = serde_json::to_string(&payment.menu_item_ids)
        .map_err(|e| PaymentGatewayError::EncodingError(e.to_string()))?;
    let date = payment.date.unwrap_or_else(Utc::now);
    // RETURNING rows are read with fetch_all so the statement runs to completion before the connection is reused
    let mut inserted: Vec<Payment> = sqlx::query_as(
        r#"
            INSERT INTO payments (email, price, transaction_id, cart_ids, menu_item_ids, settlement, date)
            VALUES ($1, $2, $3, $4, $5, 'pending', $6)
            ON CONFLICT(transaction_id) DO NOTHING
            RETURNING *;
        "#,
    )
    .bind(&payment.email)
    .bind(payment.price)
    .bind(&payment.transaction_id)
    .bind(cart_ids)
    .bind(menu_item_ids)
    .bind(date)
    .fetch_all(&mut *conn)
    .await?;
    match inserted.pop() {
        Some(p) => Ok((p, true)),
        None => {
            debug!("🗃️ Payment for transaction {} already exists", payment.transaction_id);
            let existing = fetch_by_transaction_id(&payment.transaction_id, conn).await?.ok_or_else(|| {
                PaymentGatewayError::DatabaseError(format!(
                    "Payment for transaction {} was neither inserted nor found",
                    payment.transaction_id
                ))
            })?;
            Ok((existing, false))
        },
    }
}

pub async fn fetch_by_transaction_id(txid: &str, conn: &mut SqliteConnection) -> Result<Option<Payment>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM payments WHERE transaction_id = $1").bind(txid).fetch_optional(conn).await
}

pub async fn fetch_for_email(email: &str, conn: &mut SqliteConnection) -> Result<Vec<Payment>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM payments WHERE email = $1 ORDER BY date DESC, id DESC")
        .bind(email)
        .fetch_all(conn)
        .await
}

pub async fn fetch_pending(conn: &mut SqliteConnection) -> Result<Vec<Payment>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM payments WHERE settlement = 'pending' ORDER BY id").fetch_all(conn).await
}

pub async fn mark_settled(id: i64, conn: &mut SqliteConnection) -> Result<Payment, PaymentGatewayError> {
    let mut updated: Vec<Payment> = sqlx::query_as(
        "UPDATE payments SET settlement = 'settled', updated_at = CURRENT_TIMESTAMP WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_all(conn)
    .await?;
    updated.pop().ok_or(PaymentGatewayError::PaymentNotFound(id))
}
