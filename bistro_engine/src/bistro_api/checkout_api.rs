//! Checkout: creating card payment intents, and settling completed payments against the buyer's cart.
//!
//! Settlement writes to two collections and the store offers no atomicity across them, so it follows an idempotent
//! settle-then-purge protocol:
//! 1. Every listed cart entry that still exists must belong to the paying principal, otherwise nothing is written.
//! 2. The payment is recorded as `pending`. Recording is idempotent on the transaction id.
//! 3. The listed cart entries owned by the payer are purged.
//! 4. The payment is marked `settled`.
//!
//! A failure in step 3 or 4 leaves the payment `pending`. [`CheckoutApi::reconcile`] retries steps 3 and 4 for every
//! pending payment.
use std::fmt::Debug;

use bistro_common::{Cents, DEFAULT_CURRENCY_CODE};
use log::*;

use crate::{
    bistro_api::{
        checkout_objects::{
            CheckoutResult,
            DeletionOutcome,
            PaymentAcknowledgement,
            ReconciliationFailure,
            ReconciliationReport,
        },
        errors::CheckoutError,
    },
    db_types::{NewPayment, Payment},
    traits::{DeleteResult, PaymentGatewayDatabase, PaymentGatewayError, PaymentIntentHandle, PaymentProvider},
};

pub struct CheckoutApi<B, P> {
    db: B,
    provider: P,
    currency: String,
}

impl<B, P> Debug for CheckoutApi<B, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CheckoutApi ({})", self.currency)
    }
}

impl<B, P> CheckoutApi<B, P> {
    pub fn new(db: B, provider: P) -> Self {
        Self { db, provider, currency: DEFAULT_CURRENCY_CODE.to_string() }
    }

    pub fn with_currency<S: Into<String>>(mut self, currency: S) -> Self {
        self.currency = currency.into();
        self
    }
}

impl<B, P> CheckoutApi<B, P>
where
    B: PaymentGatewayDatabase,
    P: PaymentProvider,
{
    /// Asks the payment provider for a confirmable payment handle for `price`, given in the major currency unit.
    /// The amount sent to the provider is `trunc(price × 100)` minor units.
    pub async fn create_payment_intent(&self, price: f64) -> Result<PaymentIntentHandle, CheckoutError> {
        let amount = Cents::from_price_truncated(price).map_err(|e| CheckoutError::InvalidAmount(e.to_string()))?;
        debug!("💳️ Requesting payment intent for {amount} {}", self.currency);
        let handle = self.provider.create_payment_intent(amount, &self.currency).await.map_err(|e| {
            warn!("💳️ Payment intent for {amount} {} failed. {e}", self.currency);
            e
        })?;
        Ok(handle)
    }

    /// Records the payment and removes the cart entries it pays for. Both outcomes are returned.
    ///
    /// Fails without writing anything if any listed cart entry belongs to someone else, or if the payment cannot be
    /// recorded. Replaying a recorded transaction id is accepted only with the same email and cart ids.
    /// Once the payment is recorded, a failure to purge the cart is reported in the
    /// [`CheckoutResult::delete_result`] rather than as an error.
    pub async fn checkout(&self, payment: NewPayment) -> Result<CheckoutResult, CheckoutError> {
        let owners = self.db.fetch_cart_owners(&payment.cart_ids).await?;
        let foreign = owners.iter().filter(|o| o.email != payment.email).map(|o| o.id).collect::<Vec<i64>>();
        if !foreign.is_empty() {
            warn!("💳️ {} tried to check out cart entries {foreign:?} that belong to someone else", payment.email);
            return Err(CheckoutError::ForeignCartEntries(foreign));
        }
        let (email, cart_ids) = (payment.email.clone(), payment.cart_ids.clone());
        let (record, newly_inserted) = self.db.insert_payment(payment).await?;
        if !newly_inserted {
            if record.email != email || record.cart_ids != cart_ids {
                warn!(
                    "💳️ {email} replayed transaction {} with a different cart. It belongs to payment #{}",
                    record.transaction_id, record.id
                );
                return Err(CheckoutError::TransactionConflict(record.transaction_id));
            }
            info!("💳️ Transaction {} has already been recorded as payment #{}", record.transaction_id, record.id);
        }
        if record.is_settled() {
            let payment_result = PaymentAcknowledgement::new(&record, newly_inserted);
            return Ok(CheckoutResult { payment_result, delete_result: DeleteResult::new(0).into() });
        }
        let purged = self.db.purge_cart_entries(&record.email, &record.cart_ids).await;
        let (record, delete_result) = match purged {
            Ok(deleted) => (self.mark_settled(record).await, DeletionOutcome::from(deleted)),
            Err(e) => {
                error!(
                    "💳️ Payment #{} was recorded, but its cart entries could not be removed. It remains pending. {e}",
                    record.id
                );
                (record, DeletionOutcome::Failed { error: e.to_string() })
            },
        };
        debug!(
            "💳️ Checkout for payment #{} complete. Cart entries removed: {}",
            record.id,
            delete_result.deleted_count()
        );
        let payment_result = PaymentAcknowledgement::new(&record, newly_inserted);
        Ok(CheckoutResult { payment_result, delete_result })
    }

    // A payment whose cart was purged but which could not be marked settled stays pending. The next reconciliation
    // purges nothing and marks it then.
    async fn mark_settled(&self, record: Payment) -> Payment {
        match self.db.mark_payment_settled(record.id).await {
            Ok(settled) => settled,
            Err(e) => {
                warn!("💳️ Could not mark payment #{} as settled. {e}", record.id);
                record
            },
        }
    }

    async fn settle(&self, payment: &Payment) -> Result<DeleteResult, PaymentGatewayError> {
        let deleted = self.db.purge_cart_entries(&payment.email, &payment.cart_ids).await?;
        self.db.mark_payment_settled(payment.id).await?;
        Ok(deleted)
    }

    /// Re-runs the cart purge for every pending payment and marks the ones that succeed as settled.
    pub async fn reconcile(&self) -> Result<ReconciliationReport, CheckoutError> {
        let pending = self.db.fetch_pending_payments().await?;
        let mut report = ReconciliationReport { examined: pending.len(), ..Default::default() };
        for payment in pending {
            match self.settle(&payment).await {
                Ok(deleted) => {
                    report.settled += 1;
                    report.purged_entries += deleted.deleted_count;
                },
                Err(e) => {
                    warn!("💳️ Payment #{} is still pending. {e}", payment.id);
                    report.failures.push(ReconciliationFailure { payment_id: payment.id, error: e.to_string() });
                },
            }
        }
        info!(
            "💳️ Reconciliation complete. {} pending payments examined, {} settled, {} still pending",
            report.examined,
            report.settled,
            report.failures.len()
        );
        Ok(report)
    }

    /// The payment history for a principal, newest first.
    pub async fn payments_for_email(&self, email: &str) -> Result<Vec<Payment>, CheckoutError> {
        let payments = self.db.fetch_payments_for_email(email).await?;
        Ok(payments)
    }
}
