use serde::{Deserialize, Serialize};

use crate::{
    db_types::{Payment, SettlementStatus},
    traits::DeleteResult,
};

/// Acknowledges the payment record written (or found, on a replay) by a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAcknowledgement {
    pub acknowledged: bool,
    pub inserted_id: i64,
    /// `false` when the transaction id had already been recorded by an earlier checkout.
    pub newly_inserted: bool,
    pub settlement: SettlementStatus,
}

impl PaymentAcknowledgement {
    pub fn new(payment: &Payment, newly_inserted: bool) -> Self {
        Self { acknowledged: true, inserted_id: payment.id, newly_inserted, settlement: payment.settlement }
    }
}

/// What happened to the cart entries a payment settles. A failure here does not fail the checkout, since the payment
/// has already been recorded. The gap is reported to the caller and left for reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DeletionOutcome {
    Deleted {
        acknowledged: bool,
        #[serde(rename = "deletedCount")]
        deleted_count: u64,
    },
    Failed {
        error: String,
    },
}

impl From<DeleteResult> for DeletionOutcome {
    fn from(value: DeleteResult) -> Self {
        Self::Deleted { acknowledged: value.acknowledged, deleted_count: value.deleted_count }
    }
}

impl DeletionOutcome {
    pub fn deleted_count(&self) -> u64 {
        match self {
            DeletionOutcome::Deleted { deleted_count, .. } => *deleted_count,
            DeletionOutcome::Failed { .. } => 0,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, DeletionOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResult {
    pub payment_result: PaymentAcknowledgement,
    pub delete_result: DeletionOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationFailure {
    pub payment_id: i64,
    pub error: String,
}

/// The outcome of re-running the cart purge for every pending payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationReport {
    pub examined: usize,
    pub settled: usize,
    pub purged_entries: u64,
    pub failures: Vec<ReconciliationFailure>,
}
