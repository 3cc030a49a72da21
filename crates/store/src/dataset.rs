//! JSON dataset documents.
//!
//! A dataset is a full export of the system of record: parties plus every
//! ledger record. It is the on-disk shape read by the JSON-backed store.

use std::path::Path;

use haulbook_core::ledger::{Adjustment, CapitalMovement, Delivery, OpeningBalance, Payment};
use haulbook_core::party::Party;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreResult;

/// Export of parties and ledger records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerDataset {
    /// Registered parties.
    pub parties: Vec<Party>,
    /// Deliveries.
    pub deliveries: Vec<Delivery>,
    /// Payments.
    pub payments: Vec<Payment>,
    /// Adjustments.
    pub adjustments: Vec<Adjustment>,
    /// Opening balance lines.
    pub opening_balances: Vec<OpeningBalance>,
    /// Partner capital movements.
    pub capital_movements: Vec<CapitalMovement>,
}

impl LedgerDataset {
    /// Reads a dataset from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let dataset: Self = serde_json::from_slice(&bytes)?;
        debug!(
            path = %path.display(),
            parties = dataset.parties.len(),
            deliveries = dataset.deliveries.len(),
            payments = dataset.payments.len(),
            "Loaded ledger dataset"
        );
        Ok(dataset)
    }

    /// Writes the dataset to a JSON file, replacing it.
    pub async fn save(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        let bytes = serde_json::to_vec_pretty(self)?;
        tokio::fs::write(path, bytes).await?;
        debug!(path = %path.display(), "Saved ledger dataset");
        Ok(())
    }
}
