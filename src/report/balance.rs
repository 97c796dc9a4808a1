use serde::{Deserialize, Serialize};

use super::transaction::{sort_for_balance, TxnRecord};

/// A unified transaction with its post-entry running balance attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalancedTxn {
    pub txn: TxnRecord,
    pub balance: f64,
}

/// Attaches the running balance to every record. The input is re-sorted
/// ascending by `(date, seq)`; the accumulator starts at zero, income adds,
/// expense subtracts. The balance after the first row therefore equals that
/// row's own signed amount. Always computed from scratch, never stored.
pub fn with_running_balance(mut records: Vec<TxnRecord>) -> Vec<BalancedTxn> {
    sort_for_balance(&mut records);
    let mut balance = 0.0;
    records
        .into_iter()
        .map(|txn| {
            balance += txn.signed_amount();
            BalancedTxn { balance, txn }
        })
        .collect()
}
