//! # fair-settlement
//!
//! Vendor cash reconciliation for association fairs.
//!
//! Vendors sell at a fair and every sale is recorded as an operation with
//! a payment method. PIX sales land in the association's account; cash and
//! card sales stay with the vendor. The association retains a commission
//! on everything sold (lower for members), so after the fair one side owes
//! the other. This crate computes that settlement.
//!
//! ## Architecture
//!
//! - **core** — Operations, payment methods, vendors, BRL money, the ledger
//! - **settlement** — Commission table, calculator, fair summary, report
//! - **import** — Bulk JSON import of vendors and operations
//! - **simulation** — Random fair generation

pub mod core;
pub mod import;
pub mod settlement;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::error::{LedgerError, LedgerResult};
    pub use crate::core::ledger::{EventLedger, OperationSource};
    pub use crate::core::money::{format_brl, parse_brl};
    pub use crate::core::operation::Operation;
    pub use crate::core::payment::{Holder, PaymentMethod};
    pub use crate::core::vendor::{EventId, MembershipTier, Vendor, VendorId};
    pub use crate::settlement::calculator::SettlementCalculator;
    pub use crate::settlement::commission::CommissionTable;
    pub use crate::settlement::fair::FairSummary;
    pub use crate::settlement::result::{BalanceStatus, Settlement};
}
