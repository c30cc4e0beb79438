pub mod error;
pub mod ledger;
pub mod money;
pub mod operation;
pub mod payment;
pub mod vendor;
