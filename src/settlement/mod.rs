pub mod calculator;
pub mod commission;
pub mod fair;
pub mod report;
pub mod result;
