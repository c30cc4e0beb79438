//! Summarise a generated fair.
//!
//! Generates random vendors and sales, then prints every vendor's
//! balance and what the association collects or pays out overall.

use fair_settlement::core::money::format_brl;
use fair_settlement::prelude::*;
use fair_settlement::simulation::generator::{generate_fair, GeneratorConfig};

fn main() {
    let config = GeneratorConfig {
        vendor_count: 8,
        operations_per_vendor: 15,
        ..Default::default()
    };
    let ledger = generate_fair(&config).expect("generated fair");

    let summary = FairSummary::build(&ledger, &SettlementCalculator::default(), &config.event);
    println!("{}", summary);
    println!(
        "Net due to association: {}",
        format_brl(summary.net_due_to_association())
    );
    println!("Consistent:             {}", summary.is_consistent());
}
