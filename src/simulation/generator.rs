//! Random fair generation for benches, tests and demo data.

use crate::core::error::LedgerResult;
use crate::core::ledger::EventLedger;
use crate::core::operation::Operation;
use crate::core::payment::PaymentMethod;
use crate::core::vendor::{EventId, Vendor, VendorId};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;

const PRODUCTS: [&str; 8] = [
    "Geleia caseira",
    "Pão de mel",
    "Queijo minas",
    "Sabonete artesanal",
    "Bolsa de crochê",
    "Mel orgânico",
    "Cerâmica",
    "Muda de planta",
];

/// Shape of a generated fair.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub event: EventId,
    pub vendor_count: usize,
    /// Fraction of vendors that are association members, in `[0, 1]`.
    pub member_ratio: f64,
    pub operations_per_vendor: usize,
    /// Smallest sale, in centavos.
    pub min_cents: i64,
    /// Largest sale, in centavos.
    pub max_cents: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            event: EventId::new("FEIRA-DEMO"),
            vendor_count: 10,
            member_ratio: 0.5,
            operations_per_vendor: 20,
            min_cents: 100,
            max_cents: 50_000,
        }
    }
}

/// Generate a ledger with registered vendors and random sales.
pub fn generate_fair(config: &GeneratorConfig) -> LedgerResult<EventLedger> {
    let mut rng = rand::thread_rng();
    let mut ledger = EventLedger::new();
    let member_ratio = config.member_ratio.clamp(0.0, 1.0);
    let min_cents = config.min_cents.max(0);
    let max_cents = config.max_cents.max(min_cents);

    for i in 0..config.vendor_count {
        let id = VendorId::new(format!("V-{:03}", i));
        let member = rng.gen_bool(member_ratio);
        ledger.register_vendor(
            config.event.clone(),
            Vendor::new(id.clone(), format!("Feirante {:03}", i), member),
        );

        for _ in 0..config.operations_per_vendor {
            let method = *PaymentMethod::ALL
                .choose(&mut rng)
                .unwrap_or(&PaymentMethod::Pix);
            let product = *PRODUCTS.choose(&mut rng).unwrap_or(&PRODUCTS[0]);
            let amount = Decimal::new(rng.gen_range(min_cents..=max_cents), 2);

            ledger.record(Operation::new(id.clone(), config.event.clone(), method, amount, product)?)?;
        }
    }

    debug!(
        "generated {} operations for {} vendors at {}",
        ledger.len(),
        config.vendor_count,
        config.event
    );
    Ok(ledger)
}
