use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fair_settlement::core::ledger::OperationSource;
use fair_settlement::core::vendor::{MembershipTier, VendorId};
use fair_settlement::settlement::calculator::SettlementCalculator;
use fair_settlement::settlement::fair::FairSummary;
use fair_settlement::simulation::generator::{generate_fair, GeneratorConfig};

fn bench_single_vendor_1000_operations(c: &mut Criterion) {
    let config = GeneratorConfig {
        vendor_count: 1,
        operations_per_vendor: 1000,
        ..Default::default()
    };
    let ledger = generate_fair(&config).expect("generated fair");
    let ops = ledger.operations_for(&config.event, &VendorId::new("V-000"));
    let calculator = SettlementCalculator::default();

    c.bench_function("settle_vendor_1000_operations", |b| {
        b.iter(|| calculator.calculate(black_box(ops.iter().copied()), MembershipTier::Member))
    });
}

fn bench_fair_50_vendors(c: &mut Criterion) {
    let config = GeneratorConfig {
        vendor_count: 50,
        operations_per_vendor: 40,
        ..Default::default()
    };
    let ledger = generate_fair(&config).expect("generated fair");
    let calculator = SettlementCalculator::default();

    c.bench_function("fair_summary_50_vendors", |b| {
        b.iter(|| FairSummary::build(black_box(&ledger), &calculator, &config.event))
    });
}

criterion_group!(
    benches,
    bench_single_vendor_1000_operations,
    bench_fair_50_vendors
);
criterion_main!(benches);
