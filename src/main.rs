//! fair-settlement CLI
//!
//! Settle fair vendors from the command line.
//!
//! # Usage
//!
//! ```bash
//! # One vendor's statement
//! fair-settlement settle --input fair.json --event FEIRA-2024-05 --vendor V-001
//!
//! # Every vendor at a fair, as JSON
//! fair-settlement fair --input fair.json --event FEIRA-2024-05 --format json
//!
//! # Generate demo data
//! fair-settlement generate --vendors 10 --operations 20 --output fair.json
//! ```
//!
//! Set `RUST_LOG=debug` to see calculation details.

use fair_settlement::core::error::LedgerError;
use fair_settlement::core::ledger::EventLedger;
use fair_settlement::core::money::format_brl;
use fair_settlement::core::vendor::{EventId, VendorId};
use fair_settlement::import::{import_file, ImportDocument};
use fair_settlement::settlement::calculator::SettlementCalculator;
use fair_settlement::settlement::commission::CommissionTable;
use fair_settlement::settlement::fair::FairSummary;
use fair_settlement::settlement::report::SettlementReport;
use fair_settlement::settlement::result::Settlement;
use fair_settlement::simulation::generator::{generate_fair, GeneratorConfig};
use log::info;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"fair-settlement — vendor cash reconciliation for association fairs

USAGE:
    fair-settlement <COMMAND> [OPTIONS]

COMMANDS:
    settle      Settle one vendor at a fair
    fair        Settle every vendor at a fair
    generate    Generate a random fair (for testing)
    help        Show this message

OPTIONS (settle, fair):
    --input <FILE>      Path to JSON import file
    --event <ID>        Fair event id
    --vendor <ID>       Vendor id (settle only)
    --rates <FILE>      JSON commission table, e.g. {{"member": "0.20", "non_member": "0.30"}}
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --vendors <N>       Number of vendors (default: 10)
    --operations <N>    Operations per vendor (default: 20)
    --event <ID>        Event id (default: FEIRA-DEMO)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    fair-settlement settle --input fair.json --event FEIRA-DEMO --vendor V-001
    fair-settlement fair --input fair.json --event FEIRA-DEMO --format json
    fair-settlement generate --vendors 5 --operations 12 --output fair.json"#
    );
}

/// JSON output for a single vendor.
#[derive(serde::Serialize)]
struct VendorOutput<'a> {
    event: &'a str,
    vendor: &'a str,
    name: &'a str,
    message: String,
    settlement: &'a Settlement,
}

/// Options shared by `settle` and `fair`.
#[derive(Default)]
struct SettleArgs {
    input: Option<String>,
    event: Option<String>,
    vendor: Option<String>,
    rates: Option<String>,
    format: String,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn next_value(args: &[String], i: usize, flag: &str) -> String {
    args.get(i).cloned().unwrap_or_else(|| {
        eprintln!("{} requires a value", flag);
        process::exit(1);
    })
}

fn parse_settle_args(args: &[String]) -> SettleArgs {
    let mut parsed = SettleArgs {
        format: "text".to_string(),
        ..Default::default()
    };
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                parsed.input = Some(next_value(args, i, "--input"));
            }
            "--event" => {
                i += 1;
                parsed.event = Some(next_value(args, i, "--event"));
            }
            "--vendor" => {
                i += 1;
                parsed.vendor = Some(next_value(args, i, "--vendor"));
            }
            "--rates" => {
                i += 1;
                parsed.rates = Some(next_value(args, i, "--rates"));
            }
            "--format" => {
                i += 1;
                parsed.format = next_value(args, i, "--format");
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }
    if parsed.format != "text" && parsed.format != "json" {
        fail("--format must be 'text' or 'json'");
    }
    parsed
}

fn load_ledger(args: &SettleArgs) -> EventLedger {
    let path = args
        .input
        .as_deref()
        .unwrap_or_else(|| fail("--input <FILE> is required"));
    import_file(path).unwrap_or_else(|e| {
        if let LedgerError::Json(_) = e {
            eprintln!("Expected format:");
            eprintln!(
                r#"{{
  "vendors": [ {{ "event": "FEIRA-1", "id": "V-001", "name": "Ana", "member": true }} ],
  "operations": [ {{ "event": "FEIRA-1", "vendor": "V-001", "method": "PIX", "amount": "35.90" }} ]
}}"#
            );
        }
        fail(format!("could not import '{}': {}", path, e))
    })
}

fn load_calculator(args: &SettleArgs) -> SettlementCalculator {
    let rates = match &args.rates {
        Some(path) => {
            let content = fs::read_to_string(path)
                .unwrap_or_else(|e| fail(format!("reading '{}': {}", path, e)));
            CommissionTable::from_json(&content)
                .unwrap_or_else(|e| fail(format!("commission table '{}': {}", path, e)))
        }
        None => CommissionTable::default(),
    };
    SettlementCalculator::new(rates)
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| fail(e))
}

fn cmd_settle(args: &[String]) {
    let args = parse_settle_args(args);
    let event = EventId::new(
        args.event
            .clone()
            .unwrap_or_else(|| fail("--event <ID> is required")),
    );
    let vendor = VendorId::new(
        args.vendor
            .clone()
            .unwrap_or_else(|| fail("--vendor <ID> is required")),
    );

    let ledger = load_ledger(&args);
    let calculator = load_calculator(&args);
    let report = SettlementReport::build(&ledger, &calculator, &event, &vendor)
        .unwrap_or_else(|e| fail(e));

    if args.format == "json" {
        let output = VendorOutput {
            event: event.as_str(),
            vendor: vendor.as_str(),
            name: &report.vendor.name,
            message: report.settlement.message(),
            settlement: &report.settlement,
        };
        println!("{}", to_json(&output));
    } else {
        println!("{}", report);
    }
}

fn cmd_fair(args: &[String]) {
    let args = parse_settle_args(args);
    let event = EventId::new(
        args.event
            .clone()
            .unwrap_or_else(|| fail("--event <ID> is required")),
    );

    let ledger = load_ledger(&args);
    let calculator = load_calculator(&args);
    let summary = FairSummary::build(&ledger, &calculator, &event);

    if summary.vendors.is_empty() {
        eprintln!("No vendors registered at {}", event);
    }

    if args.format == "json" {
        println!("{}", to_json(&summary));
    } else {
        println!("{}", summary);
        println!(
            "Net due to association: {}",
            format_brl(summary.net_due_to_association())
        );
    }
}

fn cmd_generate(args: &[String]) {
    let mut config = GeneratorConfig::default();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--vendors" => {
                i += 1;
                config.vendor_count = next_value(args, i, "--vendors")
                    .parse()
                    .unwrap_or_else(|_| fail("--vendors requires a number"));
            }
            "--operations" => {
                i += 1;
                config.operations_per_vendor = next_value(args, i, "--operations")
                    .parse()
                    .unwrap_or_else(|_| fail("--operations requires a number"));
            }
            "--event" => {
                i += 1;
                config.event = EventId::new(next_value(args, i, "--event"));
            }
            "--output" => {
                i += 1;
                output_path = Some(next_value(args, i, "--output"));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let ledger = generate_fair(&config).unwrap_or_else(|e| fail(e));
    let json = ImportDocument::from_ledger(&ledger)
        .to_json()
        .unwrap_or_else(|e| fail(e));

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| fail(format!("writing to '{}': {}", path, e)));
        eprintln!(
            "Generated {} operations across {} vendors → {}",
            ledger.len(),
            config.vendor_count,
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];
    info!("running command '{}'", command);

    match command {
        "settle" => cmd_settle(rest),
        "fair" => cmd_fair(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
