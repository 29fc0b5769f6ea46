#![allow(clippy::result_large_err)]

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::path::PathBuf;
use supplier_retentions::{
    config::{
        catalog::{DEFAULT_CATALOG_PATH, load_catalog},
        database::{create_connection, create_tables},
    },
    core::{
        catalog::seed_catalog,
        concept::get_active_concepts,
        money::{format_cop, parse_base_amount},
        nit::{compute_check_digit, is_valid_nit, reformat_nit},
    },
    errors::Result,
    models::TransactionKind,
    repository::DatabaseRepository,
    service::{RetentionRequest, RetentionService},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Colombian NIT check digits and supplier retention calculation.
#[derive(Parser, Debug)]
#[command(name = "supplier-retentions", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the check digit of a NIT.
    CheckDigit {
        /// NIT digits, separators allowed
        nit: String,
    },
    /// Check a NIT, including its check digit when one is given.
    ValidateNit {
        /// NIT as `digits` or `digits-dv`
        nit: String,
    },
    /// Print a NIT with thousands separators.
    FormatNit {
        /// NIT digits, separators allowed
        nit: String,
        /// Append the computed check digit
        #[arg(long)]
        with_check_digit: bool,
    },
    /// Create the tables and seed the reference catalog.
    Init {
        /// Catalog file to seed from
        #[arg(long, default_value = DEFAULT_CATALOG_PATH)]
        catalog: PathBuf,
    },
    /// List the active retention concepts.
    Concepts,
    /// Compute the retentions for a purchase.
    Calculate {
        /// Supplier id
        #[arg(long)]
        supplier: i64,
        /// Purchasing company id
        #[arg(long)]
        company: i64,
        /// Base amount, e.g. 1250000 or "$ 1.250.000"
        #[arg(long)]
        base: String,
        /// goods or services
        #[arg(long)]
        kind: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; DATABASE_URL may also be set externally
    dotenv().ok();

    let cli = Cli::parse();
    run(cli.command)
        .await
        .inspect_err(|e| error!("Command failed: {}", e))
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::CheckDigit { nit } => {
            println!("{}", compute_check_digit(&nit));
        }
        Commands::ValidateNit { nit } => {
            let verdict = if is_valid_nit(&nit) { "valid" } else { "invalid" };
            println!("{nit}: {verdict}");
        }
        Commands::FormatNit {
            nit,
            with_check_digit,
        } => {
            println!("{}", reformat_nit(&nit, with_check_digit)?);
        }
        Commands::Init { catalog } => {
            let db = create_connection().await?;
            create_tables(&db).await?;
            let config = load_catalog(&catalog)?;
            let report = seed_catalog(&db, &config).await?;
            info!(path = %catalog.display(), inserted = report.total(), "Database initialized");
            println!(
                "Seeded {} tax regimes, {} accounts, {} concepts, {} companies",
                report.tax_regimes, report.accounts, report.concepts, report.companies
            );
        }
        Commands::Concepts => {
            let db = create_connection().await?;
            for concept in get_active_concepts(&db).await? {
                println!(
                    "{}  {:<40} min {:>14}  rate {:>5}%  account {}",
                    concept.code,
                    concept.name,
                    format_cop(concept.minimum_base),
                    concept.rate,
                    concept.account_code
                );
            }
        }
        Commands::Calculate {
            supplier,
            company,
            base,
            kind,
        } => {
            let request = RetentionRequest {
                supplier_id: supplier,
                company_id: company,
                base_amount: parse_base_amount(&base)?,
                kind: kind.parse::<TransactionKind>()?,
            };
            let db = create_connection().await?;
            let service = RetentionService::new(DatabaseRepository::new(db));
            let report = service.calculate(&request).await?;

            println!(
                "{} ({}) - {} purchase of {}",
                report.supplier.name,
                report.supplier.tax_id,
                report.kind,
                format_cop(report.summary.base_amount)
            );
            for result in &report.results {
                let status = result.reason.as_deref().unwrap_or("applies");
                println!(
                    "  {}  {:>5}%  {:>14}  account {}  ({status})",
                    result.concept.code,
                    result.concept.rate,
                    format_cop(result.withheld_amount),
                    result.account_code
                );
            }
            for code in &report.skipped_concepts {
                println!("  {code}  skipped: missing or inactive concept");
            }
            println!("Total withheld: {}", format_cop(report.summary.total_withheld));
            println!("Net payable:    {}", format_cop(report.summary.net_payable));
        }
    }
    Ok(())
}
