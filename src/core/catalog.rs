//! Seeding the reference-data tables from a [`CatalogConfig`].
//!
//! Seeding is idempotent: entries whose code (or NIT, for companies) already exists are
//! left untouched, so running it on every start is safe.

use crate::{
    config::catalog::CatalogConfig,
    core::{account, company, concept, tax_regime},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use tracing::{debug, info};

/// Number of records inserted per table by [`seed_catalog`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Tax regimes inserted
    pub tax_regimes: usize,
    /// Accounts inserted
    pub accounts: usize,
    /// Concepts inserted
    pub concepts: usize,
    /// Companies inserted
    pub companies: usize,
}

impl SeedReport {
    /// Total records inserted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.tax_regimes + self.accounts + self.concepts + self.companies
    }
}

/// Inserts every catalog entry that is not in the database yet.
///
/// Accounts are inserted shallowest level first so parents exist before their children;
/// concepts are inserted after accounts because they reference them.
///
/// # Errors
/// Returns the first validation or database error; entries inserted before it remain.
pub async fn seed_catalog(
    db: &DatabaseConnection,
    catalog: &CatalogConfig,
) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for regime in &catalog.tax_regimes {
        if tax_regime::get_tax_regime_by_code(db, &regime.code)
            .await?
            .is_some()
        {
            debug!(code = %regime.code, "Tax regime already present");
            continue;
        }
        tax_regime::create_tax_regime(
            db,
            &regime.code,
            &regime.name,
            regime.is_income_tax_filer,
            regime.applies_vat,
        )
        .await?;
        report.tax_regimes += 1;
    }

    let mut accounts: Vec<_> = catalog.accounts.iter().collect();
    accounts.sort_by_key(|entry| entry.level);
    for entry in accounts {
        if account::get_account_by_code(db, &entry.code).await?.is_some() {
            debug!(code = %entry.code, "Account already present");
            continue;
        }
        account::create_account(
            db,
            account::NewAccount {
                code: entry.code.clone(),
                name: entry.name.clone(),
                account_type: entry.account_type,
                level: entry.level,
                parent_code: entry.parent_code.clone(),
            },
        )
        .await?;
        report.accounts += 1;
    }

    for entry in &catalog.concepts {
        if concept::get_concept_by_code(db, &entry.code).await?.is_some() {
            debug!(code = %entry.code, "Retention concept already present");
            continue;
        }
        concept::create_concept(
            db,
            concept::NewConcept {
                code: entry.code.clone(),
                name: entry.name.clone(),
                minimum_base: entry.minimum_base.into(),
                rate: entry.rate,
                account_code: entry.account_code.clone(),
            },
        )
        .await?;
        report.concepts += 1;
    }

    for entry in &catalog.companies {
        if company::get_company_by_tax_id(db, &entry.tax_id)
            .await?
            .is_some()
        {
            debug!(tax_id = %entry.tax_id, "Company already present");
            continue;
        }
        company::create_company(
            db,
            company::NewCompany {
                tax_id: entry.tax_id.clone(),
                name: entry.name.clone(),
                tax_regime_code: entry.tax_regime_code.clone(),
                is_withholding_agent: entry.is_withholding_agent,
                municipality: entry.municipality.clone(),
            },
        )
        .await?;
        report.companies += 1;
    }

    info!(
        tax_regimes = report.tax_regimes,
        accounts = report.accounts,
        concepts = report.concepts,
        companies = report.companies,
        "Catalog seeded"
    );
    Ok(report)
}
