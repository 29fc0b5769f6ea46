//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults.

use crate::{
    core::{account, company, concept, supplier, tax_regime},
    errors::Result,
    models::{
        AccountType, AccountingAccount, Company, PersonType, PrimaryTransactionType,
        RetentionConcept, Supplier, TransactionKind, VatResponsibility,
    },
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// PUC account conventionally used for each sample concept code.
fn account_code_for(code: &str) -> &'static str {
    match code {
        "CMP" => "236540",
        "SRV" => "236525",
        "HON" => "236515",
        "ARR" => "236530",
        _ => "236595",
    }
}

/// An active concept with the given code, minimum base and rate.
pub fn sample_concept(code: &str, minimum_base: Decimal, rate: Decimal) -> RetentionConcept {
    RetentionConcept {
        code: code.to_string(),
        name: format!("Concept {code}"),
        minimum_base,
        rate,
        account_code: account_code_for(code).to_string(),
        active: true,
    }
}

/// A legal-person supplier with the given goods and services assignments.
pub fn sample_supplier(goods: &[&str], services: &[&str]) -> Supplier {
    Supplier {
        id: 1,
        tax_id: "800197268-4".to_string(),
        name: "Proveedor de Prueba S.A.S.".to_string(),
        email: Some("compras@proveedor.test".to_string()),
        phone: None,
        address: None,
        city: Some("Bogotá".to_string()),
        tax_regime_code: "RC".to_string(),
        vat_responsibility: VatResponsibility::Responsible,
        is_self_withholder: false,
        is_income_tax_filer: true,
        person_type: PersonType::Legal,
        primary_transaction_type: PrimaryTransactionType::Both,
        goods_concepts: goods.iter().map(ToString::to_string).collect(),
        services_concepts: services.iter().map(ToString::to_string).collect(),
        registered_for_local_turnover_tax: true,
        active: true,
    }
}

/// A purchasing company, optionally acting as withholding agent.
pub fn sample_company(is_withholding_agent: bool) -> Company {
    Company {
        id: 1,
        tax_id: "900123456-8".to_string(),
        name: "Empresa Compradora S.A.".to_string(),
        tax_regime_code: "RC".to_string(),
        is_withholding_agent,
        municipality: "Medellín".to_string(),
        active: true,
    }
}

/// An active liability account at level 4 under `2365`.
pub fn sample_account(code: &str) -> AccountingAccount {
    AccountingAccount {
        code: code.to_string(),
        name: format!("Retención {code}"),
        account_type: AccountType::Liability,
        level: 4,
        parent_code: Some("2365".to_string()),
        active: true,
    }
}

/// Creates the `RC` tax regime.
pub async fn create_test_regime(db: &DatabaseConnection) -> Result<()> {
    tax_regime::create_tax_regime(db, "RC", "Responsable de IVA", true, true).await?;
    Ok(())
}

/// Creates a concept with its account in the database.
pub async fn create_test_concept(
    db: &DatabaseConnection,
    code: &str,
    minimum_base: i64,
    rate: Decimal,
) -> Result<RetentionConcept> {
    let account_code = account_code_for(code);
    if account::get_account_by_code(db, account_code).await?.is_none() {
        account::create_account(
            db,
            account::NewAccount {
                code: account_code.to_string(),
                name: format!("Retención {code}"),
                account_type: AccountType::Liability,
                level: 4,
                parent_code: None,
            },
        )
        .await?;
    }

    concept::create_concept(
        db,
        concept::NewConcept {
            code: code.to_string(),
            name: format!("Concept {code}"),
            minimum_base: Decimal::from(minimum_base),
            rate,
            account_code: account_code.to_string(),
        },
    )
    .await
}

/// Default supplier registration data for the given NIT.
pub fn new_test_supplier(tax_id: &str) -> supplier::NewSupplier {
    supplier::NewSupplier {
        tax_id: tax_id.to_string(),
        name: "Proveedor de Prueba S.A.S.".to_string(),
        email: None,
        phone: None,
        address: None,
        city: Some("Cali".to_string()),
        tax_regime_code: "RC".to_string(),
        vat_responsibility: VatResponsibility::Responsible,
        is_self_withholder: false,
        is_income_tax_filer: true,
        person_type: PersonType::Legal,
        primary_transaction_type: PrimaryTransactionType::Both,
        registered_for_local_turnover_tax: false,
    }
}

/// Creates a supplier and assigns the given concepts.
pub async fn create_test_supplier(
    db: &DatabaseConnection,
    tax_id: &str,
    goods: &[&str],
    services: &[&str],
) -> Result<Supplier> {
    let created = supplier::create_supplier(db, new_test_supplier(tax_id)).await?;
    supplier::assign_concepts(db, created.id, TransactionKind::Goods, goods).await?;
    supplier::assign_concepts(db, created.id, TransactionKind::Services, services).await?;
    supplier::get_supplier_by_id(db, created.id)
        .await?
        .ok_or_else(|| crate::errors::Error::SupplierNotFound {
            id: created.id.to_string(),
        })
}

/// Creates a company in the database.
pub async fn create_test_company(
    db: &DatabaseConnection,
    tax_id: &str,
    is_withholding_agent: bool,
) -> Result<Company> {
    company::create_company(
        db,
        company::NewCompany {
            tax_id: tax_id.to_string(),
            name: "Empresa Compradora S.A.".to_string(),
            tax_regime_code: "RC".to_string(),
            is_withholding_agent,
            municipality: "Medellín".to_string(),
        },
    )
    .await
}

/// Sets up a database with the RC regime and the four sample concepts.
/// Concepts: CMP (1,000,000 / 2.5), SRV (1,000,000 / 4), HON (0 / 11), ARR (1,000,000 / 3.5).
pub async fn setup_with_catalog() -> Result<DatabaseConnection> {
    let db = setup_test_db().await?;
    create_test_regime(&db).await?;
    create_test_concept(&db, "CMP", 1_000_000, Decimal::new(25, 1)).await?;
    create_test_concept(&db, "SRV", 1_000_000, Decimal::from(4)).await?;
    create_test_concept(&db, "HON", 0, Decimal::from(11)).await?;
    create_test_concept(&db, "ARR", 1_000_000, Decimal::new(35, 1)).await?;
    Ok(db)
}
