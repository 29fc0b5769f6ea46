//! Company records - the purchasing side of a retention calculation.

use crate::{
    core::{nit::Nit, tax_regime::require_active_tax_regime},
    entities::{Company as CompanyEntity, company},
    errors::{Error, Result},
    models::Company,
};
use sea_orm::{Set, prelude::*};

/// Data needed to register a company.
#[derive(Debug, Clone)]
pub struct NewCompany {
    /// NIT, with or without check digit
    pub tax_id: String,
    /// Company name
    pub name: String,
    /// Code of the company's tax regime
    pub tax_regime_code: String,
    /// Whether the company must withhold
    pub is_withholding_agent: bool,
    /// Municipality of operation
    pub municipality: String,
}

/// Registers a company. The NIT is validated and stored as `digits-dv`.
///
/// # Errors
/// Returns an error if the NIT is invalid, the name is blank, the tax regime is unknown
/// or inactive, the NIT is already registered, or the insert fails.
pub async fn create_company(db: &DatabaseConnection, company: NewCompany) -> Result<Company> {
    let nit = Nit::parse(&company.tax_id)?;
    if company.name.trim().is_empty() {
        return Err(Error::invalid_input("Company name cannot be empty"));
    }
    let regime = require_active_tax_regime(db, &company.tax_regime_code).await?;

    let tax_id = nit.to_string();
    if get_company_by_tax_id(db, &tax_id).await?.is_some() {
        return Err(Error::DuplicateRecord {
            entity: "Company",
            key: tax_id,
        });
    }

    let row = company::ActiveModel {
        tax_id: Set(tax_id),
        name: Set(company.name.trim().to_string()),
        tax_regime_code: Set(regime.code),
        is_withholding_agent: Set(company.is_withholding_agent),
        municipality: Set(company.municipality),
        is_active: Set(true),
        ..Default::default()
    };
    Ok(row.insert(db).await?.into())
}

/// Finds a company by id.
pub async fn get_company_by_id(
    db: &DatabaseConnection,
    company_id: i64,
) -> Result<Option<Company>> {
    Ok(CompanyEntity::find_by_id(company_id)
        .one(db)
        .await?
        .map(Into::into))
}

/// Finds a company by NIT. The NIT may be written with separators or without its
/// check digit.
///
/// # Errors
/// Returns an error if the NIT is invalid or the query fails.
pub async fn get_company_by_tax_id(
    db: &DatabaseConnection,
    tax_id: &str,
) -> Result<Option<Company>> {
    let nit = Nit::parse(tax_id)?;
    Ok(CompanyEntity::find()
        .filter(company::Column::TaxId.eq(nit.to_string()))
        .one(db)
        .await?
        .map(Into::into))
}
