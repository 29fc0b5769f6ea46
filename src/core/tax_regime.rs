//! Tax regime reference data.

use crate::{
    entities::{TaxRegime as TaxRegimeEntity, tax_regime},
    errors::{Error, Result},
    models::TaxRegime,
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Creates a tax regime, rejecting blank fields and duplicate codes.
///
/// # Errors
/// Returns an error if the code or name is blank, the code is taken, or the insert fails.
pub async fn create_tax_regime(
    db: &DatabaseConnection,
    code: &str,
    name: &str,
    is_income_tax_filer: bool,
    applies_vat: bool,
) -> Result<TaxRegime> {
    let code = code.trim();
    if code.is_empty() || name.trim().is_empty() {
        return Err(Error::invalid_input("Tax regime code and name cannot be empty"));
    }

    if find_row(db, code).await?.is_some() {
        return Err(Error::DuplicateRecord {
            entity: "TaxRegime",
            key: code.to_string(),
        });
    }

    let regime = tax_regime::ActiveModel {
        code: Set(code.to_string()),
        name: Set(name.trim().to_string()),
        is_income_tax_filer: Set(is_income_tax_filer),
        applies_vat: Set(applies_vat),
        is_active: Set(true),
        ..Default::default()
    };
    Ok(regime.insert(db).await?.into())
}

/// Finds a tax regime by code, active or not.
pub async fn get_tax_regime_by_code(
    db: &DatabaseConnection,
    code: &str,
) -> Result<Option<TaxRegime>> {
    Ok(find_row(db, code).await?.map(Into::into))
}

/// Lists active tax regimes ordered by code.
pub async fn get_active_tax_regimes(db: &DatabaseConnection) -> Result<Vec<TaxRegime>> {
    let rows = TaxRegimeEntity::find()
        .filter(tax_regime::Column::IsActive.eq(true))
        .order_by_asc(tax_regime::Column::Code)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Looks up the regime a new company or supplier references.
///
/// # Errors
/// Returns [`Error::InvalidInput`] if no regime has `code` or the regime is inactive.
pub async fn require_active_tax_regime(db: &DatabaseConnection, code: &str) -> Result<TaxRegime> {
    match find_row(db, code).await? {
        Some(row) if row.is_active => Ok(row.into()),
        Some(row) => Err(Error::invalid_input(format!(
            "Tax regime {} is inactive",
            row.code
        ))),
        None => Err(Error::invalid_input(format!(
            "Tax regime {} does not exist",
            code.trim()
        ))),
    }
}

/// Deactivates a tax regime. Records already referencing it keep their code.
///
/// # Errors
/// Returns an error if the regime does not exist or is already inactive.
pub async fn deactivate_tax_regime(db: &DatabaseConnection, code: &str) -> Result<TaxRegime> {
    let row = find_row(db, code)
        .await?
        .filter(|row| row.is_active)
        .ok_or_else(|| Error::invalid_input(format!("No active tax regime {}", code.trim())))?;

    let mut regime: tax_regime::ActiveModel = row.into();
    regime.is_active = Set(false);
    Ok(regime.update(db).await?.into())
}

async fn find_row(db: &DatabaseConnection, code: &str) -> Result<Option<tax_regime::Model>> {
    TaxRegimeEntity::find()
        .filter(tax_regime::Column::Code.eq(code.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}
