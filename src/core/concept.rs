//! Retention concept catalog - create, look up and deactivate withholding rules.
//!
//! The calculator only reads concepts; this module is how the catalog gets maintained.
//! Minimum bases are whole pesos and rates are percentages between 0 and 100.

use crate::{
    entities::{RetentionConcept as ConceptEntity, retention_concept},
    errors::{Error, Result},
    models::RetentionConcept,
};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Length of every concept code.
pub const CONCEPT_CODE_LEN: usize = 3;

/// Data needed to register a concept.
#[derive(Debug, Clone)]
pub struct NewConcept {
    /// Three-character code, stored upper-case
    pub code: String,
    /// Display name
    pub name: String,
    /// Minimum taxable base in whole pesos
    pub minimum_base: Decimal,
    /// Percentage rate, 0 to 100
    pub rate: Decimal,
    /// PUC code of an existing account
    pub account_code: String,
}

/// Creates a new retention concept after validating it.
///
/// # Errors
/// Returns an error if:
/// - The code is not three ASCII alphanumerics or the name is blank
/// - The minimum base is negative or has a fractional part
/// - The rate is outside 0..=100
/// - The account code does not exist
/// - A concept with the same code already exists
/// - The database insert fails
pub async fn create_concept(
    db: &DatabaseConnection,
    concept: NewConcept,
) -> Result<RetentionConcept> {
    let code = normalize_code(&concept.code)?;

    if concept.name.trim().is_empty() {
        return Err(Error::invalid_input("Concept name cannot be empty"));
    }

    let minimum_base = whole_pesos(concept.minimum_base)?;

    if concept.rate < Decimal::ZERO || concept.rate > Decimal::ONE_HUNDRED {
        return Err(Error::invalid_input(format!(
            "Concept rate must be between 0 and 100, got {}",
            concept.rate
        )));
    }

    if crate::core::account::get_account_by_code(db, &concept.account_code)
        .await?
        .is_none()
    {
        return Err(Error::invalid_input(format!(
            "Account {} does not exist",
            concept.account_code
        )));
    }

    if find_row(db, &code).await?.is_some() {
        return Err(Error::DuplicateRecord {
            entity: "RetentionConcept",
            key: code,
        });
    }

    let now = chrono::Utc::now().naive_utc();
    let row = retention_concept::ActiveModel {
        code: Set(code),
        name: Set(concept.name.trim().to_string()),
        minimum_base: Set(minimum_base),
        rate: Set(concept.rate.normalize().to_string()),
        account_code: Set(concept.account_code.trim().to_string()),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    row.insert(db).await?.try_into()
}

/// Retrieves all active concepts ordered by code. This is the catalog the calculator
/// receives.
pub async fn get_active_concepts(db: &DatabaseConnection) -> Result<Vec<RetentionConcept>> {
    ConceptEntity::find()
        .filter(retention_concept::Column::IsActive.eq(true))
        .order_by_asc(retention_concept::Column::Code)
        .all(db)
        .await?
        .into_iter()
        .map(TryInto::try_into)
        .collect()
}

/// Finds a concept by code, returning inactive concepts too.
pub async fn get_concept_by_code(
    db: &DatabaseConnection,
    code: &str,
) -> Result<Option<RetentionConcept>> {
    find_row(db, code).await?.map(TryInto::try_into).transpose()
}

/// Deactivates a concept. Existing supplier assignments are kept; the calculator skips
/// them from now on.
///
/// # Errors
/// Returns an error if the concept does not exist or is already inactive.
pub async fn deactivate_concept(
    db: &DatabaseConnection,
    code: &str,
) -> Result<RetentionConcept> {
    let row = find_row(db, code)
        .await?
        .ok_or_else(|| Error::ConceptNotFound {
            code: code.to_string(),
        })?;

    if !row.is_active {
        return Err(Error::InactiveConcept { code: row.code });
    }

    let mut concept: retention_concept::ActiveModel = row.into();
    concept.is_active = Set(false);
    concept.updated_at = Set(chrono::Utc::now().naive_utc());

    concept.update(db).await?.try_into()
}

/// Upper-cases and validates a concept code.
///
/// # Errors
/// Returns [`Error::InvalidInput`] unless the code is exactly three ASCII alphanumerics.
pub fn normalize_code(code: &str) -> Result<String> {
    let code = code.trim().to_ascii_uppercase();
    if code.len() != CONCEPT_CODE_LEN || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::invalid_input(format!(
            "Concept code must be {CONCEPT_CODE_LEN} letters or digits, got '{code}'"
        )));
    }
    Ok(code)
}

fn whole_pesos(amount: Decimal) -> Result<i64> {
    if amount < Decimal::ZERO || !amount.fract().is_zero() {
        return Err(Error::InvalidAmount {
            amount: amount.to_string(),
        });
    }
    amount.to_i64().ok_or_else(|| Error::InvalidAmount {
        amount: amount.to_string(),
    })
}

async fn find_row(
    db: &DatabaseConnection,
    code: &str,
) -> Result<Option<retention_concept::Model>> {
    ConceptEntity::find()
        .filter(retention_concept::Column::Code.eq(code.trim().to_ascii_uppercase()))
        .one(db)
        .await
        .map_err(Into::into)
}
