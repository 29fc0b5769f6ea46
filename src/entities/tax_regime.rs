//! Tax regime entity - Reference data for the regimes suppliers and companies belong to.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tax regime database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tax_regimes")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Regime code (e.g. "RC" for régimen común)
    #[sea_orm(unique)]
    pub code: String,
    /// Display name
    pub name: String,
    /// Whether members file income tax returns
    pub is_income_tax_filer: bool,
    /// Whether the regime charges VAT
    pub applies_vat: bool,
    /// Soft delete flag
    pub is_active: bool,
}

/// Tax regimes are referenced by code, not by foreign key
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
