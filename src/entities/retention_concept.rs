//! Retention concept entity - The withholding-tax rules the calculator applies.
//!
//! The minimum base is stored in whole pesos. The rate is stored as canonical decimal
//! text (e.g. `"2.5"`) so it round-trips exactly through SQLite.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Retention concept database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "retention_concepts")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Three-character concept code
    #[sea_orm(unique)]
    pub code: String,
    /// Display name
    pub name: String,
    /// Minimum taxable base in pesos
    pub minimum_base: i64,
    /// Percentage rate as decimal text
    pub rate: String,
    /// PUC code of the account the withholding is booked to
    pub account_code: String,
    /// Soft delete flag - inactive concepts are ignored by the calculator
    pub is_active: bool,
    /// When the concept was created
    pub created_at: DateTime,
    /// When the concept was last modified
    pub updated_at: DateTime,
}

/// Concepts are linked to suppliers through `supplier_concepts` by code
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
