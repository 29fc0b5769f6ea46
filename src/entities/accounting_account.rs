//! Accounting account entity - Rows of the chart of accounts (PUC).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Accounting account database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounting_accounts")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// PUC code (e.g. "236540")
    #[sea_orm(unique)]
    pub code: String,
    /// Display name
    pub name: String,
    /// One of `ASSET`, `LIABILITY`, `EQUITY`, `INCOME`, `EXPENSE`, `COST`
    pub account_type: String,
    /// Depth in the chart
    pub level: i32,
    /// Code of the parent account, None for top-level classes
    pub parent_code: Option<String>,
    /// Soft delete flag
    pub is_active: bool,
}

/// Accounts are referenced by code from retention concepts
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
