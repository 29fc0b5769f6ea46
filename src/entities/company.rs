//! Company entity - The purchasing companies that may act as withholding agents.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Company database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// NIT in `digits-dv` form
    #[sea_orm(unique)]
    pub tax_id: String,
    /// Company name
    pub name: String,
    /// Code of the company's tax regime
    pub tax_regime_code: String,
    /// Whether the company is obligated to withhold
    pub is_withholding_agent: bool,
    /// Municipality of operation
    pub municipality: String,
    /// Soft delete flag
    pub is_active: bool,
}

/// `Company` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
