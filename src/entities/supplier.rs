//! Supplier entity - Represents the suppliers a company buys from.
//!
//! Enumerated fields (`vat_responsibility`, `person_type`, `primary_transaction_type`)
//! are stored as their upper-case names. Retention concept assignments live in the
//! `supplier_concepts` table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supplier database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    /// Unique identifier for the supplier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// NIT in `digits-dv` form
    #[sea_orm(unique)]
    pub tax_id: String,
    /// Business or person name
    pub name: String,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// City
    pub city: Option<String>,
    /// Code of the supplier's tax regime
    pub tax_regime_code: String,
    /// `RESPONSIBLE` or `NOT_RESPONSIBLE`
    pub vat_responsibility: String,
    /// Autorretenedor flag
    pub is_self_withholder: bool,
    /// Declarante de renta flag
    pub is_income_tax_filer: bool,
    /// `NATURAL` or `LEGAL`
    pub person_type: String,
    /// `GOODS`, `SERVICES` or `BOTH`
    pub primary_transaction_type: String,
    /// Registered for ICA
    pub registered_for_local_turnover_tax: bool,
    /// Soft delete flag - if false, supplier is hidden but data is preserved
    pub is_active: bool,
    /// When the supplier was created
    pub created_at: DateTime,
    /// When the supplier was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Supplier and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One supplier has many concept assignments
    #[sea_orm(has_many = "super::supplier_concept::Entity")]
    SupplierConcepts,
}

impl Related<super::supplier_concept::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupplierConcepts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
