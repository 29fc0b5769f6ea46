//! Supplier concept entity - Ordered assignment of retention concepts to a supplier.
//!
//! Each row links a supplier to a concept code for one kind of purchase (`GOODS` or
//! `SERVICES`). `position` keeps the order in which the concepts were assigned.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supplier concept assignment database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "supplier_concepts")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Supplier the concept is assigned to
    pub supplier_id: i64,
    /// Code of the assigned retention concept
    pub concept_code: String,
    /// `GOODS` or `SERVICES`
    pub kind: String,
    /// Zero-based assignment order within the kind
    pub position: i32,
}

/// Defines relationships between assignments and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each assignment belongs to one supplier
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
