//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod accounting_account;
pub mod company;
pub mod retention_concept;
pub mod supplier;
pub mod supplier_concept;
pub mod tax_regime;

// Re-export specific types to avoid conflicts
pub use accounting_account::{
    Column as AccountingAccountColumn, Entity as AccountingAccount,
    Model as AccountingAccountModel,
};
pub use company::{Column as CompanyColumn, Entity as Company, Model as CompanyModel};
pub use retention_concept::{
    Column as RetentionConceptColumn, Entity as RetentionConcept, Model as RetentionConceptModel,
};
pub use supplier::{Column as SupplierColumn, Entity as Supplier, Model as SupplierModel};
pub use supplier_concept::{
    Column as SupplierConceptColumn, Entity as SupplierConcept, Model as SupplierConceptModel,
};
pub use tax_regime::{Column as TaxRegimeColumn, Entity as TaxRegime, Model as TaxRegimeModel};
