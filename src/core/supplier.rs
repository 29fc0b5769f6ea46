//! Supplier business logic - registration, lookup and retention concept assignment.
//!
//! A supplier row is stored on its own; the concepts withheld on its goods and services
//! purchases are stored as ordered rows in `supplier_concepts`. Loading a supplier always
//! returns the typed [`Supplier`] with both assignment lists in their stored order.

use crate::{
    core::{concept, nit::Nit, tax_regime::require_active_tax_regime},
    entities::{Supplier as SupplierEntity, SupplierConcept, supplier, supplier_concept},
    errors::{Error, Result},
    models::{PersonType, PrimaryTransactionType, Supplier, TransactionKind, VatResponsibility},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::HashSet;

/// Data needed to register a supplier.
#[derive(Debug, Clone)]
pub struct NewSupplier {
    /// NIT, with or without check digit
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
    /// VAT responsibility
    pub vat_responsibility: VatResponsibility,
    /// Autorretenedor
    pub is_self_withholder: bool,
    /// Declarante de renta
    pub is_income_tax_filer: bool,
    /// Natural or legal person
    pub person_type: PersonType,
    /// What the supplier usually sells
    pub primary_transaction_type: PrimaryTransactionType,
    /// Registered for ICA
    pub registered_for_local_turnover_tax: bool,
}

/// Registers a supplier with no concepts assigned.
///
/// The NIT is validated (including its check digit when one is given) and stored as
/// `digits-dv`. Blank optional contact fields are stored as `None`.
///
/// # Errors
/// Returns an error if:
/// - The NIT is invalid
/// - The name is blank
/// - The tax regime is unknown or inactive
/// - A supplier with the same NIT exists
/// - The database insert fails
pub async fn create_supplier(db: &DatabaseConnection, new: NewSupplier) -> Result<Supplier> {
    let nit = Nit::parse(&new.tax_id)?;
    if new.name.trim().is_empty() {
        return Err(Error::invalid_input("Supplier name cannot be empty"));
    }
    let regime = require_active_tax_regime(db, &new.tax_regime_code).await?;

    let tax_id = nit.to_string();
    let existing = SupplierEntity::find()
        .filter(supplier::Column::TaxId.eq(tax_id.as_str()))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::DuplicateRecord {
            entity: "Supplier",
            key: tax_id,
        });
    }

    let now = chrono::Utc::now().naive_utc();
    let row = supplier::ActiveModel {
        tax_id: Set(tax_id),
        name: Set(new.name.trim().to_string()),
        email: Set(non_blank(new.email)),
        phone: Set(non_blank(new.phone)),
        address: Set(non_blank(new.address)),
        city: Set(non_blank(new.city)),
        tax_regime_code: Set(regime.code),
        vat_responsibility: Set(new.vat_responsibility.as_str().to_string()),
        is_self_withholder: Set(new.is_self_withholder),
        is_income_tax_filer: Set(new.is_income_tax_filer),
        person_type: Set(new.person_type.as_str().to_string()),
        primary_transaction_type: Set(new.primary_transaction_type.as_str().to_string()),
        registered_for_local_turnover_tax: Set(new.registered_for_local_turnover_tax),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let inserted = row.insert(db).await?;
    tracing::debug!(supplier_id = inserted.id, tax_id = %inserted.tax_id, "Supplier created");
    Supplier::from_row(inserted, Vec::new(), Vec::new())
}

/// Retrieves a supplier by id together with its concept assignments.
pub async fn get_supplier_by_id(
    db: &DatabaseConnection,
    supplier_id: i64,
) -> Result<Option<Supplier>> {
    match SupplierEntity::find_by_id(supplier_id).one(db).await? {
        Some(row) => load_with_assignments(db, row).await.map(Some),
        None => Ok(None),
    }
}

/// Retrieves a supplier by NIT together with its concept assignments.
///
/// # Errors
/// Returns an error if the NIT is invalid or a query fails.
pub async fn get_supplier_by_tax_id(
    db: &DatabaseConnection,
    tax_id: &str,
) -> Result<Option<Supplier>> {
    let nit = Nit::parse(tax_id)?;
    let row = SupplierEntity::find()
        .filter(supplier::Column::TaxId.eq(nit.to_string()))
        .one(db)
        .await?;

    match row {
        Some(row) => load_with_assignments(db, row).await.map(Some),
        None => Ok(None),
    }
}

/// Retrieves all active suppliers ordered by name, each with its assignments.
pub async fn get_all_active_suppliers(db: &DatabaseConnection) -> Result<Vec<Supplier>> {
    let rows = SupplierEntity::find()
        .filter(supplier::Column::IsActive.eq(true))
        .order_by_asc(supplier::Column::Name)
        .order_by_asc(supplier::Column::Id)
        .find_with_related(SupplierConcept)
        .all(db)
        .await?;

    rows.into_iter()
        .map(|(row, mut assignments)| {
            assignments.sort_by_key(|assignment| assignment.position);
            let (goods, services) = split_assignments(assignments);
            Supplier::from_row(row, goods, services)
        })
        .collect()
}

/// Replaces the concepts assigned to a supplier for one kind of purchase.
///
/// The codes are stored in the given order, which is the order the calculator reports
/// results in. Every code must name an active concept and appear only once. An empty
/// slice clears the assignments for that kind.
///
/// # Errors
/// Returns an error if:
/// - The supplier does not exist
/// - A code is malformed or repeated
/// - A code names a missing or inactive concept
/// - The database operation fails
pub async fn assign_concepts<S: AsRef<str>>(
    db: &DatabaseConnection,
    supplier_id: i64,
    kind: TransactionKind,
    codes: &[S],
) -> Result<Vec<String>> {
    if SupplierEntity::find_by_id(supplier_id).one(db).await?.is_none() {
        return Err(Error::SupplierNotFound {
            id: supplier_id.to_string(),
        });
    }

    let mut seen = HashSet::new();
    let mut validated = Vec::with_capacity(codes.len());
    for raw in codes {
        let code = concept::normalize_code(raw.as_ref())?;
        if !seen.insert(code.clone()) {
            return Err(Error::invalid_input(format!(
                "Concept {code} is assigned more than once"
            )));
        }

        match concept::get_concept_by_code(db, &code).await? {
            None => return Err(Error::ConceptNotFound { code }),
            Some(found) if !found.active => return Err(Error::InactiveConcept { code }),
            Some(_) => validated.push(code),
        }
    }

    // Replace the previous list atomically
    let txn = db.begin().await?;

    SupplierConcept::delete_many()
        .filter(supplier_concept::Column::SupplierId.eq(supplier_id))
        .filter(supplier_concept::Column::Kind.eq(kind.as_str()))
        .exec(&txn)
        .await?;

    for (position, code) in validated.iter().enumerate() {
        let position = i32::try_from(position)
            .map_err(|_| Error::invalid_input("Too many concepts assigned"))?;
        supplier_concept::ActiveModel {
            supplier_id: Set(supplier_id),
            concept_code: Set(code.clone()),
            kind: Set(kind.as_str().to_string()),
            position: Set(position),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    tracing::info!(
        supplier_id,
        kind = %kind,
        concepts = ?validated,
        "Retention concepts assigned"
    );
    Ok(validated)
}

/// Soft deletes a supplier. Its assignments are preserved.
///
/// # Errors
/// Returns an error if the supplier does not exist or is already inactive.
pub async fn deactivate_supplier(db: &DatabaseConnection, supplier_id: i64) -> Result<Supplier> {
    let row = SupplierEntity::find_by_id(supplier_id)
        .one(db)
        .await?
        .filter(|row| row.is_active)
        .ok_or_else(|| Error::SupplierNotFound {
            id: supplier_id.to_string(),
        })?;

    let mut active: supplier::ActiveModel = row.into();
    active.is_active = Set(false);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    let updated = active.update(db).await?;

    load_with_assignments(db, updated).await
}

async fn load_with_assignments(db: &DatabaseConnection, row: supplier::Model) -> Result<Supplier> {
    let assignments = SupplierConcept::find()
        .filter(supplier_concept::Column::SupplierId.eq(row.id))
        .order_by_asc(supplier_concept::Column::Position)
        .all(db)
        .await?;

    let (goods, services) = split_assignments(assignments);
    Supplier::from_row(row, goods, services)
}

/// Splits position-ordered assignment rows into goods and services code lists.
fn split_assignments(assignments: Vec<supplier_concept::Model>) -> (Vec<String>, Vec<String>) {
    let mut goods = Vec::new();
    let mut services = Vec::new();
    for assignment in assignments {
        match assignment.kind.parse::<TransactionKind>() {
            Ok(TransactionKind::Goods) => goods.push(assignment.concept_code),
            Ok(TransactionKind::Services) => services.push(assignment.concept_code),
            Err(_) => tracing::warn!(
                supplier_id = assignment.supplier_id,
                kind = %assignment.kind,
                "Ignoring concept assignment with unknown kind"
            ),
        }
    }
    (goods, services)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
