//! End-to-end retention calculation over a [`RetentionRepository`].

use crate::{
    core::retention::{
        RetentionCalculationResult, RetentionSummary, annotate_accounts, calculate_retentions,
        unresolved_references, validate_base_amount,
    },
    errors::{Error, Result},
    models::{Company, Supplier, TransactionKind},
    repository::RetentionRepository,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

/// A purchase to compute retentions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionRequest {
    /// Supplier being paid
    pub supplier_id: i64,
    /// Company making the purchase
    pub company_id: i64,
    /// Base amount of the purchase in pesos
    pub base_amount: Decimal,
    /// Whether the purchase is of goods or services
    pub kind: TransactionKind,
}

/// Everything computed for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetentionReport {
    /// The supplier the calculation was made for
    pub supplier: Supplier,
    /// The purchasing company
    pub company: Company,
    /// Goods or services
    pub kind: TransactionKind,
    /// One result per resolved concept, in assignment order
    pub results: Vec<RetentionCalculationResult>,
    /// Totals over `results`
    pub summary: RetentionSummary,
    /// Assigned codes that did not resolve to an active concept
    pub skipped_concepts: Vec<String>,
}

/// Runs retention calculations against a repository.
#[derive(Debug)]
pub struct RetentionService<R> {
    repository: R,
}

impl<R: RetentionRepository> RetentionService<R> {
    /// Creates a service reading from `repository`.
    #[must_use]
    pub const fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Loads the supplier, company and catalog for `request` and computes its retentions.
    ///
    /// Each result carries its accounting account when the account is active.
    ///
    /// # Errors
    /// - [`Error::InvalidInput`] if the base amount is negative (checked before any lookup)
    /// - [`Error::SupplierNotFound`] / [`Error::CompanyNotFound`] for unknown ids
    /// - Any repository error
    pub async fn calculate(&self, request: &RetentionRequest) -> Result<RetentionReport> {
        validate_base_amount(request.base_amount)?;

        let supplier = self
            .repository
            .find_supplier(request.supplier_id)
            .await?
            .ok_or_else(|| Error::SupplierNotFound {
                id: request.supplier_id.to_string(),
            })?;
        let company = self
            .repository
            .find_company(request.company_id)
            .await?
            .ok_or_else(|| Error::CompanyNotFound {
                id: request.company_id.to_string(),
            })?;

        let concepts = self.repository.active_concepts().await?;

        let skipped_concepts: Vec<String> =
            unresolved_references(&supplier, request.kind, &concepts)
                .into_iter()
                .map(str::to_string)
                .collect();
        for code in &skipped_concepts {
            warn!(
                supplier_id = supplier.id,
                kind = %request.kind,
                code = %code,
                "Skipping retention concept that is missing or inactive"
            );
        }

        let mut results = calculate_retentions(
            request.base_amount,
            &supplier,
            &company,
            request.kind,
            &concepts,
        )?;
        if !company.is_withholding_agent {
            debug!(
                company_id = company.id,
                "Company is not a withholding agent, nothing withheld"
            );
        }

        let accounts = self.repository.active_accounts().await?;
        annotate_accounts(&mut results, &accounts);

        let summary = RetentionSummary::from_results(request.base_amount, &results);
        info!(
            supplier_id = supplier.id,
            company_id = company.id,
            kind = %request.kind,
            base = %request.base_amount,
            withheld = %summary.total_withheld,
            concepts = results.len(),
            "Retentions calculated"
        );

        Ok(RetentionReport {
            supplier,
            company,
            kind: request.kind,
            results,
            summary,
            skipped_concepts,
        })
    }
}
