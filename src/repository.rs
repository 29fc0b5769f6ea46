//! Read access to the records a retention calculation needs.
//!
//! [`RetentionRepository`] is the seam between the calculation flow in
//! [`crate::service`] and wherever suppliers, companies, concepts and accounts live.
//! [`DatabaseRepository`] reads them through the `core` functions; [`InMemoryRepository`]
//! holds them in vectors and is what tests and one-off calculations inject instead.

use crate::{
    core::{account, company, concept, supplier},
    errors::Result,
    models::{AccountingAccount, Company, RetentionConcept, Supplier},
};
use sea_orm::DatabaseConnection;
use std::future::Future;

/// Lookup operations used by the retention service.
pub trait RetentionRepository {
    /// Finds a supplier (with its concept assignments) by id.
    fn find_supplier(
        &self,
        supplier_id: i64,
    ) -> impl Future<Output = Result<Option<Supplier>>> + Send;

    /// Finds a company by id.
    fn find_company(&self, company_id: i64)
    -> impl Future<Output = Result<Option<Company>>> + Send;

    /// All active retention concepts.
    fn active_concepts(&self) -> impl Future<Output = Result<Vec<RetentionConcept>>> + Send;

    /// All active accounting accounts.
    fn active_accounts(&self) -> impl Future<Output = Result<Vec<AccountingAccount>>> + Send;
}

/// Repository backed by the `SeaORM` database.
#[derive(Debug)]
pub struct DatabaseRepository {
    db: DatabaseConnection,
}

impl DatabaseRepository {
    /// Wraps an open connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl RetentionRepository for DatabaseRepository {
    async fn find_supplier(&self, supplier_id: i64) -> Result<Option<Supplier>> {
        supplier::get_supplier_by_id(&self.db, supplier_id).await
    }

    async fn find_company(&self, company_id: i64) -> Result<Option<Company>> {
        company::get_company_by_id(&self.db, company_id).await
    }

    async fn active_concepts(&self) -> Result<Vec<RetentionConcept>> {
        concept::get_active_concepts(&self.db).await
    }

    async fn active_accounts(&self) -> Result<Vec<AccountingAccount>> {
        account::get_active_accounts(&self.db).await
    }
}

/// Repository holding its records in memory.
///
/// Inactive concepts and accounts may be added; they are filtered out on read the same
/// way the database repository filters them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    suppliers: Vec<Supplier>,
    companies: Vec<Company>,
    concepts: Vec<RetentionConcept>,
    accounts: Vec<AccountingAccount>,
}

impl InMemoryRepository {
    /// An empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a supplier, replacing any with the same id.
    #[must_use]
    pub fn with_supplier(mut self, supplier: Supplier) -> Self {
        self.suppliers.retain(|existing| existing.id != supplier.id);
        self.suppliers.push(supplier);
        self
    }

    /// Adds a company, replacing any with the same id.
    #[must_use]
    pub fn with_company(mut self, company: Company) -> Self {
        self.companies.retain(|existing| existing.id != company.id);
        self.companies.push(company);
        self
    }

    /// Adds concepts to the catalog.
    #[must_use]
    pub fn with_concepts(mut self, concepts: impl IntoIterator<Item = RetentionConcept>) -> Self {
        self.concepts.extend(concepts);
        self
    }

    /// Adds accounts to the chart of accounts.
    #[must_use]
    pub fn with_accounts(
        mut self,
        accounts: impl IntoIterator<Item = AccountingAccount>,
    ) -> Self {
        self.accounts.extend(accounts);
        self
    }
}

impl RetentionRepository for InMemoryRepository {
    async fn find_supplier(&self, supplier_id: i64) -> Result<Option<Supplier>> {
        Ok(self
            .suppliers
            .iter()
            .find(|supplier| supplier.id == supplier_id)
            .cloned())
    }

    async fn find_company(&self, company_id: i64) -> Result<Option<Company>> {
        Ok(self
            .companies
            .iter()
            .find(|company| company.id == company_id)
            .cloned())
    }

    async fn active_concepts(&self) -> Result<Vec<RetentionConcept>> {
        let mut concepts: Vec<_> = self
            .concepts
            .iter()
            .filter(|concept| concept.active)
            .cloned()
            .collect();
        concepts.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(concepts)
    }

    async fn active_accounts(&self) -> Result<Vec<AccountingAccount>> {
        let mut accounts: Vec<_> = self
            .accounts
            .iter()
            .filter(|account| account.active)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(accounts)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{
        create_test_company, create_test_supplier, sample_account, sample_company,
        sample_concept, sample_supplier, setup_with_catalog,
    };
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_in_memory_lookups() -> Result<()> {
        let repo = InMemoryRepository::new()
            .with_supplier(sample_supplier(&["CMP"], &[]))
            .with_company(sample_company(true));

        assert_eq!(repo.find_supplier(1).await?.unwrap().goods_concepts, ["CMP"]);
        assert!(repo.find_supplier(2).await?.is_none());
        assert!(repo.find_company(1).await?.unwrap().is_withholding_agent);
        assert!(repo.find_company(7).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_in_memory_replaces_same_id() -> Result<()> {
        let repo = InMemoryRepository::new()
            .with_company(sample_company(true))
            .with_company(sample_company(false));

        assert!(!repo.find_company(1).await?.unwrap().is_withholding_agent);
        Ok(())
    }

    #[tokio::test]
    async fn test_in_memory_filters_inactive() -> Result<()> {
        let mut retired = sample_concept("OLD", dec!(0), dec!(1));
        retired.active = false;
        let mut closed = sample_account("236595");
        closed.active = false;

        let repo = InMemoryRepository::new()
            .with_concepts([sample_concept("SRV", dec!(0), dec!(4)), retired])
            .with_accounts([sample_account("236525"), closed]);

        let concepts = repo.active_concepts().await?;
        assert_eq!(concepts.len(), 1);
        assert_eq!(concepts[0].code, "SRV");
        let accounts = repo.active_accounts().await?;
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].code, "236525");
        Ok(())
    }

    #[tokio::test]
    async fn test_database_repository_over_mock_connection() -> Result<()> {
        use crate::entities::CompanyModel;
        use sea_orm::{DatabaseBackend, MockDatabase};

        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<CompanyModel>::new()])
            .into_connection();
        let repo = DatabaseRepository::new(db);

        assert!(repo.find_company(1).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_database_repository_reads_core_records() -> Result<()> {
        let db = setup_with_catalog().await?;
        let supplier = create_test_supplier(&db, "800197268-4", &["CMP"], &["SRV", "HON"]).await?;
        let company = create_test_company(&db, "900123456-8", true).await?;
        let repo = DatabaseRepository::new(db);

        let found = repo.find_supplier(supplier.id).await?.unwrap();
        assert_eq!(found.services_concepts, ["SRV", "HON"]);
        assert_eq!(repo.find_company(company.id).await?.unwrap(), company);
        assert!(repo.find_supplier(supplier.id + 100).await?.is_none());

        let codes: Vec<_> = repo
            .active_concepts()
            .await?
            .into_iter()
            .map(|concept| concept.code)
            .collect();
        assert_eq!(codes, ["ARR", "CMP", "HON", "SRV"]);
        assert_eq!(repo.active_accounts().await?.len(), 4);
        Ok(())
    }
}
