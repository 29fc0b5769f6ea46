//! Catalog configuration loading from catalog.toml
//!
//! The catalog file holds the reference data a fresh database is seeded with: tax
//! regimes, the chart-of-accounts entries retentions are booked to, the retention
//! concepts themselves and the purchasing companies.

use crate::{
    errors::{Error, Result},
    models::AccountType,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// Default location of the catalog file.
pub const DEFAULT_CATALOG_PATH: &str = "catalog.toml";

/// Configuration structure representing the entire catalog.toml file
#[derive(Debug, Default, Deserialize)]
pub struct CatalogConfig {
    /// Tax regimes to seed
    #[serde(default)]
    pub tax_regimes: Vec<TaxRegimeConfig>,
    /// Accounting accounts to seed
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
    /// Retention concepts to seed
    #[serde(default)]
    pub concepts: Vec<ConceptConfig>,
    /// Companies to seed
    #[serde(default)]
    pub companies: Vec<CompanyConfig>,
}

/// A tax regime entry
#[derive(Debug, Deserialize, Clone)]
pub struct TaxRegimeConfig {
    /// Regime code
    pub code: String,
    /// Display name
    pub name: String,
    /// Members file income tax
    pub is_income_tax_filer: bool,
    /// Regime charges VAT
    pub applies_vat: bool,
}

/// An accounting account entry
#[derive(Debug, Deserialize, Clone)]
pub struct AccountConfig {
    /// PUC code
    pub code: String,
    /// Display name
    pub name: String,
    /// Account class, e.g. `"LIABILITY"`
    pub account_type: AccountType,
    /// Depth in the chart
    pub level: i32,
    /// Parent account code
    #[serde(default)]
    pub parent_code: Option<String>,
}

/// A retention concept entry
#[derive(Debug, Deserialize, Clone)]
pub struct ConceptConfig {
    /// Three-character code
    pub code: String,
    /// Display name
    pub name: String,
    /// Minimum base in whole pesos
    pub minimum_base: i64,
    /// Percentage rate, written as a string (e.g. `"2.5"`)
    pub rate: Decimal,
    /// PUC code of the account the withholding is booked to
    pub account_code: String,
}

/// A company entry
#[derive(Debug, Deserialize, Clone)]
pub struct CompanyConfig {
    /// NIT
    pub tax_id: String,
    /// Company name
    pub name: String,
    /// Tax regime code
    pub tax_regime_code: String,
    /// Whether the company withholds
    pub is_withholding_agent: bool,
    /// Municipality of operation
    pub municipality: String,
}

/// Loads the catalog from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "Loading catalog configuration");
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read catalog file {}: {e}", path.display()),
    })?;

    parse_catalog(&contents)
}

/// Parses catalog TOML from a string
///
/// # Errors
/// Returns [`Error::Config`] when the TOML is invalid or incomplete.
pub fn parse_catalog(contents: &str) -> Result<CatalogConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse catalog: {e}"),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_catalog() {
        let toml_str = r#"
            [[tax_regimes]]
            code = "RC"
            name = "Responsable de IVA"
            is_income_tax_filer = true
            applies_vat = true

            [[accounts]]
            code = "2365"
            name = "Retención en la fuente"
            account_type = "LIABILITY"
            level = 3

            [[accounts]]
            code = "236540"
            name = "Compras"
            account_type = "LIABILITY"
            level = 4
            parent_code = "2365"

            [[concepts]]
            code = "CMP"
            name = "Compras generales declarantes"
            minimum_base = 1271000
            rate = "2.5"
            account_code = "236540"
        "#;

        let catalog = parse_catalog(toml_str).unwrap();
        assert_eq!(catalog.tax_regimes.len(), 1);
        assert_eq!(catalog.accounts.len(), 2);
        assert_eq!(catalog.accounts[0].parent_code, None);
        assert_eq!(catalog.accounts[1].account_type, AccountType::Liability);
        assert_eq!(catalog.concepts[0].rate, dec!(2.5));
        assert_eq!(catalog.concepts[0].minimum_base, 1_271_000);
        assert!(catalog.companies.is_empty());
    }

    #[test]
    fn test_parse_catalog_reports_missing_fields() {
        let result = parse_catalog("[[concepts]]\ncode = \"CMP\"\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_bundled_catalog_parses() {
        let catalog = parse_catalog(include_str!("../../catalog.toml")).unwrap();
        assert!(!catalog.concepts.is_empty());
        assert!(!catalog.companies.is_empty());
    }
}
