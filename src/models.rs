//! Typed domain records.
//!
//! These are the shapes the retention calculator consumes. They are independent of
//! storage: the SeaORM rows in [`crate::entities`] convert into them through the
//! `TryFrom` impls in this module, which is where stored strings become enums and
//! stored numbers become `Decimal`s.

use crate::{
    entities::{accounting_account, company, retention_concept, supplier, tax_regime},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Declares an enum stored as an upper-case string with `as_str`/`FromStr`/`Display`.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Upper-case name used in storage and configuration files.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s.trim().to_ascii_uppercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(Error::invalid_input(format!(
                        "unknown {} '{other}'",
                        stringify!($name)
                    ))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// Whether the supplier charges VAT (IVA).
    VatResponsibility {
        /// Responsable de IVA
        Responsible => "RESPONSIBLE",
        /// No responsable de IVA
        NotResponsible => "NOT_RESPONSIBLE",
    }
}

string_enum! {
    /// Legal nature of the supplier.
    PersonType {
        /// Persona natural
        Natural => "NATURAL",
        /// Persona jurídica
        Legal => "LEGAL",
    }
}

string_enum! {
    /// What a supplier usually sells.
    PrimaryTransactionType {
        /// Goods only
        Goods => "GOODS",
        /// Services only
        Services => "SERVICES",
        /// Both goods and services
        Both => "BOTH",
    }
}

string_enum! {
    /// Kind of a single purchase being evaluated for withholding.
    TransactionKind {
        /// Purchase of goods
        Goods => "GOODS",
        /// Purchase of services
        Services => "SERVICES",
    }
}

string_enum! {
    /// Class of an accounting account in the chart of accounts (PUC).
    AccountType {
        /// Activo
        Asset => "ASSET",
        /// Pasivo
        Liability => "LIABILITY",
        /// Patrimonio
        Equity => "EQUITY",
        /// Ingresos
        Income => "INCOME",
        /// Gastos
        Expense => "EXPENSE",
        /// Costos
        Cost => "COST",
    }
}

/// A withholding-tax rule: a rate applied once the base reaches a minimum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionConcept {
    /// Three-character identifier, unique across the catalog
    pub code: String,
    /// Display name (e.g. "Compras generales declarantes")
    pub name: String,
    /// Minimum taxable base in pesos
    pub minimum_base: Decimal,
    /// Percentage rate, 0 to 100
    pub rate: Decimal,
    /// Code of the accounting account the withheld amount is booked to
    pub account_code: String,
    /// Inactive concepts are never applied
    pub active: bool,
}

/// Tax regime a supplier or company is registered under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRegime {
    /// Regime code
    pub code: String,
    /// Display name
    pub name: String,
    /// Whether members of the regime file income tax returns
    pub is_income_tax_filer: bool,
    /// Whether the regime charges VAT
    pub applies_vat: bool,
    /// Soft-delete flag
    pub active: bool,
}

/// A supplier together with its configured retention concepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    /// Database id
    pub id: i64,
    /// NIT in `digits-dv` form
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
    /// Code of the tax regime
    pub tax_regime_code: String,
    /// VAT responsibility
    pub vat_responsibility: VatResponsibility,
    /// Autorretenedor: withholds on itself
    pub is_self_withholder: bool,
    /// Declarante de renta
    pub is_income_tax_filer: bool,
    /// Natural or legal person
    pub person_type: PersonType,
    /// What the supplier usually sells
    pub primary_transaction_type: PrimaryTransactionType,
    /// Concept codes applied to goods purchases, in assignment order
    pub goods_concepts: Vec<String>,
    /// Concept codes applied to services purchases, in assignment order
    pub services_concepts: Vec<String>,
    /// Registered for ICA (local turnover tax)
    pub registered_for_local_turnover_tax: bool,
    /// Soft-delete flag
    pub active: bool,
}

impl Supplier {
    /// Concept codes configured for the given kind of purchase.
    #[must_use]
    pub fn concepts_for(&self, kind: TransactionKind) -> &[String] {
        match kind {
            TransactionKind::Goods => &self.goods_concepts,
            TransactionKind::Services => &self.services_concepts,
        }
    }
}

/// The purchasing company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Database id
    pub id: i64,
    /// NIT in `digits-dv` form
    pub tax_id: String,
    /// Company name
    pub name: String,
    /// Code of the tax regime
    pub tax_regime_code: String,
    /// Agente de retención: only withholding agents withhold
    pub is_withholding_agent: bool,
    /// Municipality where the company operates
    pub municipality: String,
    /// Soft-delete flag
    pub active: bool,
}

/// An account from the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingAccount {
    /// PUC code (e.g. "236540")
    pub code: String,
    /// Display name
    pub name: String,
    /// Account class
    pub account_type: AccountType,
    /// Depth in the chart, 1 for classes
    pub level: i32,
    /// Code of the parent account
    pub parent_code: Option<String>,
    /// Soft-delete flag
    pub active: bool,
}

fn corrupt(entity: &'static str, err: &Error) -> Error {
    Error::CorruptRecord {
        entity,
        message: err.to_string(),
    }
}

impl TryFrom<retention_concept::Model> for RetentionConcept {
    type Error = Error;

    fn try_from(row: retention_concept::Model) -> Result<Self> {
        let rate = Decimal::from_str(&row.rate).map_err(|e| Error::CorruptRecord {
            entity: "RetentionConcept",
            message: format!("rate '{}' for {}: {e}", row.rate, row.code),
        })?;

        Ok(Self {
            code: row.code,
            name: row.name,
            minimum_base: Decimal::from(row.minimum_base),
            rate,
            account_code: row.account_code,
            active: row.is_active,
        })
    }
}

impl From<tax_regime::Model> for TaxRegime {
    fn from(row: tax_regime::Model) -> Self {
        Self {
            code: row.code,
            name: row.name,
            is_income_tax_filer: row.is_income_tax_filer,
            applies_vat: row.applies_vat,
            active: row.is_active,
        }
    }
}

impl TryFrom<accounting_account::Model> for AccountingAccount {
    type Error = Error;

    fn try_from(row: accounting_account::Model) -> Result<Self> {
        Ok(Self {
            account_type: row
                .account_type
                .parse()
                .map_err(|e| corrupt("AccountingAccount", &e))?,
            code: row.code,
            name: row.name,
            level: row.level,
            parent_code: row.parent_code,
            active: row.is_active,
        })
    }
}

impl From<company::Model> for Company {
    fn from(row: company::Model) -> Self {
        Self {
            id: row.id,
            tax_id: row.tax_id,
            name: row.name,
            tax_regime_code: row.tax_regime_code,
            is_withholding_agent: row.is_withholding_agent,
            municipality: row.municipality,
            active: row.is_active,
        }
    }
}

impl Supplier {
    /// Builds a supplier from its row and its ordered concept assignments.
    ///
    /// # Errors
    /// Returns [`Error::CorruptRecord`] if a stored enum value is not recognised.
    pub fn from_row(
        row: supplier::Model,
        goods_concepts: Vec<String>,
        services_concepts: Vec<String>,
    ) -> Result<Self> {
        Ok(Self {
            vat_responsibility: row
                .vat_responsibility
                .parse()
                .map_err(|e| corrupt("Supplier", &e))?,
            person_type: row
                .person_type
                .parse()
                .map_err(|e| corrupt("Supplier", &e))?,
            primary_transaction_type: row
                .primary_transaction_type
                .parse()
                .map_err(|e| corrupt("Supplier", &e))?,
            id: row.id,
            tax_id: row.tax_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            city: row.city,
            tax_regime_code: row.tax_regime_code,
            is_self_withholder: row.is_self_withholder,
            is_income_tax_filer: row.is_income_tax_filer,
            goods_concepts,
            services_concepts,
            registered_for_local_turnover_tax: row.registered_for_local_turnover_tax,
            active: row.is_active,
        })
    }
}
