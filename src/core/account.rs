//! Chart-of-accounts reference data.
//!
//! Retention concepts point at the liability account their withholdings are booked to;
//! the calculator results are annotated with these accounts.

use crate::{
    entities::{AccountingAccount as AccountEntity, accounting_account},
    errors::{Error, Result},
    models::{AccountType, AccountingAccount},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Data needed to register an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// PUC code
    pub code: String,
    /// Display name
    pub name: String,
    /// Account class
    pub account_type: AccountType,
    /// Depth in the chart, starting at 1
    pub level: i32,
    /// Parent account code; must already exist when given
    pub parent_code: Option<String>,
}

/// Creates an account after validating its code, level and parent.
///
/// # Errors
/// Returns an error if:
/// - The code is not all digits or the name is blank
/// - The level is below 1
/// - The parent code does not exist
/// - The code is already taken
/// - The database insert fails
pub async fn create_account(
    db: &DatabaseConnection,
    account: NewAccount,
) -> Result<AccountingAccount> {
    let code = account.code.trim().to_string();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::invalid_input(format!(
            "Account code must be numeric, got '{code}'"
        )));
    }
    if account.name.trim().is_empty() {
        return Err(Error::invalid_input("Account name cannot be empty"));
    }
    if account.level < 1 {
        return Err(Error::invalid_input(format!(
            "Account level must be at least 1, got {}",
            account.level
        )));
    }
    if let Some(parent) = &account.parent_code {
        if find_row(db, parent).await?.is_none() {
            return Err(Error::invalid_input(format!(
                "Parent account {parent} does not exist"
            )));
        }
    }
    if find_row(db, &code).await?.is_some() {
        return Err(Error::DuplicateRecord {
            entity: "AccountingAccount",
            key: code,
        });
    }

    let row = accounting_account::ActiveModel {
        code: Set(code),
        name: Set(account.name.trim().to_string()),
        account_type: Set(account.account_type.as_str().to_string()),
        level: Set(account.level),
        parent_code: Set(account.parent_code),
        is_active: Set(true),
        ..Default::default()
    };
    row.insert(db).await?.try_into()
}

/// Finds an account by code, active or not.
pub async fn get_account_by_code(
    db: &DatabaseConnection,
    code: &str,
) -> Result<Option<AccountingAccount>> {
    find_row(db, code).await?.map(TryInto::try_into).transpose()
}

/// Lists active accounts ordered by code.
pub async fn get_active_accounts(db: &DatabaseConnection) -> Result<Vec<AccountingAccount>> {
    AccountEntity::find()
        .filter(accounting_account::Column::IsActive.eq(true))
        .order_by_asc(accounting_account::Column::Code)
        .all(db)
        .await?
        .into_iter()
        .map(TryInto::try_into)
        .collect()
}

async fn find_row(
    db: &DatabaseConnection,
    code: &str,
) -> Result<Option<accounting_account::Model>> {
    AccountEntity::find()
        .filter(accounting_account::Column::Code.eq(code.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}
