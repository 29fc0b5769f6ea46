//! Retention (withholding tax) calculator.
//!
//! Given a supplier, the purchasing company, the base amount of a purchase and whether
//! the purchase is of goods or services, decides which of the supplier's configured
//! concepts apply and how much is withheld for each. Everything here is a pure function
//! of its arguments; loading the records and logging skipped references is left to the
//! caller (see [`crate::service`]).

use crate::{
    core::money::{ensure_non_negative, percentage_of, round_half_up},
    errors::Result,
    models::{AccountingAccount, Company, RetentionConcept, Supplier, TransactionKind},
};
use rust_decimal::Decimal;
use serde::Serialize;

/// Reason attached to results whose base does not reach the concept's minimum.
pub const BELOW_MINIMUM_REASON: &str = "base amount below minimum threshold";

/// Outcome of evaluating one retention concept against a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetentionCalculationResult {
    /// The concept that was evaluated
    pub concept: RetentionConcept,
    /// Base the rate was applied to
    pub calculation_base: Decimal,
    /// Withheld amount in whole pesos, zero when the concept does not apply
    pub withheld_amount: Decimal,
    /// Whether the base reached the concept's minimum
    pub applies: bool,
    /// Why the concept does not apply, if it does not
    pub reason: Option<String>,
    /// Account the withholding is booked to
    pub account_code: String,
    /// The resolved account, filled in by [`annotate_accounts`]
    pub account: Option<AccountingAccount>,
}

/// Computes the retentions for a purchase.
///
/// Returns one result per concept the supplier has assigned for `kind`, in assignment
/// order, whether or not the concept applies. Assigned codes that are missing from
/// `concepts` or refer to an inactive concept are skipped. When the company is not a
/// withholding agent the result is empty.
///
/// # Errors
/// Returns [`crate::errors::Error::InvalidInput`] when `base_amount` is negative. The
/// check runs before anything else, so no partial result is ever produced.
pub fn calculate_retentions(
    base_amount: Decimal,
    supplier: &Supplier,
    company: &Company,
    kind: TransactionKind,
    concepts: &[RetentionConcept],
) -> Result<Vec<RetentionCalculationResult>> {
    validate_base_amount(base_amount)?;

    if !company.is_withholding_agent {
        return Ok(Vec::new());
    }

    supplier
        .concepts_for(kind)
        .iter()
        .filter_map(|code| resolve_concept(concepts, code))
        .map(|concept| evaluate_concept(base_amount, concept))
        .collect()
}

/// Rejects negative base amounts.
///
/// # Errors
/// Returns [`crate::errors::Error::InvalidInput`] when `base_amount` is below zero.
pub fn validate_base_amount(base_amount: Decimal) -> Result<()> {
    ensure_non_negative(base_amount).map(|_| ())
}

/// Evaluates a single concept against a base amount.
///
/// # Errors
/// Returns [`crate::errors::Error::InvalidAmount`] if `base_amount * rate` overflows.
pub fn evaluate_concept(
    base_amount: Decimal,
    concept: &RetentionConcept,
) -> Result<RetentionCalculationResult> {
    let applies = base_amount >= concept.minimum_base;
    let (withheld_amount, reason) = if applies {
        (round_half_up(percentage_of(base_amount, concept.rate)?), None)
    } else {
        (Decimal::ZERO, Some(BELOW_MINIMUM_REASON.to_string()))
    };

    Ok(RetentionCalculationResult {
        concept: concept.clone(),
        calculation_base: base_amount,
        withheld_amount,
        applies,
        reason,
        account_code: concept.account_code.clone(),
        account: None,
    })
}

/// Finds the active concept with the given code.
#[must_use]
pub fn resolve_concept<'a>(
    concepts: &'a [RetentionConcept],
    code: &str,
) -> Option<&'a RetentionConcept> {
    concepts
        .iter()
        .find(|concept| concept.active && concept.code == code)
}

/// Codes assigned to the supplier for `kind` that do not resolve to an active concept.
#[must_use]
pub fn unresolved_references<'a>(
    supplier: &'a Supplier,
    kind: TransactionKind,
    concepts: &[RetentionConcept],
) -> Vec<&'a str> {
    supplier
        .concepts_for(kind)
        .iter()
        .filter(|code| resolve_concept(concepts, code).is_none())
        .map(String::as_str)
        .collect()
}

/// Attaches the matching active account to every result.
///
/// Results whose account code is unknown keep `account: None`.
pub fn annotate_accounts(
    results: &mut [RetentionCalculationResult],
    accounts: &[AccountingAccount],
) {
    for result in results {
        result.account = accounts
            .iter()
            .find(|account| account.active && account.code == result.account_code)
            .cloned();
    }
}

/// Totals over a set of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetentionSummary {
    /// Base amount of the purchase
    pub base_amount: Decimal,
    /// Sum of the withheld amounts of applicable concepts
    pub total_withheld: Decimal,
    /// Number of concepts that applied
    pub applicable_count: usize,
    /// What is paid to the supplier after withholding
    pub net_payable: Decimal,
}

impl RetentionSummary {
    /// Summarises `results` for a purchase of `base_amount`.
    #[must_use]
    pub fn from_results(base_amount: Decimal, results: &[RetentionCalculationResult]) -> Self {
        let applicable = results.iter().filter(|result| result.applies);
        let (total_withheld, applicable_count) = applicable
            .fold((Decimal::ZERO, 0), |(total, count), result| {
                (total + result.withheld_amount, count + 1)
            });

        Self {
            base_amount,
            total_withheld,
            applicable_count,
            net_payable: base_amount - total_withheld,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::{
        sample_account, sample_company, sample_concept, sample_supplier,
    };
    use rust_decimal_macros::dec;

    fn catalog() -> Vec<RetentionConcept> {
        vec![
            sample_concept("CMP", dec!(1000000), dec!(2.5)),
            sample_concept("SRV", dec!(1000000), dec!(4)),
            sample_concept("HON", dec!(0), dec!(11)),
            sample_concept("ARR", dec!(1000000), dec!(3.5)),
        ]
    }

    #[test]
    fn test_threshold_boundary() {
        let supplier = sample_supplier(&[], &["SRV"]);
        let company = sample_company(true);

        let below = calculate_retentions(
            dec!(999999),
            &supplier,
            &company,
            TransactionKind::Services,
            &catalog(),
        )
        .unwrap();
        assert_eq!(below.len(), 1);
        assert!(!below[0].applies);
        assert_eq!(below[0].withheld_amount, Decimal::ZERO);
        assert_eq!(below[0].reason.as_deref(), Some(BELOW_MINIMUM_REASON));

        let at = calculate_retentions(
            dec!(1000000),
            &supplier,
            &company,
            TransactionKind::Services,
            &catalog(),
        )
        .unwrap();
        assert!(at[0].applies);
        assert_eq!(at[0].withheld_amount, dec!(40000));
        assert_eq!(at[0].reason, None);
        assert_eq!(at[0].calculation_base, dec!(1000000));
    }

    #[test]
    fn test_rounding_is_half_up_to_whole_pesos() {
        let supplier = sample_supplier(&["CMP"], &[]);
        let results = calculate_retentions(
            dec!(1000001),
            &supplier,
            &sample_company(true),
            TransactionKind::Goods,
            &catalog(),
        )
        .unwrap();
        assert_eq!(results[0].withheld_amount, dec!(25000));

        // 1,000,020 * 2.5% = 25000.5
        let results = calculate_retentions(
            dec!(1000020),
            &supplier,
            &sample_company(true),
            TransactionKind::Goods,
            &catalog(),
        )
        .unwrap();
        assert_eq!(results[0].withheld_amount, dec!(25001));
    }

    #[test]
    fn test_non_withholding_agent_short_circuits() {
        let supplier = sample_supplier(&["CMP", "ARR"], &["SRV", "HON"]);
        let company = sample_company(false);

        for kind in [TransactionKind::Goods, TransactionKind::Services] {
            let results =
                calculate_retentions(dec!(50000000), &supplier, &company, kind, &catalog())
                    .unwrap();
            assert!(results.is_empty());
        }
    }

    #[test]
    fn test_negative_base_is_rejected() {
        let result = calculate_retentions(
            dec!(-1),
            &sample_supplier(&["CMP"], &[]),
            &sample_company(true),
            TransactionKind::Goods,
            &catalog(),
        );
        assert!(matches!(result, Err(Error::InvalidInput { .. })));

        // validation happens even when nothing would be withheld
        let result = calculate_retentions(
            dec!(-1),
            &sample_supplier(&["CMP"], &[]),
            &sample_company(false),
            TransactionKind::Goods,
            &catalog(),
        );
        assert!(matches!(result, Err(Error::InvalidInput { .. })));
    }

    #[test]
    fn test_unresolved_and_inactive_references_are_skipped() {
        let mut concepts = catalog();
        concepts[3].active = false; // ARR
        let supplier = sample_supplier(&["XXX", "CMP", "ARR"], &[]);

        let results = calculate_retentions(
            dec!(2000000),
            &supplier,
            &sample_company(true),
            TransactionKind::Goods,
            &concepts,
        )
        .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].concept.code, "CMP");
        assert_eq!(
            unresolved_references(&supplier, TransactionKind::Goods, &concepts),
            vec!["XXX", "ARR"]
        );
    }

    #[test]
    fn test_transaction_kind_isolation() {
        let supplier = sample_supplier(&["CMP", "ARR"], &["SRV", "HON"]);
        let company = sample_company(true);

        let goods = calculate_retentions(
            dec!(2000000),
            &supplier,
            &company,
            TransactionKind::Goods,
            &catalog(),
        )
        .unwrap();
        let goods_codes: Vec<&str> = goods.iter().map(|r| r.concept.code.as_str()).collect();
        assert_eq!(goods_codes, vec!["CMP", "ARR"]);

        let services = calculate_retentions(
            dec!(2000000),
            &supplier,
            &company,
            TransactionKind::Services,
            &catalog(),
        )
        .unwrap();
        let services_codes: Vec<&str> = services.iter().map(|r| r.concept.code.as_str()).collect();
        assert_eq!(services_codes, vec!["SRV", "HON"]);
    }

    #[test]
    fn test_results_follow_assignment_order_and_include_inapplicable() {
        let supplier = sample_supplier(&[], &["SRV", "HON"]);
        let results = calculate_retentions(
            dec!(500000),
            &supplier,
            &sample_company(true),
            TransactionKind::Services,
            &catalog(),
        )
        .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].concept.code, "SRV");
        assert!(!results[0].applies);
        assert_eq!(results[1].concept.code, "HON");
        assert!(results[1].applies);
        assert_eq!(results[1].withheld_amount, dec!(55000));
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let supplier = sample_supplier(&["CMP", "ARR"], &["SRV"]);
        let company = sample_company(true);
        let first = calculate_retentions(
            dec!(1234567),
            &supplier,
            &company,
            TransactionKind::Goods,
            &catalog(),
        )
        .unwrap();
        let second = calculate_retentions(
            dec!(1234567),
            &supplier,
            &company,
            TransactionKind::Goods,
            &catalog(),
        )
        .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_base_with_zero_minimum_applies_with_nothing_withheld() {
        let supplier = sample_supplier(&[], &["HON"]);
        let results = calculate_retentions(
            Decimal::ZERO,
            &supplier,
            &sample_company(true),
            TransactionKind::Services,
            &catalog(),
        )
        .unwrap();
        assert!(results[0].applies);
        assert_eq!(results[0].withheld_amount, Decimal::ZERO);
    }

    #[test]
    fn test_annotate_accounts() {
        let supplier = sample_supplier(&["CMP", "ARR"], &[]);
        let mut concepts = catalog();
        concepts[3].account_code = "999999".to_string();
        let mut results = calculate_retentions(
            dec!(2000000),
            &supplier,
            &sample_company(true),
            TransactionKind::Goods,
            &concepts,
        )
        .unwrap();

        annotate_accounts(&mut results, &[sample_account("236540")]);
        assert_eq!(
            results[0].account.as_ref().map(|a| a.code.as_str()),
            Some("236540")
        );
        assert_eq!(results[1].account, None);
    }

    #[test]
    fn test_summary() {
        let supplier = sample_supplier(&[], &["SRV", "HON"]);
        let results = calculate_retentions(
            dec!(500000),
            &supplier,
            &sample_company(true),
            TransactionKind::Services,
            &catalog(),
        )
        .unwrap();

        let summary = RetentionSummary::from_results(dec!(500000), &results);
        assert_eq!(summary.applicable_count, 1);
        assert_eq!(summary.total_withheld, dec!(55000));
        assert_eq!(summary.net_payable, dec!(445000));
    }
}
