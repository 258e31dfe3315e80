use log::warn;
use rust_decimal::Decimal;

use super::aggregation_model::{AmountPolicy, RebateEntry, RebateSummary, YearFilter};
use super::filters::{available_years, filter_by_query, filter_by_year};
use crate::errors::{Result, ValidationError};
use crate::money::Amount;

fn amount_for_total(
    record_id: i64,
    field: &str,
    amount: &Amount,
    policy: AmountPolicy,
    malformed: &mut usize,
) -> Result<Decimal> {
    match amount {
        Amount::Value(value) => Ok(*value),
        // Not yet entered: contributes nothing.
        Amount::Missing => Ok(Decimal::ZERO),
        Amount::Malformed(raw) => match policy {
            AmountPolicy::CoerceToZero => {
                warn!(
                    "[Summary] Record {} has non-numeric {} '{}'; counted as zero",
                    record_id, field, raw
                );
                *malformed += 1;
                Ok(Decimal::ZERO)
            }
            AmountPolicy::Strict => Err(ValidationError::MalformedAmount {
                record_id,
                field: field.to_string(),
                value: raw.clone(),
            }
            .into()),
        },
    }
}

/// Folds offered and approved amounts over `records`.
///
/// An empty input yields the all-zero summary with `count == 0`.
pub fn summarize<'a, T, I>(records: I, policy: AmountPolicy) -> Result<RebateSummary>
where
    T: RebateEntry + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut summary = RebateSummary::default();
    for record in records {
        let id = record.entry_id();
        let details = record.details();
        summary.offered_total += amount_for_total(
            id,
            "offered_rebate_amount",
            &details.offered_rebate_amount,
            policy,
            &mut summary.malformed_amounts,
        )?;
        summary.approved_total += amount_for_total(
            id,
            "approved_rebate_amount",
            &details.approved_rebate_amount,
            policy,
            &mut summary.malformed_amounts,
        )?;
        summary.count += 1;
    }
    summary.delta = summary.approved_total - summary.offered_total;
    Ok(summary)
}

/// What a list screen shows: the matching records, totals over exactly those
/// records, and the year choices.
#[derive(Debug, Clone)]
pub struct ListView<'a, T> {
    pub year: YearFilter,
    pub visible: Vec<&'a T>,
    pub summary: RebateSummary,
    pub years: Vec<YearFilter>,
}

impl<'a, T: RebateEntry> ListView<'a, T> {
    pub fn build(
        records: &'a [T],
        query: &str,
        year: YearFilter,
        current_year: i32,
        policy: AmountPolicy,
    ) -> Result<Self> {
        let by_year = filter_by_year(records, year);
        let visible = filter_by_query(by_year, query);
        let summary = summarize(visible.iter().copied(), policy)?;
        Ok(Self {
            year,
            visible,
            summary,
            years: available_years(records, current_year),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applications::ApplicationRecord;
    use crate::errors::Error;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn application(id: i64, name: &str, offered: serde_json::Value, approved: serde_json::Value, created: &str) -> ApplicationRecord {
        serde_json::from_value(json!({
            "id": id,
            "full_name": name,
            "offered_rebate_amount": offered,
            "approved_rebate_amount": approved,
            "created_at": created,
        }))
        .unwrap()
    }

    fn fixture() -> Vec<ApplicationRecord> {
        vec![
            application(1, "Ada", json!(5000), json!(4500), "2024-02-01"),
            application(2, "Grace", json!("1200.50"), json!(null), "2024-07-09"),
            application(3, "Alan", json!(800), json!(1000), "2023-03-03"),
        ]
    }

    #[test]
    fn test_summary_totals_and_delta() {
        let records = fixture();
        let summary = summarize(&records, AmountPolicy::CoerceToZero).unwrap();
        assert_eq!(summary.offered_total, dec!(7000.50));
        assert_eq!(summary.approved_total, dec!(5500));
        assert_eq!(summary.delta, dec!(-1500.50));
        assert_eq!(summary.count, 3);
        assert_eq!(summary.malformed_amounts, 0);
    }

    #[test]
    fn test_empty_input_is_no_data() {
        let records: Vec<ApplicationRecord> = Vec::new();
        let summary = summarize(&records, AmountPolicy::Strict).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary, RebateSummary::default());
    }

    #[test]
    fn test_malformed_amount_policies() {
        let records = vec![
            application(1, "Ada", json!(100), json!("pending"), "2024-01-01"),
            application(2, "Grace", json!(50), json!(75), "2024-01-01"),
        ];

        let lenient = summarize(&records, AmountPolicy::CoerceToZero).unwrap();
        assert_eq!(lenient.approved_total, dec!(75));
        assert_eq!(lenient.malformed_amounts, 1);
        assert_eq!(lenient.count, 2);

        let strict = summarize(&records, AmountPolicy::Strict).unwrap_err();
        assert!(matches!(
            strict,
            Error::Validation(ValidationError::MalformedAmount { record_id: 1, .. })
        ));
    }

    #[test]
    fn test_list_view_sums_only_visible_records() {
        let records = fixture();
        let view =
            ListView::build(&records, "a", YearFilter::Year(2024), 2024, AmountPolicy::default())
                .unwrap();
        // "Ada" and "Grace" both contain "a"; "Alan" is from 2023.
        assert_eq!(view.visible.len(), 2);
        assert_eq!(view.summary.count, 2);
        assert_eq!(view.summary.offered_total, dec!(6200.50));

        let narrowed =
            ListView::build(&records, "grace", YearFilter::All, 2024, AmountPolicy::default())
                .unwrap();
        assert_eq!(narrowed.summary.offered_total, dec!(1200.50));
        assert_eq!(narrowed.summary.delta, dec!(-1200.50));
    }

    #[test]
    fn test_list_view_for_absent_year_is_empty() {
        let records = fixture();
        let view =
            ListView::build(&records, "", YearFilter::Year(1999), 2024, AmountPolicy::Strict)
                .unwrap();
        assert!(view.visible.is_empty());
        assert!(view.summary.is_empty());
        assert_eq!(view.summary.delta, Decimal::ZERO);
    }
}
