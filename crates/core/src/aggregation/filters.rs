use super::aggregation_model::{RebateEntry, YearFilter};
use crate::utils::time_utils::year_of;

/// Case-insensitive substring search over each record's search text.
///
/// A blank query keeps every record, in order.
pub fn filter_by_query<'a, T, I>(records: I, query: &str) -> Vec<&'a T>
where
    T: RebateEntry + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.into_iter().collect();
    }
    records
        .into_iter()
        .filter(|record| record.search_text().to_lowercase().contains(&needle))
        .collect()
}

/// Keeps records created in the selected year. Records without a readable
/// timestamp only survive `YearFilter::All`.
pub fn filter_by_year<'a, T, I>(records: I, year: YearFilter) -> Vec<&'a T>
where
    T: RebateEntry + 'a,
    I: IntoIterator<Item = &'a T>,
{
    match year {
        YearFilter::All => records.into_iter().collect(),
        YearFilter::Year(wanted) => records
            .into_iter()
            .filter(|record| record.created_at().and_then(year_of) == Some(wanted))
            .collect(),
    }
}

/// Choices for the year selector: `All`, then every year from the newer of
/// `current_year` and the newest record down to the oldest record.
pub fn available_years<T: RebateEntry>(records: &[T], current_year: i32) -> Vec<YearFilter> {
    let years: Vec<i32> = records
        .iter()
        .filter_map(|record| record.created_at().and_then(year_of))
        .collect();
    let oldest = years.iter().copied().min().unwrap_or(current_year);
    let newest = years.iter().copied().max().unwrap_or(current_year).max(current_year);

    std::iter::once(YearFilter::All)
        .chain((oldest..=newest).rev().map(YearFilter::Year))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{ClientDetails, ClientRecord};

    fn client(id: i64, name: &str, address: Option<&str>, created_at: Option<&str>) -> ClientRecord {
        ClientRecord {
            id,
            details: ClientDetails {
                full_name: name.into(),
                address: address.map(Into::into),
                ..Default::default()
            },
            created_at: created_at.map(Into::into),
        }
    }

    fn ids(records: &[&ClientRecord]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    fn fixture() -> Vec<ClientRecord> {
        vec![
            client(1, "Ada Lovelace", Some("12 Elm St"), Some("2023-04-01T00:00:00Z")),
            client(2, "Grace Hopper", None, Some("2024-01-15")),
            client(3, "Alan Turing", Some("9 ELM Court"), None),
        ]
    }

    #[test]
    fn test_query_matches_name_or_address_case_insensitively() {
        let records = fixture();
        assert_eq!(ids(&filter_by_query(&records, "elm")), vec![1, 3]);
        assert_eq!(ids(&filter_by_query(&records, "  HOPPER ")), vec![2]);
        assert!(filter_by_query(&records, "nobody").is_empty());
    }

    #[test]
    fn test_blank_query_is_identity() {
        let records = fixture();
        assert_eq!(ids(&filter_by_query(&records, "")), vec![1, 2, 3]);
        assert_eq!(ids(&filter_by_query(&records, "   ")), vec![1, 2, 3]);
    }

    #[test]
    fn test_year_filter() {
        let records = fixture();
        assert_eq!(ids(&filter_by_year(&records, YearFilter::Year(2024))), vec![2]);
        assert_eq!(ids(&filter_by_year(&records, YearFilter::All)), vec![1, 2, 3]);
        assert!(filter_by_year(&records, YearFilter::Year(1990)).is_empty());
    }

    #[test]
    fn test_available_years_spans_to_current_year() {
        let records = fixture();
        assert_eq!(
            available_years(&records, 2025),
            vec![
                YearFilter::All,
                YearFilter::Year(2025),
                YearFilter::Year(2024),
                YearFilter::Year(2023)
            ]
        );
        let none: Vec<ClientRecord> = Vec::new();
        assert_eq!(
            available_years(&none, 2025),
            vec![YearFilter::All, YearFilter::Year(2025)]
        );
    }
}
