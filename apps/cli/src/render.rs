//! Plain-text views. Everything here is pure so it can be tested without a
//! terminal or a backend.

use std::fmt::Write;

use cleanheat_core::aggregation::{DeltaStatus, RebateSummary, YearFilter};
use cleanheat_core::applications::{ApplicationRecord, ChecklistItem};
use cleanheat_core::clients::{ClientDetails, ClientRecord};
use cleanheat_core::money::{format_usd, Amount};
use cleanheat_core::session::{RebateUser, Session};

const NAME_WIDTH: usize = 24;
const ADDRESS_WIDTH: usize = 28;

pub fn amount_cell(amount: &Amount) -> String {
    match amount {
        Amount::Missing => "-".to_string(),
        Amount::Value(value) => format_usd(*value),
        Amount::Malformed(raw) => format!("'{}'?", raw),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('~');
    cut
}

fn scope_phrase(year: YearFilter) -> String {
    match year {
        YearFilter::All => "for all time".to_string(),
        YearFilter::Year(year) => format!("in {}", year),
    }
}

/// The totals block, or the no-data line when nothing matched.
pub fn summary(summary: &RebateSummary, year: YearFilter) -> String {
    if summary.is_empty() {
        return format!("No rebate submitted {}.", scope_phrase(year));
    }
    let mut out = String::new();
    let _ = writeln!(out, "Rebates {} ({} records)", scope_phrase(year), summary.count);
    let _ = writeln!(out, "  Offered   {}", format_usd(summary.offered_total));
    let _ = writeln!(out, "  Approved  {}", format_usd(summary.approved_total));
    let _ = write!(out, "  Delta     {}", summary.delta_status().label());
    if summary.malformed_amounts > 0 {
        let _ = write!(
            out,
            "\n  ({} non-numeric amounts counted as $0.00)",
            summary.malformed_amounts
        );
    }
    out
}

pub fn application_rows(records: &[&ApplicationRecord]) -> String {
    let mut out = format!(
        "{:>6}  {:<nw$}  {:<aw$}  {:>14}  {:>14}  {:>8}",
        "ID",
        "NAME",
        "ADDRESS",
        "OFFERED",
        "APPROVED",
        "PROGRESS",
        nw = NAME_WIDTH,
        aw = ADDRESS_WIDTH
    );
    for record in records {
        let progress = record.progress();
        let _ = write!(
            out,
            "\n{:>6}  {:<nw$}  {:<aw$}  {:>14}  {:>14}  {:>7}%",
            record.id,
            truncate(&record.details.full_name, NAME_WIDTH),
            truncate(record.details.address.as_deref().unwrap_or(""), ADDRESS_WIDTH),
            amount_cell(&record.details.offered_rebate_amount),
            amount_cell(&record.details.approved_rebate_amount),
            progress.percent,
            nw = NAME_WIDTH,
            aw = ADDRESS_WIDTH
        );
    }
    out
}

pub fn client_rows(records: &[&ClientRecord]) -> String {
    let mut out = format!(
        "{:>6}  {:<3}  {:<nw$}  {:<28}  {:>14}",
        "ID",
        "",
        "NAME",
        "EMAIL",
        "APPROVED",
        nw = NAME_WIDTH
    );
    for record in records {
        let _ = write!(
            out,
            "\n{:>6}  {:<3}  {:<nw$}  {:<28}  {:>14}",
            record.id,
            record.details.initials(),
            truncate(&record.details.full_name, NAME_WIDTH),
            truncate(record.details.email.as_deref().unwrap_or(""), 28),
            amount_cell(&record.details.approved_rebate_amount),
            nw = NAME_WIDTH
        );
    }
    out
}

fn details_block(out: &mut String, details: &ClientDetails) {
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    let _ = writeln!(out, "Client");
    let _ = writeln!(out, "  Name              {}", details.full_name);
    let _ = writeln!(out, "  Email             {}", text(&details.email));
    let _ = writeln!(out, "  Phone             {}", text(&details.phone_number));
    let _ = writeln!(out, "  Address           {}", text(&details.address));
    let _ = writeln!(
        out,
        "  Disadvantaged     {}",
        if details.disadvantage { "yes" } else { "no" }
    );
    let _ = writeln!(out, "  Electricity acct  {}", text(&details.electricity_acct));
    let _ = writeln!(out, "  ConEd key         {}", text(&details.coned_eligibility_key));
    let _ = writeln!(out, "Building");
    let _ = writeln!(
        out,
        "  Year built        {}",
        details.building_year_built.to_input_string()
    );
    let _ = writeln!(out, "  Sq ft             {}", details.building_sqft.to_input_string());
    let _ = writeln!(out, "  Conditioned sq ft {}", details.conditioned_sqft.to_input_string());
    if !details.condenser_models.is_empty() {
        let _ = writeln!(out, "  Condenser models  {}", details.condenser_models.join(", "));
    }
}

/// Full detail view of one application.
pub fn application_detail(record: &ApplicationRecord) -> String {
    let details = &record.details;
    let progress = record.progress();
    let mut out = String::new();
    let _ = writeln!(out, "Application #{}  {}", record.id, details.full_name);
    if let Some(created) = record.created_at.as_deref() {
        let _ = writeln!(out, "Created {}", created);
    }
    let _ = writeln!(out, "Financials");
    let _ = writeln!(out, "  Project total     {}", amount_cell(&details.project_amount_total));
    let _ = writeln!(out, "  Offered rebate    {}", amount_cell(&details.offered_rebate_amount));
    let _ = writeln!(out, "  Approved rebate   {}", amount_cell(&details.approved_rebate_amount));
    let _ = writeln!(
        out,
        "  Client pays       {}",
        amount_cell(&details.total_client_pay_after_rebate)
    );
    let status = DeltaStatus::from_delta(record.delta());
    let _ = writeln!(out, "  Status            {}", status.label());
    details_block(&mut out, details);
    let _ = writeln!(
        out,
        "Checklist {}/{} ({}%)",
        progress.completed, progress.total, progress.percent
    );
    for item in ChecklistItem::ALL {
        let mark = if record.checklist.get(item) { 'x' } else { ' ' };
        let _ = writeln!(out, "  [{}] {}", mark, item.label());
    }
    if record.notes.is_empty() {
        let _ = write!(out, "No notes");
    } else {
        let _ = write!(out, "Notes");
        for note in record.notes.iter() {
            let _ = write!(out, "\n  {}  {}", note.date, note.text);
        }
    }
    out
}

pub fn user(user: &RebateUser) -> String {
    format!("{} <{}> (id {})", user.display_name(), user.email, user.id)
}

pub fn session(session: &Session) -> String {
    match session.user() {
        Some(current) => format!("Signed in as {}", self::user(current)),
        None => "Not signed in".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn application() -> ApplicationRecord {
        serde_json::from_value(json!({
            "id": 12,
            "full_name": "Ada Lovelace",
            "address": "1 Analytical Way",
            "offered_rebate_amount": 5000,
            "approved_rebate_amount": "4500",
            "manual_j": true,
            "notes": "[{\"text\":\"Called client\",\"date\":\"2024-03-01T10:00:00.000Z\"}]",
            "created_at": "2024-02-01T09:00:00.000Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_summary_no_data_line() {
        let empty = RebateSummary::default();
        assert_eq!(summary(&empty, YearFilter::Year(2031)), "No rebate submitted in 2031.");
        assert_eq!(summary(&empty, YearFilter::All), "No rebate submitted for all time.");
    }

    #[test]
    fn test_summary_block() {
        let totals = RebateSummary {
            offered_total: dec!(5000),
            approved_total: dec!(4500),
            delta: dec!(-500),
            count: 1,
            malformed_amounts: 0,
        };
        let text = summary(&totals, YearFilter::Year(2024));
        assert!(text.contains("Offered   $5,000.00"));
        assert!(text.contains("Approved  $4,500.00"));
        assert!(text.ends_with("Deficit $500.00"));
    }

    #[test]
    fn test_summary_mentions_malformed_amounts() {
        let totals = RebateSummary {
            count: 2,
            malformed_amounts: 1,
            ..Default::default()
        };
        assert!(summary(&totals, YearFilter::All).contains("1 non-numeric amounts"));
    }

    #[test]
    fn test_amount_cell() {
        assert_eq!(amount_cell(&Amount::Missing), "-");
        assert_eq!(amount_cell(&Amount::Value(dec!(1234.5))), "$1,234.50");
        assert_eq!(amount_cell(&Amount::Malformed("TBD".into())), "'TBD'?");
    }

    #[test]
    fn test_application_rows_show_progress() {
        let record = application();
        let text = application_rows(&[&record]);
        let row = text.lines().nth(1).unwrap();
        assert!(row.contains("Ada Lovelace"));
        assert!(row.contains("$4,500.00"));
        assert!(row.trim_end().ends_with("9%"));
    }

    #[test]
    fn test_application_detail_sections() {
        let text = application_detail(&application());
        assert!(text.starts_with("Application #12  Ada Lovelace"));
        assert!(text.contains("Status            Deficit $500.00"));
        assert!(text.contains("Checklist 1/11 (9%)"));
        assert!(text.contains("  [x] Manual J"));
        assert!(text.contains("  [ ] Acknowledgment form"));
        assert!(text.contains("Called client"));
    }

    #[test]
    fn test_truncate_long_names() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 5), "abcd~");
    }

    #[test]
    fn test_session_line() {
        assert_eq!(session(&Session::Anonymous), "Not signed in");
    }
}
