//! Alerting-activity aggregation over the category summary.
//!
//! Rolls the per-type category rows up into one flow summary per direction,
//! plus deduplicated alert metadata, for the alerting-activity section and its
//! assist prompt.

use crate::format::format_date;
use crate::schema::{CaseBundle, CategoryEntry};
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

/// One direction of money movement, aggregated across all category rows.
#[derive(Debug, Clone, Serialize)]
pub struct FlowSummary {
    pub total_amount: f64,
    pub transaction_count: u64,
    pub min_amount: f64,
    pub max_amount: f64,
    pub min_date: String,
    pub max_date: String,
    /// Category with the largest share of the direction's total.
    pub highest_percent_type: String,
}

/// Aggregated alerting activity: per-direction flows plus alert metadata.
#[derive(Debug, Clone, Serialize, Default)]
pub struct AlertingActivitySummary {
    pub credits: Option<FlowSummary>,
    pub debits: Option<FlowSummary>,
    /// Distinct alert months in first-seen order, joined by ", ".
    pub alert_months: String,
    /// Distinct alert descriptions in first-seen order, joined by "; ".
    pub descriptions: String,
}

impl AlertingActivitySummary {
    pub fn has_flow_data(&self) -> bool {
        self.credits.is_some() || self.debits.is_some()
    }
}

/// Builds the aggregated summary. Either direction with no category rows
/// yields `None` for that flow; alert metadata is independent of flows.
pub fn summarize_alerting_activity(bundle: &CaseBundle) -> AlertingActivitySummary {
    let (credits, debits) = match bundle.excel_data.category_summary.as_ref() {
        Some(categories) => (
            aggregate_flow(&categories.credits_by_type),
            aggregate_flow(&categories.debits_by_type),
        ),
        None => (None, None),
    };

    let alerts = &bundle.case_data.alert_info;
    let alert_months = dedup_join(alerts.iter().map(|a| a.alert_month.as_str()), ", ");
    let descriptions = dedup_join(alerts.iter().map(|a| a.description.as_str()), "; ");

    debug!(
        "Alerting activity summarized: credits={}, debits={}, {} alert(s)",
        credits.is_some(),
        debits.is_some(),
        alerts.len()
    );

    AlertingActivitySummary {
        credits,
        debits,
        alert_months,
        descriptions,
    }
}

fn aggregate_flow(entries: &[CategoryEntry]) -> Option<FlowSummary> {
    if entries.is_empty() {
        return None;
    }

    let total_amount: f64 = entries.iter().map(|e| e.total_amount.as_f64()).sum();
    let transaction_count: u64 = entries.iter().map(|e| e.transaction_count).sum();

    // Absent per-row minimums collapse to 0 rather than poisoning the whole
    // aggregate.
    let min_amount = entries
        .iter()
        .filter_map(|e| e.min_transaction_amount.as_ref().map(|a| a.as_f64()))
        .fold(None::<f64>, |acc, v| Some(acc.map_or(v, |a| a.min(v))))
        .unwrap_or(0.0);
    let max_amount = entries
        .iter()
        .filter_map(|e| e.max_transaction_amount.as_ref().map(|a| a.as_f64()))
        .fold(None::<f64>, |acc, v| Some(acc.map_or(v, |a| a.max(v))))
        .unwrap_or(0.0);

    let min_date = entries
        .iter()
        .map(|e| format_date(&e.min_transaction_date))
        .filter(|d| !d.is_empty())
        .min_by_key(|d| date_sort_key(d))
        .unwrap_or_default();
    let max_date = entries
        .iter()
        .map(|e| format_date(&e.max_transaction_date))
        .filter(|d| !d.is_empty())
        .max_by_key(|d| date_sort_key(d))
        .unwrap_or_default();

    let highest_percent_type = entries
        .iter()
        .fold(None::<&CategoryEntry>, |best, e| match best {
            Some(b) if b.percent_of_total >= e.percent_of_total => Some(b),
            _ => Some(e),
        })
        .map(|e| e.category.clone())
        .unwrap_or_default();

    Some(FlowSummary {
        total_amount,
        transaction_count,
        min_amount,
        max_amount,
        min_date,
        max_date,
        highest_percent_type,
    })
}

// Normalized dates compare chronologically; anything unparsed sorts after
// real dates by its text.
fn date_sort_key(date: &str) -> (NaiveDate, String) {
    NaiveDate::parse_from_str(date, "%m/%d/%Y")
        .map(|d| (d, String::new()))
        .unwrap_or_else(|_| (NaiveDate::MAX, date.to_string()))
}

fn dedup_join<'a>(values: impl Iterator<Item = &'a str>, separator: &str) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for value in values {
        let trimmed = value.trim();
        if !trimmed.is_empty() && !seen.contains(&trimmed) {
            seen.push(trimmed);
        }
    }
    seen.join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AlertInfo, Amount, CategorySummary};

    fn entry(category: &str, total: f64, count: u64, percent: f64) -> CategoryEntry {
        CategoryEntry {
            category: category.to_string(),
            total_amount: Amount::Number(total),
            transaction_count: count,
            percent_of_total: percent,
            ..Default::default()
        }
    }

    #[test]
    fn test_flow_aggregation() {
        let mut bundle = CaseBundle::default();
        bundle.excel_data.category_summary = Some(CategorySummary {
            credits_by_type: vec![
                CategoryEntry {
                    min_transaction_amount: Some(Amount::Number(100.0)),
                    max_transaction_amount: Some(Amount::Number(5000.0)),
                    min_transaction_date: "2024-01-05".to_string(),
                    max_transaction_date: "2024-02-20".to_string(),
                    ..entry("Cash", 8000.0, 4, 60.0)
                },
                CategoryEntry {
                    min_transaction_amount: Some(Amount::Number(250.0)),
                    max_transaction_amount: Some(Amount::Number(3000.0)),
                    min_transaction_date: "2024-01-15".to_string(),
                    max_transaction_date: "2024-03-01".to_string(),
                    ..entry("Wire", 5000.0, 2, 40.0)
                },
            ],
            ..Default::default()
        });

        let summary = summarize_alerting_activity(&bundle);
        let credits = summary.credits.unwrap();
        assert_eq!(credits.total_amount, 13_000.0);
        assert_eq!(credits.transaction_count, 6);
        assert_eq!(credits.min_amount, 100.0);
        assert_eq!(credits.max_amount, 5000.0);
        assert_eq!(credits.min_date, "01/05/2024");
        assert_eq!(credits.max_date, "03/01/2024");
        assert_eq!(credits.highest_percent_type, "Cash");
        assert!(summary.debits.is_none());
    }

    #[test]
    fn test_missing_minimums_collapse_to_zero() {
        let mut bundle = CaseBundle::default();
        bundle.excel_data.category_summary = Some(CategorySummary {
            debits_by_type: vec![entry("ATM", 900.0, 3, 100.0)],
            ..Default::default()
        });

        let debits = summarize_alerting_activity(&bundle).debits.unwrap();
        assert_eq!(debits.min_amount, 0.0);
        assert_eq!(debits.max_amount, 0.0);
        assert_eq!(debits.min_date, "");
    }

    #[test]
    fn test_no_category_data() {
        let summary = summarize_alerting_activity(&CaseBundle::default());
        assert!(!summary.has_flow_data());
        assert!(summary.alert_months.is_empty());
    }

    #[test]
    fn test_alert_metadata_deduplicated_in_order() {
        let mut bundle = CaseBundle::default();
        bundle.case_data.alert_info = vec![
            AlertInfo {
                alert_month: "202403".to_string(),
                description: "Cash structuring".to_string(),
                ..Default::default()
            },
            AlertInfo {
                alert_month: "202401".to_string(),
                description: "Cash structuring".to_string(),
                ..Default::default()
            },
            AlertInfo {
                alert_month: "202403".to_string(),
                description: "Wire volume".to_string(),
                ..Default::default()
            },
        ];

        let summary = summarize_alerting_activity(&bundle);
        assert_eq!(summary.alert_months, "202403, 202401");
        assert_eq!(summary.descriptions, "Cash structuring; Wire volume");
    }
}
