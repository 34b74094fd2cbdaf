//! Field extraction with explicit, ordered fallback chains.
//!
//! Every narrative field has one declared precedence order over the candidate
//! data sources, evaluated here in a single pass. Composers only ever see the
//! resolved values, so the precedence policy lives in exactly one place.

use crate::format::{format_date, format_opt_date};
use crate::schema::{
    AccountInfo, AlertInfo, BreakdownEntry, CaseBundle, CategoryEntry, PriorCase,
    SampleTransaction, Subject,
};
use crate::templates;
use log::debug;
use serde::Serialize;

/// Number of top transaction types carried into the activity summary.
const TOP_TYPES: usize = 3;

/// Number of sample transactions carried into the samples section.
pub const MAX_SAMPLES: usize = 5;

/// A per-type dollar total, normalized from either summary structure.
#[derive(Debug, Clone, Serialize)]
pub struct TypeTotal {
    pub kind: String,
    pub amount: f64,
    pub count: u64,
}

/// Everything the composers consume, resolved once per assembly.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedFields {
    pub case_number: String,
    pub subjects: Vec<Subject>,
    /// Subject list with account-relationship parentheses.
    pub subject_display: String,
    /// Subject list without relationship decoration.
    pub subject_names: String,
    pub primary_subject: Option<Subject>,
    pub account_number: String,
    pub account_type: String,
    pub account_info: AccountInfo,
    pub open_date: String,
    pub close_date: String,
    pub start_date: String,
    pub end_date: String,
    pub review_start: String,
    pub review_end: String,
    pub total_credits: f64,
    pub total_debits: f64,
    pub total_amount: f64,
    pub top_credit_types: Vec<TypeTotal>,
    pub top_debit_types: Vec<TypeTotal>,
    pub samples: Vec<SampleTransaction>,
    pub alerts: Vec<AlertInfo>,
    pub prior_cases: Vec<PriorCase>,
}

/// Resolves every narrative field from the bundle through its fallback chain.
pub fn resolve(bundle: &CaseBundle) -> ResolvedFields {
    let case = &bundle.case_data;
    let excel = &bundle.excel_data;

    let primary_subject = case
        .subjects
        .iter()
        .find(|s| s.is_primary)
        .or_else(|| case.subjects.first())
        .cloned();

    let (total_credits, total_debits) = resolve_totals(bundle);

    let total_amount = excel
        .activity_summary
        .as_ref()
        .and_then(|s| s.total_amount.as_ref())
        .map(|a| a.as_f64())
        .filter(|a| *a != 0.0)
        .unwrap_or(total_credits);

    let (start_date, end_date) = resolve_date_range(bundle);

    let samples = excel
        .unusual_activity
        .as_ref()
        .map(|u| u.transactions.iter().take(MAX_SAMPLES).cloned().collect())
        .unwrap_or_default();

    ResolvedFields {
        case_number: case.case_number.clone(),
        subjects: case.subjects.clone(),
        subject_display: join_subjects(&case.subjects, true),
        subject_names: join_subjects(&case.subjects, false),
        primary_subject,
        account_number: resolve_account_number(bundle),
        account_type: non_empty(&case.account_info.account_type)
            .unwrap_or(templates::DEFAULT_ACCOUNT_TYPE)
            .to_string(),
        account_info: case.account_info.clone(),
        open_date: format_date(&case.account_info.open_date),
        close_date: format_date(&case.account_info.close_date),
        start_date,
        end_date,
        review_start: format_opt_date(case.review_period.as_ref().map(|r| r.start.as_str())),
        review_end: format_opt_date(case.review_period.as_ref().map(|r| r.end.as_str())),
        total_credits,
        total_debits,
        total_amount,
        top_credit_types: resolve_top_types(bundle, Direction::Credit),
        top_debit_types: resolve_top_types(bundle, Direction::Debit),
        samples,
        alerts: case.alert_info.clone(),
        prior_cases: case.prior_cases.clone(),
    }
}

/// Grand-total row > category summary > legacy breakdown totals > zero.
fn resolve_totals(bundle: &CaseBundle) -> (f64, f64) {
    let excel = &bundle.excel_data;

    if let Some(row) = excel
        .activity_summary_tables
        .iter()
        .flat_map(|t| t.rows.iter())
        .find(|r| r.is_grand_total())
    {
        let credits = row.credits.as_ref().map(|a| a.as_f64());
        let debits = row.debits.as_ref().map(|a| a.as_f64());
        if credits.is_some() || debits.is_some() {
            debug!("Totals resolved from grand-total summary row {:?}", row.label);
            return (credits.unwrap_or(0.0), debits.unwrap_or(0.0));
        }
    }

    if let Some(categories) = excel.category_summary.as_ref().filter(|c| !c.is_empty()) {
        let credits: f64 = categories
            .credits_by_type
            .iter()
            .map(|c| c.total_amount.as_f64())
            .sum();
        let debits: f64 = categories
            .debits_by_type
            .iter()
            .map(|c| c.total_amount.as_f64())
            .sum();
        debug!("Totals resolved from category summary");
        return (credits, debits);
    }

    if let Some(summary) = excel.transaction_summary.as_ref() {
        let credits = summary
            .total_credits
            .as_ref()
            .map(|a| a.as_f64())
            .unwrap_or(0.0);
        let debits = summary
            .total_debits
            .as_ref()
            .map(|a| a.as_f64())
            .unwrap_or(0.0);
        if credits != 0.0 || debits != 0.0 {
            debug!("Totals resolved from legacy transaction summary");
            return (credits, debits);
        }
    }

    (0.0, 0.0)
}

/// Activity summary dates > case review period > first alert's review period.
fn resolve_date_range(bundle: &CaseBundle) -> (String, String) {
    let activity = bundle.excel_data.activity_summary.as_ref();
    let review = bundle.case_data.review_period.as_ref();
    let alert_review = bundle
        .case_data
        .alert_info
        .first()
        .and_then(|a| a.review_period.as_ref());

    let start = activity
        .map(|a| a.start_date.as_str())
        .and_then(non_empty)
        .or_else(|| review.map(|r| r.start.as_str()).and_then(non_empty))
        .or_else(|| alert_review.map(|r| r.start.as_str()).and_then(non_empty))
        .unwrap_or("");

    let end = activity
        .map(|a| a.end_date.as_str())
        .and_then(non_empty)
        .or_else(|| review.map(|r| r.end.as_str()).and_then(non_empty))
        .or_else(|| alert_review.map(|r| r.end.as_str()).and_then(non_empty))
        .unwrap_or("");

    (format_date(start), format_date(end))
}

/// Relevant-accounts list > primary account info > first multi-account entry.
fn resolve_account_number(bundle: &CaseBundle) -> String {
    let case = &bundle.case_data;

    if let Some(number) = case.relevant_accounts.iter().find_map(|a| non_empty(a)) {
        debug!("Account number resolved from relevant accounts list");
        return number.to_string();
    }

    if let Some(number) = non_empty(&case.account_info.account_number) {
        return number.to_string();
    }

    case.accounts
        .iter()
        .find_map(|a| non_empty(&a.account_number))
        .unwrap_or_default()
        .to_string()
}

enum Direction {
    Credit,
    Debit,
}

/// Category summary > legacy breakdown, stable-sorted descending by amount,
/// truncated to the top three.
fn resolve_top_types(bundle: &CaseBundle, direction: Direction) -> Vec<TypeTotal> {
    let excel = &bundle.excel_data;

    let mut totals: Vec<TypeTotal> =
        if let Some(categories) = excel.category_summary.as_ref().filter(|c| !c.is_empty()) {
            let entries: &[CategoryEntry] = match direction {
                Direction::Credit => &categories.credits_by_type,
                Direction::Debit => &categories.debits_by_type,
            };
            entries
                .iter()
                .map(|e| TypeTotal {
                    kind: e.category.clone(),
                    amount: e.total_amount.as_f64(),
                    count: e.transaction_count,
                })
                .collect()
        } else if let Some(summary) = excel.transaction_summary.as_ref() {
            let entries: &[BreakdownEntry] = match direction {
                Direction::Credit => &summary.credit_breakdown,
                Direction::Debit => &summary.debit_breakdown,
            };
            entries
                .iter()
                .map(|e| TypeTotal {
                    kind: e.kind.clone(),
                    amount: e.amount.as_f64(),
                    count: e.count,
                })
                .collect()
        } else {
            Vec::new()
        };

    // sort_by is stable, so ties keep input order
    totals.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(std::cmp::Ordering::Equal));
    totals.truncate(TOP_TYPES);
    totals
}

/// Joins subject names with an "and" before the final entry; the literal
/// "Unknown Subject" stands in when the list is empty.
fn join_subjects(subjects: &[Subject], include_relationship: bool) -> String {
    if subjects.is_empty() {
        return templates::UNKNOWN_SUBJECT.to_string();
    }

    let rendered: Vec<String> = subjects
        .iter()
        .map(|s| {
            let name = if s.name.trim().is_empty() {
                templates::UNKNOWN_SUBJECT.to_string()
            } else {
                s.name.clone()
            };
            match s.account_relationship.as_deref().filter(|r| !r.is_empty()) {
                Some(rel) if include_relationship => format!("{} ({})", name, rel),
                _ => name,
            }
        })
        .collect();

    match rendered.len() {
        1 => rendered[0].clone(),
        2 => format!("{} and {}", rendered[0], rendered[1]),
        _ => format!(
            "{}, and {}",
            rendered[..rendered.len() - 1].join(", "),
            rendered[rendered.len() - 1]
        ),
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        ActivitySummary, Amount, CategorySummary, DateRange, ExcelData, SummaryRow, SummaryTable,
        TransactionSummary,
    };

    fn subject(name: &str, primary: bool) -> Subject {
        Subject {
            name: name.to_string(),
            is_primary: primary,
            ..Default::default()
        }
    }

    #[test]
    fn test_subject_fallback_order() {
        let mut bundle = CaseBundle::default();
        assert_eq!(resolve(&bundle).subject_names, "Unknown Subject");

        bundle.case_data.subjects = vec![subject("First Person", false), subject("Marked Primary", true)];
        let fields = resolve(&bundle);
        assert_eq!(fields.primary_subject.unwrap().name, "Marked Primary");

        bundle.case_data.subjects = vec![subject("First Person", false), subject("Second Person", false)];
        let fields = resolve(&bundle);
        assert_eq!(fields.primary_subject.unwrap().name, "First Person");
    }

    #[test]
    fn test_subject_joining() {
        let subjects = vec![subject("A", false), subject("B", false), subject("C", false)];
        assert_eq!(join_subjects(&subjects, false), "A, B, and C");
        assert_eq!(join_subjects(&subjects[..2], false), "A and B");
        assert_eq!(join_subjects(&subjects[..1], false), "A");
    }

    #[test]
    fn test_subject_relationship_decoration() {
        let subjects = vec![Subject {
            name: "Jane Doe".to_string(),
            account_relationship: Some("Owner".to_string()),
            ..Default::default()
        }];
        assert_eq!(join_subjects(&subjects, true), "Jane Doe (Owner)");
        assert_eq!(join_subjects(&subjects, false), "Jane Doe");
    }

    #[test]
    fn test_grand_total_outranks_both_summaries() {
        let mut bundle = CaseBundle::default();
        bundle.excel_data = ExcelData {
            transaction_summary: Some(TransactionSummary {
                total_credits: Some(Amount::Number(100.0)),
                total_debits: Some(Amount::Number(50.0)),
                ..Default::default()
            }),
            category_summary: Some(CategorySummary {
                credits_by_type: vec![CategoryEntry {
                    category: "Cash".to_string(),
                    total_amount: Amount::Number(200.0),
                    ..Default::default()
                }],
                ..Default::default()
            }),
            activity_summary_tables: vec![SummaryTable {
                title: "Totals".to_string(),
                rows: vec![SummaryRow {
                    label: "Grand Total".to_string(),
                    credits: Some(Amount::Number(300.0)),
                    debits: Some(Amount::Number(120.0)),
                }],
            }],
            ..Default::default()
        };

        let fields = resolve(&bundle);
        assert_eq!(fields.total_credits, 300.0);
        assert_eq!(fields.total_debits, 120.0);
    }

    #[test]
    fn test_category_summary_outranks_legacy() {
        let mut bundle = CaseBundle::default();
        bundle.excel_data.transaction_summary = Some(TransactionSummary {
            total_credits: Some(Amount::Number(100.0)),
            ..Default::default()
        });
        bundle.excel_data.category_summary = Some(CategorySummary {
            credits_by_type: vec![
                CategoryEntry {
                    category: "Cash".to_string(),
                    total_amount: Amount::Number(200.0),
                    ..Default::default()
                },
                CategoryEntry {
                    category: "Wire".to_string(),
                    total_amount: Amount::Text("$50.00".to_string()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        });

        let fields = resolve(&bundle);
        assert_eq!(fields.total_credits, 250.0);
    }

    #[test]
    fn test_totals_default_to_zero() {
        let fields = resolve(&CaseBundle::default());
        assert_eq!(fields.total_credits, 0.0);
        assert_eq!(fields.total_debits, 0.0);
        assert_eq!(fields.total_amount, 0.0);
    }

    #[test]
    fn test_date_range_fallback_chain() {
        let mut bundle = CaseBundle::default();
        bundle.case_data.alert_info = vec![AlertInfo {
            review_period: Some(DateRange {
                start: "2023-01-01".to_string(),
                end: "2023-06-30".to_string(),
            }),
            ..Default::default()
        }];
        let fields = resolve(&bundle);
        assert_eq!(fields.start_date, "01/01/2023");
        assert_eq!(fields.end_date, "06/30/2023");

        bundle.case_data.review_period = Some(DateRange {
            start: "2/1/2023".to_string(),
            end: "7/31/2023".to_string(),
        });
        let fields = resolve(&bundle);
        assert_eq!(fields.start_date, "02/01/2023");

        bundle.excel_data.activity_summary = Some(ActivitySummary {
            start_date: "3/1/2023".to_string(),
            end_date: "8/31/2023".to_string(),
            ..Default::default()
        });
        let fields = resolve(&bundle);
        assert_eq!(fields.start_date, "03/01/2023");
        assert_eq!(fields.end_date, "08/31/2023");
    }

    #[test]
    fn test_relevant_accounts_preferred() {
        let mut bundle = CaseBundle::default();
        bundle.case_data.account_info.account_number = "1111".to_string();
        bundle.case_data.relevant_accounts = vec!["9999".to_string()];
        assert_eq!(resolve(&bundle).account_number, "9999");

        bundle.case_data.relevant_accounts.clear();
        assert_eq!(resolve(&bundle).account_number, "1111");
    }

    #[test]
    fn test_top_types_sorted_descending_stable() {
        let mut bundle = CaseBundle::default();
        bundle.excel_data.transaction_summary = Some(TransactionSummary {
            credit_breakdown: vec![
                BreakdownEntry {
                    kind: "Check".to_string(),
                    amount: Amount::Number(100.0),
                    count: 2,
                },
                BreakdownEntry {
                    kind: "Wire".to_string(),
                    amount: Amount::Number(500.0),
                    count: 1,
                },
                BreakdownEntry {
                    kind: "Cash".to_string(),
                    amount: Amount::Number(500.0),
                    count: 3,
                },
                BreakdownEntry {
                    kind: "ATM".to_string(),
                    amount: Amount::Number(50.0),
                    count: 9,
                },
            ],
            ..Default::default()
        });

        let fields = resolve(&bundle);
        let kinds: Vec<&str> = fields.top_credit_types.iter().map(|t| t.kind.as_str()).collect();
        // ties keep input order: Wire before Cash
        assert_eq!(kinds, vec!["Wire", "Cash", "Check"]);
    }

    #[test]
    fn test_samples_capped_at_five() {
        let mut bundle = CaseBundle::default();
        bundle.excel_data.unusual_activity = Some(crate::schema::UnusualActivityBundle {
            transactions: (0..8)
                .map(|i| SampleTransaction {
                    amount: Amount::Number(i as f64),
                    ..Default::default()
                })
                .collect(),
        });
        assert_eq!(resolve(&bundle).samples.len(), MAX_SAMPLES);
    }
}
