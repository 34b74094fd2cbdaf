//! Section composers.
//!
//! Each composer is a pure function over resolved fields (plus the
//! classification where the prose mentions activity type), producing one
//! paragraph of template prose. Degenerate inputs produce the fixed fallback
//! literals, never placeholders like "undefined".

use crate::activity::{AlertingActivitySummary, FlowSummary};
use crate::classifier::Classification;
use crate::format::format_currency;
use crate::resolver::{ResolvedFields, TypeTotal};
use crate::templates;

/// USB filing sentence opening the narrative.
pub fn compose_introduction(fields: &ResolvedFields, class: &Classification) -> String {
    format!(
        "{}, is filing this Suspicious Activity Report (SAR) to report {} totaling {} {} by {} \
         in {} account number {}. The suspicious activity was conducted from {} through {}.",
        templates::FILING_INSTITUTION,
        class.name,
        format_currency(fields.total_amount),
        class.derived_from,
        fields.subject_display,
        fields.account_type,
        fields.account_number,
        fields.start_date,
        fields.end_date
    )
}

pub fn compose_prior_cases(fields: &ResolvedFields) -> String {
    if fields.prior_cases.is_empty() {
        return templates::NO_PRIOR_SARS.to_string();
    }

    fields
        .prior_cases
        .iter()
        .map(|case| {
            let summary = if case.summary.trim().is_empty() {
                "suspicious activity"
            } else {
                case.summary.as_str()
            };
            format!(
                "Prior SAR (Case Number: {}) was filed on {} reporting {}.",
                case.case_number,
                crate::format::format_date(&case.filing_date),
                summary
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Open vs closed branch. Closure needs both the status signal and a close
/// date on file; otherwise the account is described as open.
pub fn compose_account_info(fields: &ResolvedFields) -> String {
    let info = &fields.account_info;

    if info.is_closed() && !fields.close_date.is_empty() {
        let mut text = format!(
            "Personal {} account {} was opened on {} and closed on {}.",
            fields.account_type, fields.account_number, fields.open_date, fields.close_date
        );
        if !info.closure_reason.trim().is_empty() {
            text.push_str(&format!(
                " The account was closed due to {}.",
                info.closure_reason.trim()
            ));
        }
        return text;
    }

    format!(
        "Personal {} account {} was opened on {} and remains open.",
        fields.account_type, fields.account_number, fields.open_date
    )
}

pub fn compose_subject_info(fields: &ResolvedFields) -> String {
    if fields.subjects.is_empty() {
        return templates::NO_SUBJECT_INFO.to_string();
    }

    fields
        .subjects
        .iter()
        .map(|subject| {
            let name = if subject.name.trim().is_empty() {
                templates::UNKNOWN_SUBJECT
            } else {
                subject.name.as_str()
            };
            let occupation = subject.occupation.as_deref().filter(|s| !s.trim().is_empty());
            let employer = subject.employer.as_deref().filter(|s| !s.trim().is_empty());
            let relationship = subject
                .account_relationship
                .as_deref()
                .filter(|s| !s.trim().is_empty());

            // Employment clause is dropped when neither field is present.
            let mut text = match (occupation, employer) {
                (Some(occ), Some(emp)) => {
                    format!("{} is employed as a {} at {}.", name, occ, emp)
                }
                (Some(occ), None) => format!("{} is employed as a {}.", name, occ),
                (None, Some(emp)) => format!("{} is employed at {}.", name, emp),
                (None, None) => String::new(),
            };

            let rel_sentence = format!(
                "{} is listed as {} on the account.",
                name,
                relationship.unwrap_or("an account holder")
            );
            if text.is_empty() {
                text = rel_sentence;
            } else {
                text.push(' ');
                text.push_str(&rel_sentence);
            }
            text
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn compose_activity_summary(fields: &ResolvedFields, class: &Classification) -> String {
    let mut description = String::new();
    if !fields.top_credit_types.is_empty() {
        description.push_str(&format!(
            "The primary credit transaction types were {}. ",
            join_type_totals(&fields.top_credit_types)
        ));
    }
    if !fields.top_debit_types.is_empty() {
        description.push_str(&format!(
            "The primary debit transaction types were {}. ",
            join_type_totals(&fields.top_debit_types)
        ));
    }

    format!(
        "The account activity for {} from {} to {} included total credits of {} and total \
         debits of {}. {}The AML risks associated with these transactions are as follows: {}.",
        fields.account_number,
        fields.start_date,
        fields.end_date,
        format_currency(fields.total_credits),
        format_currency(fields.total_debits),
        description,
        class.indicator_text()
    )
}

fn join_type_totals(totals: &[TypeTotal]) -> String {
    totals
        .iter()
        .map(|t| {
            format!(
                "{} ({}, {} transactions)",
                t.kind,
                format_currency(t.amount),
                t.count
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Samples are listed in input order; segments are joined by semicolons with a
/// terminal period on the last.
pub fn compose_transaction_samples(fields: &ResolvedFields) -> String {
    if fields.samples.is_empty() {
        return templates::NO_SAMPLES.to_string();
    }

    let mut text = String::from("A sample of the suspicious transactions includes:");
    let last = fields.samples.len() - 1;
    for (i, txn) in fields.samples.iter().enumerate() {
        text.push_str(&format!(
            " {}: {}",
            crate::format::format_date(&txn.date),
            format_currency(txn.amount.as_f64())
        ));
        if !txn.kind.is_empty() {
            text.push_str(&format!(" ({})", txn.kind));
        }
        if !txn.description.is_empty() {
            text.push_str(&format!(" - {}", txn.description));
        }
        text.push(if i == last { '.' } else { ';' });
    }
    text
}

pub fn compose_conclusion(fields: &ResolvedFields, class: &Classification) -> String {
    format!(
        "In conclusion, USB is reporting {} in {} which gave the appearance of suspicious \
         activity and were conducted by {} in account number {} from {} through {}. USB will \
         conduct a follow-up review to monitor for continuing activity. All requests for \
         supporting documentation can be sent to {} referencing AML case number {}.",
        format_currency(fields.total_amount),
        class.name,
        fields.subject_names,
        fields.account_number,
        fields.start_date,
        fields.end_date,
        templates::SUPPORTING_DOCS_CONTACT,
        fields.case_number
    )
}

// ---- Recommendation composers ----

/// Detail path when aggregated flow data exists, alert-line fallback
/// otherwise.
pub fn compose_alerting_activity(
    fields: &ResolvedFields,
    summary: &AlertingActivitySummary,
) -> String {
    if !summary.has_flow_data() {
        if fields.alerts.is_empty() {
            return format!(
                "{}: Unknown alerting account alerted for unknown reason.",
                fields.case_number
            );
        }
        return format!(
            "{}: {} {} alerted in {} for {}.",
            fields.case_number,
            or_fallback(&fields.account_type, "account"),
            fields.account_number,
            or_fallback(&summary.alert_months, "unknown month"),
            or_fallback(&summary.descriptions, "unknown reason")
        );
    }

    let mut paragraphs = vec![format!(
        "{}: {} {} alerted in {} for {}.",
        fields.case_number,
        or_fallback(&fields.account_type, "account"),
        fields.account_number,
        or_fallback(&summary.alert_months, "unknown month"),
        or_fallback(&summary.descriptions, "unknown reason")
    )];

    if let Some(credits) = &summary.credits {
        paragraphs.push(describe_flow("Credit", credits));
    }
    if let Some(debits) = &summary.debits {
        paragraphs.push(describe_flow("Debit", debits));
    }

    paragraphs.join("\n\n")
}

fn describe_flow(direction: &str, flow: &FlowSummary) -> String {
    format!(
        "{} activity totaled {} across {} transactions from {} to {}, with individual amounts \
         ranging from {} to {}. The most common activity type was {}.",
        direction,
        format_currency(flow.total_amount),
        flow.transaction_count,
        flow.min_date,
        flow.max_date,
        format_currency(flow.min_amount),
        format_currency(flow.max_amount),
        flow.highest_percent_type
    )
}

pub fn compose_prior_sars(fields: &ResolvedFields) -> String {
    if fields.prior_cases.is_empty() {
        return templates::NO_PRIOR_CASES_SUMMARY.to_string();
    }

    let summaries: Vec<String> = fields
        .prior_cases
        .iter()
        .map(|case| {
            let mut text = format!("Case {}", case.case_number);
            let filing_date = crate::format::format_date(&case.filing_date);
            if !filing_date.is_empty() {
                text.push_str(&format!(" filed on {}", filing_date));
            }
            if !case.sar_form_number.is_empty() {
                text.push_str(&format!(" (SAR Form {})", case.sar_form_number));
            }
            if !case.summary.is_empty() {
                text.push_str(&format!(": {}", case.summary));
            }
            text
        })
        .collect();

    format!("Prior SARs: {}.", summaries.join("; "))
}

pub fn compose_scope_of_review(fields: &ResolvedFields) -> String {
    if fields.review_start.is_empty() || fields.review_end.is_empty() {
        return templates::REVIEW_PERIOD_UNSPECIFIED.to_string();
    }
    format!("{} - {}", fields.review_start, fields.review_end)
}

pub fn compose_investigation_summary() -> String {
    templates::INVESTIGATION_PLACEHOLDER.to_string()
}

pub fn compose_recommendation_conclusion(
    fields: &ResolvedFields,
    class: &Classification,
) -> String {
    format!(
        "In conclusion a SAR is recommended to report unusual {} activity involving USB \
         accounts {} and subjects {}. The unusual activity totaled {} {} between {} and {}.",
        class.name,
        fields.account_number,
        fields.subject_names,
        format_currency(fields.total_amount),
        class.derived_from,
        fields.start_date,
        fields.end_date
    )
}

/// Maps the primary subject's occupation onto the CTA request category.
fn cta_request_type(fields: &ResolvedFields) -> &'static str {
    let occupation = fields
        .primary_subject
        .as_ref()
        .and_then(|s| s.occupation.as_deref())
        .unwrap_or("")
        .to_lowercase();

    if occupation.contains("doctor") || occupation.contains("dentist") {
        "Healthcare"
    } else if occupation.contains("attorney") || occupation.contains("lawyer") {
        "Legal"
    } else {
        "Unknown"
    }
}

pub fn compose_cta(fields: &ResolvedFields) -> String {
    format!(
        "CTA Request Type: {}\n\n{}",
        cta_request_type(fields),
        templates::CTA_QUESTIONS
    )
}

pub fn compose_retain_close(fields: &ResolvedFields) -> String {
    if !fields.account_info.is_closed() {
        return templates::RETAIN_TEXT.to_string();
    }

    let reason = or_fallback(&fields.account_info.closure_reason, "suspicious activity");
    format!(
        "Closure: Requesting closure for USB customer(s) {} due to {}.\n\nThe risk factors \
         are as follows: [Investigator to list risk factors]\n\n[Investigator to provide \
         closure summary]",
        fields.subject_names, reason
    )
}

fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed
    }
}
