//! Per-section prompt rendering.
//!
//! Each prompt hands the model only resolved facts and pins the required
//! opening phrase, so a successful response stays interchangeable with the
//! template text it replaces.

use crate::activity::AlertingActivitySummary;
use crate::classifier::Classification;
use crate::format::format_currency;
use crate::resolver::ResolvedFields;

pub fn introduction_prompt(fields: &ResolvedFields, class: &Classification) -> String {
    format!(
        "Write the first paragraph of a SAR narrative with this exact information:\n\
         - Bank: U.S. Bank National Association (USB)\n\
         - Activity type: {}\n\
         - Total amount: {}\n\
         - Derived from: {}\n\
         - Subjects: {}\n\
         - Account type: {}\n\
         - Account number: {}\n\
         - Date range: {} to {}\n\n\
         Start with: 'U.S. Bank National Association (USB), is filing this Suspicious \
         Activity Report (SAR) to report...'\n\n\
         Keep it to one paragraph and be very specific using only the facts provided.",
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

pub fn prior_cases_prompt(fields: &ResolvedFields) -> String {
    let case_numbers: Vec<&str> = fields
        .prior_cases
        .iter()
        .map(|c| c.case_number.as_str())
        .collect();
    let filing_dates: Vec<String> = fields
        .prior_cases
        .iter()
        .map(|c| crate::format::format_date(&c.filing_date))
        .collect();
    let summaries: Vec<&str> = fields.prior_cases.iter().map(|c| c.summary.as_str()).collect();

    format!(
        "Write a brief paragraph about prior SARs or cases related to this subject or \
         account using only these facts:\n\
         - Case numbers: {}\n\
         - SAR filing dates: {}\n\
         - Case summaries: {}\n\n\
         If no prior SARs exist, simply state: 'No prior SARs were identified for the \
         subjects or account.'\n\
         Just state the facts directly without speculation or additional details.",
        case_numbers.join(", "),
        filing_dates.join(", "),
        summaries.join("; ")
    )
}

pub fn account_info_prompt(fields: &ResolvedFields) -> String {
    let status = if fields.account_info.is_closed() {
        "closed"
    } else {
        "open"
    };
    format!(
        "Write a brief paragraph about the account using only these facts:\n\
         - Account type: {}\n\
         - Account number: {}\n\
         - Open date: {}\n\
         - Account status: {}\n\
         - Close date: {}\n\
         - Closure reason: {}\n\n\
         Just state the facts directly without speculation or additional details.",
        fields.account_type,
        fields.account_number,
        fields.open_date,
        status,
        fields.close_date,
        fields.account_info.closure_reason
    )
}

pub fn subject_info_prompt(fields: &ResolvedFields) -> String {
    let lines: Vec<String> = fields
        .subjects
        .iter()
        .map(|s| {
            format!(
                "- Name: {}; Occupation: {}; Employer: {}; Relationship to account: {}",
                s.name,
                s.occupation.as_deref().unwrap_or(""),
                s.employer.as_deref().unwrap_or(""),
                s.account_relationship.as_deref().unwrap_or("")
            )
        })
        .collect();

    format!(
        "Write a brief description of each subject using only these facts:\n{}\n\n\
         Just state the facts directly without speculation or additional details.",
        lines.join("\n")
    )
}

pub fn activity_summary_prompt(fields: &ResolvedFields, class: &Classification) -> String {
    format!(
        "Write a paragraph summarizing the suspicious account activity using only these \
         facts:\n\
         - Account number: {}\n\
         - Date range: {} to {}\n\
         - Total credits: {}\n\
         - Total debits: {}\n\
         - AML risks: {}\n\n\
         Focus only on the facts provided without speculation.",
        fields.account_number,
        fields.start_date,
        fields.end_date,
        format_currency(fields.total_credits),
        format_currency(fields.total_debits),
        class.indicator_text()
    )
}

pub fn transaction_samples_prompt(fields: &ResolvedFields) -> String {
    let lines: Vec<String> = fields
        .samples
        .iter()
        .map(|t| {
            format!(
                "- {}: {} ({}) {}",
                crate::format::format_date(&t.date),
                format_currency(t.amount.as_f64()),
                t.kind,
                t.description
            )
        })
        .collect();

    format!(
        "Create a sample list of suspicious transactions using the following \
         information:\n{}\n\n\
         Format each transaction as: \"[Date]: $[Amount] ([Type]) - [Description]\"\n\
         List each transaction separated by semicolons, with a period after the final \
         transaction.",
        lines.join("\n")
    )
}

pub fn conclusion_prompt(fields: &ResolvedFields, class: &Classification) -> String {
    format!(
        "Write a conclusion paragraph for the SAR narrative using only these facts:\n\
         - Total amount: {}\n\
         - Activity type: {}\n\
         - Subjects: {}\n\
         - Account number: {}\n\
         - Date range: {} to {}\n\
         - Case number: {}\n\n\
         Start with: 'In conclusion, USB is reporting...' and end with '...USB will \
         conduct a follow-up review to monitor for continuing activity. All requests for \
         supporting documentation can be sent to lawenforcementrequests@usbank.com \
         referencing AML case number {}.'",
        format_currency(fields.total_amount),
        class.name,
        fields.subject_names,
        fields.account_number,
        fields.start_date,
        fields.end_date,
        fields.case_number,
        fields.case_number
    )
}

/// Three-paragraph alerting-activity prompt over the aggregated flow data.
pub fn alerting_activity_prompt(
    fields: &ResolvedFields,
    summary: &AlertingActivitySummary,
) -> String {
    let mut prompt = format!(
        "Summarize this bank account alert information directly without any introductory \
         phrases:\n\n\
         ALERT INFORMATION:\n\
         - Case Number: {}\n\
         - Alerting Month(s): {}\n\
         - Alert Description: {}\n\n\
         ACCOUNT: {}\n",
        fields.case_number, summary.alert_months, summary.descriptions, fields.account_number
    );

    for (label, flow) in [("CREDITS", &summary.credits), ("DEBITS", &summary.debits)] {
        if let Some(flow) = flow {
            prompt.push_str(&format!(
                "\n{}:\n\
                 - Total amount: {}\n\
                 - Number of transactions: {}\n\
                 - Date range: {} to {}\n\
                 - Transaction amounts: {} to {}\n\
                 - Most common activity: {}\n",
                label,
                format_currency(flow.total_amount),
                flow.transaction_count,
                flow.min_date,
                flow.max_date,
                format_currency(flow.min_amount),
                format_currency(flow.max_amount),
                flow.highest_percent_type
            ));
        }
    }

    prompt.push_str(
        "\nWrite a clear summary in this exact format:\n\n\
         1. First paragraph: Start with the Case Number, then describe the alerting \
         months and include a brief description of the alert activity.\n\n\
         2. Second paragraph: Summarize credit activity focusing on total amount, number \
         of transactions, most common type of activity, and range of amounts.\n\n\
         3. Third paragraph: Summarize debit activity focusing on total amount, number of \
         transactions, most common type of activity, and range of amounts.\n\n\
         Keep sentences short and simple. Do not use phrases like \"Here is the summary\" \
         or \"In conclusion.\" Start immediately with the case number and keep the \
         summary factual without analysis beyond what's shown in the data.",
    );

    prompt
}

/// Prompt for a section id, when that section has an assist path.
pub fn prompt_for_section(
    id: &str,
    fields: &ResolvedFields,
    class: &Classification,
    alerting: &AlertingActivitySummary,
) -> Option<String> {
    match id {
        "introduction" | "suspicious_activity_summary" => {
            Some(introduction_prompt(fields, class))
        }
        "prior_cases" => Some(prior_cases_prompt(fields)),
        "account_info" => Some(account_info_prompt(fields)),
        "subject_info" if !fields.subjects.is_empty() => Some(subject_info_prompt(fields)),
        "activity_summary" => Some(activity_summary_prompt(fields, class)),
        "transaction_samples" if !fields.samples.is_empty() => {
            Some(transaction_samples_prompt(fields))
        }
        "conclusion" => Some(conclusion_prompt(fields, class)),
        "alerting_activity" if alerting.has_flow_data() => {
            Some(alerting_activity_prompt(fields, alerting))
        }
        _ => None,
    }
}
