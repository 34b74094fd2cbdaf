//! Input bundle data model.
//!
//! The bundle arrives from upstream extraction tooling as loosely-shaped JSON:
//! any key may be absent, amounts may be numbers or `"$1,234.56"` strings, and
//! alert info may be a single object or an array. Every shape quirk is absorbed
//! here so the resolver and composers downstream see one normalized model.

use crate::format::parse_currency;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// A monetary value as it appears in source JSON: either a bare number or a
/// currency-formatted string.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Numeric view of the amount. Unparsable text collapses to `0.0`, per the
    /// formatter contract.
    pub fn as_f64(&self) -> f64 {
        match self {
            Amount::Number(n) => *n,
            Amount::Text(s) => parse_currency(s).unwrap_or(0.0),
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Number(0.0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DateRange {
    #[schemars(description = "Start of the period, loosely formatted")]
    pub start: String,
    #[schemars(description = "End of the period, loosely formatted")]
    pub end: String,
}

impl DateRange {
    pub fn is_empty(&self) -> bool {
        self.start.trim().is_empty() && self.end.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Subject {
    pub name: String,
    #[schemars(description = "True for the subject flagged as the primary party")]
    pub is_primary: bool,
    pub occupation: Option<String>,
    pub employer: Option<String>,
    pub nationality: Option<String>,
    pub address: Option<String>,
    #[schemars(description = "Relationship to the account, e.g. Owner or Signer")]
    pub account_relationship: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RelatedParty {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AccountInfo {
    pub account_number: String,
    pub account_type: String,
    pub open_date: String,
    pub close_date: String,
    #[schemars(
        description = "Account status text; a value containing 'closed' (case-insensitive) marks the account closed"
    )]
    pub status: String,
    pub closure_reason: String,
    pub related_parties: Vec<RelatedParty>,
    pub branch: String,
}

impl AccountInfo {
    /// The closure signal is the status text, not the close date: an account
    /// with no close date on file can still be closed.
    pub fn is_closed(&self) -> bool {
        self.status.to_lowercase().contains("closed")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AlertInfo {
    pub alert_id: String,
    pub alert_month: String,
    pub description: String,
    pub review_period: Option<DateRange>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PriorCase {
    pub case_number: String,
    pub alert_ids: Vec<String>,
    pub alert_months: Vec<String>,
    pub review_period: Option<DateRange>,
    pub sar_form_number: String,
    pub filing_date: String,
    pub summary: String,
}

/// Case-side half of the bundle.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CaseData {
    pub case_number: String,
    pub subjects: Vec<Subject>,
    pub account_info: AccountInfo,
    #[schemars(description = "All accounts under review, when more than one exists")]
    pub accounts: Vec<AccountInfo>,
    pub prior_cases: Vec<PriorCase>,
    #[serde(deserialize_with = "one_or_many")]
    #[schemars(description = "Alert records; accepts a single object or an array")]
    pub alert_info: Vec<AlertInfo>,
    pub review_period: Option<DateRange>,
    #[schemars(
        description = "Account numbers listed under the generic case-information section; preferred for the case header"
    )]
    pub relevant_accounts: Vec<String>,
}

/// Legacy per-type transaction breakdown row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BreakdownEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: Amount,
    pub count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TransactionSummary {
    pub total_credits: Option<Amount>,
    pub total_debits: Option<Amount>,
    pub credit_breakdown: Vec<BreakdownEntry>,
    pub debit_breakdown: Vec<BreakdownEntry>,
}

/// Category-keyed aggregation row from the newer summary structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CategoryEntry {
    #[serde(rename = "type")]
    pub category: String,
    pub total_amount: Amount,
    pub transaction_count: u64,
    pub percent_of_total: f64,
    pub min_transaction_amount: Option<Amount>,
    pub max_transaction_amount: Option<Amount>,
    pub min_transaction_date: String,
    pub max_transaction_date: String,
}

/// The newer category-keyed aggregation, preferred over the legacy breakdown
/// structure whenever present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CategorySummary {
    pub credits_by_type: Vec<CategoryEntry>,
    pub debits_by_type: Vec<CategoryEntry>,
}

impl CategorySummary {
    pub fn is_empty(&self) -> bool {
        self.credits_by_type.is_empty() && self.debits_by_type.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SummaryRow {
    pub label: String,
    pub credits: Option<Amount>,
    pub debits: Option<Amount>,
}

impl SummaryRow {
    /// A row labelled "grand total" (case-insensitive substring) aggregates all
    /// categories and outranks both summary structures.
    pub fn is_grand_total(&self) -> bool {
        self.label.to_lowercase().contains("grand total")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SummaryTable {
    pub title: String,
    pub rows: Vec<SummaryRow>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SampleTransaction {
    pub date: String,
    pub amount: Amount,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub account: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct UnusualActivityBundle {
    pub transactions: Vec<SampleTransaction>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ActivitySummary {
    pub start_date: String,
    pub end_date: String,
    pub total_amount: Option<Amount>,
    pub description: String,
}

/// Spreadsheet-side half of the bundle.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExcelData {
    pub activity_summary: Option<ActivitySummary>,
    pub transaction_summary: Option<TransactionSummary>,
    pub category_summary: Option<CategorySummary>,
    pub activity_summary_tables: Vec<SummaryTable>,
    pub unusual_activity: Option<UnusualActivityBundle>,
}

/// The normalized input bundle: case record plus transaction data. Either half
/// may be wholly absent; assembly still produces every section.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CaseBundle {
    pub case_data: CaseData,
    pub excel_data: ExcelData,
}

impl CaseBundle {
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(CaseBundle)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

/// Accepts `alert_info` as a single object, an array, or null.
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<AlertInfo>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(AlertInfo),
        Many(Vec<AlertInfo>),
        None,
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(alert) => vec![alert],
        OneOrMany::Many(alerts) => alerts,
        OneOrMany::None => Vec::new(),
    })
}
