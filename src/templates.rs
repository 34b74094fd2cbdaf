//! Fixed prose fragments shared by the section composers.
//!
//! These are the exact literals the compliance templates prescribe; composers
//! fill everything else in from resolved fields.

pub const FILING_INSTITUTION: &str = "U.S. Bank National Association (USB)";

pub const NO_PRIOR_SARS: &str = "No prior SARs were identified for the subjects or account.";

pub const NO_PRIOR_CASES_SUMMARY: &str = "No prior cases or SARs were identified.";

pub const NO_SAMPLES: &str = "No suspicious transaction samples available.";

pub const NO_SUBJECT_INFO: &str = "No subject information is available.";

pub const REVIEW_PERIOD_UNSPECIFIED: &str = "Review period not specified.";

pub const UNKNOWN_SUBJECT: &str = "Unknown Subject";

pub const DEFAULT_ACCOUNT_TYPE: &str = "checking/savings";

pub const SUPPORTING_DOCS_CONTACT: &str = "lawenforcementrequests@usbank.com";

pub const INVESTIGATION_PLACEHOLDER: &str = "[Investigator to provide summary of investigation \
findings, including identified suspicious activity patterns and supporting evidence.]";

pub const RETAIN_TEXT: &str = "Retain: No further action is necessary at this time. The customer \
relationship(s) can remain open.";

/// Indicator bullets per classification branch. Structuring wording follows
/// the CTR-evasion template; the rest follow the standard AML risk lexicon.
pub const STRUCTURING_INDICATORS: &[&str] = &[
    "multiple transactions just below CTR threshold",
    "pattern designed to evade reporting",
    "rapid movement of funds",
];

pub const WIRE_ACH_INDICATORS: &[&str] = &[
    "unknown sources/beneficiaries",
    "high-frequency electronic transactions",
    "inconsistent with customer profile",
];

pub const CASH_INDICATORS: &[&str] = &[
    "large cash deposits",
    "large cash withdrawals",
    "structured cash transactions",
];

pub const GENERIC_INDICATORS: &[&str] = &[
    "deviation from normal account patterns",
    "unexplained transactions",
    "lack of apparent business purpose",
];

/// Fixed question block for the Customer Transaction Assessment referral.
pub const CTA_QUESTIONS: &str = "\
What is our customer's current or most recent occupation(s) and employer? If the customer is a \
student, what is their field of study and what school is being attended?

What is the nature of the customer's business? If available, please provide the customer's \
website as well as any physical addresses for their business locations.

What is the source of the customer's account credit activity (cash, wires, other transactions) \
as described in the summary?

What is the purpose of the customer's account debit activity as described in the summary?

Does the customer expect to have similar transactions (cash, wires or other activity described \
in the summary) in the future? If yes, what is the anticipated frequency, amount(s) and purpose \
of the activity?

What is the purpose of the wire transactions occurring in the customer's accounts? What is our \
customer's relationship to the wire originators and/or wire beneficiaries referenced in the \
summary?";
