//! Activity classification over sampled transactions.
//!
//! One ordered rule set, evaluated once per assembly and threaded into every
//! composer that needs it, so the narrative and conclusion never disagree
//! about what kind of activity is being reported.

use crate::schema::SampleTransaction;
use crate::templates;
use log::debug;
use serde::{Deserialize, Serialize};

/// Structuring window: at or above this, but below the CTR reporting line.
const STRUCTURING_FLOOR: f64 = 8_000.0;
const CTR_THRESHOLD: f64 = 10_000.0;

const STRUCTURING_MIN_COUNT: usize = 2;
const TYPE_KEYWORD_MIN_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Structuring,
    WireAch,
    Cash,
    Generic,
}

/// Classification outcome: the categorical type plus the narrative language
/// that goes with it.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub activity_type: ActivityType,
    pub name: &'static str,
    pub derived_from: &'static str,
    pub indicators: &'static [&'static str],
}

impl Classification {
    fn structuring() -> Self {
        Self {
            activity_type: ActivityType::Structuring,
            name: "structuring",
            derived_from: "derived from credits and debits",
            indicators: templates::STRUCTURING_INDICATORS,
        }
    }

    fn wire_ach() -> Self {
        Self {
            activity_type: ActivityType::WireAch,
            name: "wire and Automated Clearing House (ACH) activity",
            derived_from: "derived from credits",
            indicators: templates::WIRE_ACH_INDICATORS,
        }
    }

    fn cash() -> Self {
        Self {
            activity_type: ActivityType::Cash,
            name: "cash activity",
            derived_from: "derived from credits and debits",
            indicators: templates::CASH_INDICATORS,
        }
    }

    fn generic() -> Self {
        Self {
            activity_type: ActivityType::Generic,
            name: "suspicious activity",
            derived_from: "derived from credits and debits",
            indicators: templates::GENERIC_INDICATORS,
        }
    }

    /// Indicator bullets joined for prose use.
    pub fn indicator_text(&self) -> String {
        self.indicators.join(", ")
    }
}

/// Classifies sampled transactions by ordered priority rules; first match
/// wins. An empty list always lands on the generic branch.
pub fn classify(transactions: &[SampleTransaction]) -> Classification {
    let sub_threshold = transactions
        .iter()
        .filter(|t| {
            let amount = t.amount.as_f64();
            (STRUCTURING_FLOOR..CTR_THRESHOLD).contains(&amount)
        })
        .count();

    if sub_threshold >= STRUCTURING_MIN_COUNT {
        debug!(
            "Classified as structuring: {} transactions in [{}, {})",
            sub_threshold, STRUCTURING_FLOOR, CTR_THRESHOLD
        );
        return Classification::structuring();
    }

    let wire_ach = count_by_type(transactions, &["wire", "ach"]);
    if wire_ach >= TYPE_KEYWORD_MIN_COUNT {
        debug!("Classified as wire/ACH: {} matching transactions", wire_ach);
        return Classification::wire_ach();
    }

    let cash = count_by_type(transactions, &["cash"]);
    if cash >= TYPE_KEYWORD_MIN_COUNT {
        debug!("Classified as cash: {} matching transactions", cash);
        return Classification::cash();
    }

    Classification::generic()
}

fn count_by_type(transactions: &[SampleTransaction], keywords: &[&str]) -> usize {
    transactions
        .iter()
        .filter(|t| {
            let kind = t.kind.to_lowercase();
            keywords.iter().any(|k| kind.contains(k))
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Amount;

    fn txn(amount: f64, kind: &str) -> SampleTransaction {
        SampleTransaction {
            amount: Amount::Number(amount),
            kind: kind.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_structuring_two_sub_threshold() {
        let txns = vec![txn(8500.0, "Cash Deposit"), txn(8999.0, "Cash Deposit"), txn(500.0, "Check")];
        let class = classify(&txns);
        assert_eq!(class.activity_type, ActivityType::Structuring);
        assert_eq!(class.name, "structuring");
    }

    #[test]
    fn test_structuring_window_is_half_open() {
        // 10,000 itself is at the CTR line, not under it
        let txns = vec![txn(10_000.0, ""), txn(10_000.0, ""), txn(8_000.0, "")];
        assert_eq!(classify(&txns).activity_type, ActivityType::Generic);

        let txns = vec![txn(8_000.0, ""), txn(9_999.99, "")];
        assert_eq!(classify(&txns).activity_type, ActivityType::Structuring);
    }

    #[test]
    fn test_wire_ach_case_insensitive() {
        let txns = vec![
            txn(100.0, "Wire"),
            txn(100.0, "ach"),
            txn(100.0, "WIRE transfer"),
            txn(100.0, "check"),
        ];
        assert_eq!(classify(&txns).activity_type, ActivityType::WireAch);
    }

    #[test]
    fn test_cash_requires_three() {
        let txns = vec![txn(100.0, "Cash"), txn(100.0, "cash deposit")];
        assert_eq!(classify(&txns).activity_type, ActivityType::Generic);

        let txns = vec![txn(100.0, "Cash"), txn(100.0, "cash deposit"), txn(100.0, "CASH out")];
        assert_eq!(classify(&txns).activity_type, ActivityType::Cash);
    }

    #[test]
    fn test_structuring_outranks_wire() {
        let txns = vec![
            txn(8500.0, "wire"),
            txn(9200.0, "wire"),
            txn(9900.0, "wire"),
        ];
        assert_eq!(classify(&txns).activity_type, ActivityType::Structuring);
    }

    #[test]
    fn test_empty_is_generic() {
        let class = classify(&[]);
        assert_eq!(class.activity_type, ActivityType::Generic);
        assert_eq!(class.name, "suspicious activity");
        assert!(!class.indicators.is_empty());
    }
}
