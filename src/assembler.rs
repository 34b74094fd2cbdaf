//! Narrative and recommendation assembly.
//!
//! Classification and field resolution run exactly once per assembly and the
//! results thread into every composer, so all sections agree on activity type
//! and resolved values. Output always carries the schema's full id set in
//! schema order.

use crate::activity::summarize_alerting_activity;
use crate::classifier::{classify, Classification};
use crate::composer;
use crate::resolver::{resolve, ResolvedFields};
use crate::schema::CaseBundle;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which section layout the narrative is assembled under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionSchema {
    /// Five consolidated sections.
    #[default]
    Modern,
    /// Eleven-section layout: the seven narrative parts plus the referral
    /// group surfaced as sections.
    Legacy,
}

impl SectionSchema {
    pub fn section_ids(&self) -> &'static [&'static str] {
        match self {
            SectionSchema::Modern => &[
                "suspicious_activity_summary",
                "prior_cases",
                "account_subject_info",
                "suspicious_activity_analysis",
                "conclusion",
            ],
            SectionSchema::Legacy => &[
                "introduction",
                "prior_cases",
                "account_info",
                "subject_info",
                "activity_summary",
                "transaction_samples",
                "conclusion",
                "alerting_activity",
                "scope_of_review",
                "cta",
                "retain_close",
            ],
        }
    }
}

/// Stable section ids for the recommendation mapping, in output order.
pub const RECOMMENDATION_IDS: &[&str] = &[
    "alerting_activity",
    "prior_sars",
    "scope_of_review",
    "investigation_summary",
    "conclusion",
    "cta",
    "retain_close",
];

fn section_title(id: &str) -> &'static str {
    match id {
        "suspicious_activity_summary" => "Suspicious Activity Summary",
        "prior_cases" => "Prior Cases",
        "account_subject_info" => "Account and Subject Information",
        "suspicious_activity_analysis" => "Suspicious Activity Analysis",
        "conclusion" => "Conclusion",
        "introduction" => "Introduction",
        "account_info" => "Account Information",
        "subject_info" => "Subject Information",
        "activity_summary" => "Activity Summary",
        "transaction_samples" => "Transaction Samples",
        "alerting_activity" => "Alerting Activity / Reason for Review",
        "scope_of_review" => "Scope of Review",
        "cta" => "CTA",
        "retain_close" => "Retain or Close Customer Relationship(s)",
        _ => "Section",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeSection {
    pub id: String,
    pub title: String,
    pub content: String,
}

/// An assembled narrative: ordered sections plus a map view over them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Narrative {
    pub schema: SectionSchema,
    pub sections: Vec<NarrativeSection>,
}

impl Narrative {
    pub fn get(&self, id: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.content.as_str())
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut String> {
        self.sections
            .iter_mut()
            .find(|s| s.id == id)
            .map(|s| &mut s.content)
    }

    pub fn as_map(&self) -> HashMap<&str, &str> {
        self.sections
            .iter()
            .map(|s| (s.id.as_str(), s.content.as_str()))
            .collect()
    }

    /// Full narrative text: section contents joined by blank lines in
    /// assembly order, empty sections skipped.
    pub fn full_text(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.content.as_str())
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// One recommendation entry. Unlike narrative sections these carry no display
/// title; the id is the key downstream consumers address them by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSection {
    pub id: String,
    pub content: String,
}

/// The flat recommendation mapping, fixed seven-entry id set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub sections: Vec<RecommendationSection>,
}

impl Recommendation {
    pub fn get(&self, id: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.content.as_str())
    }

    pub fn as_map(&self) -> HashMap<&str, &str> {
        self.sections
            .iter()
            .map(|s| (s.id.as_str(), s.content.as_str()))
            .collect()
    }
}

/// Assembles the narrative for the given schema.
pub fn assemble(bundle: &CaseBundle, schema: SectionSchema) -> Narrative {
    info!(
        "Assembling {:?} narrative for case {:?}",
        schema, bundle.case_data.case_number
    );

    let transactions = bundle
        .excel_data
        .unusual_activity
        .as_ref()
        .map(|u| u.transactions.as_slice())
        .unwrap_or(&[]);
    let class = classify(transactions);
    let fields = resolve(bundle);

    let sections = schema
        .section_ids()
        .iter()
        .map(|id| NarrativeSection {
            id: (*id).to_string(),
            title: section_title(id).to_string(),
            content: compose_section(id, bundle, &fields, &class),
        })
        .collect();

    Narrative { schema, sections }
}

fn compose_section(
    id: &str,
    bundle: &CaseBundle,
    fields: &ResolvedFields,
    class: &Classification,
) -> String {
    match id {
        "introduction" | "suspicious_activity_summary" => {
            composer::compose_introduction(fields, class)
        }
        "prior_cases" => composer::compose_prior_cases(fields),
        "account_info" => composer::compose_account_info(fields),
        "subject_info" => composer::compose_subject_info(fields),
        "account_subject_info" => format!(
            "{}\n\n{}",
            composer::compose_account_info(fields),
            composer::compose_subject_info(fields)
        ),
        "activity_summary" => composer::compose_activity_summary(fields, class),
        "transaction_samples" => composer::compose_transaction_samples(fields),
        "suspicious_activity_analysis" => format!(
            "{}\n\n{}",
            composer::compose_activity_summary(fields, class),
            composer::compose_transaction_samples(fields)
        ),
        "conclusion" => composer::compose_conclusion(fields, class),
        "alerting_activity" => {
            let summary = summarize_alerting_activity(bundle);
            composer::compose_alerting_activity(fields, &summary)
        }
        "scope_of_review" => composer::compose_scope_of_review(fields),
        "cta" => composer::compose_cta(fields),
        "retain_close" => composer::compose_retain_close(fields),
        _ => String::new(),
    }
}

/// Produces the seven-entry recommendation mapping.
pub fn recommend(bundle: &CaseBundle) -> Recommendation {
    info!(
        "Building recommendation for case {:?}",
        bundle.case_data.case_number
    );

    let transactions = bundle
        .excel_data
        .unusual_activity
        .as_ref()
        .map(|u| u.transactions.as_slice())
        .unwrap_or(&[]);
    let class = classify(transactions);
    let fields = resolve(bundle);
    let alerting = summarize_alerting_activity(bundle);

    let sections = RECOMMENDATION_IDS
        .iter()
        .map(|id| {
            let content = match *id {
                "alerting_activity" => composer::compose_alerting_activity(&fields, &alerting),
                "prior_sars" => composer::compose_prior_sars(&fields),
                "scope_of_review" => composer::compose_scope_of_review(&fields),
                "investigation_summary" => composer::compose_investigation_summary(),
                "conclusion" => composer::compose_recommendation_conclusion(&fields, &class),
                "cta" => composer::compose_cta(&fields),
                "retain_close" => composer::compose_retain_close(&fields),
                _ => String::new(),
            };
            RecommendationSection {
                id: (*id).to_string(),
                content,
            }
        })
        .collect();

    Recommendation { sections }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modern_schema_id_set_and_order() {
        let narrative = assemble(&CaseBundle::default(), SectionSchema::Modern);
        let ids: Vec<&str> = narrative.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "suspicious_activity_summary",
                "prior_cases",
                "account_subject_info",
                "suspicious_activity_analysis",
                "conclusion",
            ]
        );
    }

    #[test]
    fn test_legacy_schema_has_eleven_sections() {
        let narrative = assemble(&CaseBundle::default(), SectionSchema::Legacy);
        assert_eq!(narrative.sections.len(), 11);
        assert_eq!(narrative.sections[0].id, "introduction");
        assert_eq!(narrative.sections[10].id, "retain_close");
    }

    #[test]
    fn test_degenerate_bundle_has_no_missing_keys() {
        let narrative = assemble(&CaseBundle::default(), SectionSchema::Legacy);
        for id in SectionSchema::Legacy.section_ids() {
            assert!(narrative.get(id).is_some(), "missing section {}", id);
        }
        // the degenerate literals keep every section non-empty
        assert!(narrative.sections.iter().all(|s| !s.content.is_empty()));
    }

    #[test]
    fn test_recommendation_key_set() {
        let recommendation = recommend(&CaseBundle::default());
        let ids: Vec<&str> = recommendation.sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, RECOMMENDATION_IDS.to_vec());
    }

    #[test]
    fn test_recommendation_entries_carry_no_title() {
        let recommendation = recommend(&CaseBundle::default());
        let serialized = serde_json::to_value(&recommendation.sections[0]).unwrap();
        let keys: Vec<&str> = serialized
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        assert_eq!(keys, vec!["content", "id"]);
    }

    #[test]
    fn test_modern_joins_paragraphs() {
        let narrative = assemble(&CaseBundle::default(), SectionSchema::Modern);
        let combined = narrative.get("account_subject_info").unwrap();
        assert!(combined.contains("\n\n"));
        assert!(combined.contains("No subject information is available."));
    }

    #[test]
    fn test_section_titles() {
        let narrative = assemble(&CaseBundle::default(), SectionSchema::Legacy);
        assert_eq!(narrative.sections[0].title, "Introduction");
        assert_eq!(
            narrative.sections[7].title,
            "Alerting Activity / Reason for Review"
        );
    }

    #[test]
    fn test_full_text_joins_in_order() {
        let narrative = assemble(&CaseBundle::default(), SectionSchema::Modern);
        let text = narrative.full_text();
        let intro_pos = text.find("U.S. Bank National Association").unwrap();
        let conclusion_pos = text.find("In conclusion, USB is reporting").unwrap();
        assert!(intro_pos < conclusion_pos);
    }
}
