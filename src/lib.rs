//! # SAR Narrative Builder
//!
//! A library for assembling Suspicious Activity Report (SAR) narratives from
//! normalized case and transaction data.
//!
//! ## Core Concepts
//!
//! - **Case Bundle**: Case record plus spreadsheet-derived transaction data;
//!   any part may be absent and assembly still produces every section
//! - **Classification**: Ordered priority rules over sampled transactions
//!   (structuring, wire/ACH, cash, generic)
//! - **Field Resolution**: Every narrative field is resolved once through an
//!   explicit fallback chain
//! - **Composition**: Pure template composers per section, with fixed
//!   fallback literals for degenerate inputs
//! - **Assembly**: A fixed, ordered section mapping (Modern or Legacy layout)
//!   plus a flat seven-entry recommendation mapping
//!
//! ## Example
//!
//! ```rust,ignore
//! use sar_narrative_builder::*;
//!
//! let bundle = CaseBundle::from_json(&json)?;
//! let narrative = build_narrative(&bundle, SectionSchema::Modern);
//! for section in &narrative.sections {
//!     println!("{}: {}", section.title, section.content);
//! }
//! let recommendation = build_recommendation(&bundle);
//! ```

pub mod activity;
pub mod assembler;
pub mod classifier;
pub mod composer;
pub mod error;
pub mod export;
pub mod format;
pub mod resolver;
pub mod schema;
pub mod templates;

#[cfg(feature = "assist")]
pub mod llm;

pub use activity::{summarize_alerting_activity, AlertingActivitySummary, FlowSummary};
pub use assembler::{
    assemble, recommend, Narrative, NarrativeSection, Recommendation, RecommendationSection,
    SectionSchema, RECOMMENDATION_IDS,
};
pub use classifier::{classify, ActivityType, Classification};
pub use error::{NarrativeError, Result};
pub use export::{render_document, write_document};
pub use format::{format_currency, format_date, parse_currency};
pub use resolver::{resolve, ResolvedFields};
pub use schema::*;

/// Facade over the assembly pipeline.
pub struct NarrativeBuilder;

impl NarrativeBuilder {
    pub fn build(bundle: &CaseBundle, schema: SectionSchema) -> Narrative {
        assembler::assemble(bundle, schema)
    }

    pub fn build_from_json(json: &str, schema: SectionSchema) -> Result<Narrative> {
        let bundle = CaseBundle::from_json(json)?;
        Ok(Self::build(&bundle, schema))
    }

    pub fn recommendation(bundle: &CaseBundle) -> Recommendation {
        assembler::recommend(bundle)
    }
}

pub fn build_narrative(bundle: &CaseBundle, schema: SectionSchema) -> Narrative {
    NarrativeBuilder::build(bundle, schema)
}

pub fn build_recommendation(bundle: &CaseBundle) -> Recommendation {
    NarrativeBuilder::recommendation(bundle)
}
