use crate::activity::summarize_alerting_activity;
use crate::assembler::{assemble, Narrative, SectionSchema};
use crate::classifier::classify;
use crate::llm::client::{AssistClient, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::llm::prompts;
use crate::resolver::resolve;
use crate::schema::CaseBundle;
use log::{debug, warn};

/// Per-section narrative enhancement with deterministic fallback.
///
/// Assembly always runs first; a section's template text is replaced only by
/// a non-empty successful completion. No failure mode propagates out.
pub struct NarrativeAssistant {
    client: AssistClient,
    max_tokens: u32,
    temperature: f32,
}

impl NarrativeAssistant {
    pub fn new(client: AssistClient) -> Self {
        Self {
            client,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_sampling(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    pub async fn enhance(&self, bundle: &CaseBundle, schema: SectionSchema) -> Narrative {
        let mut narrative = assemble(bundle, schema);

        let transactions = bundle
            .excel_data
            .unusual_activity
            .as_ref()
            .map(|u| u.transactions.as_slice())
            .unwrap_or(&[]);
        let class = classify(transactions);
        let fields = resolve(bundle);
        let alerting = summarize_alerting_activity(bundle);

        for section in &mut narrative.sections {
            let Some(prompt) = prompts::prompt_for_section(&section.id, &fields, &class, &alerting)
            else {
                debug!("Section {} has no assist path, keeping template", section.id);
                continue;
            };

            match self
                .client
                .generate(&prompt, self.max_tokens, self.temperature)
                .await
            {
                Ok(text) if !text.trim().is_empty() => {
                    debug!("Section {} enhanced", section.id);
                    section.content = text;
                }
                Ok(_) => {
                    warn!("Empty completion for section {}, keeping template", section.id);
                }
                Err(e) => {
                    warn!(
                        "Assist failed for section {}, keeping template: {}",
                        section.id, e
                    );
                }
            }
        }

        narrative
    }
}
