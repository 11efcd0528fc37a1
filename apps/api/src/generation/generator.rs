//! Landing-page content generation — the two-tier strategy.
//!
//! Flow (free): select template → interpolate profile → return.
//! Flow (byok): check credential → build prompt → one provider call →
//!              parse JSON → on malformed payload, fall back to free.
//!
//! The generator is stateless: everything it needs arrives as arguments.

use thiserror::Error;
use tracing::{info, warn};

use crate::generation::prompts::LANDING_PAGE_PROMPT_TEMPLATE;
use crate::generation::templates::{personalize_body, select_template};
use crate::generation::tone::get_tone_guidance;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{strip_json_fences, LlmError, TextProvider};
use crate::models::{FaqEntry, GeneratedPageContent, GenerationMode, Hero, ProjectProfile, Section};

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// Failures surfaced to the caller. A malformed provider payload is not one
/// of them: it is recovered by falling back to free content.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Anthropic API key is missing for BYOK generation")]
    MissingCredential,

    #[error("Unexpected provider response: {0}")]
    UnexpectedResponse(String),

    #[error("Text provider error: {0}")]
    Provider(#[from] LlmError),
}

/// Why a provider payload could not be used as page content.
#[derive(Debug, Error)]
pub enum MalformedContent {
    #[error("payload is not valid page JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("hero {0} is empty")]
    BlankHero(&'static str),
}

// ────────────────────────────────────────────────────────────────────────────
// Strategy
// ────────────────────────────────────────────────────────────────────────────

/// The closed set of generation strategies, chosen by `settings.mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStrategy {
    Free,
    Byok,
}

impl GenerationStrategy {
    pub fn for_profile(profile: &ProjectProfile) -> Self {
        match profile.settings.mode {
            GenerationMode::Free => GenerationStrategy::Free,
            GenerationMode::Byok => GenerationStrategy::Byok,
        }
    }

    pub async fn generate(
        self,
        profile: &ProjectProfile,
        text_provider: &dyn TextProvider,
    ) -> Result<GeneratedPageContent, GenerationError> {
        match self {
            GenerationStrategy::Free => Ok(generate_free_content(profile)),
            GenerationStrategy::Byok => generate_byok_content(profile, text_provider).await,
        }
    }
}

/// Generates page content for a profile using the strategy its mode selects.
///
/// Precondition: `company.name` and `seo.main_keyword` are non-empty. They are
/// interpolated verbatim; callers validate them.
pub async fn generate_content(
    profile: &ProjectProfile,
    text_provider: &dyn TextProvider,
) -> Result<GeneratedPageContent, GenerationError> {
    let strategy = GenerationStrategy::for_profile(profile);
    info!(
        "Generating content for profile {} ({:?})",
        profile.id, strategy
    );
    strategy.generate(profile, text_provider).await
}

// ────────────────────────────────────────────────────────────────────────────
// Free tier
// ────────────────────────────────────────────────────────────────────────────

/// Deterministic template interpolation. Pure: no I/O, same input → same output.
pub fn generate_free_content(profile: &ProjectProfile) -> GeneratedPageContent {
    let template = select_template(&profile.company.industry, profile.seo.tone);
    let company_name = profile.company.name.as_str();

    GeneratedPageContent {
        hero: Hero {
            headline: format!("{} - {}", company_name, template.headline),
            subheadline: format!(
                "{} à {}. {}",
                profile.seo.main_keyword, profile.company.description, template.subheadline
            ),
            cta: template.cta.to_string(),
        },
        sections: template
            .sections
            .iter()
            .map(|s| Section {
                title: s.title.to_string(),
                content: personalize_body(s.content, company_name),
                image: None,
            })
            .collect(),
        faq: template
            .faq
            .iter()
            .map(|f| FaqEntry {
                question: f.question.to_string(),
                answer: f.answer.to_string(),
            })
            .collect(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// BYOK tier
// ────────────────────────────────────────────────────────────────────────────

async fn generate_byok_content(
    profile: &ProjectProfile,
    text_provider: &dyn TextProvider,
) -> Result<GeneratedPageContent, GenerationError> {
    let api_key = profile
        .anthropic_key()
        .ok_or(GenerationError::MissingCredential)?;

    let prompt = build_landing_prompt(profile);

    // Exactly one call. Transport and API failures propagate: a paying user
    // must see a rejected key or a rate limit, not silent free content.
    let response = match text_provider.complete(api_key, &prompt).await {
        Ok(response) => response,
        Err(LlmError::Decode(e)) => {
            return Err(GenerationError::UnexpectedResponse(format!(
                "body is not a Messages response: {e}"
            )))
        }
        Err(e) => return Err(e.into()),
    };

    let block = response
        .first_block()
        .ok_or_else(|| GenerationError::UnexpectedResponse("no content blocks".to_string()))?;
    let text = block.as_text().ok_or_else(|| {
        GenerationError::UnexpectedResponse(format!(
            "expected a text block, got '{}'",
            block.block_type
        ))
    })?;

    match parse_page_content(text) {
        Ok(content) => Ok(content),
        Err(e) => {
            warn!(
                "BYOK payload for profile {} unusable ({e}); falling back to free content. Payload starts with: {:?}",
                profile.id,
                text.chars().take(120).collect::<String>()
            );
            Ok(generate_free_content(profile))
        }
    }
}

/// Builds the BYOK prompt by filling the template with profile fields.
pub fn build_landing_prompt(profile: &ProjectProfile) -> String {
    let guidance = get_tone_guidance(profile.seo.tone).describe();

    fill_placeholders(
        LANDING_PAGE_PROMPT_TEMPLATE,
        &[
            ("company_name", profile.company.name.as_str()),
            ("description", profile.company.description.as_str()),
            ("main_keyword", profile.seo.main_keyword.as_str()),
            ("tone", profile.seo.tone.as_str()),
            ("tone_guidance", guidance.as_str()),
            ("json_only_instruction", JSON_ONLY_INSTRUCTION),
        ],
    )
}

/// Substitutes `{key}` placeholders in a single pass over the template.
/// Inserted values are never scanned again, so user text that happens to
/// contain `{tone}` stays literal. Unknown braces are kept as-is.
fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let matched = values
            .iter()
            .find(|(key, _)| tail.starts_with(key) && tail[key.len()..].starts_with('}'));

        match matched {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Parses a provider payload into page content, rejecting anything that
/// would break the output contract.
pub fn parse_page_content(text: &str) -> Result<GeneratedPageContent, MalformedContent> {
    let content: GeneratedPageContent = serde_json::from_str(strip_json_fences(text))?;
    if let Some(field) = content.blank_hero_field() {
        return Err(MalformedContent::BlankHero(field));
    }
    Ok(content)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
