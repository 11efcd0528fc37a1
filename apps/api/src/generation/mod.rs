// Landing-page generation engine.
// Free tier: static templates. BYOK tier: one Anthropic call via llm_client,
// falling back to the free tier when the payload is unusable.

pub mod generator;
pub mod handlers;
pub mod image;
pub mod prompts;
pub mod templates;
pub mod tone;
