// LLM prompt constants for the generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// BYOK landing-page prompt.
/// Replace: {company_name}, {description}, {main_keyword}, {tone},
///          {tone_guidance}, {json_only_instruction}
pub const LANDING_PAGE_PROMPT_TEMPLATE: &str = r#"Tu es un expert SEO et Copywriter. Génère le contenu d'une landing page pour :
Entreprise: {company_name}
Activité: {description}
Mot-clé: {main_keyword}
Ton: {tone}

{tone_guidance}

Structure JSON attendue:
{
  "hero": { "headline": "...", "subheadline": "...", "cta": "..." },
  "sections": [ { "title": "...", "content": "..." } ],
  "faq": [ { "question": "...", "answer": "..." } ]
}

RÈGLES :
1. Le titre principal (headline) contient le nom de l'entreprise
2. Le mot-clé apparaît naturellement dans le sous-titre et au moins une section
3. Deux à quatre sections, trois à cinq questions dans la FAQ
4. Aucun champ vide

{json_only_instruction}"#;

/// Qualifier prepended to every image prompt.
pub const IMAGE_PROMPT_PREFIX: &str = "Professional photography, 8k, ";
