// Cross-cutting prompt fragments shared by every text-generation prompt.
// Feature-specific prompts live next to the feature (see generation::prompts).

/// Appended to prompts whose answer is parsed as JSON. The Messages request
/// carries no system prompt, so the constraint travels in the user message.
pub const JSON_ONLY_INSTRUCTION: &str = "\
Réponds UNIQUEMENT avec un objet JSON valide. \
N'ajoute aucun texte avant ou après le JSON. \
N'utilise pas de bloc de code markdown.";
