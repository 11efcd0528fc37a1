use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The business a landing page is generated for.
///
/// Field names follow the client's JSON contract (`mainKeyword`, `apiKeys`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectProfile {
    pub id: Uuid,
    pub company: Company,
    #[serde(default)]
    pub contact: Contact,
    pub seo: Seo,
    #[serde(default)]
    pub images: Images,
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub description: String,
    #[serde(default = "default_industry")]
    pub industry: String,
}

fn default_industry() -> String {
    "general".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    pub main_keyword: String,
    #[serde(default)]
    pub tone: Tone,
}

/// Voice requested for the generated copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Luxury,
    Urgent,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Friendly => "friendly",
            Tone::Luxury => "luxury",
            Tone::Urgent => "urgent",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Images {
    /// URL or data URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
    #[serde(default)]
    pub source: ImageSource,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    #[default]
    Stock,
    Upload,
    Generated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub mode: GenerationMode,
    #[serde(default)]
    pub template: TemplateChoice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_keys: Option<ApiKeys>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    #[default]
    Free,
    Byok,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateChoice {
    #[default]
    Artisan,
    Modern,
}

/// Third-party credentials supplied by the end user in BYOK mode.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiKeys {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anthropic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicate: Option<String>,
}

// Keys must never end up in logs.
impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |k: &Option<String>| k.as_ref().map(|_| "***");
        f.debug_struct("ApiKeys")
            .field("anthropic", &mask(&self.anthropic))
            .field("replicate", &mask(&self.replicate))
            .finish()
    }
}

impl ProjectProfile {
    /// Returns the text-provider key if one is set and not blank.
    pub fn anthropic_key(&self) -> Option<&str> {
        self.settings
            .api_keys
            .as_ref()
            .and_then(|k| k.anthropic.as_deref())
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Copy of the profile with every credential removed. This is the only
    /// form that leaves the request scope.
    pub fn without_credentials(&self) -> Self {
        let mut profile = self.clone();
        profile.settings.api_keys = None;
        profile
    }

    /// The same profile forced onto the free tier.
    #[cfg(test)]
    pub fn as_free(&self) -> Self {
        let mut profile = self.clone();
        profile.settings.mode = GenerationMode::Free;
        profile
    }
}
