use serde::{Deserialize, Serialize};

/// Marketing copy for one landing page. Both templates consume this shape
/// unchanged, whichever strategy produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPageContent {
    pub hero: Hero,
    pub sections: Vec<Section>,
    pub faq: Vec<FaqEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub headline: String,
    pub subheadline: String,
    pub cta: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    /// Plain text or light markdown.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl GeneratedPageContent {
    /// Names the first hero field that is blank, if any.
    pub fn blank_hero_field(&self) -> Option<&'static str> {
        [
            ("headline", &self.hero.headline),
            ("subheadline", &self.hero.subheadline),
            ("cta", &self.hero.cta),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}
