//! Free-tier copy templates.
//!
//! A template is static French copy with a generic actor ("Nous") that the
//! free strategy swaps for the company name. Selection is keyed by industry
//! and tone, but only the `professional` template exists today, so every
//! profile resolves to it.

use crate::models::Tone;

/// Placeholder actor in section bodies, replaced by the company name.
pub const ACTOR_PLACEHOLDER: &str = "Nous";

#[derive(Debug)]
pub struct FreeTemplate {
    pub key: &'static str,
    pub headline: &'static str,
    pub subheadline: &'static str,
    pub cta: &'static str,
    pub sections: &'static [TemplateSection],
    pub faq: &'static [TemplateFaq],
}

#[derive(Debug)]
pub struct TemplateSection {
    pub title: &'static str,
    pub content: &'static str,
}

#[derive(Debug)]
pub struct TemplateFaq {
    pub question: &'static str,
    pub answer: &'static str,
}

pub static PROFESSIONAL: FreeTemplate = FreeTemplate {
    key: "professional",
    headline: "Excellence et Professionnalisme",
    subheadline: "Votre partenaire de confiance pour des services de qualité supérieure.",
    cta: "Contactez-nous",
    sections: &[
        TemplateSection {
            title: "Nos Services",
            content: "Nous offrons une gamme complète de services adaptés à vos besoins. \
                      Notre équipe d'experts est là pour vous accompagner.",
        },
        TemplateSection {
            title: "Pourquoi Nous Choisir ?",
            content: "Avec des années d'expérience et un engagement envers la satisfaction \
                      client, nous sommes le choix idéal.",
        },
    ],
    faq: &[
        TemplateFaq {
            question: "Quels sont vos tarifs ?",
            answer: "Nos tarifs sont compétitifs et adaptés à chaque projet. \
                     Contactez-nous pour un devis.",
        },
        TemplateFaq {
            question: "Intervenez-vous le week-end ?",
            answer: "Oui, nous sommes disponibles 7j/7 pour répondre à vos urgences.",
        },
    ],
};

/// Puts the company in place of every placeholder actor in a section body.
pub fn personalize_body(body: &str, company_name: &str) -> String {
    body.replace(ACTOR_PLACEHOLDER, company_name)
}

static TEMPLATES: &[&FreeTemplate] = &[&PROFESSIONAL];

/// Picks the free template for a profile. Falls back to `professional`
/// when nothing more specific matches, which is currently always.
pub fn select_template(industry: &str, tone: Tone) -> &'static FreeTemplate {
    TEMPLATES
        .iter()
        .copied()
        .find(|t| t.key.eq_ignore_ascii_case(industry) || t.key == tone.as_str())
        .unwrap_or(&PROFESSIONAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_combination_resolves_to_professional() {
        for tone in [Tone::Professional, Tone::Friendly, Tone::Luxury, Tone::Urgent] {
            for industry in ["general", "plomberie", "restaurant", ""] {
                assert_eq!(select_template(industry, tone).key, "professional");
            }
        }
    }

    #[test]
    fn test_personalize_body_replaces_every_occurrence() {
        let body = "Nous réparons vite. Nous garantissons chaque intervention.";
        assert_eq!(
            personalize_body(body, "Dupont Plomberie"),
            "Dupont Plomberie réparons vite. Dupont Plomberie garantissons chaque intervention."
        );
    }

    #[test]
    fn test_personalize_body_is_case_sensitive() {
        let body = "Nous et nous.";
        assert_eq!(personalize_body(body, "Dupont"), "Dupont et nous.");
    }

    #[test]
    fn test_professional_template_copy() {
        assert_eq!(PROFESSIONAL.headline, "Excellence et Professionnalisme");
        assert_eq!(PROFESSIONAL.cta, "Contactez-nous");
        assert_eq!(PROFESSIONAL.sections.len(), 2);
        assert_eq!(PROFESSIONAL.faq.len(), 2);
        assert!(PROFESSIONAL.sections[0].content.starts_with(ACTOR_PLACEHOLDER));
    }
}
