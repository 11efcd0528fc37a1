//! Tone calibration — maps the requested tone to copywriting guidance
//! embedded in the BYOK prompt.

use crate::models::Tone;

/// Writing guidance for a tone, phrased for the model.
#[derive(Debug, Clone)]
pub struct ToneGuidance {
    pub style: &'static str,
    pub favored_words: Vec<&'static str>,
    pub avoid: Vec<&'static str>,
}

pub fn get_tone_guidance(tone: Tone) -> ToneGuidance {
    match tone {
        Tone::Professional => ToneGuidance {
            style: "sobre, rassurant, vouvoiement, phrases courtes et factuelles",
            favored_words: vec!["expertise", "qualité", "confiance", "savoir-faire"],
            avoid: vec!["argot", "points d'exclamation multiples", "superlatifs vides"],
        },
        Tone::Friendly => ToneGuidance {
            style: "chaleureux, proche, accessible, vouvoiement bienveillant",
            favored_words: vec!["ensemble", "à votre écoute", "simple", "sourire"],
            avoid: vec!["jargon technique", "ton administratif"],
        },
        Tone::Luxury => ToneGuidance {
            style: "raffiné, élégant, évocateur, rythme posé",
            favored_words: vec!["exception", "sur-mesure", "prestige", "raffinement"],
            avoid: vec!["prix bas", "promotion", "pas cher"],
        },
        Tone::Urgent => ToneGuidance {
            style: "direct, réactif, orienté action, disponibilité mise en avant",
            favored_words: vec!["rapide", "24h/24", "intervention immédiate", "dépannage"],
            avoid: vec!["délais", "sur rendez-vous uniquement"],
        },
    }
}

impl ToneGuidance {
    /// One-paragraph rendering used inside the prompt.
    pub fn describe(&self) -> String {
        format!(
            "Style : {}. Vocabulaire à privilégier : {}. À éviter : {}.",
            self.style,
            self.favored_words.join(", "),
            self.avoid.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urgent_tone_pushes_availability() {
        let t = get_tone_guidance(Tone::Urgent);
        assert!(t.favored_words.contains(&"24h/24"));
    }

    #[test]
    fn test_luxury_tone_avoids_discount_language() {
        let t = get_tone_guidance(Tone::Luxury);
        assert!(t.avoid.contains(&"pas cher"));
    }

    #[test]
    fn test_every_tone_has_guidance() {
        for tone in [Tone::Professional, Tone::Friendly, Tone::Luxury, Tone::Urgent] {
            let t = get_tone_guidance(tone);
            assert!(!t.style.is_empty());
            assert!(!t.favored_words.is_empty());
            assert!(t.describe().starts_with("Style : "));
        }
    }
}
