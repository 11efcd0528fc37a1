pub mod content;
pub mod profile;
pub mod site;

pub use content::{FaqEntry, GeneratedPageContent, Hero, Section};
pub use profile::{GenerationMode, ProjectProfile, TemplateChoice, Tone};
