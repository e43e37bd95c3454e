//! Persona domain
//!
//! The four simulated voices a single backend call is asked to role-play.
//!
//! - [`PersonaId`] — the fixed identifier set, in canonical order
//! - [`Persona`] — static descriptor (display name, provider, style profile)
//! - [`PersonaResponseSet`] — one text fragment per persona

mod response_set;

pub use response_set::PersonaResponseSet;

use serde::{Deserialize, Serialize};

/// Persona identifier
///
/// The declaration order is the canonical display and report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaId {
    Gemini,
    Claude,
    Gpt,
    Grok,
}

impl PersonaId {
    /// All personas in canonical order
    pub const ALL: [PersonaId; 4] = [
        PersonaId::Gemini,
        PersonaId::Claude,
        PersonaId::Gpt,
        PersonaId::Grok,
    ];

    /// Lowercase identifier, also used as the JSON key in backend output
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaId::Gemini => "gemini",
            PersonaId::Claude => "claude",
            PersonaId::Gpt => "gpt",
            PersonaId::Grok => "grok",
        }
    }

    /// Static descriptor for this persona
    pub fn persona(&self) -> &'static Persona {
        match self {
            PersonaId::Gemini => &GEMINI,
            PersonaId::Claude => &CLAUDE,
            PersonaId::Gpt => &GPT,
            PersonaId::Grok => &GROK,
        }
    }
}

impl std::fmt::Display for PersonaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static persona descriptor
#[derive(Debug, PartialEq, Eq)]
pub struct Persona {
    pub id: PersonaId,
    /// Name shown on the persona card (e.g. "Claude 3.5 Opus")
    pub display_name: &'static str,
    /// Name used in exported report headings (e.g. "CLAUDE 3.5 OPUS")
    pub report_name: &'static str,
    /// Upper-case provider label shown under the name
    pub provider: &'static str,
    /// Provider name in normal casing, used in prompts and reports
    pub provider_name: &'static str,
    /// Heading used when describing the persona to the backend
    pub prompt_label: &'static str,
    /// Stylistic traits the backend must reproduce
    pub style: &'static [&'static str],
}

impl Persona {
    /// All persona descriptors in canonical order
    pub fn all() -> impl Iterator<Item = &'static Persona> {
        PersonaId::ALL.iter().map(|id| id.persona())
    }

    /// Heading used for this persona in exported reports,
    /// e.g. `CLAUDE 3.5 OPUS (Anthropic)`
    pub fn report_heading(&self) -> String {
        format!("{} ({})", self.report_name, self.provider_name)
    }
}

static GEMINI: Persona = Persona {
    id: PersonaId::Gemini,
    display_name: "Gemini Ultra 1.5",
    report_name: "GEMINI ULTRA 1.5",
    provider: "GOOGLE DEEPMIND",
    provider_name: "Google DeepMind",
    prompt_label: "GEMINI (Google DeepMind)",
    style: &[
        "Technical, professional, structured",
        "Uses phrases like: \"multimodal analysis\", \"cross-domain synthesis\"",
        "Confident and capability-focused",
        "Mentions understanding visual/audio context when relevant",
    ],
};

static CLAUDE: Persona = Persona {
    id: PersonaId::Claude,
    display_name: "Claude 3.5 Opus",
    report_name: "CLAUDE 3.5 OPUS",
    provider: "ANTHROPIC",
    provider_name: "Anthropic",
    prompt_label: "CLAUDE (Anthropic)",
    style: &[
        "Thoughtful, careful, articulate, warm",
        "Uses phrases like: \"I appreciate...\", \"carefully considered\"",
        "Acknowledges nuance and limitations",
        "Slightly cautious and thorough",
    ],
};

static GPT: Persona = Persona {
    id: PersonaId::Gpt,
    display_name: "GPT-4o",
    report_name: "GPT-4o",
    provider: "OPENAI",
    provider_name: "OpenAI",
    prompt_label: "GPT-4 (OpenAI)",
    style: &[
        "Direct, confident, clear, professional",
        "Straightforward language without excessive hedging",
        "Efficient and well-organized",
        "Standard professional AI assistant tone",
    ],
};

static GROK: Persona = Persona {
    id: PersonaId::Grok,
    display_name: "Grok 2",
    report_name: "GROK 2",
    provider: "XAI",
    provider_name: "xAI",
    prompt_label: "GROK (xAI)",
    style: &[
        "Witty, irreverent, slightly sarcastic",
        "Uses casual language and humor",
        "Direct and unfiltered",
        "May include pop culture references",
        "Has personality and edge",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let ids: Vec<_> = Persona::all().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["gemini", "claude", "gpt", "grok"]);
    }

    #[test]
    fn test_descriptor_matches_id() {
        for id in PersonaId::ALL {
            assert_eq!(id.persona().id, id);
            assert!(!id.persona().style.is_empty());
        }
    }

    #[test]
    fn test_report_heading() {
        assert_eq!(
            PersonaId::Gemini.persona().report_heading(),
            "GEMINI ULTRA 1.5 (Google DeepMind)"
        );
        assert_eq!(PersonaId::Grok.persona().report_heading(), "GROK 2 (xAI)");
        assert_eq!(
            PersonaId::Gpt.persona().report_heading(),
            "GPT-4o (OpenAI)"
        );
    }
}
