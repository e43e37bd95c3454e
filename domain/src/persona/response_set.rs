//! Persona response set

use super::PersonaId;
use serde::{Deserialize, Serialize};

/// One text fragment per persona.
///
/// Serializes as the flat object the backend is asked to produce:
/// `{"gemini": "...", "claude": "...", "gpt": "...", "grok": "..."}`.
/// All four keys are required when deserializing; extra keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaResponseSet {
    pub gemini: String,
    pub claude: String,
    pub gpt: String,
    pub grok: String,
}

impl PersonaResponseSet {
    pub fn new(
        gemini: impl Into<String>,
        claude: impl Into<String>,
        gpt: impl Into<String>,
        grok: impl Into<String>,
    ) -> Self {
        Self {
            gemini: gemini.into(),
            claude: claude.into(),
            gpt: gpt.into(),
            grok: grok.into(),
        }
    }

    /// The pre-fetch state: all four keys present, all values empty
    pub fn empty() -> Self {
        Self::default()
    }

    /// Text for a single persona
    pub fn get(&self, id: PersonaId) -> &str {
        match id {
            PersonaId::Gemini => &self.gemini,
            PersonaId::Claude => &self.claude,
            PersonaId::Gpt => &self.gpt,
            PersonaId::Grok => &self.grok,
        }
    }

    /// Iterate over `(persona, text)` in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (PersonaId, &str)> {
        PersonaId::ALL.into_iter().map(move |id| (id, self.get(id)))
    }

    /// True when every value is empty (nothing fetched yet)
    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, text)| text.is_empty())
    }

    /// True when every persona has a non-empty response
    pub fn is_complete(&self) -> bool {
        self.iter().all(|(_, text)| !text.is_empty())
    }
}
