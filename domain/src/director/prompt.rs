//! Director prompt construction

use crate::core::query::Query;
use crate::persona::Persona;
use std::fmt::Write;

/// Minimum words requested per persona
pub const MIN_WORDS: usize = 40;
/// Maximum words requested per persona
pub const MAX_WORDS: usize = 60;

/// The single instruction string sent to the backend, asking it to answer
/// the query in all four persona voices at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorPrompt {
    text: String,
}

impl DirectorPrompt {
    /// Build the prompt for a query. Deterministic: the same query always
    /// produces the same text.
    pub fn build(query: &Query) -> Self {
        let mut text = String::from(
            "You are an AI orchestrator simulating 4 VERY DIFFERENT AI models responding to the same query.\n\n",
        );

        let _ = writeln!(text, "USER QUERY: \"{}\"\n", query.as_str());
        let _ = writeln!(
            text,
            "Generate 4 DISTINCTLY DIFFERENT responses (each {}-{} words) matching these personalities:\n",
            MIN_WORDS, MAX_WORDS
        );

        for (index, persona) in Persona::all().enumerate() {
            let _ = writeln!(text, "{}. {}:", index + 1, persona.prompt_label);
            for trait_line in persona.style {
                let _ = writeln!(text, "- {}", trait_line);
            }
            text.push('\n');
        }

        text.push_str("CRITICAL: Each response MUST sound completely different in voice and style.\n\n");
        text.push_str("Output as JSON: ");
        text.push_str(&output_shape());

        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

}

impl std::fmt::Display for DirectorPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// `{"gemini": "...", "claude": "...", "gpt": "...", "grok": "..."}`
fn output_shape() -> String {
    let fields: Vec<String> = Persona::all()
        .map(|p| format!("\"{}\": \"...\"", p.id.as_str()))
        .collect();
    format!("{{{}}}", fields.join(", "))
}
