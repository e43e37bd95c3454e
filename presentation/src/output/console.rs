//! Console output formatter for council sessions

use colored::Colorize;
use consilium_domain::{ConsensusState, Persona, SessionSnapshot, SessionState};

const WIDTH: usize = 60;

/// Formats session snapshots for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Banner with the online/offline indicator
    pub fn header(online: bool) -> String {
        let line = "=".repeat(WIDTH);
        let status = if online {
            "ONLINE".green().bold()
        } else {
            "OFFLINE".red().bold()
        };
        format!(
            "{}\n{:^width$}\n{:^width$}\n{}\n",
            line.cyan(),
            "CONSILIUM".bold(),
            format!("backend: {}", status),
            line.cyan(),
            width = WIDTH
        )
    }

    /// The query and the four persona cards, in canonical order
    pub fn format_cards(snapshot: &SessionSnapshot) -> String {
        let mut output = String::new();

        if let Some(query) = &snapshot.query {
            output.push_str(&format!("{} {}\n", "Query:".cyan().bold(), query));
        }

        for persona in Persona::all() {
            output.push_str(&Self::persona_card(
                persona,
                snapshot.responses.get(persona.id),
            ));
        }

        output
    }

    /// Format as JSON
    pub fn format_json(snapshot: &SessionSnapshot) -> String {
        serde_json::to_string_pretty(snapshot).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn persona_card(persona: &Persona, response: &str) -> String {
        let title = format!("── {} | {} ──", persona.display_name, persona.provider);
        let body = if response.is_empty() {
            "(no response)".dimmed().to_string()
        } else {
            Self::indent(response, "  ")
        };
        format!("\n{}\n{}\n", title.yellow().bold(), body)
    }

    /// The user-facing badge; `None` while the reveal is pending
    pub fn consensus_line(consensus: Option<ConsensusState>) -> String {
        match consensus {
            Some(state @ ConsensusState::Agreement) => format!(
                "{} {}\n",
                "Consensus:".cyan().bold(),
                state.badge().green().bold()
            ),
            Some(state @ ConsensusState::SystemLock) => format!(
                "{} {}\n",
                "Consensus:".cyan().bold(),
                state.badge().red().bold()
            ),
            None => format!("{} {}\n", "Consensus:".cyan().bold(), "pending".dimmed()),
        }
    }

    /// One-line summary used by `/status`
    pub fn status_line(snapshot: &SessionSnapshot, online: bool) -> String {
        let consensus = match (snapshot.state, snapshot.consensus) {
            (SessionState::Done, Some(state)) => state.badge(),
            (SessionState::Done, None) => "pending",
            _ => "-",
        };
        format!(
            "state: {} | cycle: {} | consensus: {} | backend: {}",
            snapshot.state,
            snapshot.cycle,
            consensus,
            if online { "ONLINE" } else { "OFFLINE" }
        )
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consilium_domain::{PersonaResponseSet, Query};

    fn done_snapshot(consensus: Option<ConsensusState>) -> SessionSnapshot {
        let mut snapshot = SessionSnapshot::analyzing(1, Query::parse("Q").unwrap())
            .done(PersonaResponseSet::new("A", "B", "C", "D"));
        snapshot.consensus = consensus;
        snapshot
    }

    #[test]
    fn test_header_shows_connectivity() {
        assert!(ConsoleFormatter::header(true).contains("ONLINE"));
        assert!(ConsoleFormatter::header(false).contains("OFFLINE"));
    }

    #[test]
    fn test_cards_in_canonical_order() {
        let text = ConsoleFormatter::format_cards(&done_snapshot(Some(ConsensusState::Agreement)));
        let gemini = text.find("Gemini Ultra 1.5").unwrap();
        let claude = text.find("Claude 3.5 Opus").unwrap();
        let gpt = text.find("GPT-4o").unwrap();
        let grok = text.find("Grok 2").unwrap();
        assert!(gemini < claude && claude < gpt && gpt < grok);
        assert!(text.contains("GOOGLE DEEPMIND"));
        assert!(text.contains("Query:"));
    }

    #[test]
    fn test_system_lock_badge_reads_auth_required() {
        let text = ConsoleFormatter::consensus_line(Some(ConsensusState::SystemLock));
        assert!(text.contains("AUTH REQUIRED"));
        assert!(
            ConsoleFormatter::consensus_line(Some(ConsensusState::Agreement))
                .contains("AGREEMENT")
        );
    }

    #[test]
    fn test_pending_consensus() {
        assert!(ConsoleFormatter::consensus_line(None).contains("pending"));
    }

    #[test]
    fn test_format_json_uses_wire_names() {
        let json = ConsoleFormatter::format_json(&done_snapshot(Some(ConsensusState::SystemLock)));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["state"], "DONE");
        assert_eq!(value["consensus"], "SYSTEM_LOCK");
        assert_eq!(value["responses"]["grok"], "D");
        assert_eq!(value["query"], "Q");
    }

    #[test]
    fn test_status_line() {
        let idle = SessionSnapshot::default();
        assert_eq!(
            ConsoleFormatter::status_line(&idle, false),
            "state: IDLE | cycle: 0 | consensus: - | backend: OFFLINE"
        );
        let done = done_snapshot(None);
        assert!(ConsoleFormatter::status_line(&done, true).contains("consensus: pending"));
    }

    #[test]
    fn test_indent_multiline() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
