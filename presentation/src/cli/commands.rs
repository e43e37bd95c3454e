//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Persona cards followed by the consensus badge
    Full,
    /// The session snapshot as JSON
    Json,
}

impl From<OutputFormat> for consilium_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => consilium_domain::OutputFormat::Full,
            OutputFormat::Json => consilium_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for consilium
#[derive(Parser, Debug)]
#[command(name = "consilium")]
#[command(author, version, about = "One question, four AI voices, one verdict")]
#[command(long_about = r#"
Consilium asks a single backend model to answer your question in the voices
of four AI personas (Gemini, Claude, GPT, Grok), then reveals whether the
council reached AGREEMENT or is locked pending authentication.

The backend credential is read from VITE_GEMINI_API_KEY or
REACT_APP_GEMINI_API_KEY. Without it the council runs OFFLINE.

Configuration files are loaded from (in priority order):
1. CONSILIUM_* environment variables (CONSILIUM_BACKEND__MODEL=...)
2. --config <path>     Explicit config file
3. ./consilium.toml    Project-level config
4. ~/.config/consilium/config.toml   Global config

Example:
  consilium "Should we rewrite the billing service in Rust?"
  consilium -o json "Tabs or spaces?"
  consilium --export "Is P = NP?"
  consilium --chat
"#)]
pub struct Cli {
    /// The question to put to the council (not required in chat mode)
    pub query: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Write a report file once the council reaches AGREEMENT
    #[arg(short, long)]
    pub export: bool,

    /// Directory for exported reports
    #[arg(long, value_name = "DIR")]
    pub report_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to a file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_single_shot() {
        let cli = Cli::try_parse_from(["consilium", "-vv", "-o", "json", "--export", "Why?"])
            .unwrap();
        assert_eq!(cli.query.as_deref(), Some("Why?"));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(cli.export);
        assert!(!cli.chat);
    }

    #[test]
    fn test_parse_chat_without_query() {
        let cli = Cli::try_parse_from(["consilium", "--chat", "--quiet"]).unwrap();
        assert!(cli.chat);
        assert!(cli.quiet);
        assert!(cli.query.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["consilium", "-o", "synthesis", "q"]).is_err());
    }

    #[test]
    fn test_format_maps_to_domain() {
        assert_eq!(
            consilium_domain::OutputFormat::from(OutputFormat::Json),
            consilium_domain::OutputFormat::Json
        );
    }
}
