//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::output::cycle::CyclePrinter;
use colored::Colorize;
use consilium_application::{
    DirectorGateway, ExportReportError, ExportReportInput, ExportReportUseCase, ReportSink,
    SessionController,
};
use consilium_domain::OutputFormat;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

const HISTORY_CAPACITY: usize = 500;

/// Slash commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Export,
    Status,
    Help,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line; `None` when it is a query rather than a command
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('/') {
            return None;
        }
        let command = match line {
            "/export" | "/e" => ReplCommand::Export,
            "/status" | "/s" => ReplCommand::Status,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            other => ReplCommand::Unknown(other.to_string()),
        };
        Some(command)
    }
}

/// Interactive chat REPL
pub struct ChatRepl<G: DirectorGateway + 'static, S: ReportSink + 'static> {
    controller: Arc<SessionController<G>>,
    exporter: ExportReportUseCase<S>,
    format: OutputFormat,
    show_progress: bool,
    history_file: Option<PathBuf>,
}

impl<G: DirectorGateway + 'static, S: ReportSink + 'static> ChatRepl<G, S> {
    /// Create a new ChatRepl
    pub fn new(controller: Arc<SessionController<G>>, sink: Arc<S>) -> Self {
        Self {
            controller,
            exporter: ExportReportUseCase::new(sink),
            format: OutputFormat::Full,
            show_progress: true,
            history_file: Self::default_history_file(),
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Override the history file location
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.history_file = path;
        }
        self
    }

    fn default_history_file() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("consilium").join("history.txt"))
    }

    fn line_editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.history_file else {
            return editor;
        };

        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("Could not open history file {}: {}", path.display(), e);
                editor
            }
        }
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> std::io::Result<()> {
        let mut line_editor = self.line_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("consilium".to_string()),
            DefaultPromptSegment::Empty,
        );
        let printer = CyclePrinter::new(self.format, self.show_progress);

        self.print_welcome();

        loop {
            match line_editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if let Some(command) = ReplCommand::parse(line) {
                        if self.handle_command(command) {
                            break;
                        }
                        continue;
                    }

                    println!();
                    printer.run(&self.controller, line).await;
                    println!();
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
                #[allow(unreachable_patterns)]
                _ => continue,
            }
        }

        self.controller.shutdown();
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", ConsoleFormatter::header(self.controller.is_online()));
        println!("Ask a question; the council answers in four voices.");
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /export, /e       - Save a report (requires AGREEMENT)");
        println!("  /status, /s       - Show session state");
        println!("  /help, /h, /?     - Show this help");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                true
            }
            ReplCommand::Help => {
                println!();
                Self::print_help();
                false
            }
            ReplCommand::Status => {
                let snapshot = self.controller.snapshot();
                println!(
                    "{}",
                    ConsoleFormatter::status_line(&snapshot, self.controller.is_online())
                );
                false
            }
            ReplCommand::Export => {
                match self.export() {
                    Ok(path) => println!("{} {}", "Report saved:".green().bold(), path.display()),
                    Err(e) => println!("{}", e.to_string().yellow()),
                }
                false
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    fn export(&self) -> Result<PathBuf, ExportReportError> {
        let input = ExportReportInput::from_agreed_snapshot(&self.controller.snapshot())?;
        Ok(self.exporter.execute(input)?.path)
    }
}
