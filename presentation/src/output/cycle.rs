//! Drives one submission and prints it as it unfolds

use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ProgressReporter;
use colored::Colorize;
use consilium_application::{DirectorGateway, RejectReason, SessionController, SubmitOutcome};
use consilium_domain::{OutputFormat, SessionSnapshot};
use tracing::debug;

/// Prints a cycle: cards at `DONE`, the badge once consensus is revealed.
#[derive(Debug, Clone, Copy)]
pub struct CyclePrinter {
    format: OutputFormat,
    show_progress: bool,
}

impl CyclePrinter {
    pub fn new(format: OutputFormat, show_progress: bool) -> Self {
        Self {
            format,
            show_progress,
        }
    }

    /// Submit `input` and print the result.
    ///
    /// Returns the final snapshot, or `None` when the submission was rejected.
    pub async fn run<G: DirectorGateway + 'static>(
        &self,
        controller: &SessionController<G>,
        input: &str,
    ) -> Option<SessionSnapshot> {
        let next_cycle = controller.snapshot().cycle + 1;
        let progress = self.progress(controller, next_cycle);
        let outcome = controller.submit(input).await;
        if let Some(progress) = progress {
            progress.finish();
        }

        let snapshot = match outcome {
            SubmitOutcome::Rejected(reason) => {
                eprintln!("{}", Self::rejection_message(reason).yellow());
                return None;
            }
            SubmitOutcome::Completed { snapshot, source } => {
                debug!("Responses came from {:?}", source);
                snapshot
            }
        };

        if self.format == OutputFormat::Full {
            print!("{}", ConsoleFormatter::format_cards(&snapshot));
        }

        let progress = self.progress(controller, snapshot.cycle);
        let consensus = controller.wait_for_consensus().await;
        if let Some(progress) = progress {
            progress.finish();
        }

        let mut revealed = controller.snapshot();
        if revealed.cycle != snapshot.cycle {
            // Superseded; report what this cycle produced
            revealed = snapshot;
            revealed.consensus = consensus;
        }

        match self.format {
            OutputFormat::Full => {
                println!();
                print!("{}", ConsoleFormatter::consensus_line(revealed.consensus));
            }
            OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&revealed)),
        }

        Some(revealed)
    }

    fn progress<G: DirectorGateway + 'static>(
        &self,
        controller: &SessionController<G>,
        cycle: u64,
    ) -> Option<ProgressReporter> {
        self.show_progress
            .then(|| ProgressReporter::spawn(controller.subscribe(), cycle))
    }

    pub fn rejection_message(reason: RejectReason) -> &'static str {
        match reason {
            RejectReason::EmptyQuery => "Nothing to ask: the query is empty.",
            RejectReason::Busy => "The council is still deliberating; try again shortly.",
            RejectReason::Closed => "The session has ended.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use consilium_application::{
        BehaviorConfig, FetchResponsesUseCase, GatewayError, StaticCredential,
    };
    use consilium_domain::{ConsensusState, Credential, DirectorPrompt, SessionState};
    use std::sync::Arc;

    struct EchoGateway;

    #[async_trait]
    impl DirectorGateway for EchoGateway {
        async fn generate(
            &self,
            _prompt: &DirectorPrompt,
            _credential: &Credential,
        ) -> Result<String, GatewayError> {
            Ok(r#"{"gemini":"A","claude":"B","gpt":"C","grok":"D"}"#.to_string())
        }
    }

    fn controller(credential: Option<Credential>) -> SessionController<EchoGateway> {
        let behavior = BehaviorConfig::default();
        let fetcher = FetchResponsesUseCase::new(
            Arc::new(EchoGateway),
            &StaticCredential::new(credential),
        )
        .with_behavior(behavior);
        SessionController::new(fetcher, behavior)
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_returns_revealed_snapshot() {
        let controller = controller(Credential::new("key"));
        let printer = CyclePrinter::new(OutputFormat::Json, false);

        let snapshot = printer.run(&controller, "Q").await.unwrap();

        assert_eq!(snapshot.state, SessionState::Done);
        assert_eq!(snapshot.consensus, Some(ConsensusState::Agreement));
        assert_eq!(snapshot.responses.get(consilium_domain::PersonaId::Grok), "D");
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_offline_locks() {
        let controller = controller(None);
        let printer = CyclePrinter::new(OutputFormat::Full, false);

        let snapshot = printer.run(&controller, "test").await.unwrap();
        assert_eq!(snapshot.consensus, Some(ConsensusState::SystemLock));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_rejects_empty_query() {
        let controller = controller(Credential::new("key"));
        let printer = CyclePrinter::new(OutputFormat::Full, false);

        assert!(printer.run(&controller, "   ").await.is_none());
        assert_eq!(controller.snapshot().state, SessionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_consecutive_runs_with_progress() {
        let controller = controller(Credential::new("key"));
        let printer = CyclePrinter::new(OutputFormat::Json, true);

        let first = printer.run(&controller, "one").await.unwrap();
        let second = printer.run(&controller, "two").await.unwrap();

        assert_eq!(first.cycle, 1);
        assert_eq!(second.cycle, 2);
        assert_eq!(second.consensus, Some(ConsensusState::Agreement));
    }

    #[test]
    fn test_rejection_messages_are_distinct() {
        let messages = [
            CyclePrinter::rejection_message(RejectReason::EmptyQuery),
            CyclePrinter::rejection_message(RejectReason::Busy),
            CyclePrinter::rejection_message(RejectReason::Closed),
        ];
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[1], messages[2]);
    }
}
