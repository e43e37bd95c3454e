//! Progress reporting while a cycle is in flight

use consilium_domain::{SessionSnapshot, SessionState};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Spinner that follows the session snapshot channel.
///
/// It follows one cycle: snapshots from earlier cycles are treated as
/// "submitting". It stops on its own once that cycle's consensus is revealed
/// or the session channel closes; [`finish`](Self::finish) clears it early.
pub struct ProgressReporter {
    bar: ProgressBar,
    task: JoinHandle<()>,
}

impl ProgressReporter {
    /// Start a spinner for `cycle`, driven by `receiver`
    pub fn spawn(mut receiver: watch::Receiver<SessionSnapshot>, cycle: u64) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.enable_steady_tick(Duration::from_millis(100));

        let follower = bar.clone();
        let task = tokio::spawn(async move {
            loop {
                let message = Self::message_for_cycle(&receiver.borrow_and_update(), cycle);
                match message {
                    Some(message) => follower.set_message(message),
                    None => {
                        follower.finish_and_clear();
                        break;
                    }
                }
                if receiver.changed().await.is_err() {
                    follower.finish_and_clear();
                    break;
                }
            }
        });

        Self { bar, task }
    }

    /// Stop and clear the spinner
    pub fn finish(self) {
        self.task.abort();
        self.bar.finish_and_clear();
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Like [`message_for`](Self::message_for), but an older cycle still counts
    /// as waiting
    pub fn message_for_cycle(snapshot: &SessionSnapshot, cycle: u64) -> Option<String> {
        if snapshot.cycle < cycle {
            return Some("Submitting...".to_string());
        }
        Self::message_for(snapshot)
    }

    /// Spinner message for a snapshot; `None` once there is nothing to wait for
    pub fn message_for(snapshot: &SessionSnapshot) -> Option<String> {
        match (snapshot.state, snapshot.consensus) {
            (SessionState::Idle, _) => Some("Waiting for a query...".to_string()),
            (SessionState::Analyzing, _) => {
                Some("ANALYZING: the council is deliberating...".to_string())
            }
            (SessionState::Done, None) => Some("Reaching consensus...".to_string()),
            (SessionState::Done, Some(_)) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consilium_domain::{ConsensusState, PersonaResponseSet, Query};

    #[test]
    fn test_message_follows_state() {
        let idle = SessionSnapshot::default();
        assert!(ProgressReporter::message_for(&idle).is_some());

        let analyzing = SessionSnapshot::analyzing(1, Query::parse("q").unwrap());
        assert!(
            ProgressReporter::message_for(&analyzing)
                .unwrap()
                .contains("ANALYZING")
        );

        let mut done = analyzing.done(PersonaResponseSet::new("A", "B", "C", "D"));
        assert!(
            ProgressReporter::message_for(&done)
                .unwrap()
                .contains("consensus")
        );

        done.consensus = Some(ConsensusState::Agreement);
        assert!(ProgressReporter::message_for(&done).is_none());
    }

    #[tokio::test]
    async fn test_spinner_stops_when_channel_closes() {
        let (sender, receiver) = watch::channel(SessionSnapshot::default());
        let reporter = ProgressReporter::spawn(receiver, 1);
        drop(sender);

        let ProgressReporter { bar, task } = reporter;
        task.await.unwrap();
        assert!(bar.is_finished());
    }

    #[test]
    fn test_previous_cycle_counts_as_waiting() {
        let mut previous = SessionSnapshot::analyzing(1, Query::parse("q").unwrap())
            .done(PersonaResponseSet::new("A", "B", "C", "D"));
        previous.consensus = Some(ConsensusState::Agreement);

        assert!(ProgressReporter::message_for_cycle(&previous, 1).is_none());
        assert_eq!(
            ProgressReporter::message_for_cycle(&previous, 2).as_deref(),
            Some("Submitting...")
        );
    }

    #[tokio::test]
    async fn test_spinner_survives_previous_cycle_result() {
        let mut previous = SessionSnapshot::analyzing(1, Query::parse("one").unwrap())
            .done(PersonaResponseSet::new("A", "B", "C", "D"));
        previous.consensus = Some(ConsensusState::Agreement);
        let (sender, receiver) = watch::channel(previous);

        let ProgressReporter { bar, task } = ProgressReporter::spawn(receiver, 2);
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        assert!(!task.is_finished());

        let analyzing = SessionSnapshot::analyzing(2, Query::parse("two").unwrap());
        sender.send_replace(analyzing.clone());
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
        assert!(!task.is_finished());

        let mut revealed = analyzing.done(PersonaResponseSet::new("E", "F", "G", "H"));
        revealed.consensus = Some(ConsensusState::Agreement);
        sender.send_replace(revealed);

        task.await.unwrap();
        assert!(bar.is_finished());
    }
}
