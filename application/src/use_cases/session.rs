//! Session controller
//!
//! Owns the request lifecycle of one session:
//!
//! ```text
//! IDLE ──submit──▶ ANALYZING ──fetch resolves──▶ DONE ──reveal delay──▶ DONE + consensus
//!                      ▲                           │
//!                      └──────────submit───────────┘
//! ```
//!
//! State is published through a [`watch`] channel; observers either
//! [`subscribe`](SessionController::subscribe) or poll
//! [`snapshot`](SessionController::snapshot). Each transition replaces the
//! published [`SessionSnapshot`] as a whole.

use crate::config::BehaviorConfig;
use crate::ports::director_gateway::DirectorGateway;
use crate::use_cases::fetch_responses::{FetchResponsesUseCase, ResponseSource};
use consilium_domain::director::connection_failed_responses;
use consilium_domain::{
    ConsensusState, PersonaResponseSet, Query, SessionSnapshot, SessionState, evaluate,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Why a submission was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Query was empty or whitespace only
    EmptyQuery,
    /// A cycle is already `ANALYZING`
    Busy,
    /// The session has been shut down
    Closed,
}

/// Result of [`SessionController::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The submission was a no-op
    Rejected(RejectReason),
    /// The cycle reached `DONE`; consensus is revealed later
    Completed {
        snapshot: SessionSnapshot,
        source: ResponseSource,
    },
}

impl SubmitOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, SubmitOutcome::Rejected(_))
    }
}

/// Publishes the delayed consensus for a cycle.
#[derive(Clone)]
struct RevealScheduler {
    state: Arc<watch::Sender<SessionSnapshot>>,
    delay: Duration,
    /// Cancelled on teardown; parent of every reveal timer
    session_token: CancellationToken,
    /// Timer of the most recent cycle, if still pending
    pending: Arc<Mutex<Option<CancellationToken>>>,
}

impl RevealScheduler {
    fn schedule(&self, cycle: u64) {
        let token = self.session_token.child_token();
        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some(token.clone());
        }

        let state = Arc::clone(&self.state);
        let delay = self.delay;

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Consensus reveal for cycle {} cancelled", cycle);
                }
                _ = tokio::time::sleep(delay) => {
                    state.send_if_modified(|snapshot| {
                        if snapshot.cycle != cycle
                            || snapshot.state != SessionState::Done
                            || snapshot.consensus.is_some()
                        {
                            return false;
                        }
                        let consensus = evaluate(&snapshot.responses);
                        info!("Cycle {} consensus: {}", cycle, consensus);
                        snapshot.consensus = Some(consensus);
                        true
                    });
                }
            }
        });
    }

    fn cancel_pending(&self) {
        if let Ok(mut pending) = self.pending.lock()
            && let Some(token) = pending.take()
        {
            token.cancel();
        }
    }

    /// Publish `DONE` for `cycle` and start its reveal timer
    fn complete(&self, cycle: u64, responses: PersonaResponseSet) -> SessionSnapshot {
        let done = self.state.borrow().done(responses);
        self.state.send_replace(done.clone());
        self.schedule(cycle);
        done
    }
}

/// One controller per active session.
pub struct SessionController<G: DirectorGateway + 'static> {
    fetcher: Arc<FetchResponsesUseCase<G>>,
    state: Arc<watch::Sender<SessionSnapshot>>,
    reveals: RevealScheduler,
}

impl<G: DirectorGateway + 'static> SessionController<G> {
    pub fn new(fetcher: FetchResponsesUseCase<G>, behavior: BehaviorConfig) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::default());
        let state = Arc::new(state);
        Self {
            fetcher: Arc::new(fetcher),
            reveals: RevealScheduler {
                state: Arc::clone(&state),
                delay: behavior.consensus_reveal_delay,
                session_token: CancellationToken::new(),
                pending: Arc::new(Mutex::new(None)),
            },
            state,
        }
    }

    /// Whether the backend credential is configured
    pub fn is_online(&self) -> bool {
        self.fetcher.is_online()
    }

    /// Current snapshot (polling)
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Receive every published snapshot (subscription)
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Submit a query.
    ///
    /// Empty input, a cycle already in `ANALYZING`, or a closed session make
    /// this a no-op. Otherwise the previous result is cleared, the fetch runs
    /// to completion, `DONE` is published and the consensus reveal is
    /// scheduled.
    ///
    /// The cycle runs on its own task: dropping the returned future does not
    /// stop it from reaching `DONE`.
    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        if self.reveals.session_token.is_cancelled() {
            return SubmitOutcome::Rejected(RejectReason::Closed);
        }

        let Ok(query) = Query::parse(input) else {
            debug!("Ignoring empty query");
            return SubmitOutcome::Rejected(RejectReason::EmptyQuery);
        };

        let mut cycle = 0;
        let started = self.state.send_if_modified(|snapshot| {
            if !snapshot.state.accepts_submission() {
                return false;
            }
            cycle = snapshot.cycle + 1;
            *snapshot = SessionSnapshot::analyzing(cycle, query.clone());
            true
        });

        if !started {
            debug!("Ignoring submission while a cycle is in flight");
            return SubmitOutcome::Rejected(RejectReason::Busy);
        }

        self.reveals.cancel_pending();
        info!("Cycle {} analyzing: {}", cycle, query);

        let fetcher = Arc::clone(&self.fetcher);
        let reveals = self.reveals.clone();
        let task = tokio::spawn(async move {
            let result = fetcher.fetch(&query).await;
            let done = reveals.complete(cycle, result.responses);
            info!("Cycle {} done ({:?})", cycle, result.source);
            (done, result.source)
        });

        let (snapshot, source) = match task.await {
            Ok(completed) => completed,
            Err(e) => {
                warn!("Cycle {} fetch task failed: {}", cycle, e);
                let done = self
                    .reveals
                    .complete(cycle, connection_failed_responses());
                (done, ResponseSource::ConnectionFailed)
            }
        };

        SubmitOutcome::Completed { snapshot, source }
    }

    /// Wait until the current cycle's consensus is revealed.
    ///
    /// Returns `None` when nothing was submitted yet, when a newer cycle
    /// replaces the current one first, or when the session shuts down.
    pub async fn wait_for_consensus(&self) -> Option<ConsensusState> {
        let mut receiver = self.state.subscribe();
        let cycle = {
            let current = receiver.borrow_and_update();
            if current.state == SessionState::Idle {
                return None;
            }
            if current.consensus.is_some() {
                return current.consensus;
            }
            current.cycle
        };

        tokio::select! {
            result = receiver.wait_for(|s| s.cycle != cycle || s.consensus.is_some()) => {
                result.ok().and_then(|s| if s.cycle == cycle { s.consensus } else { None })
            }
            _ = self.reveals.session_token.cancelled() => None,
        }
    }

    /// Tear the session down; pending reveals are dropped.
    pub fn shutdown(&self) {
        self.reveals.session_token.cancel();
    }
}

impl<G: DirectorGateway + 'static> Drop for SessionController<G> {
    fn drop(&mut self) {
        self.reveals.session_token.cancel();
    }
}
