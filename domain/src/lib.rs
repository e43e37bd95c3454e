//! Domain layer for consilium
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Director Mode
//!
//! A single backend call is asked to answer one query in four persona
//! voices (Gemini, Claude, GPT, Grok). The reply is decoded into a
//! [`PersonaResponseSet`] through a tolerant, tiered decoder.
//!
//! ## Consensus
//!
//! A completed response set is classified as `AGREEMENT` or `SYSTEM LOCK`.
//!
//! ```text
//! Query ─▶ DirectorPrompt ─▶ (backend) ─▶ decode ─▶ PersonaResponseSet ─▶ evaluate
//!                                                                          │
//!                                                     ConsensusState ◀─────┘
//! ```

pub mod config;
pub mod consensus;
pub mod core;
pub mod director;
pub mod persona;
pub mod report;
pub mod session;

// Re-export commonly used types
pub use config::OutputFormat;
pub use consensus::{ConsensusState, evaluate};
pub use self::core::{credential::Credential, error::DomainError, query::Query};
pub use director::{DecodeOutcome, DecodeTier, DirectorPrompt, LOCKED_MARKER, decode};
pub use persona::{Persona, PersonaId, PersonaResponseSet};
pub use report::{REPORT_MIME_TYPE, Report, ReportArtifact};
pub use session::{SessionSnapshot, SessionState};
