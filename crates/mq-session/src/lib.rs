//! Per-session game state for Mythos Quest.
//!
//! A [`Session`] owns one game's map, doom counter, player resources and RNG,
//! and is the only thing that mutates them. Topology rules are shared between
//! sessions behind an `Arc`.

pub mod config;
pub mod discovery;
pub mod error;
pub mod session;

pub use config::SessionConfig;
pub use discovery::{Discovery, GatedDiscovery, standard_discoveries};
pub use error::{SessionError, SessionResult};
pub use session::{AttackOutcome, PenaltyEffect, SearchResult, Session, Vitals};
