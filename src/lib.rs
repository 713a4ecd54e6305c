//! Standup helper: a participant roster with shuffled speaking order,
//! absentee tracking and per-person notes, persisted in a key-value store.
//!
//! Layers, top to bottom: [`cli`], [`application`], [`domain`], with
//! [`infrastructure`] implementing the I/O boundary traits.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::services::StandupService;
pub use domain::{mark_absent, parse_roster, reset, shuffle, AbsenteeList, Roster, StandupState};
