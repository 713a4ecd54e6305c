//! Domain layer: roster state machine and shuffle
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod roster;
pub mod shuffle;

pub use entities::StandupState;
pub use error::DomainError;
pub use roster::{mark_absent, parse_roster, reset, AbsenteeList, Roster};
pub use shuffle::{shuffle, RandomSource, RngSource, SequenceSource};
