//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (KeyValueStore, Confirmer, etc.)
//! but are themselves concrete structs, not traits.

mod standup;

pub use standup::{keys, Absence, StandupService, RESET_PROMPT};
