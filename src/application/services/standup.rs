//! Standup session service
//!
//! Loads the session from the key-value store, applies one domain
//! transition and writes back the keys whose values changed.

use std::sync::Arc;

use itertools::Itertools;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{shuffle, DomainError, RandomSource, StandupState};
use crate::infrastructure::traits::{Confirmer, KeyValueStore};

/// Store keys.
pub mod keys {
    /// Present roster, JSON array
    pub const ROSTER: &str = "roster";
    /// Raw text of the last submission, stored verbatim
    pub const ROSTER_TEXT: &str = "roster_text";
    /// Absentees, JSON array
    pub const ABSENTEES: &str = "absentees";
    /// Notes, JSON object
    pub const NOTES: &str = "notes";
    /// Ticked names, JSON array
    pub const CHECKED: &str = "checked";

    pub const ALL: [&str; 5] = [ROSTER, ROSTER_TEXT, ABSENTEES, NOTES, CHECKED];
}

/// Question asked before a full reset.
pub const RESET_PROMPT: &str = "This will clear out your roster and delete your locally saved data. \
You will have to re-enter all the participant names. Are you sure?";

/// Service running standup transitions against a persistent store.
pub struct StandupService {
    store: Arc<dyn KeyValueStore>,
}

impl StandupService {
    /// Create a new standup service.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read the whole session. Missing keys fall back to empty values.
    #[instrument(skip(self))]
    pub fn load(&self) -> ApplicationResult<StandupState> {
        let state = StandupState {
            roster: self.read_json(keys::ROSTER)?.unwrap_or_default(),
            absentees: self.read_json(keys::ABSENTEES)?.unwrap_or_default(),
            roster_text: self.read(keys::ROSTER_TEXT)?.unwrap_or_default(),
            notes: self.read_json(keys::NOTES)?.unwrap_or_default(),
            checked: self.read_json(keys::CHECKED)?.unwrap_or_default(),
        };
        debug!(
            "loaded: {} present, {} absent",
            state.roster.len(),
            state.absentees.len()
        );
        Ok(state)
    }

    /// Replace the roster with parsed `raw_text`. Absentees start empty.
    #[instrument(skip(self, raw_text))]
    pub fn submit(&self, raw_text: &str) -> ApplicationResult<StandupState> {
        let current = self.load()?;
        let next = current.submit(raw_text);
        self.persist(&current, &next)?;
        info!("roster submitted: {} participants", next.roster.len());
        Ok(next)
    }

    /// Randomize the speaking order of the present participants.
    #[instrument(skip(self, rng))]
    pub fn shuffle(&self, rng: &mut dyn RandomSource) -> ApplicationResult<StandupState> {
        let current = self.load()?;
        let next = current.with_roster(shuffle(&current.roster, rng));
        self.persist(&current, &next)?;
        debug!("shuffled: {:?}", &*next.roster);
        Ok(next)
    }

    /// Move `name` from the roster to the absentees.
    ///
    /// A name that is not on the roster is still recorded, with a warning.
    /// A name that is already absent leaves the state as it is.
    #[instrument(skip(self))]
    pub fn mark_absent(&self, name: &str) -> ApplicationResult<(StandupState, Absence)> {
        let name = normalize(name)?;
        let current = self.load()?;
        let absence = if current.roster.contains(name) {
            Absence::Moved
        } else if current.absentees.contains(name) {
            Absence::AlreadyAbsent
        } else {
            Absence::Unlisted
        };

        match absence {
            Absence::AlreadyAbsent => {
                warn!("{name} is already marked absent");
                return Ok((current, absence));
            }
            Absence::Unlisted => {
                warn!("{name} is not on the roster; recording as absent anyway")
            }
            Absence::Moved => {}
        }

        let next = current.mark_absent(name);
        self.persist(&current, &next)?;
        info!("marked absent: {name}");
        Ok((next, absence))
    }

    /// Set the note for `name`; an empty note removes it.
    #[instrument(skip(self, note))]
    pub fn set_note(&self, name: &str, note: &str) -> ApplicationResult<StandupState> {
        let name = normalize(name)?;
        let current = self.load()?;
        let next = current.with_note(name, note)?;
        self.persist(&current, &next)?;
        Ok(next)
    }

    /// Tick (or untick) `name` on the checklist.
    #[instrument(skip(self))]
    pub fn set_checked(&self, name: &str, checked: bool) -> ApplicationResult<StandupState> {
        let name = normalize(name)?;
        let current = self.load()?;
        let next = current.with_checked(name, checked)?;
        self.persist(&current, &next)?;
        Ok(next)
    }

    /// Delete all saved data once `confirmer` agrees.
    ///
    /// Returns `false` and leaves the store untouched when declined.
    #[instrument(skip(self, confirmer))]
    pub fn reset(&self, confirmer: &dyn Confirmer) -> ApplicationResult<bool> {
        let confirmed = confirmer
            .confirm(RESET_PROMPT)
            .map_err(|e| ApplicationError::OperationFailed {
                context: "read confirmation".to_string(),
                source: Box::new(e),
            })?;
        if !confirmed {
            info!("reset declined");
            return Ok(false);
        }

        for key in keys::ALL {
            self.store.remove(key).with_key_context("remove", key)?;
        }
        info!("reset: all saved data removed");
        Ok(true)
    }

    // Write only what changed between two states, as one store update.
    fn persist(&self, before: &StandupState, after: &StandupState) -> ApplicationResult<()> {
        let mut changes: Vec<(&str, String)> = Vec::new();
        if before.roster != after.roster {
            changes.push((keys::ROSTER, to_json(keys::ROSTER, &after.roster)?));
        }
        if before.roster_text != after.roster_text {
            changes.push((keys::ROSTER_TEXT, after.roster_text.clone()));
        }
        if before.absentees != after.absentees {
            changes.push((keys::ABSENTEES, to_json(keys::ABSENTEES, &after.absentees)?));
        }
        if before.notes != after.notes {
            changes.push((keys::NOTES, to_json(keys::NOTES, &after.notes)?));
        }
        if before.checked != after.checked {
            changes.push((keys::CHECKED, to_json(keys::CHECKED, &after.checked)?));
        }
        if changes.is_empty() {
            return Ok(());
        }

        let batch: Vec<(&str, &str)> = changes
            .iter()
            .map(|(key, value)| (*key, value.as_str()))
            .collect();
        let written = changes.iter().map(|(key, _)| key).join("`, `");
        debug!("persisting `{written}`");
        self.store.set_many(&batch).with_key_context("write", &written)
    }

    fn read(&self, key: &str) -> ApplicationResult<Option<String>> {
        self.store.get(key).with_key_context("read", key)
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> ApplicationResult<Option<T>> {
        match self.read(key)? {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| ApplicationError::CorruptEntry {
                    key: key.to_string(),
                    source,
                }),
        }
    }
}

/// How a `mark_absent` call changed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absence {
    /// Was present, now absent
    Moved,
    /// Not on the roster; recorded as absent anyway
    Unlisted,
    /// Already absent; nothing changed
    AlreadyAbsent,
}

// Names are matched the way the roster stores them: trimmed.
fn normalize(name: &str) -> ApplicationResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::EmptyName.into());
    }
    Ok(name)
}

fn to_json<T: Serialize>(key: &str, value: &T) -> ApplicationResult<String> {
    serde_json::to_string(value).map_err(|e| ApplicationError::OperationFailed {
        context: format!("serialize `{key}`"),
        source: Box::new(e),
    })
}
