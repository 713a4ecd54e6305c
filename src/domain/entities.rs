//! Domain entities: core data structures

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{mark_absent, parse_roster, AbsenteeList, DomainError, Roster};

/// Complete state of one standup session.
///
/// Transitions borrow `&self` and return the next state; nothing is
/// mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandupState {
    /// Present participants in speaking order
    pub roster: Roster,
    /// Participants marked absent (sorted)
    pub absentees: AbsenteeList,
    /// Raw text of the last submitted roster
    pub roster_text: String,
    /// Per-participant notes
    pub notes: BTreeMap<String, String>,
    /// Participants ticked off the checklist
    pub checked: BTreeSet<String>,
}

impl StandupState {
    /// Replace the roster with freshly parsed text.
    ///
    /// Starts a new session: absentees and ticks are cleared, notes are kept
    /// only for names that are still on the roster.
    pub fn submit(&self, raw_text: &str) -> Self {
        let roster = parse_roster(raw_text);
        let notes = self
            .notes
            .iter()
            .filter(|(name, _)| roster.contains(name))
            .map(|(name, note)| (name.clone(), note.clone()))
            .collect();

        Self {
            roster,
            absentees: AbsenteeList::default(),
            roster_text: raw_text.to_string(),
            notes,
            checked: BTreeSet::new(),
        }
    }

    /// Replace the roster order, leaving everything else as is.
    pub fn with_roster(&self, roster: Roster) -> Self {
        Self {
            roster,
            ..self.clone()
        }
    }

    /// Move `name` to the absentees; a tick on that name is dropped.
    ///
    /// A name already absent is listed once: only a remaining duplicate
    /// roster entry is removed.
    pub fn mark_absent(&self, name: &str) -> Self {
        let (roster, absentees) = if self.absentees.contains(name) {
            let (roster, _) = mark_absent(&self.roster, &self.absentees, name);
            (roster, self.absentees.clone())
        } else {
            mark_absent(&self.roster, &self.absentees, name)
        };
        let mut checked = self.checked.clone();
        checked.remove(name);

        Self {
            roster,
            absentees,
            checked,
            ..self.clone()
        }
    }

    /// Set or clear (empty `note`) the note for a known participant.
    pub fn with_note(&self, name: &str, note: &str) -> Result<Self, DomainError> {
        self.ensure_known(name)?;
        let mut notes = self.notes.clone();
        let note = note.trim();
        if note.is_empty() {
            notes.remove(name);
        } else {
            notes.insert(name.to_string(), note.to_string());
        }

        Ok(Self {
            notes,
            ..self.clone()
        })
    }

    /// Tick or untick a present participant.
    pub fn with_checked(&self, name: &str, checked: bool) -> Result<Self, DomainError> {
        self.ensure_known(name)?;
        if !self.roster.contains(name) {
            return Err(DomainError::ParticipantAbsent(name.to_string()));
        }
        let mut ticks = self.checked.clone();
        if checked {
            ticks.insert(name.to_string());
        } else {
            ticks.remove(name);
        }

        Ok(Self {
            checked: ticks,
            ..self.clone()
        })
    }

    pub fn is_checked(&self, name: &str) -> bool {
        self.checked.contains(name)
    }

    pub fn note(&self, name: &str) -> Option<&str> {
        self.notes.get(name).map(String::as_str)
    }

    fn ensure_known(&self, name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::EmptyName);
        }
        if self.roster.contains(name) || self.absentees.contains(name) {
            Ok(())
        } else {
            Err(DomainError::UnknownParticipant(name.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(text: &str) -> StandupState {
        StandupState::default().submit(text)
    }

    #[test]
    fn given_text_when_submitting_then_parses_and_keeps_raw_text() {
        let s = state("Bob\nAlice\n");
        assert_eq!(&*s.roster, ["Alice", "Bob"]);
        assert_eq!(s.roster_text, "Bob\nAlice\n");
    }

    #[test]
    fn given_absentees_when_resubmitting_then_absentees_cleared() {
        let s = state("Alice\nBob").mark_absent("Alice");
        assert_eq!(&*s.absentees, ["Alice"]);

        let s = s.submit("Alice\nBob\nCarol");

        assert!(s.absentees.is_empty());
        assert_eq!(&*s.roster, ["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn given_notes_when_resubmitting_then_notes_for_dropped_names_pruned() {
        let s = state("Alice\nBob")
            .with_note("Alice", "blocked on review")
            .unwrap()
            .with_note("Bob", "on call")
            .unwrap();

        let s = s.submit("Bob\nCarol");

        assert_eq!(s.note("Bob"), Some("on call"));
        assert_eq!(s.note("Alice"), None);
    }

    #[test]
    fn given_checked_name_when_marking_absent_then_tick_removed() {
        let s = state("Alice\nBob").with_checked("Bob", true).unwrap();
        assert!(s.is_checked("Bob"));

        let s = s.mark_absent("Bob");

        assert!(!s.is_checked("Bob"));
        assert!(!s.roster.contains("Bob"));
    }

    #[test]
    fn given_absent_name_when_marking_absent_again_then_listed_once() {
        let once = state("Ann\nBen\nCat").mark_absent("Ben");

        let twice = once.mark_absent("Ben");

        assert_eq!(twice, once);
        assert_eq!(&*twice.absentees, ["Ben"]);
    }

    #[test]
    fn given_duplicate_roster_entry_when_marking_absent_twice_then_both_leave_roster() {
        let s = state("x\nx\ny").mark_absent("x").mark_absent("x");

        assert_eq!(&*s.roster, ["y"]);
        assert_eq!(&*s.absentees, ["x"]);
    }

    #[test]
    fn given_absent_name_when_checking_then_rejected() {
        let s = state("Alice\nBob").mark_absent("Bob");
        assert_eq!(
            s.with_checked("Bob", true),
            Err(DomainError::ParticipantAbsent("Bob".into()))
        );
    }

    #[test]
    fn given_unknown_name_when_noting_then_rejected() {
        let s = state("Alice");
        assert_eq!(
            s.with_note("Zoe", "hi"),
            Err(DomainError::UnknownParticipant("Zoe".into()))
        );
        assert_eq!(s.with_note("  ", "hi"), Err(DomainError::EmptyName));
    }

    #[test]
    fn given_absent_name_when_noting_then_note_kept() {
        let s = state("Alice\nBob").mark_absent("Bob");
        let s = s.with_note("Bob", "out sick").unwrap();
        assert_eq!(s.note("Bob"), Some("out sick"));
    }

    #[test]
    fn given_empty_note_when_noting_then_note_removed() {
        let s = state("Alice").with_note("Alice", "x").unwrap();
        let s = s.with_note("Alice", "   ").unwrap();
        assert!(s.notes.is_empty());
    }

    #[test]
    fn given_submitted_roster_when_marking_absent_repeatedly_then_partition_holds() {
        let mut s = state("a\nb\nc\nd");
        for name in ["c", "a"] {
            s = s.mark_absent(name);
            for present in s.roster.iter() {
                assert!(!s.absentees.contains(present));
            }
        }
        assert_eq!(&*s.roster, ["b", "d"]);
        assert_eq!(&*s.absentees, ["a", "c"]);
    }
}
