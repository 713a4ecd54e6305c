//! Roster state machine: parsing, absentee moves and reset.
//!
//! Every function here is pure: state comes in by reference and the new
//! state is returned by value. Persistence is the service layer's concern.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Ordered list of present participants (display / speaking order).
///
/// Duplicates are not removed; callers supply pre-split input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(Vec<String>);

impl Roster {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for Roster {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for Roster {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Participants marked absent, always sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct AbsenteeList(Vec<String>);

impl AbsenteeList {
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for AbsenteeList {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<String>> for AbsenteeList {
    fn from(mut names: Vec<String>) -> Self {
        names.sort();
        Self(names)
    }
}

impl From<AbsenteeList> for Vec<String> {
    fn from(list: AbsenteeList) -> Self {
        list.0
    }
}

impl<S: Into<String>> FromIterator<S> for AbsenteeList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from(iter.into_iter().map(Into::into).collect::<Vec<String>>())
    }
}

/// Parse newline-delimited participant text into a sorted roster.
///
/// Splits on `\n`, trims every line and drops the blank ones.
/// Never fails: empty or whitespace-only input gives an empty roster.
///
/// Trimming is per line, not just around the whole block, so a
/// whitespace-only line is dropped rather than kept as a name
/// (`"a\n  \nb"` gives `["a", "b"]`, not `["  ", "a", "b"]`).
///
/// ```
/// use standup::domain::parse_roster;
///
/// let roster = parse_roster("Bob\n\nAlice\n Carol ");
/// assert_eq!(&*roster, ["Alice", "Bob", "Carol"]);
/// ```
pub fn parse_roster(raw_text: &str) -> Roster {
    let mut names: Vec<String> = raw_text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    names.sort();
    Roster(names)
}

/// Move `name` from the roster to the absentee list.
///
/// Removes the first occurrence from `roster`, appends to `absentees` and
/// re-sorts. A name missing from the roster leaves the roster as is but is
/// still recorded as absent.
pub fn mark_absent(
    roster: &Roster,
    absentees: &AbsenteeList,
    name: &str,
) -> (Roster, AbsenteeList) {
    let mut present = roster.0.clone();
    if let Some(pos) = present.iter().position(|n| n == name) {
        present.remove(pos);
    }

    let mut absent = absentees.0.clone();
    absent.push(name.to_string());

    (Roster(present), AbsenteeList::from(absent))
}

/// Empty roster and absentee list.
pub fn reset() -> (Roster, AbsenteeList) {
    (Roster::default(), AbsenteeList::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Bob\n\nAlice\n Carol ", &["Alice", "Bob", "Carol"])]
    #[case("", &[])]
    #[case("   \n\t\n  ", &[])]
    #[case("solo", &["solo"])]
    #[case("b\r\na\r\n", &["a", "b"])]
    #[case("x\ny\nx", &["x", "x", "y"])]
    #[case("a\n  \nb", &["a", "b"])]
    fn given_raw_text_when_parsing_then_returns_sorted_names(
        #[case] input: &str,
        #[case] expected: &[&str],
    ) {
        let roster = parse_roster(input);
        assert_eq!(&*roster, expected);
    }

    #[test]
    fn given_padded_names_when_parsing_then_names_are_trimmed() {
        let roster = parse_roster("  Zed\n  \n\tAmy  ");
        assert_eq!(&*roster, ["Amy", "Zed"]);
    }

    #[test]
    fn given_any_text_when_parsing_then_no_empty_names_and_sorted() {
        let inputs = [
            "\n\n\nq\n\nw\ne\n\n",
            "  leading\ntrailing  ",
            "Émile\nadam\nZoe\n",
        ];
        for input in inputs {
            let roster = parse_roster(input);
            assert!(roster.iter().all(|n| !n.is_empty()));
            assert!(roster.windows(2).all(|w| w[0] <= w[1]), "{input:?}");
        }
    }

    #[test]
    fn given_present_name_when_marking_absent_then_moves_to_absentees() {
        let roster: Roster = ["Alice", "Bob"].into_iter().collect();

        let (roster, absentees) = mark_absent(&roster, &AbsenteeList::default(), "Alice");

        assert_eq!(&*roster, ["Bob"]);
        assert_eq!(&*absentees, ["Alice"]);
    }

    #[test]
    fn given_existing_absentees_when_marking_absent_then_list_stays_sorted() {
        let roster: Roster = ["Dana", "Carl", "Ann"].into_iter().collect();
        let absentees: AbsenteeList = ["Eve", "Bea"].into_iter().collect();

        let (roster, absentees) = mark_absent(&roster, &absentees, "Carl");

        assert_eq!(&*roster, ["Dana", "Ann"]);
        assert_eq!(&*absentees, ["Bea", "Carl", "Eve"]);
        assert_eq!(absentees.iter().filter(|n| *n == "Carl").count(), 1);
    }

    #[test]
    fn given_duplicate_name_when_marking_absent_then_removes_first_only() {
        let roster: Roster = ["x", "y", "x"].into_iter().collect();

        let (roster, _) = mark_absent(&roster, &AbsenteeList::default(), "x");

        assert_eq!(&*roster, ["y", "x"]);
    }

    #[test]
    fn given_missing_name_when_marking_absent_then_roster_unchanged_but_recorded() {
        let roster: Roster = ["Alice"].into_iter().collect();

        let (after, absentees) = mark_absent(&roster, &AbsenteeList::default(), "Mallory");

        assert_eq!(after, roster);
        assert_eq!(&*absentees, ["Mallory"]);
    }

    #[test]
    fn given_inputs_when_marking_absent_then_inputs_are_untouched() {
        let roster: Roster = ["Alice", "Bob"].into_iter().collect();
        let absentees = AbsenteeList::default();

        let _ = mark_absent(&roster, &absentees, "Bob");

        assert_eq!(roster.len(), 2);
        assert!(absentees.is_empty());
    }

    #[test]
    fn given_any_state_when_reset_then_both_empty() {
        let (roster, absentees) = reset();
        assert!(roster.is_empty());
        assert!(absentees.is_empty());
    }

    #[test]
    fn given_unsorted_json_when_deserializing_absentees_then_sorted() {
        let list: AbsenteeList = serde_json::from_str(r#"["b","a"]"#).unwrap();
        assert_eq!(&*list, ["a", "b"]);
    }
}
