//! Domain error taxonomy
//!
//! Every domain constructor validates eagerly and fails with one of these
//! categorized errors instead of returning a partially-valid object. Errors
//! that an end user can act on (typos in a pasted block string, an import
//! file with a bad option index) additionally carry a user-facing message;
//! the rest are developer-facing only and should be logged.

use thiserror::Error;

/// Errors produced by the timetable domain model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Minute-of-day outside the `[0, 2880)` range.
    #[error("minute-of-day {0} is outside the valid range 0..2880")]
    TimeOutOfRange(i32),

    /// A time string that does not match `H:MM` / `HH:MM` (with optional `+`
    /// next-day marker).
    #[error("cannot parse time string {0:?}")]
    UnparsableTime(String),

    /// Days-since-Monday value outside `0..7`.
    #[error("invalid days-since-Monday value {0}")]
    InvalidDayNumber(i64),

    /// A day code that is not one of `mon`..`sun`.
    #[error("unknown day code {0:?}")]
    UnknownDayCode(String),

    /// `yesterday`/`tomorrow` would leave the valid time range.
    #[error("day shift would leave the valid time range")]
    DayShiftOutOfRange,

    /// Block duration outside `1..=1440` minutes.
    #[error("block duration of {0} minutes is outside 1..=1440")]
    DurationOutOfRange(i64),

    /// A block's start time must lie on the block's own day.
    #[error("block start time must not be a next-day time")]
    NextDayStart,

    /// A block string that does not match
    /// `"<day> <start> <duration><h|m> [online]"`.
    #[error("cannot parse block string {0:?}")]
    UnparsableBlock(String),

    /// A color name that is not one of the eight accents.
    #[error("unknown accent color {0:?}")]
    UnknownAccent(String),

    /// An option must contain at least one block.
    #[error("option has no blocks")]
    EmptyOption,

    /// An option must not contain the same block twice.
    #[error("option contains duplicate blocks")]
    DuplicateBlocks,

    /// An option's own blocks must not overlap in time.
    #[error("option contains blocks that clash with each other")]
    SelfClashingOption,

    /// A class must offer at least one option.
    #[error("class {0:?} has no options")]
    NoOptions(String),

    /// A class must not offer the same option twice.
    #[error("class {0:?} has duplicate options")]
    DuplicateOptions(String),

    /// Adding a class that is already present, where uniqueness is required.
    #[error("class {0:?} is already in the timetable")]
    DuplicateClass(String),

    /// An operation referenced a class that is not part of the timetable.
    #[error("class {0:?} is not part of the timetable")]
    UnknownClass(String),

    /// A choice referenced an option that is not one of the class's options.
    #[error("chosen option is not offered by class {0:?}")]
    ForeignOption(String),

    /// The choices passed to `TimetableChoices::new` do not cover the
    /// timetable's classes one-to-one.
    #[error("choices do not match the timetable classes one-to-one")]
    ChoiceMismatch,

    /// Two choices reference the same class.
    #[error("duplicate choice for class {0:?}")]
    DuplicateChoice(String),

    /// A stored option index is out of range for its class.
    #[error("option index {index} is out of range for class {class:?}")]
    ChoiceIndexOutOfRange { class: String, index: usize },

    /// An index array whose length does not match the class count.
    #[error("expected {expected} choice entries, got {got}")]
    ChoiceCountMismatch { expected: usize, got: usize },

    /// A snapshot document with a version this build does not understand.
    #[error("unsupported snapshot version {0:?}")]
    UnsupportedVersion(String),

    /// A snapshot document that is not structurally valid JSON for the
    /// expected schema.
    #[error("malformed snapshot document: {0}")]
    MalformedDocument(String),
}

impl DomainError {
    /// Short message suitable for surfacing directly in an editing or import
    /// UI, or `None` when the error indicates a programming mistake rather
    /// than bad user input.
    pub fn user_message(&self) -> Option<String> {
        match self {
            DomainError::UnparsableTime(s) => {
                Some(format!("\"{s}\" is not a valid time (use e.g. 9:30 or 13:00)"))
            }
            DomainError::UnknownDayCode(s) => {
                Some(format!("\"{s}\" is not a day (use mon, tue, wed, thu, fri, sat or sun)"))
            }
            DomainError::DurationOutOfRange(_) => {
                Some("durations must be between 1 minute and 24 hours".to_string())
            }
            DomainError::UnparsableBlock(s) => {
                Some(format!("\"{s}\" is not a valid block (use e.g. \"mon 13:00 2h online\")"))
            }
            DomainError::UnknownAccent(s) => Some(format!("\"{s}\" is not a known color")),
            DomainError::EmptyOption => Some("an option needs at least one block".to_string()),
            DomainError::DuplicateBlocks => {
                Some("an option lists the same block twice".to_string())
            }
            DomainError::SelfClashingOption => {
                Some("an option's blocks overlap each other".to_string())
            }
            DomainError::NoOptions(name) => {
                Some(format!("\"{name}\" needs at least one option"))
            }
            DomainError::DuplicateOptions(name) => {
                Some(format!("\"{name}\" lists the same option twice"))
            }
            DomainError::DuplicateClass(name) => {
                Some(format!("\"{name}\" is already in the timetable"))
            }
            DomainError::ChoiceIndexOutOfRange { class, .. } => {
                Some(format!("the saved choice for \"{class}\" does not exist"))
            }
            DomainError::UnsupportedVersion(v) => {
                Some(format!("this file uses an unsupported format version ({v})"))
            }
            DomainError::MalformedDocument(_) => {
                Some("this file is not a valid timetable".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_errors_carry_a_message() {
        let err = DomainError::UnparsableBlock("mon".to_string());
        assert!(err.user_message().is_some());

        let err = DomainError::UnsupportedVersion("9".to_string());
        assert!(err.user_message().unwrap().contains('9'));
    }

    #[test]
    fn internal_errors_have_no_user_message() {
        assert_eq!(DomainError::ChoiceMismatch.user_message(), None);
        assert_eq!(DomainError::DayShiftOutOfRange.user_message(), None);
    }

    #[test]
    fn display_includes_detail() {
        let err = DomainError::ChoiceIndexOutOfRange {
            class: "Algebra".to_string(),
            index: 4,
        };
        let text = err.to_string();
        assert!(text.contains("Algebra"));
        assert!(text.contains('4'));
    }
}
