/// An error that occurs when a recurrence phrase cannot be turned into a
/// recurrence rule.
///
/// There is no partial result and no recovery: callers should surface this
/// to the end user as a validation error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidRecurrence {
    kind: InvalidRecurrenceKind,
    /// The phrase exactly as it was given.
    text: Box<str>,
}

/// The reason a recurrence phrase was rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InvalidRecurrenceKind {
    /// The phrase was empty or only contained whitespace.
    Empty,
    /// The phrase didn't match any recognized recurrence grammar.
    Pattern,
    /// The phrase had an `until` suffix, but what followed it is not a date.
    Date { date: Box<str> },
}

impl InvalidRecurrence {
    pub(super) fn empty(text: &str) -> InvalidRecurrence {
        InvalidRecurrence { kind: InvalidRecurrenceKind::Empty, text: text.into() }
    }

    pub(super) fn pattern(text: &str) -> InvalidRecurrence {
        InvalidRecurrence {
            kind: InvalidRecurrenceKind::Pattern,
            text: text.into(),
        }
    }

    pub(super) fn date(text: &str, date: &str) -> InvalidRecurrence {
        InvalidRecurrence {
            kind: InvalidRecurrenceKind::Date { date: date.into() },
            text: text.into(),
        }
    }

    /// Returns why the phrase was rejected.
    pub fn kind(&self) -> &InvalidRecurrenceKind {
        &self.kind
    }
}

impl std::fmt::Display for InvalidRecurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.kind {
            InvalidRecurrenceKind::Empty => {
                write!(f, "recurrence pattern is empty")
            }
            InvalidRecurrenceKind::Pattern => {
                write!(f, "cannot parse recurrence pattern `{}`", self.text)
            }
            InvalidRecurrenceKind::Date { ref date } => write!(
                f,
                "invalid date `{date}` in recurrence pattern `{}`",
                self.text,
            ),
        }
    }
}

impl std::error::Error for InvalidRecurrence {}
