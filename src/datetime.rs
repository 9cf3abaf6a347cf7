use {
    anyhow::Context,
    bstr::{BStr, ByteSlice},
    jiff::{civil, fmt},
};

use crate::{
    NOW,
    args::Usage,
    parse::{BytesExt, FromBytes},
    rule::RecurrenceRule,
};

/// A civil datetime that occurrences are computed from or checked against.
///
/// References are always civil, i.e., they have no time zone. "Today" and
/// "now" are determined by the system time zone (which may be overridden by
/// the `TZ` environment variable).
///
/// This also tracks whether a time of day was given explicitly. When it
/// wasn't, the time is midnight and only the date is printed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Reference {
    dt: civil::DateTime,
    timed: bool,
}

impl Reference {
    pub const ARG_OR_STDIN: Usage = Usage::arg(
        "<date>",
        "A date to check, e.g., `2026-03-01` or `tomorrow`.",
        r#"
A date to check.

Dates can either be passed as positional arguments or as line delimited data
on stdin, but not both. That is, dates will only be read from stdin when there
are no dates provided as positional arguments.

Dates are written as `YYYY-MM-DD`, optionally followed by a time of day,
e.g., `2026-03-01T09:30`. Offsets and time zone annotations are not allowed.
The special strings `today`, `tomorrow`, `yesterday` and `now` are also
accepted.
"#,
    );

    pub const ARG_DUE: Usage = Usage::arg(
        "<due>",
        "The date the task was due, e.g., `2026-03-01`. Defaults to today.",
        r#"
The date the task was due.

For rules that repeat from the due date (the default), the next occurrence is
computed from this date. When absent, today is used.

Dates are written as `YYYY-MM-DD`, optionally followed by a time of day,
e.g., `2026-03-01T09:30`. Offsets and time zone annotations are not allowed.
The special strings `today`, `tomorrow`, `yesterday` and `now` are also
accepted.
"#,
    );

    pub const ARG_START: Usage = Usage::arg(
        "<start>",
        "The date to start from, e.g., `2026-03-01`. Defaults to today.",
        r#"
The date to start from.

Occurrences strictly after this date are printed. When absent, today is used.

Dates are written as `YYYY-MM-DD`, optionally followed by a time of day,
e.g., `2026-03-01T09:30`. Offsets and time zone annotations are not allowed.
The special strings `today`, `tomorrow`, `yesterday` and `now` are also
accepted.
"#,
    );

    pub const COMPLETED_FLAG: Usage = Usage::flag(
        "--completed <date>",
        "The date the task was actually completed.",
        r#"
The date the task was actually completed.

For rules that repeat from the completion date (phrases starting with
`every!`), the next occurrence is computed from this date instead of the due
date. For all other rules, this flag is ignored.

The date uses the same format as the `<due>` argument.
"#,
    );

    /// Returns the first instant of the current day.
    pub fn today() -> Reference {
        let dt = NOW.date().to_datetime(civil::Time::midnight());
        Reference { dt, timed: false }
    }

    /// Returns the current datetime.
    pub fn now() -> Reference {
        Reference { dt: NOW.datetime(), timed: true }
    }

    /// Creates a reference for an occurrence of `rule` computed from this
    /// one.
    ///
    /// The occurrence has a time of day when either this reference or the
    /// rule has one.
    pub fn occurrence(
        &self,
        rule: &RecurrenceRule,
        dt: civil::DateTime,
    ) -> Reference {
        Reference { dt, timed: self.timed || rule.time().is_some() }
    }

    pub fn get(&self) -> civil::DateTime {
        self.dt
    }

    pub fn date(&self) -> civil::Date {
        self.dt.date()
    }
}

impl Default for Reference {
    fn default() -> Reference {
        Reference::today()
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.timed {
            write!(
                f,
                "{}T{:02}:{:02}",
                self.dt.date(),
                self.dt.hour(),
                self.dt.minute(),
            )
        } else {
            write!(f, "{}", self.dt.date())
        }
    }
}

impl std::str::FromStr for Reference {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Reference> {
        s.as_bytes().parse()
    }
}

impl FromBytes for Reference {
    type Err = anyhow::Error;

    fn from_bytes(s: &[u8]) -> anyhow::Result<Reference> {
        let s = s.trim_ascii();
        match &*s.to_ascii_lowercase() {
            b"today" => return Ok(Reference::today()),
            b"now" => return Ok(Reference::now()),
            b"yesterday" | b"tomorrow" => {
                let today = Reference::today();
                let dt = if s.eq_ignore_ascii_case(b"yesterday") {
                    today.dt.yesterday()
                } else {
                    today.dt.tomorrow()
                };
                let dt = dt.with_context(|| {
                    format!("`{}` is out of supported range", s.as_bstr())
                })?;
                return Ok(Reference { dt, timed: false });
            }
            _ => {}
        }
        let pieces = fmt::temporal::Pieces::parse(s).with_context(|| {
            format!("unrecognized date `{}`", BStr::new(s))
        })?;
        // A date with an offset refers to an instant, but occurrences are
        // only ever computed on the civil calendar.
        anyhow::ensure!(
            pieces.offset().is_none()
                && pieces.time_zone_annotation().is_none(),
            "date `{}` must not have an offset or time zone annotation",
            BStr::new(s),
        );
        let time = pieces.time();
        let dt = pieces
            .date()
            .to_datetime(time.unwrap_or(civil::Time::midnight()));
        Ok(Reference { dt, timed: time.is_some() })
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use super::*;

    fn parse(s: &str) -> Reference {
        s.parse().unwrap()
    }

    #[test]
    fn civil_dates() {
        let r = parse("2026-01-14");
        assert_eq!(r.get(), date(2026, 1, 14).to_datetime(time(0, 0, 0, 0)));
        assert_eq!(r.to_string(), "2026-01-14");

        let r = parse(" 2026-01-14T09:30 ");
        assert_eq!(r.get(), date(2026, 1, 14).to_datetime(time(9, 30, 0, 0)));
        assert_eq!(r.to_string(), "2026-01-14T09:30");

        let r = parse("2026-01-14T09:30:45");
        assert_eq!(r.to_string(), "2026-01-14T09:30");
    }

    #[test]
    fn keywords_ignore_case_and_padding() {
        let today = Reference::today().date();
        assert_eq!(parse("\tToday ").date(), today);
        assert_eq!(parse(" TOMORROW\r").date(), today.tomorrow().unwrap());
        assert_eq!(parse("yesterday  ").to_string().len(), 10);
        assert_eq!(parse(" 2026-01-14\t").to_string(), "2026-01-14");
    }

    #[test]
    fn rejects_instants_and_garbage() {
        let err = "2026-01-14T09:30Z".parse::<Reference>().unwrap_err();
        insta::assert_snapshot!(
            err,
            @"date `2026-01-14T09:30Z` must not have an offset or time zone annotation",
        );
        assert!("2026-01-14T09:30-05:00".parse::<Reference>().is_err());
        assert!("2026-01-14[America/New_York]".parse::<Reference>().is_err());

        let err = "next week".parse::<Reference>().unwrap_err();
        insta::assert_snapshot!(err, @"unrecognized date `next week`");
        assert!("2026-02-30".parse::<Reference>().is_err());
    }

    #[test]
    fn occurrences_inherit_time() {
        let untimed = parse("2026-01-14");
        let timed = parse("2026-01-14T08:00");
        let dt = date(2026, 1, 15).to_datetime(time(8, 0, 0, 0));

        let rule: RecurrenceRule = "every day".parse().unwrap();
        assert_eq!(untimed.occurrence(&rule, dt).to_string(), "2026-01-15");
        assert_eq!(
            timed.occurrence(&rule, dt).to_string(),
            "2026-01-15T08:00",
        );

        let rule: RecurrenceRule = "every day at 8am".parse().unwrap();
        assert_eq!(
            untimed.occurrence(&rule, dt).to_string(),
            "2026-01-15T08:00",
        );
    }
}
