use std::sync::Arc;

use {
    anyhow::Context,
    bstr::ByteSlice,
    jiff::civil::{Date, Time, Weekday},
};

use crate::{args::Usage, parse::FromBytes};

pub use self::error::{InvalidRecurrence, InvalidRecurrenceKind};

mod error;
mod names;
pub mod next;
pub mod phrase;

/// A recurrence rule, e.g., "every 2 weeks on Mon and Fri at 14:00".
///
/// A rule is created once, usually by parsing a human phrase with
/// `phrase::parse` (or equivalently, `str::parse`), and is never modified
/// afterwards. It is consumed by the routines in `next` in order to compute
/// occurrences.
///
/// Rules are cheap to clone.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(into = "RuleFields", try_from = "RuleFields")]
pub struct RecurrenceRule {
    inner: Arc<RecurrenceRuleInner>,
}

#[derive(Debug, Eq, PartialEq)]
struct RecurrenceRuleInner {
    original_text: Box<str>,
    kind: RecurrenceType,
    interval: Interval,
    count: i32,
    // sorted and deduplicated, 0 is Sunday
    days: Box<[i8]>,
    // -1 means the last day of the month
    day_of_month: Option<i8>,
    month_of_year: Option<i8>,
    time: Option<Time>,
    until: Option<Until>,
}

impl RecurrenceRule {
    pub const ARG: Usage = Usage::arg(
        "<rule>",
        "A recurrence phrase, e.g., `every 2 weeks on Mon, Fri`.",
        r#"
A recurrence rule.

This is usually a phrase, for example, `every 3 days`, `every Mon, Wed, Fri at
9am`, `every last day` or `every January 15 until 2027-03-01`. Matching is
case insensitive and extra whitespace is ignored.

Rules repeat from the original due date by default. Writing `every!` instead
of `every` makes a rule repeat from the completion date instead.

A rule previously printed by `recur parse --format json` is also accepted.
"#,
    );

    pub const ARG_OR_STDIN: Usage = Usage::arg(
        "<rule>",
        "A recurrence phrase, e.g., `every 2 weeks on Mon, Fri`.",
        r#"
A recurrence rule.

Rules can either be passed as positional arguments or as line delimited data
on stdin, but not both. That is, rules will only be read from stdin when there
are no rules provided as positional arguments. Blank lines are ignored.

A rule is usually a phrase, for example, `every 3 days`, `every Mon, Wed, Fri
at 9am`, `every last day` or `every January 15 until 2027-03-01`. Matching is
case insensitive and extra whitespace is ignored. A rule previously printed by
`recur parse --format json` is also accepted.
"#,
    );

    /// Returns a builder for constructing a `RecurrenceRule`.
    ///
    /// The interval is the only thing required to create a rule.
    pub fn builder(interval: Interval) -> RecurrenceRuleBuilder {
        RecurrenceRuleBuilder::new(interval)
    }

    /// Returns the text this rule was created from, verbatim.
    pub fn original_text(&self) -> &str {
        &self.inner.original_text
    }

    /// Returns whether this rule repeats from the due date or the
    /// completion date.
    pub fn kind(&self) -> RecurrenceType {
        self.inner.kind
    }

    pub fn interval(&self) -> Interval {
        self.inner.interval
    }

    /// Returns the number of intervals between occurrences. Always at
    /// least `1`.
    pub fn count(&self) -> i32 {
        self.inner.count
    }

    /// Returns the selected weekdays, in ascending order, as indices where
    /// `0` is Sunday and `6` is Saturday.
    ///
    /// This is only ever non-empty for weekly rules.
    pub fn days(&self) -> &[i8] {
        &self.inner.days
    }

    /// Returns the target day of the month. `-1` refers to the last day of
    /// the month.
    pub fn day_of_month(&self) -> Option<i8> {
        self.inner.day_of_month
    }

    pub fn month_of_year(&self) -> Option<i8> {
        self.inner.month_of_year
    }

    /// Returns the time of day that occurrences are stamped with, if any.
    pub fn time(&self) -> Option<Time> {
        self.inner.time
    }

    /// Returns the inclusive cutoff after which no more occurrences are
    /// generated, if any.
    pub fn until(&self) -> Option<Until> {
        self.inner.until
    }
}

impl std::str::FromStr for RecurrenceRule {
    type Err = InvalidRecurrence;

    fn from_str(s: &str) -> Result<RecurrenceRule, InvalidRecurrence> {
        phrase::parse(s)
    }
}

impl FromBytes for RecurrenceRule {
    type Err = anyhow::Error;

    /// Parses either a phrase or the JSON form of a rule.
    fn from_bytes(s: &[u8]) -> anyhow::Result<RecurrenceRule> {
        let s = s.to_str().with_context(|| {
            format!("recurrence rule `{}` is not valid UTF-8", s.as_bstr())
        })?;
        if s.trim_start().starts_with('{') {
            return serde_json::from_str(s).with_context(|| {
                format!("failed to parse `{s}` as a JSON recurrence rule")
            });
        }
        Ok(phrase::parse(s)?)
    }
}

/// Renders the canonical phrase for this rule.
///
/// Parsing the canonical phrase of a rule produced by the phrase parser
/// gives back an equivalent rule. (Only the original text differs.)
impl std::fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        fn unit(
            f: &mut std::fmt::Formatter,
            count: i32,
            unit: &str,
        ) -> std::fmt::Result {
            if count == 1 {
                write!(f, " {unit}")
            } else {
                write!(f, " {count} {unit}s")
            }
        }

        let rule = &*self.inner;
        f.write_str("every")?;
        if rule.kind == RecurrenceType::Relative {
            f.write_str("!")?;
        }
        unit(f, rule.count, rule.interval.as_str())?;
        match rule.interval {
            Interval::Day => {}
            Interval::Week => {
                for (i, &day) in rule.days.iter().enumerate() {
                    f.write_str(if i == 0 { " on " } else { ", " })?;
                    f.write_str(names::weekday_abbreviation(day))?;
                }
            }
            Interval::Month => match rule.day_of_month {
                None => {}
                Some(-1) => f.write_str(" on the last day")?,
                Some(day) => write!(f, " on the {}", names::Ordinal(day))?,
            },
            Interval::Year => {
                let month = rule.month_of_year.map(names::month_name);
                match (month, rule.day_of_month) {
                    (None, _) => {}
                    (Some(month), None) => write!(f, " in {month}")?,
                    (Some(month), Some(-1)) => {
                        write!(f, " on the last day of {month}")?
                    }
                    (Some(month), Some(day)) => {
                        write!(f, " on {month} {day}")?
                    }
                }
            }
        }
        if let Some(time) = rule.time {
            write!(f, " at {}", Clock(time))?;
        }
        match rule.until {
            None => {}
            Some(Until::Date(date)) => write!(f, " until {date}")?,
            Some(Until::MonthDay { month, day }) => {
                write!(f, " until {} {day}", names::month_name(month))?
            }
        }
        Ok(())
    }
}

/// A builder for constructing a valid recurrence rule.
#[derive(Clone, Debug)]
pub struct RecurrenceRuleBuilder {
    original_text: Option<String>,
    kind: RecurrenceType,
    interval: Interval,
    count: i32,
    days: Vec<Weekday>,
    day_of_month: Option<i8>,
    month_of_year: Option<i8>,
    time: Option<Time>,
    until: Option<Until>,
}

impl RecurrenceRuleBuilder {
    fn new(interval: Interval) -> RecurrenceRuleBuilder {
        RecurrenceRuleBuilder {
            original_text: None,
            kind: RecurrenceType::Absolute,
            interval,
            count: 1,
            days: vec![],
            day_of_month: None,
            month_of_year: None,
            time: None,
            until: None,
        }
    }

    /// Checks every invariant of a recurrence rule and builds it.
    ///
    /// When no original text was given, the rule's canonical phrase is used.
    pub fn build(&self) -> anyhow::Result<RecurrenceRule> {
        anyhow::ensure!(
            self.count >= 1,
            "count value of `{}` is invalid \
             (count must be greater than or equal to 1)",
            self.count,
        );
        anyhow::ensure!(
            self.days.is_empty() || self.interval == Interval::Week,
            "weekdays can only be used with a weekly interval, \
             but the interval is `{}`",
            self.interval.as_str(),
        );
        if let Some(v) = self.day_of_month {
            anyhow::ensure!(
                v == -1 || (1 <= v && v <= 31),
                "invalid day of the month `{v}` \
                 (values must be in range 1..=31, or -1 for the last day)",
            );
        }
        if let Some(v) = self.month_of_year {
            anyhow::ensure!(
                1 <= v && v <= 12,
                "invalid month of the year `{v}` \
                 (values must be in range 1..=12)",
            );
        }
        anyhow::ensure!(
            self.day_of_month.is_none()
                || matches!(self.interval, Interval::Month | Interval::Year),
            "a day of the month can only be used with a monthly or yearly \
             interval, but the interval is `{}`",
            self.interval.as_str(),
        );
        anyhow::ensure!(
            self.month_of_year.is_none() || self.interval == Interval::Year,
            "a month of the year can only be used with a yearly interval, \
             but the interval is `{}`",
            self.interval.as_str(),
        );
        if self.interval == Interval::Year {
            match (self.month_of_year, self.day_of_month) {
                (None, Some(day)) => anyhow::bail!(
                    "a yearly rule with a day of the month `{day}` \
                     must also have a month of the year",
                ),
                (Some(month), Some(day)) if day >= 1 => {
                    Date::new(2000, month, day).with_context(|| {
                        format!(
                            "day `{day}` does not exist in month `{month}`",
                        )
                    })?;
                }
                _ => {}
            }
        }
        if let Some(Until::MonthDay { month, day }) = self.until {
            // Any year will do, as long as it's a leap year.
            Date::new(2000, month, day).with_context(|| {
                format!("invalid end date without a year `{month}-{day}`")
            })?;
        }
        let time = match self.time {
            None => None,
            Some(t) => Some(Time::new(t.hour(), t.minute(), 0, 0)?),
        };

        let mut days: Vec<i8> =
            self.days.iter().map(|wd| wd.to_sunday_zero_offset()).collect();
        days.sort();
        days.dedup();
        let inner = Arc::new(RecurrenceRuleInner {
            original_text: self.original_text.as_deref().unwrap_or("").into(),
            kind: self.kind,
            interval: self.interval,
            count: self.count,
            days: days.into_boxed_slice(),
            day_of_month: self.day_of_month,
            month_of_year: self.month_of_year,
            time,
            until: self.until,
        });
        let mut rule = RecurrenceRule { inner };
        if self.original_text.is_none() {
            let canonical = rule.to_string();
            // Nothing else can be holding on to a rule we just created.
            if let Some(inner) = Arc::get_mut(&mut rule.inner) {
                inner.original_text = canonical.into();
            }
        }
        Ok(rule)
    }

    pub fn original_text(&mut self, text: &str) -> &mut RecurrenceRuleBuilder {
        self.original_text = Some(text.to_string());
        self
    }

    pub fn kind(&mut self, kind: RecurrenceType) -> &mut RecurrenceRuleBuilder {
        self.kind = kind;
        self
    }

    pub fn count(&mut self, count: i32) -> &mut RecurrenceRuleBuilder {
        self.count = count;
        self
    }

    pub fn by_week_day(
        &mut self,
        weekdays: impl IntoIterator<Item = Weekday>,
    ) -> &mut RecurrenceRuleBuilder {
        self.days.extend(weekdays);
        self
    }

    pub fn day_of_month(&mut self, day: i8) -> &mut RecurrenceRuleBuilder {
        self.day_of_month = Some(day);
        self
    }

    pub fn month_of_year(&mut self, month: i8) -> &mut RecurrenceRuleBuilder {
        self.month_of_year = Some(month);
        self
    }

    pub fn time(&mut self, time: Time) -> &mut RecurrenceRuleBuilder {
        self.time = Some(time);
        self
    }

    pub fn until(&mut self, until: Until) -> &mut RecurrenceRuleBuilder {
        self.until = Some(until);
        self
    }
}

/// Whether a rule repeats from the original due date or from the date a
/// task was actually completed.
///
/// The calculator treats both kinds identically. It's up to the caller to
/// pick the reference date accordingly.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceType {
    /// The next occurrence is computed from the original due date.
    #[default]
    Absolute,
    /// The next occurrence is computed from the completion date, so delays
    /// shift all future occurrences.
    Relative,
}

impl RecurrenceType {
    pub fn as_str(&self) -> &'static str {
        match *self {
            RecurrenceType::Absolute => "absolute",
            RecurrenceType::Relative => "relative",
        }
    }
}

/// The unit a rule repeats in.
#[derive(
    Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Day,
    Week,
    Month,
    Year,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Interval::Day => "day",
            Interval::Week => "week",
            Interval::Month => "month",
            Interval::Year => "year",
        }
    }
}

/// The inclusive end of a recurrence.
///
/// A phrase like `until December 31` doesn't say which year it means. In
/// that case, only the month and day are kept and the cutoff applies within
/// whatever year a candidate date falls in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Until {
    Date(Date),
    MonthDay { month: i8, day: i8 },
}

impl Until {
    /// Returns true when the given candidate is on or before this cutoff.
    pub fn includes(&self, candidate: Date) -> bool {
        match *self {
            Until::Date(end) => candidate <= end,
            Until::MonthDay { month, day } => {
                (candidate.month(), candidate.day()) <= (month, day)
            }
        }
    }
}

impl std::fmt::Display for Until {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Until::Date(date) => write!(f, "{date}"),
            // This is the ISO 8601 spelling of a date without a year.
            Until::MonthDay { month, day } => write!(f, "--{month:02}-{day:02}"),
        }
    }
}

impl std::str::FromStr for Until {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Until> {
        let Some(month_day) = s.strip_prefix("--") else {
            let date = s.parse::<Date>().with_context(|| {
                format!("failed to parse end date `{s}`")
            })?;
            return Ok(Until::Date(date));
        };
        let (month, day) = month_day
            .split_once('-')
            .with_context(|| format!("invalid end date without a year `{s}`"))?;
        let month = month
            .parse::<i8>()
            .with_context(|| format!("invalid month in end date `{s}`"))?;
        let day = day
            .parse::<i8>()
            .with_context(|| format!("invalid day in end date `{s}`"))?;
        Date::new(2000, month, day)
            .with_context(|| format!("invalid end date without a year `{s}`"))?;
        Ok(Until::MonthDay { month, day })
    }
}

/// Renders a time of day as `HH:MM`.
#[derive(Clone, Copy, Debug)]
struct Clock(Time);

impl std::fmt::Display for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

fn parse_clock(s: &str) -> anyhow::Result<Time> {
    let (hour, minute) = s
        .split_once(':')
        .with_context(|| format!("time `{s}` is not of the form `HH:MM`"))?;
    let hour = hour
        .parse::<i8>()
        .with_context(|| format!("invalid hour in time `{s}`"))?;
    let minute = minute
        .parse::<i8>()
        .with_context(|| format!("invalid minute in time `{s}`"))?;
    Time::new(hour, minute, 0, 0).with_context(|| format!("invalid time `{s}`"))
}

/// The flat form of a rule, as it is stored next to a task.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuleFields {
    #[serde(default)]
    original_text: Option<String>,
    #[serde(rename = "type", default)]
    kind: RecurrenceType,
    interval: Interval,
    #[serde(default = "RuleFields::default_count")]
    count: i32,
    #[serde(default)]
    days: Vec<i8>,
    #[serde(default)]
    day_of_month: Option<i8>,
    #[serde(default)]
    month_of_year: Option<i8>,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
}

impl RuleFields {
    fn default_count() -> i32 {
        1
    }
}

impl From<RecurrenceRule> for RuleFields {
    fn from(rule: RecurrenceRule) -> RuleFields {
        RuleFields {
            original_text: Some(rule.original_text().to_string()),
            kind: rule.kind(),
            interval: rule.interval(),
            count: rule.count(),
            days: rule.days().to_vec(),
            day_of_month: rule.day_of_month(),
            month_of_year: rule.month_of_year(),
            time: rule.time().map(|t| Clock(t).to_string()),
            end_date: rule.until().map(|until| until.to_string()),
        }
    }
}

impl TryFrom<RuleFields> for RecurrenceRule {
    type Error = anyhow::Error;

    fn try_from(fields: RuleFields) -> anyhow::Result<RecurrenceRule> {
        let mut b = RecurrenceRule::builder(fields.interval);
        b.kind(fields.kind).count(fields.count);
        if let Some(ref text) = fields.original_text {
            b.original_text(text);
        }
        for &index in fields.days.iter() {
            let weekday = Weekday::from_sunday_zero_offset(index)
                .with_context(|| {
                    format!(
                        "invalid weekday `{index}` \
                         (values must be in range 0..=6, where 0 is Sunday)"
                    )
                })?;
            b.by_week_day([weekday]);
        }
        if let Some(day) = fields.day_of_month {
            b.day_of_month(day);
        }
        if let Some(month) = fields.month_of_year {
            b.month_of_year(month);
        }
        if let Some(ref time) = fields.time {
            b.time(parse_clock(time)?);
        }
        if let Some(ref end_date) = fields.end_date {
            b.until(end_date.parse()?);
        }
        b.build()
    }
}
