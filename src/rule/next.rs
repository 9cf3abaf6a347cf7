/*!
Computes occurrences of a recurrence rule.

Everything here is pure date arithmetic over a rule and a reference
datetime. Whether the reference is a task's due date or its completion date
is the caller's business: absolute and relative rules are advanced in
exactly the same way.
*/

use {
    anyhow::Context,
    jiff::{
        Span,
        civil::{Date, DateTime, Weekday},
    },
};

use crate::weekdate::{self, WEEK_START};

use super::{Interval, RecurrenceRule};

/// Returns the next occurrence of `rule` after `reference`.
///
/// The time of day of the result is the rule's time when it has one, and
/// the reference's time of day otherwise.
///
/// This only fails when the next occurrence falls outside of the range of
/// dates supported by this program.
pub fn calculate(
    rule: &RecurrenceRule,
    reference: DateTime,
) -> anyhow::Result<DateTime> {
    let date = reference.date();
    let next = match rule.interval() {
        Interval::Day => add_days(date, i64::from(rule.count()))?,
        Interval::Week if rule.days().is_empty() => {
            add_days(date, i64::from(rule.count()) * 7)?
        }
        Interval::Week => next_weekday(rule, date)?,
        Interval::Month => next_month(rule, date)?,
        Interval::Year => next_year(rule, date)?,
    };
    let time = rule.time().unwrap_or_else(|| reference.time());
    log::trace!("next occurrence of `{rule}` after {reference} is {next}");
    Ok(next.to_datetime(time))
}

/// Returns true when an occurrence on `candidate` is still within the
/// rule's end date.
///
/// The end date is inclusive. Rules without an end date never stop.
pub fn should_create_next_instance(
    rule: &RecurrenceRule,
    candidate: Date,
) -> bool {
    rule.until().map_or(true, |until| until.includes(candidate))
}

/// An iterator over successive occurrences of a rule.
///
/// Each occurrence is computed from the previous one, starting with (but
/// not including) the reference given. Iteration stops at the rule's end
/// date, or when an occurrence can no longer be represented.
#[derive(Clone, Debug)]
pub struct Occurrences {
    rule: RecurrenceRule,
    current: Option<DateTime>,
}

impl Occurrences {
    pub fn new(rule: RecurrenceRule, start: DateTime) -> Occurrences {
        Occurrences { rule, current: Some(start) }
    }
}

impl Iterator for Occurrences {
    type Item = DateTime;

    fn next(&mut self) -> Option<DateTime> {
        let current = self.current.take()?;
        let next = match calculate(&self.rule, current) {
            Ok(next) => next,
            Err(err) => {
                log::debug!(
                    "stopping occurrences of `{}` after {current}: {err:#}",
                    self.rule,
                );
                return None;
            }
        };
        if !should_create_next_instance(&self.rule, next.date()) {
            log::debug!(
                "stopping occurrences of `{}` since {next} is after its \
                 end date",
                self.rule,
            );
            return None;
        }
        self.current = Some(next);
        Some(next)
    }
}

impl std::iter::FusedIterator for Occurrences {}

fn add_days(date: Date, days: i64) -> anyhow::Result<Date> {
    let span = Span::new()
        .try_days(days)
        .with_context(|| format!("{days} days is too big of an interval"))?;
    date.checked_add(span).with_context(|| {
        format!("adding {days} days to {date} is out of supported range")
    })
}

/// The earliest selected weekday strictly after `date` in its own week, or
/// failing that, the earliest selected weekday `count` weeks later.
fn next_weekday(rule: &RecurrenceRule, date: Date) -> anyhow::Result<Date> {
    let week_start = weekdate::first_of_week(WEEK_START, date)?;
    let today = date.weekday().to_sunday_zero_offset();
    let (week_start, day) =
        match rule.days().iter().copied().find(|&day| day > today) {
            Some(day) => (week_start, day),
            None => {
                let weeks = i64::from(rule.count()) * 7;
                (add_days(week_start, weeks)?, rule.days()[0])
            }
        };
    weekdate::in_week(week_start, Weekday::from_sunday_zero_offset(day)?)
}

fn next_month(rule: &RecurrenceRule, date: Date) -> anyhow::Result<Date> {
    let count = rule.count();
    let span = Span::new().try_months(count).with_context(|| {
        format!("{count} months is too big of an interval")
    })?;
    let first = date.first_of_month().checked_add(span).with_context(|| {
        format!("adding {count} months to {date} is out of supported range")
    })?;
    let day = clamp_day(first, rule.day_of_month().unwrap_or(date.day()));
    Ok(Date::new(first.year(), first.month(), day)?)
}

fn next_year(rule: &RecurrenceRule, date: Date) -> anyhow::Result<Date> {
    let count = rule.count();
    let year = i16::try_from(i32::from(date.year()) + count)
        .ok()
        .filter(|&year| year <= Date::MAX.year())
        .with_context(|| {
            format!("adding {count} years to {date} is out of supported range")
        })?;
    let month = rule.month_of_year().unwrap_or(date.month());
    let first = Date::new(year, month, 1)?;
    let day = clamp_day(first, rule.day_of_month().unwrap_or(date.day()));
    Ok(Date::new(year, month, day)?)
}

/// Resolves a day of the month (where `-1` means the last day) against the
/// month containing `first`, clamping to the month's length.
fn clamp_day(first: Date, day: i8) -> i8 {
    let last = first.days_in_month();
    if day == -1 { last } else { day.min(last) }
}
